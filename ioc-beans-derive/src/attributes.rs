use syn::{Attribute, Error, ExprPath, Field, LitStr, Result, Token};

const BEAN: &str = "bean";

pub enum DefaultDefinition {
    Default,
    Expr(ExprPath),
}

#[derive(Default)]
pub struct FieldAttributes {
    pub property: Option<LitStr>,
    pub default: Option<DefaultDefinition>,
    pub ignore: bool,
}

impl FieldAttributes {
    /// Merges all `#[bean(...)]` attributes of given field.
    pub fn from_field(field: &Field) -> Result<Self> {
        let mut result = Self::default();
        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident(BEAN)) {
            result.merge(attr)?;
        }

        Ok(result)
    }

    fn merge(&mut self, attr: &Attribute) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                if meta.input.peek(Token![=]) {
                    let value = meta.value()?;
                    let expr: LitStr = value.parse()?;
                    self.default = Some(DefaultDefinition::Expr(expr.parse()?));
                } else {
                    self.default = Some(DefaultDefinition::Default);
                }
            } else if meta.path.is_ident("property") {
                let name: LitStr = meta.value()?.parse()?;
                if name.value().trim().is_empty() {
                    return Err(Error::new(name.span(), "Property name cannot be empty!"));
                }

                self.property = Some(name);
            } else if meta.path.is_ident("ignore") {
                self.ignore = true;
            } else {
                return Err(meta.error("Unsupported bean attribute!"));
            }

            Ok(())
        })
    }
}
