//! Definitions describing how to construct and configure beans.

use crate::bean::{Bean, BeanDowncast, BeanObjectPtr};
use crate::bean_registry::internal::BeanAliasRegisterer;
use crate::bean_registry::BeanTypeRegistry;
use crate::error::BeanDefinitionError;
use crate::instance_provider::{BeanAnyPtr, CastFunction, ErrorPtr};
use crate::scope::SINGLETON;
use derivative::Derivative;
use fxhash::FxHashMap;
use std::any::{type_name, Any, TypeId};

/// Constructible type metadata for a [Bean].
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct BeanType {
    pub type_id: TypeId,

    /// Fully qualified type name, as returned by [type_name].
    pub type_name: &'static str,

    /// Names of all properties the type accepts.
    pub properties: &'static [&'static str],

    /// Constructor for type-erased instances.
    #[derivative(Debug = "ignore")]
    pub instantiate: fn() -> Result<BeanObjectPtr, ErrorPtr>,

    /// Casts to the concrete type and all registered aliases.
    #[derivative(Debug = "ignore")]
    pub casts: FxHashMap<TypeId, CastFunction>,
}

impl BeanType {
    /// Creates metadata for `B`, including all aliases registered with `#[bean_alias]`.
    pub fn of<B: Bean>() -> Self {
        let type_id = TypeId::of::<B>();
        let mut casts: FxHashMap<TypeId, CastFunction> = inventory::iter::<BeanAliasRegisterer>
            .into_iter()
            .map(|registerer| (registerer.register)())
            .filter(|alias| alias.target_type == type_id)
            .map(|alias| (alias.alias_type, alias.cast))
            .collect();
        casts.insert(type_id, cast_bean::<B, B>);

        Self {
            type_id,
            type_name: type_name::<B>(),
            properties: B::properties(),
            instantiate: instantiate_bean::<B>,
            casts,
        }
    }

    /// Registers `Alias` as a type which instances of `B` can be injected as.
    pub fn with_alias<Alias: BeanDowncast<B> + ?Sized, B: Bean>(mut self) -> Self {
        debug_assert_eq!(self.type_id, TypeId::of::<B>());
        self.casts.insert(TypeId::of::<Alias>(), cast_bean::<Alias, B>);
        self
    }

    /// Type name without the module path.
    pub fn simple_name(&self) -> &'static str {
        self.type_name
            .rsplit("::")
            .next()
            .unwrap_or(self.type_name)
    }

    #[inline]
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains(&name)
    }
}

fn instantiate_bean<B: Bean>() -> Result<BeanObjectPtr, ErrorPtr> {
    B::instantiate().map(|bean| Box::new(bean) as BeanObjectPtr)
}

pub(crate) fn cast_bean<Alias: BeanDowncast<B> + ?Sized, B: Bean>(
    instance: BeanAnyPtr,
) -> Result<Box<dyn Any>, BeanAnyPtr> {
    Alias::downcast(instance).map(|p| Box::new(p) as Box<dyn Any>)
}

/// Value assigned to a property.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum PropertyValue {
    /// Plain value, converted by the bean to the property type.
    Literal(String),
    /// Name of another bean.
    Reference(String),
}

impl PropertyValue {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference(name.into())
    }
}

#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct PropertyDefinition {
    pub name: String,
    pub value: PropertyValue,
}

/// Definition of a bean registered in a
/// [BeanDefinitionRegistry](crate::bean_registry::BeanDefinitionRegistry).
#[derive(Clone, Debug)]
pub struct BeanDefinition {
    pub bean_type: BeanType,

    /// Name of the [scope](crate::scope) storing instances; [SINGLETON] by default.
    pub scope_name: String,

    /// Properties to apply after instantiation, in order.
    pub properties: Vec<PropertyDefinition>,
}

impl BeanDefinition {
    pub fn new(bean_type: BeanType) -> Self {
        Self {
            bean_type,
            scope_name: SINGLETON.to_string(),
            properties: Vec::new(),
        }
    }

    #[inline]
    pub fn of<B: Bean>() -> Self {
        Self::new(BeanType::of::<B>())
    }

    /// Creates a definition for a type registered under given name.
    pub fn for_type_name(
        types: &BeanTypeRegistry,
        name: &str,
    ) -> Result<Self, BeanDefinitionError> {
        types
            .bean_type(name)
            .cloned()
            .map(Self::new)
            .ok_or_else(|| BeanDefinitionError::UnknownBeanType(name.to_string()))
    }

    /// Sets a property, replacing any previous value for the same name while keeping its
    /// position. Properties are not validated until the bean is created.
    pub fn set_property(&mut self, name: impl Into<String>, value: PropertyValue) -> &mut Self {
        let name = name.into();
        if let Some(property) = self
            .properties
            .iter_mut()
            .find(|property| property.name == name)
        {
            property.value = value;
        } else {
            self.properties.push(PropertyDefinition { name, value });
        }

        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.set_property(name, value);
        self
    }

    pub fn with_scope(mut self, scope_name: impl Into<String>) -> Self {
        self.scope_name = scope_name.into();
        self
    }

    /// Names of all beans referenced by properties.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .filter_map(|property| match &property.value {
                PropertyValue::Reference(name) => Some(name.as_str()),
                PropertyValue::Literal(_) => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use crate::bean::{Bean, BeanDowncast, Injectable};
    use crate::bean_registry::BeanTypeRegistry;
    use crate::definition::{BeanDefinition, BeanType, PropertyDefinition, PropertyValue};
    use crate::error::{BeanDefinitionError, ErrorKind, PropertyError};
    use crate::instance_provider::{BeanAnyPtr, BeanPtr, ErrorPtr, PropertyArgument};
    use crate::scope::{PROTOTYPE, SINGLETON};
    use std::any::TypeId;

    trait Named {}

    impl Injectable for dyn Named + Send + Sync {}

    struct Plain;

    impl Named for Plain {}

    impl Injectable for Plain {}

    impl BeanDowncast<Plain> for Plain {
        fn downcast(source: BeanAnyPtr) -> Result<BeanPtr<Self>, BeanAnyPtr> {
            source.downcast()
        }
    }

    impl BeanDowncast<Plain> for dyn Named + Send + Sync {
        fn downcast(source: BeanAnyPtr) -> Result<BeanPtr<Self>, BeanAnyPtr> {
            source
                .downcast::<Plain>()
                .map(|p| p as BeanPtr<dyn Named + Send + Sync>)
        }
    }

    impl Bean for Plain {
        fn properties() -> &'static [&'static str] {
            &["label"]
        }

        fn instantiate() -> Result<Self, ErrorPtr> {
            Ok(Plain)
        }

        fn set_property(
            &mut self,
            name: &str,
            _value: PropertyArgument,
        ) -> Result<(), PropertyError> {
            Err(PropertyError::UnknownProperty(name.to_string()))
        }
    }

    #[test]
    fn should_describe_bean_type() {
        let bean_type = BeanType::of::<Plain>();

        assert_eq!(bean_type.type_id, TypeId::of::<Plain>());
        assert_eq!(bean_type.simple_name(), "Plain");
        assert!(bean_type.has_property("label"));
        assert!(!bean_type.has_property("other"));
        assert!(bean_type.casts.contains_key(&TypeId::of::<Plain>()));
    }

    #[test]
    fn should_register_aliases() {
        let bean_type = BeanType::of::<Plain>().with_alias::<dyn Named + Send + Sync, Plain>();
        assert!(bean_type
            .casts
            .contains_key(&TypeId::of::<dyn Named + Send + Sync>()));
    }

    #[test]
    fn should_replace_properties_in_place() {
        let definition = BeanDefinition::of::<Plain>()
            .with_property("a", PropertyValue::literal("1"))
            .with_property("b", PropertyValue::reference("other"))
            .with_property("a", PropertyValue::literal("2"));

        assert_eq!(
            definition.properties,
            vec![
                PropertyDefinition {
                    name: "a".to_string(),
                    value: PropertyValue::literal("2"),
                },
                PropertyDefinition {
                    name: "b".to_string(),
                    value: PropertyValue::reference("other"),
                },
            ]
        );
        assert_eq!(definition.references().collect::<Vec<_>>(), vec!["other"]);
    }

    #[test]
    fn should_default_to_singleton_scope() {
        assert_eq!(BeanDefinition::of::<Plain>().scope_name, SINGLETON);
        assert_eq!(
            BeanDefinition::of::<Plain>()
                .with_scope(PROTOTYPE)
                .scope_name,
            PROTOTYPE
        );
    }

    #[test]
    fn should_create_definition_for_registered_type_name() {
        let mut types = BeanTypeRegistry::new();
        types.register::<Plain>();

        let definition = BeanDefinition::for_type_name(&types, "Plain").unwrap();
        assert_eq!(definition.bean_type.type_id, TypeId::of::<Plain>());

        let error = BeanDefinition::for_type_name(&types, "Missing").unwrap_err();
        assert_eq!(
            error,
            BeanDefinitionError::UnknownBeanType("Missing".to_string())
        );
        assert_eq!(error.kind(), ErrorKind::InvalidDefinition);
    }
}
