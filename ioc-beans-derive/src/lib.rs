use crate::bean::{expand_bean, expand_injectable, register_bean_alias};
use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput, Error, Item};

mod attributes;
mod bean;

/// Implements `Bean` along with all the infrastructure and registers the type for use in
/// descriptors. Supports `#[bean(property = "name", default = "path", ignore)]` on fields.
#[proc_macro_derive(Bean, attributes(bean))]
pub fn generate_bean(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_bean(&input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

/// Marks a trait as injectable, so `dyn Trait + Send + Sync` can be requested from the container.
#[proc_macro_attribute]
pub fn injectable(_attr: TokenStream, input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as Item);
    expand_injectable(&item)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

/// Registers a trait implementation as an alias for the bean, so it can be injected as
/// `dyn Trait + Send + Sync`.
#[proc_macro_attribute]
pub fn bean_alias(_attr: TokenStream, input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as Item);
    register_bean_alias(&item)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}
