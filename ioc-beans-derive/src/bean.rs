use crate::attributes::{DefaultDefinition, FieldAttributes};
use convert_case::{Case, Casing};
use itertools::Itertools;
use proc_macro2::TokenStream;
use quote::quote;
use std::ops::Deref;
use syn::spanned::Spanned;
use syn::{
    Data, DataStruct, DeriveInput, Error, Field, Fields, GenericArgument, Item, PathArguments,
    Result, Type,
};

struct Property<'a> {
    name: String,
    field: &'a Field,
}

fn single_generic_argument<'a>(ty: &'a Type, wrappers: &[&str]) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };

    let segment = path.path.segments.last()?;
    if !wrappers.iter().any(|wrapper| segment.ident == *wrapper) {
        return None;
    }

    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };

    match arguments.args.iter().exactly_one() {
        Ok(GenericArgument::Type(inner)) => Some(inner),
        _ => None,
    }
}

fn generate_conversion(ty: &Type) -> TokenStream {
    match single_generic_argument(ty, &["Option"]) {
        Some(inner) if single_generic_argument(inner, &["BeanPtr", "Arc"]).is_some() => quote! {
            Some(value.into_bean::<<#inner as ::std::ops::Deref>::Target>(name)?)
        },
        Some(inner) => quote! {
            Some(value.into_literal::<#inner>(name)?)
        },
        None => quote! {
            value.into_literal::<#ty>(name)?
        },
    }
}

fn generate_construction(attributes: &FieldAttributes) -> TokenStream {
    match &attributes.default {
        Some(DefaultDefinition::Expr(path)) => quote!(#path()),
        _ => quote!(::std::default::Default::default()),
    }
}

pub fn expand_bean(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(DataStruct { fields, .. }) = &input.data else {
        return Err(Error::new(input.span(), "Can only derive Bean on structs!"));
    };

    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "Generic beans are not supported!",
        ));
    }

    let ident = &input.ident;
    let mut properties = vec![];
    let construction = match fields {
        Fields::Named(fields) => {
            let initializers: Vec<_> = fields
                .named
                .iter()
                .map(|field| -> Result<TokenStream> {
                    let attributes = FieldAttributes::from_field(field)?;
                    let field_ident = field
                        .ident
                        .as_ref()
                        .ok_or_else(|| Error::new(field.span(), "Missing field name!"))?;

                    if !attributes.ignore {
                        let name = attributes
                            .property
                            .as_ref()
                            .map(|name| name.value())
                            .unwrap_or_else(|| field_ident.to_string().to_case(Case::Camel));
                        properties.push(Property { name, field });
                    }

                    let value = generate_construction(&attributes);
                    Ok(quote! {
                        #field_ident: #value
                    })
                })
                .try_collect()?;

            quote! {
                Self {
                    #(#initializers),*
                }
            }
        }
        Fields::Unit => quote! { Self },
        Fields::Unnamed(_) => {
            return Err(Error::new(
                fields.span(),
                "Beans need named fields for property injection!",
            ))
        }
    };

    if let Some(duplicate) = properties.iter().map(|p| &p.name).duplicates().next() {
        return Err(Error::new(
            input.span(),
            format!("Duplicated bean property: {duplicate}"),
        ));
    }

    let names = properties.iter().map(|property| &property.name).collect_vec();
    let setters = properties
        .iter()
        .map(|property| {
            let name = &property.name;
            let field_ident = &property.field.ident;
            let conversion = generate_conversion(&property.field.ty);
            quote! {
                #name => {
                    self.#field_ident = #conversion;
                    Ok(())
                }
            }
        })
        .collect_vec();

    Ok(quote! {
        #[automatically_derived]
        impl ioc_beans::bean::Injectable for #ident {}

        #[automatically_derived]
        impl ioc_beans::bean::BeanDowncast<#ident> for #ident {
            fn downcast(
                source: ioc_beans::instance_provider::BeanAnyPtr,
            ) -> Result<ioc_beans::instance_provider::BeanPtr<Self>, ioc_beans::instance_provider::BeanAnyPtr> {
                source.downcast()
            }
        }

        #[automatically_derived]
        impl ioc_beans::bean::Bean for #ident {
            fn properties() -> &'static [&'static str] {
                &[#(#names),*]
            }

            fn instantiate() -> Result<Self, ioc_beans::instance_provider::ErrorPtr> {
                Ok(#construction)
            }

            #[allow(unused_variables)]
            fn set_property(
                &mut self,
                name: &str,
                value: ioc_beans::instance_provider::PropertyArgument,
            ) -> Result<(), ioc_beans::error::PropertyError> {
                match name {
                    #(#setters)*
                    _ => Err(ioc_beans::error::PropertyError::UnknownProperty(name.to_string())),
                }
            }
        }

        const _: () = {
            fn register() -> ioc_beans::definition::BeanType {
                ioc_beans::definition::BeanType::of::<#ident>()
            }

            ioc_beans::bean_registry::internal::submit! {
                ioc_beans::bean_registry::internal::BeanTypeRegisterer {
                    register
                }
            };
        };
    })
}

pub fn expand_injectable(item: &Item) -> Result<TokenStream> {
    let Item::Trait(item_trait) = item else {
        return Err(Error::new(
            item.span(),
            "Only traits can be marked as injectable!",
        ));
    };

    if !item_trait.generics.params.is_empty() {
        return Err(Error::new(
            item_trait.generics.span(),
            "Generic injectable traits are not supported!",
        ));
    }

    let ident = &item_trait.ident;
    Ok(quote! {
        #item

        #[automatically_derived]
        impl ioc_beans::bean::Injectable for dyn #ident + Send + Sync {}
    })
}

pub fn register_bean_alias(item: &Item) -> Result<TokenStream> {
    let Item::Impl(item_impl) = item else {
        return Err(Error::new(
            item.span(),
            "Registering aliases for beans is possible only on trait implementations!",
        ));
    };

    let trait_type = item_impl
        .trait_
        .as_ref()
        .map(|(_, path, ..)| path)
        .ok_or_else(|| Error::new(item.span(), "Missing trait identifier!"))?;

    let target_type = if let Type::Path(path) = item_impl.self_ty.deref() {
        &path.path
    } else {
        return Err(Error::new(
            item.span(),
            "Registering aliases is only available for Beans!",
        ));
    };

    Ok(quote! {
        #item

        #[automatically_derived]
        impl ioc_beans::bean::BeanDowncast<#target_type> for dyn #trait_type + Send + Sync {
            fn downcast(
                source: ioc_beans::instance_provider::BeanAnyPtr,
            ) -> Result<ioc_beans::instance_provider::BeanPtr<Self>, ioc_beans::instance_provider::BeanAnyPtr> {
                source
                    .downcast::<#target_type>()
                    .map(|p| p as ioc_beans::instance_provider::BeanPtr<Self>)
            }
        }

        const _: () = {
            fn register() -> ioc_beans::bean_registry::internal::BeanAliasDefinition {
                ioc_beans::bean_registry::internal::BeanAliasDefinition::of::<dyn #trait_type + Send + Sync, #target_type>()
            }

            ioc_beans::bean_registry::internal::submit! {
                ioc_beans::bean_registry::internal::BeanAliasRegisterer {
                    register
                }
            };
        };
    })
}
