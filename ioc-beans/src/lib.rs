//! A minimal bean container. Beans are registered by name as [definitions](definition), either
//! programmatically or from a [descriptor], and then resolved by a [factory](factory::BeanFactory)
//! which creates them, injects their properties and caches them according to their
//! [scope].

pub mod bean;
pub mod bean_registry;
pub mod definition;
pub mod descriptor;
pub mod error;
pub mod factory;
pub mod instance_provider;
pub mod scope;
pub mod sync;

#[cfg(feature = "derive")]
pub use ioc_beans_derive::{bean_alias, injectable, Bean};
