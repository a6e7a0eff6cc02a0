//! Application bootstrapping based on the [ioc_beans] container.
//!
//! Instead of wiring the bean factory by hand, an application creates an
//! [ApplicationContext](context::ApplicationContext), which reads its [configuration](config),
//! installs logging, loads bean descriptors and optionally creates all singletons up front. The
//! context then serves beans by name until it is closed.

pub mod config;
pub mod context;
