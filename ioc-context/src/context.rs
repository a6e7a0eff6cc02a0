//! Core application context functionality.

use crate::config::ContextConfig;
use config::ConfigError;
use ioc_beans::bean::Injectable;
use ioc_beans::bean_registry::{
    BeanDefinitionRegistry, BeanTypeRegistry, DefaultBeanDefinitionRegistry,
};
use ioc_beans::definition::BeanDefinition;
use ioc_beans::descriptor::DescriptorReader;
use ioc_beans::error::{BeanCreationError, BeanDefinitionError, DescriptorError};
use ioc_beans::factory::{BeanDefinitionRegistryPtr, BeanFactoryBuilder};
use ioc_beans::instance_provider::BeanPtr;
use ioc_beans::sync::SyncBeanFactory;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum ContextError {
    #[error("Error reading context configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Error loading bean descriptor '{location}': {source}")]
    Descriptor {
        location: String,
        #[source]
        source: DescriptorError,
    },
    #[error(transparent)]
    BeanDefinition(#[from] BeanDefinitionError),
    #[error(transparent)]
    BeanCreation(#[from] BeanCreationError),
    #[error("Application context has been closed")]
    Closed,
}

fn install_tracing_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        debug!("Global tracing logger already installed");
    }
}

/// Entrypoint for applications using the container. Creates a [factory](SyncBeanFactory), fills
/// it with definitions from configured descriptors and makes beans available until closed.
///
/// Bean types deriving `Bean` are registered automatically, so descriptors can refer to them by
/// name.
pub struct ApplicationContext {
    config: ContextConfig,
    types: BeanTypeRegistry,
    factory: Option<SyncBeanFactory>,
}

impl ApplicationContext {
    /// Creates and [refreshes](ApplicationContext::refresh) a context with given config.
    pub fn new(config: ContextConfig) -> Result<Self, ContextError> {
        if config.install_tracing_logger {
            install_tracing_logger();
        }

        let mut context = Self {
            config,
            types: BeanTypeRegistry::from_inventory(),
            factory: None,
        };
        context.refresh()?;

        Ok(context)
    }

    /// Creates a context with config read from the environment.
    pub fn from_environment() -> Result<Self, ContextError> {
        Self::new(ContextConfig::init_from_environment()?)
    }

    /// Creates a context with config read from the environment, additionally loading given
    /// descriptor.
    pub fn with_descriptor<P: AsRef<Path>>(location: P) -> Result<Self, ContextError> {
        Self::new(
            ContextConfig::init_from_environment()?
                .with_descriptor_location(location.as_ref().display()),
        )
    }

    /// Loads all definitions again from the configured descriptors into a new factory, which
    /// then replaces the current one. Also reopens a closed context.
    ///
    /// On error, the current factory stays in place with all its definitions and instances.
    pub fn refresh(&mut self) -> Result<(), ContextError> {
        info!("Refreshing application context...");

        let mut factory = BeanFactoryBuilder::new()
            .with_definition_registry(Box::new(DefaultBeanDefinitionRegistry::new(
                self.config.allow_bean_definition_overriding,
            )) as BeanDefinitionRegistryPtr)
            .build();

        for location in &self.config.descriptor_locations {
            DescriptorReader::new(&mut factory, &self.types)
                .load_bean_definitions(location)
                .map_err(|source| ContextError::Descriptor {
                    location: location.clone(),
                    source,
                })?;
        }

        if self.config.pre_instantiate_singletons {
            factory.pre_instantiate_singletons()?;
        }

        info!(
            beans = factory.bean_definition_names().len(),
            "Application context ready"
        );

        if let Some(previous) = self.factory.replace(factory.into()) {
            previous.reset();
        }

        Ok(())
    }

    /// Registers a definition programmatically, next to the ones from descriptors.
    pub fn register_bean_definition(
        &self,
        name: &str,
        definition: BeanDefinition,
    ) -> Result<(), ContextError> {
        self.factory()?
            .register_bean_definition(name, definition)
            .map_err(Into::into)
    }

    /// Returns the bean with given name, cast to `T`.
    pub fn bean<T: Injectable + ?Sized>(&self, name: &str) -> Result<BeanPtr<T>, ContextError> {
        self.factory()?
            .instance_by_name_typed::<T>(name)
            .map_err(Into::into)
    }

    pub fn contains_bean(&self, name: &str) -> bool {
        self.factory
            .as_ref()
            .map(|factory| factory.contains_bean(name))
            .unwrap_or(false)
    }

    /// Names of all registered definitions, sorted. Empty for a closed context.
    pub fn bean_definition_names(&self) -> Vec<String> {
        self.factory
            .as_ref()
            .map(SyncBeanFactory::bean_definition_names)
            .unwrap_or_default()
    }

    /// Bean types known to the context.
    #[inline]
    pub fn bean_types(&self) -> &BeanTypeRegistry {
        &self.types
    }

    #[inline]
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Drops all cached instances. Further requests fail until the context is refreshed.
    pub fn close(&mut self) {
        if let Some(factory) = self.factory.take() {
            info!("Closing application context...");
            factory.reset();
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.factory.is_some()
    }

    fn factory(&self) -> Result<&SyncBeanFactory, ContextError> {
        self.factory.as_ref().ok_or(ContextError::Closed)
    }
}

impl Drop for ApplicationContext {
    fn drop(&mut self) {
        self.close();
    }
}
