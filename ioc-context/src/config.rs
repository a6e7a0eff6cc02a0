//! Context configuration is represented by [ContextConfig], which an
//! [ApplicationContext](crate::context::ApplicationContext) uses to configure itself.
//!
//! By default, the config is created with opinionated default values, which can then be overwritten
//! by the `ioc.json` file, and then by environment variables prefixed with `IOC_`, e.g.
//! `IOC_DESCRIPTOR_LOCATIONS=beans.json,more-beans.toml`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const CONFIG_ENV_PREFIX: &str = "IOC";

/// Name of the default config file.
pub const CONFIG_FILE: &str = "ioc.json";

/// Context configuration.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContextConfig {
    /// Should a default tracing logger be installed when creating the context.
    pub install_tracing_logger: bool,
    /// Bean descriptors to load on each refresh, in order.
    pub descriptor_locations: Vec<String>,
    /// Can a definition be replaced by registering another one with the same name.
    pub allow_bean_definition_overriding: bool,
    /// Should singletons be created eagerly on refresh, instead of on first request.
    pub pre_instantiate_singletons: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            install_tracing_logger: true,
            descriptor_locations: vec![],
            allow_bean_definition_overriding: true,
            pre_instantiate_singletons: true,
        }
    }
}

impl From<OptionalContextConfig> for ContextConfig {
    fn from(value: OptionalContextConfig) -> Self {
        let default = Self::default();
        Self {
            install_tracing_logger: value
                .install_tracing_logger
                .unwrap_or(default.install_tracing_logger),
            descriptor_locations: value
                .descriptor_locations
                .unwrap_or(default.descriptor_locations),
            allow_bean_definition_overriding: value
                .allow_bean_definition_overriding
                .unwrap_or(default.allow_bean_definition_overriding),
            pre_instantiate_singletons: value
                .pre_instantiate_singletons
                .unwrap_or(default.pre_instantiate_singletons),
        }
    }
}

impl ContextConfig {
    /// Reads the config from [CONFIG_FILE] and the environment.
    pub fn init_from_environment() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("descriptor_locations"),
            )
            .build()
            .and_then(|config| config.try_deserialize::<OptionalContextConfig>())
            .map(|config| config.into())
    }

    pub fn with_install_tracing_logger(mut self, install_tracing_logger: bool) -> Self {
        self.install_tracing_logger = install_tracing_logger;
        self
    }

    pub fn with_descriptor_location<T: ToString>(mut self, location: T) -> Self {
        self.descriptor_locations.push(location.to_string());
        self
    }

    pub fn with_allow_bean_definition_overriding(mut self, allow: bool) -> Self {
        self.allow_bean_definition_overriding = allow;
        self
    }

    pub fn with_pre_instantiate_singletons(mut self, pre_instantiate: bool) -> Self {
        self.pre_instantiate_singletons = pre_instantiate;
        self
    }
}

#[derive(Deserialize, Default)]
struct OptionalContextConfig {
    install_tracing_logger: Option<bool>,
    descriptor_locations: Option<Vec<String>>,
    allow_bean_definition_overriding: Option<bool>,
    pre_instantiate_singletons: Option<bool>,
}

#[cfg(test)]
mod tests {
    use crate::config::{ContextConfig, OptionalContextConfig};

    #[test]
    fn should_fill_missing_values_with_defaults() {
        let config = ContextConfig::from(OptionalContextConfig {
            descriptor_locations: Some(vec!["beans.json".to_string()]),
            pre_instantiate_singletons: Some(false),
            ..Default::default()
        });

        assert!(config.install_tracing_logger);
        assert!(config.allow_bean_definition_overriding);
        assert!(!config.pre_instantiate_singletons);
        assert_eq!(config.descriptor_locations, vec!["beans.json".to_string()]);
    }

    #[test]
    fn should_build_config() {
        let config = ContextConfig::default()
            .with_install_tracing_logger(false)
            .with_descriptor_location("a.json")
            .with_descriptor_location("b.toml")
            .with_allow_bean_definition_overriding(false)
            .with_pre_instantiate_singletons(false);

        assert!(!config.install_tracing_logger);
        assert!(!config.allow_bean_definition_overriding);
        assert!(!config.pre_instantiate_singletons);
        assert_eq!(
            config.descriptor_locations,
            vec!["a.json".to_string(), "b.toml".to_string()]
        );
    }
}
