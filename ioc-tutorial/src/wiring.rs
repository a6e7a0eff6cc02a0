//! The two ways of telling the container how [UserService](crate::service::UserService) gets its
//! DAO.

use crate::dao::UserDaoImpl;
use crate::service::UserService;
use ioc_beans::bean_registry::{BeanDefinitionRegistry, BeanTypeRegistry};
use ioc_beans::definition::{BeanDefinition, PropertyValue};
use ioc_beans::descriptor::DescriptorReader;
use ioc_beans::error::{BeanDefinitionError, DescriptorError};
use ioc_context::config::ContextConfig;
use std::path::Path;

pub const USER_SERVICE: &str = "userService";

pub const USER_DAO: &str = "userDAO";

/// Descriptor equivalent to [bind_via_code], relative to the working directory.
pub const DESCRIPTOR_LOCATION: &str = "resources/applicationContext-ioc-bean.json";

/// Adds [DESCRIPTOR_LOCATION] unless the config already names descriptors (e.g. from
/// `IOC_DESCRIPTOR_LOCATIONS`).
pub fn with_default_descriptor(config: ContextConfig) -> ContextConfig {
    if config.descriptor_locations.is_empty() {
        config.with_descriptor_location(DESCRIPTOR_LOCATION)
    } else {
        config
    }
}

/// Registers the user beans programmatically, injecting the DAO with a setter.
pub fn bind_via_code<R: BeanDefinitionRegistry + ?Sized>(
    registry: &mut R,
) -> Result<(), BeanDefinitionError> {
    // the referenced DAO doesn't need to be registered yet
    registry.register_bean_definition(
        USER_SERVICE,
        BeanDefinition::of::<UserService>()
            .with_property("userDAO", PropertyValue::reference(USER_DAO)),
    )?;
    registry.register_bean_definition(USER_DAO, BeanDefinition::of::<UserDaoImpl>())
}

/// Registers the user beans from a descriptor.
pub fn bind_via_descriptor<R, P>(
    registry: &mut R,
    types: &BeanTypeRegistry,
    location: P,
) -> Result<usize, DescriptorError>
where
    R: BeanDefinitionRegistry + ?Sized,
    P: AsRef<Path>,
{
    DescriptorReader::new(registry, types).load_bean_definitions(location)
}

#[cfg(test)]
mod tests {
    use crate::wiring::{with_default_descriptor, DESCRIPTOR_LOCATION};
    use ioc_context::config::ContextConfig;

    #[test]
    fn should_use_default_descriptor_when_none_configured() {
        let config = with_default_descriptor(ContextConfig::default());
        assert_eq!(
            config.descriptor_locations,
            vec![DESCRIPTOR_LOCATION.to_string()]
        );
        assert!(!config.descriptor_locations[0].starts_with('/'));
    }

    #[test]
    fn should_keep_configured_descriptors() {
        let config =
            with_default_descriptor(ContextConfig::default().with_descriptor_location("beans.toml"));
        assert_eq!(config.descriptor_locations, vec!["beans.toml".to_string()]);
    }
}
