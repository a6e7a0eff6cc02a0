//! Functionality related to registering [BeanDefinition]s by name. A
//! [BeanInstanceProvider](crate::instance_provider::BeanInstanceProvider) creates beans based on
//! those definitions, which can be registered programmatically or loaded from a
//! [descriptor](crate::descriptor).
//!
//! Descriptors refer to bean types by name, so they also need a [BeanTypeRegistry], which is
//! automatically filled with every type deriving `Bean`.

use crate::bean::Bean;
use crate::bean_registry::internal::BeanTypeRegisterer;
use crate::definition::{BeanDefinition, BeanType};
use crate::error::BeanDefinitionError;
use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;
#[cfg(test)]
use mockall::automock;
use tracing::{debug, warn};

/// A registry of bean definitions which can be used when requesting instances via a
/// [BeanInstanceProvider](crate::instance_provider::BeanInstanceProvider).
#[cfg_attr(test, automock)]
pub trait BeanDefinitionRegistry {
    /// Registers a definition under given name. An existing definition with the same name is
    /// replaced, unless the registry forbids overriding.
    fn register_bean_definition(
        &mut self,
        name: &str,
        definition: BeanDefinition,
    ) -> Result<(), BeanDefinitionError>;

    /// Returns the definition with given name.
    fn bean_definition(&self, name: &str) -> Result<BeanDefinition, BeanDefinitionError>;

    /// Removes the definition with given name.
    fn remove_bean_definition(&mut self, name: &str)
        -> Result<BeanDefinition, BeanDefinitionError>;

    /// Checks if there's a definition with given name.
    fn contains_bean_definition(&self, name: &str) -> bool;

    /// Returns sorted names of all registered definitions.
    fn bean_definition_names(&self) -> Vec<String>;
}

/// Default in-memory [BeanDefinitionRegistry].
#[derive(Clone, Debug)]
pub struct DefaultBeanDefinitionRegistry {
    definitions: FxHashMap<String, BeanDefinition>,
    allow_definition_overriding: bool,
}

impl Default for DefaultBeanDefinitionRegistry {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DefaultBeanDefinitionRegistry {
    pub fn new(allow_definition_overriding: bool) -> Self {
        Self {
            definitions: Default::default(),
            allow_definition_overriding,
        }
    }
}

impl BeanDefinitionRegistry for DefaultBeanDefinitionRegistry {
    fn register_bean_definition(
        &mut self,
        name: &str,
        definition: BeanDefinition,
    ) -> Result<(), BeanDefinitionError> {
        if name.trim().is_empty() {
            return Err(BeanDefinitionError::EmptyBeanName);
        }

        if let Some(existing) = self.definitions.get(name) {
            if !self.allow_definition_overriding {
                return Err(BeanDefinitionError::DuplicateBeanName(name.to_string()));
            }

            warn!(
                bean = name,
                previous = existing.bean_type.type_name,
                current = definition.bean_type.type_name,
                "Overriding bean definition"
            );
        }

        debug!(
            bean = name,
            bean_type = definition.bean_type.type_name,
            "Registering bean definition"
        );

        self.definitions.insert(name.to_string(), definition);
        Ok(())
    }

    #[inline]
    fn bean_definition(&self, name: &str) -> Result<BeanDefinition, BeanDefinitionError> {
        self.definitions
            .get(name)
            .cloned()
            .ok_or_else(|| BeanDefinitionError::NoSuchBeanDefinition(name.to_string()))
    }

    #[inline]
    fn remove_bean_definition(
        &mut self,
        name: &str,
    ) -> Result<BeanDefinition, BeanDefinitionError> {
        self.definitions
            .remove(name)
            .ok_or_else(|| BeanDefinitionError::NoSuchBeanDefinition(name.to_string()))
    }

    #[inline]
    fn contains_bean_definition(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    #[inline]
    fn bean_definition_names(&self) -> Vec<String> {
        self.definitions.keys().cloned().sorted().collect()
    }
}

/// Registry of constructible [BeanType]s, addressable by their full type name and, if it is
/// unambiguous, by their simple name.
#[derive(Clone, Debug, Default)]
pub struct BeanTypeRegistry {
    types: FxHashMap<String, BeanType>,
    ambiguous_names: FxHashSet<String>,
}

impl BeanTypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry containing all types with derived [Bean] implementations.
    pub fn from_inventory() -> Self {
        let mut registry = Self::new();
        for registerer in inventory::iter::<BeanTypeRegisterer> {
            registry.register_type((registerer.register)());
        }

        registry
    }

    #[inline]
    pub fn register<B: Bean>(&mut self) {
        self.register_type(BeanType::of::<B>());
    }

    pub fn register_type(&mut self, bean_type: BeanType) {
        let simple_name = bean_type.simple_name();
        if simple_name != bean_type.type_name && !self.ambiguous_names.contains(simple_name) {
            let is_ambiguous = self
                .types
                .get(simple_name)
                .map(|existing| existing.type_id != bean_type.type_id)
                .unwrap_or(false);

            if is_ambiguous {
                warn!(
                    name = simple_name,
                    "Ambiguous bean type name - use the full type name instead"
                );

                self.types.remove(simple_name);
                self.ambiguous_names.insert(simple_name.to_string());
            } else {
                self.types.insert(simple_name.to_string(), bean_type.clone());
            }
        }

        self.types.insert(bean_type.type_name.to_string(), bean_type);
    }

    #[inline]
    pub fn bean_type(&self, name: &str) -> Option<&BeanType> {
        self.types.get(name)
    }
}

#[doc(hidden)]
pub mod internal {
    use crate::bean::{Bean, BeanDowncast};
    use crate::definition::{cast_bean, BeanType};
    use crate::instance_provider::CastFunction;
    use inventory::collect;
    pub use inventory::submit;
    use std::any::TypeId;

    pub struct BeanTypeRegisterer {
        pub register: fn() -> BeanType,
    }

    #[derive(Clone, Copy)]
    pub struct BeanAliasDefinition {
        pub alias_type: TypeId,
        pub target_type: TypeId,
        pub cast: CastFunction,
    }

    impl BeanAliasDefinition {
        pub fn of<Alias: BeanDowncast<B> + ?Sized, B: Bean>() -> Self {
            Self {
                alias_type: TypeId::of::<Alias>(),
                target_type: TypeId::of::<B>(),
                cast: cast_bean::<Alias, B>,
            }
        }
    }

    pub struct BeanAliasRegisterer {
        pub register: fn() -> BeanAliasDefinition,
    }

    collect!(BeanTypeRegisterer);
    collect!(BeanAliasRegisterer);
}

#[cfg(test)]
mod tests {
    use crate::bean::{Bean, BeanDowncast, Injectable};
    use crate::bean_registry::{
        BeanDefinitionRegistry, BeanTypeRegistry, DefaultBeanDefinitionRegistry,
    };
    use crate::definition::{BeanDefinition, BeanType};
    use crate::error::{BeanDefinitionError, ErrorKind, PropertyError};
    use crate::instance_provider::{BeanAnyPtr, BeanPtr, ErrorPtr, PropertyArgument};
    use std::any::TypeId;

    mod first {
        use super::*;

        pub struct TestBean;

        impl Injectable for TestBean {}

        impl BeanDowncast<TestBean> for TestBean {
            fn downcast(source: BeanAnyPtr) -> Result<BeanPtr<Self>, BeanAnyPtr> {
                source.downcast()
            }
        }

        impl Bean for TestBean {
            fn properties() -> &'static [&'static str] {
                &[]
            }

            fn instantiate() -> Result<Self, ErrorPtr> {
                Ok(TestBean)
            }

            fn set_property(
                &mut self,
                name: &str,
                _value: PropertyArgument,
            ) -> Result<(), PropertyError> {
                Err(PropertyError::UnknownProperty(name.to_string()))
            }
        }
    }

    mod second {
        use super::*;

        pub struct TestBean;

        impl Injectable for TestBean {}

        impl BeanDowncast<TestBean> for TestBean {
            fn downcast(source: BeanAnyPtr) -> Result<BeanPtr<Self>, BeanAnyPtr> {
                source.downcast()
            }
        }

        impl Bean for TestBean {
            fn properties() -> &'static [&'static str] {
                &[]
            }

            fn instantiate() -> Result<Self, ErrorPtr> {
                Ok(TestBean)
            }

            fn set_property(
                &mut self,
                name: &str,
                _value: PropertyArgument,
            ) -> Result<(), PropertyError> {
                Err(PropertyError::UnknownProperty(name.to_string()))
            }
        }
    }

    use first::TestBean;

    #[test]
    fn should_register_definition() {
        let mut registry = DefaultBeanDefinitionRegistry::default();
        registry
            .register_bean_definition("a", BeanDefinition::of::<TestBean>())
            .unwrap();

        assert!(registry.contains_bean_definition("a"));
        assert_eq!(
            registry.bean_definition("a").unwrap().bean_type.type_id,
            TypeId::of::<TestBean>()
        );
        assert_eq!(registry.bean_definition_names(), vec!["a".to_string()]);
    }

    #[test]
    fn should_not_find_missing_definition() {
        let registry = DefaultBeanDefinitionRegistry::default();
        let error = registry.bean_definition("a").unwrap_err();

        assert_eq!(
            error,
            BeanDefinitionError::NoSuchBeanDefinition("a".to_string())
        );
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn should_reject_empty_names() {
        let mut registry = DefaultBeanDefinitionRegistry::default();
        for name in ["", "  "] {
            let error = registry
                .register_bean_definition(name, BeanDefinition::of::<TestBean>())
                .unwrap_err();

            assert_eq!(error, BeanDefinitionError::EmptyBeanName);
            assert_eq!(error.kind(), ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn should_override_duplicate_name() {
        let mut registry = DefaultBeanDefinitionRegistry::default();
        registry
            .register_bean_definition("a", BeanDefinition::of::<TestBean>())
            .unwrap();
        registry
            .register_bean_definition("a", BeanDefinition::of::<second::TestBean>())
            .unwrap();

        assert_eq!(
            registry.bean_definition("a").unwrap().bean_type.type_id,
            TypeId::of::<second::TestBean>()
        );
        assert_eq!(registry.bean_definition_names().len(), 1);
    }

    #[test]
    fn should_not_register_duplicate_name() {
        let mut registry = DefaultBeanDefinitionRegistry::new(false);
        registry
            .register_bean_definition("a", BeanDefinition::of::<TestBean>())
            .unwrap();

        assert_eq!(
            registry
                .register_bean_definition("a", BeanDefinition::of::<TestBean>())
                .unwrap_err(),
            BeanDefinitionError::DuplicateBeanName("a".to_string())
        );
    }

    #[test]
    fn should_remove_definition() {
        let mut registry = DefaultBeanDefinitionRegistry::default();
        registry
            .register_bean_definition("a", BeanDefinition::of::<TestBean>())
            .unwrap();

        registry.remove_bean_definition("a").unwrap();
        assert!(!registry.contains_bean_definition("a"));
        assert_eq!(
            registry.remove_bean_definition("a").unwrap_err(),
            BeanDefinitionError::NoSuchBeanDefinition("a".to_string())
        );
    }

    #[test]
    fn should_register_types_by_simple_and_full_name() {
        let mut types = BeanTypeRegistry::new();
        types.register::<TestBean>();

        let bean_type = BeanType::of::<TestBean>();
        assert!(types.bean_type("TestBean").is_some());
        assert!(types.bean_type(bean_type.type_name).is_some());
    }

    #[test]
    fn should_drop_ambiguous_simple_names() {
        let mut types = BeanTypeRegistry::new();
        types.register::<first::TestBean>();
        types.register::<second::TestBean>();
        types.register::<first::TestBean>();

        assert!(types.bean_type("TestBean").is_none());
        assert_eq!(
            types
                .bean_type(BeanType::of::<second::TestBean>().type_name)
                .unwrap()
                .type_id,
            TypeId::of::<second::TestBean>()
        );
    }
}
