//! Core functionality for creating [Bean](crate::bean::Bean) instances.

use crate::bean_registry::{BeanDefinitionRegistry, DefaultBeanDefinitionRegistry};
use crate::definition::{BeanDefinition, PropertyValue};
use crate::error::{BeanCreationError, BeanDefinitionError};
use crate::instance_provider::{
    BeanAnyPtr, BeanInstanceProvider, PropertyArgument, ResolvedBean,
};
use crate::scope::{
    PrototypeScopeFactory, ScopeFactory, ScopePtr, SingletonScopeFactory, PROTOTYPE, SINGLETON,
};
use fxhash::{FxHashMap, FxHashSet};
use tracing::debug;

pub type BeanDefinitionRegistryPtr = Box<dyn BeanDefinitionRegistry + Send + Sync>;

pub type ScopeFactoryPtr = Box<dyn ScopeFactory + Send + Sync>;

pub type ScopeFactoryRegistry = FxHashMap<String, ScopeFactoryPtr>;

/// Builder for [BeanFactory] with sensible defaults, for easy construction.
pub struct BeanFactoryBuilder {
    definition_registry: BeanDefinitionRegistryPtr,
    scope_factories: ScopeFactoryRegistry,
}

impl Default for BeanFactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BeanFactoryBuilder {
    /// Creates a new builder with a default configuration: an empty
    /// [DefaultBeanDefinitionRegistry] allowing overriding, and the [SINGLETON] and [PROTOTYPE]
    /// scopes.
    pub fn new() -> Self {
        Self {
            definition_registry: Box::<DefaultBeanDefinitionRegistry>::default(),
            scope_factories: [
                (
                    SINGLETON.to_string(),
                    Box::<SingletonScopeFactory>::default() as ScopeFactoryPtr,
                ),
                (
                    PROTOTYPE.to_string(),
                    Box::<PrototypeScopeFactory>::default() as ScopeFactoryPtr,
                ),
            ]
            .into_iter()
            .collect(),
        }
    }

    /// Sets new [BeanDefinitionRegistry].
    pub fn with_definition_registry(mut self, definition_registry: BeanDefinitionRegistryPtr) -> Self {
        self.definition_registry = definition_registry;
        self
    }

    /// Sets new scope factories.
    pub fn with_scope_factories(mut self, scope_factories: ScopeFactoryRegistry) -> Self {
        self.scope_factories = scope_factories;
        self
    }

    /// Adds a new scope factory.
    pub fn with_scope_factory<T: ToString>(mut self, name: T, factory: ScopeFactoryPtr) -> Self {
        self.scope_factories.insert(name.to_string(), factory);
        self
    }

    /// Builds resulting [BeanFactory].
    pub fn build(self) -> BeanFactory {
        BeanFactory::new(self.definition_registry, self.scope_factories)
    }
}

/// Generic factory for [Bean](crate::bean::Bean) instances. Uses definitions from the
/// [BeanDefinitionRegistry] and [scopes](crate::scope) to create and store instances for reuse.
///
/// The factory is a registry itself - registering or removing a definition through it also evicts
/// instances cached for that name.
pub struct BeanFactory {
    definition_registry: BeanDefinitionRegistryPtr,
    scope_factories: ScopeFactoryRegistry,
    scopes: FxHashMap<String, ScopePtr>,
    beans_in_creation: FxHashSet<String>,
}

impl BeanFactory {
    /// Creates a new factory with given registry and scope factories. The factory map should
    /// include built-in [SINGLETON] and [PROTOTYPE] for maximum compatibility with definitions,
    /// since [SINGLETON] is the default scope.
    pub fn new(
        definition_registry: BeanDefinitionRegistryPtr,
        scope_factories: ScopeFactoryRegistry,
    ) -> Self {
        Self {
            definition_registry,
            scope_factories,
            scopes: Default::default(),
            beans_in_creation: Default::default(),
        }
    }

    /// Checks if a bean with given name can be requested.
    #[inline]
    pub fn contains_bean(&self, name: &str) -> bool {
        self.definition_registry.contains_bean_definition(name)
    }

    /// Drops all cached instances, while keeping definitions intact.
    pub fn reset(&mut self) {
        debug!("Dropping all cached bean instances");
        for scope in self.scopes.values_mut() {
            scope.clear();
        }
    }

    /// Eagerly creates all beans with [SINGLETON] scope, in name order.
    pub fn pre_instantiate_singletons(&mut self) -> Result<(), BeanCreationError> {
        for name in self.definition_registry.bean_definition_names() {
            let definition = self.definition(&name)?;
            if definition.scope_name == SINGLETON {
                self.create_bean(&name, &definition)?;
            }
        }

        Ok(())
    }

    fn definition(&self, name: &str) -> Result<BeanDefinition, BeanCreationError> {
        self.definition_registry
            .bean_definition(name)
            .map_err(|_| BeanCreationError::NoSuchBean(name.to_string()))
    }

    fn scope(&mut self, bean: &str, scope_name: &str) -> Result<&mut ScopePtr, BeanCreationError> {
        if !self.scopes.contains_key(scope_name) {
            let factory = self.scope_factories.get(scope_name).ok_or_else(|| {
                BeanCreationError::UnrecognizedScope {
                    bean: bean.to_string(),
                    scope: scope_name.to_string(),
                }
            })?;

            self.scopes
                .insert(scope_name.to_string(), factory.create_scope());
        }

        self.scopes
            .get_mut(scope_name)
            .ok_or_else(|| BeanCreationError::UnrecognizedScope {
                bean: bean.to_string(),
                scope: scope_name.to_string(),
            })
    }

    fn create_bean(
        &mut self,
        name: &str,
        definition: &BeanDefinition,
    ) -> Result<ResolvedBean, BeanCreationError> {
        if self.beans_in_creation.contains(name) {
            return Err(BeanCreationError::CircularDependency(name.to_string()));
        }

        if let Some(instance) = self.scope(name, &definition.scope_name)?.instance(name) {
            debug!(bean = name, "Returning cached bean instance");
            return Ok(ResolvedBean::new(
                name,
                instance,
                definition.bean_type.casts.clone(),
            ));
        }

        self.beans_in_creation.insert(name.to_string());
        let instance = self.instantiate(name, definition);
        self.beans_in_creation.remove(name);

        let instance = instance?;

        self.scope(name, &definition.scope_name)?
            .store_instance(name, instance.clone());

        Ok(ResolvedBean::new(
            name,
            instance,
            definition.bean_type.casts.clone(),
        ))
    }

    fn instantiate(
        &mut self,
        name: &str,
        definition: &BeanDefinition,
    ) -> Result<BeanAnyPtr, BeanCreationError> {
        debug!(
            bean = name,
            bean_type = definition.bean_type.type_name,
            "Creating bean instance"
        );

        let mut bean = (definition.bean_type.instantiate)().map_err(|error| {
            BeanCreationError::InstantiationFailed {
                bean: name.to_string(),
                reason: error.to_string(),
            }
        })?;

        for property in &definition.properties {
            let argument = match &property.value {
                PropertyValue::Literal(value) => PropertyArgument::Literal(value.clone()),
                PropertyValue::Reference(reference) => {
                    PropertyArgument::Bean(self.instance_by_name(reference)?)
                }
            };

            bean.apply_property(&property.name, argument)
                .map_err(|source| BeanCreationError::InvalidProperty {
                    bean: name.to_string(),
                    source,
                })?;
        }

        Ok(bean.into_shared())
    }

    fn evict(&mut self, name: &str) {
        for scope in self.scopes.values_mut() {
            scope.remove_instance(name);
        }
    }
}

impl BeanInstanceProvider for BeanFactory {
    fn instance_by_name(&mut self, name: &str) -> Result<ResolvedBean, BeanCreationError> {
        let definition = self.definition(name)?;
        self.create_bean(name, &definition)
    }
}

impl BeanDefinitionRegistry for BeanFactory {
    fn register_bean_definition(
        &mut self,
        name: &str,
        definition: BeanDefinition,
    ) -> Result<(), BeanDefinitionError> {
        self.definition_registry
            .register_bean_definition(name, definition)?;
        self.evict(name);
        Ok(())
    }

    #[inline]
    fn bean_definition(&self, name: &str) -> Result<BeanDefinition, BeanDefinitionError> {
        self.definition_registry.bean_definition(name)
    }

    fn remove_bean_definition(
        &mut self,
        name: &str,
    ) -> Result<BeanDefinition, BeanDefinitionError> {
        let definition = self.definition_registry.remove_bean_definition(name)?;
        self.evict(name);
        Ok(definition)
    }

    #[inline]
    fn contains_bean_definition(&self, name: &str) -> bool {
        self.definition_registry.contains_bean_definition(name)
    }

    #[inline]
    fn bean_definition_names(&self) -> Vec<String> {
        self.definition_registry.bean_definition_names()
    }
}
