//! Thread-safe access to a [BeanFactory].
//!
//! A single lock guards the whole factory, so concurrent first requests for a singleton observe
//! exactly one instance.

use crate::bean::Injectable;
use crate::bean_registry::BeanDefinitionRegistry;
use crate::definition::BeanDefinition;
use crate::error::{BeanCreationError, BeanDefinitionError};
use crate::factory::BeanFactory;
use crate::instance_provider::{
    BeanInstanceProvider, BeanPtr, ResolvedBean, TypedBeanInstanceProvider,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shareable handle to a [BeanFactory]. Cloning the handle shares the underlying factory.
#[derive(Clone)]
pub struct SyncBeanFactory {
    factory: Arc<Mutex<BeanFactory>>,
}

impl SyncBeanFactory {
    pub fn new(factory: BeanFactory) -> Self {
        Self {
            factory: Arc::new(Mutex::new(factory)),
        }
    }

    pub fn register_bean_definition(
        &self,
        name: &str,
        definition: BeanDefinition,
    ) -> Result<(), BeanDefinitionError> {
        self.lock().register_bean_definition(name, definition)
    }

    pub fn instance_by_name(&self, name: &str) -> Result<ResolvedBean, BeanCreationError> {
        self.lock().instance_by_name(name)
    }

    pub fn instance_by_name_typed<T: Injectable + ?Sized>(
        &self,
        name: &str,
    ) -> Result<BeanPtr<T>, BeanCreationError> {
        self.lock().instance_by_name_typed::<T>(name)
    }

    pub fn contains_bean(&self, name: &str) -> bool {
        self.lock().contains_bean(name)
    }

    pub fn bean_definition_names(&self) -> Vec<String> {
        self.lock().bean_definition_names()
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    // poisoned locks are recovered, failed resolutions never store partial state
    fn lock(&self) -> MutexGuard<'_, BeanFactory> {
        self.factory
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<BeanFactory> for SyncBeanFactory {
    fn from(factory: BeanFactory) -> Self {
        Self::new(factory)
    }
}
