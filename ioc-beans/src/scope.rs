//! Bean instances are contained in [Scope]s - containers which decide when to reuse or create an
//! instance. The [singleton](SINGLETON) scope keeps one instance per bean name for the lifetime of
//! the factory, while the [prototype](PROTOTYPE) one creates a new instance on each request.
//!
//! Note: scope resolution happens at bean instantiation time, which can lead to unexpected
//! consequences if incompatible scopes are mixed together, e.g. a singleton bean can depend on a
//! prototype one. In such case when creating the singleton, a new instance of the dependency will
//! be created, but then that single instance will live as long as the singleton lives.

use crate::instance_provider::BeanAnyPtr;
use fxhash::FxHashMap;
#[cfg(test)]
use mockall::automock;

pub type ScopePtr = Box<dyn Scope + Send + Sync>;

/// Name of the [SingletonScope].
pub const SINGLETON: &str = "SINGLETON";

/// Name of the [PrototypeScope].
pub const PROTOTYPE: &str = "PROTOTYPE";

/// A scope containing bean instances. See module documentation for information on scopes.
#[cfg_attr(test, automock)]
pub trait Scope {
    /// Gets an instance of the bean with given name, if available in this scope.
    fn instance(&self, name: &str) -> Option<BeanAnyPtr>;

    /// Stores given instance in the scope. The scope might not support storing instances and ignore
    /// it.
    fn store_instance(&mut self, name: &str, instance: BeanAnyPtr);

    /// Removes the instance stored for given bean name, if any.
    fn remove_instance(&mut self, name: &str) -> Option<BeanAnyPtr>;

    /// Removes all stored instances.
    fn clear(&mut self);
}

/// Scope for instances shared between beans. Stateless beans are good candidates to be stored in
/// the singleton scope.
#[derive(Default)]
pub struct SingletonScope {
    instances: FxHashMap<String, BeanAnyPtr>,
}

impl Scope for SingletonScope {
    #[inline]
    fn instance(&self, name: &str) -> Option<BeanAnyPtr> {
        self.instances.get(name).cloned()
    }

    #[inline]
    fn store_instance(&mut self, name: &str, instance: BeanAnyPtr) {
        self.instances.insert(name.to_string(), instance);
    }

    #[inline]
    fn remove_instance(&mut self, name: &str) -> Option<BeanAnyPtr> {
        self.instances.remove(name)
    }

    #[inline]
    fn clear(&mut self) {
        self.instances.clear();
    }
}

/// A scope which creates a new instance of a given bean on each request. Stateful beans usually
/// should be stored in a prototype scope.
#[derive(Default, Copy, Clone, Eq, PartialEq)]
pub struct PrototypeScope;

impl Scope for PrototypeScope {
    #[inline]
    fn instance(&self, _name: &str) -> Option<BeanAnyPtr> {
        None
    }

    #[inline]
    fn store_instance(&mut self, _name: &str, _instance: BeanAnyPtr) {}

    #[inline]
    fn remove_instance(&mut self, _name: &str) -> Option<BeanAnyPtr> {
        None
    }

    #[inline]
    fn clear(&mut self) {}
}

/// Factory for custom [Scope]s.
#[cfg_attr(test, automock)]
pub trait ScopeFactory {
    fn create_scope(&self) -> ScopePtr;
}

#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct SingletonScopeFactory;

impl ScopeFactory for SingletonScopeFactory {
    fn create_scope(&self) -> ScopePtr {
        Box::<SingletonScope>::default()
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct PrototypeScopeFactory;

impl ScopeFactory for PrototypeScopeFactory {
    fn create_scope(&self) -> ScopePtr {
        Box::<PrototypeScope>::default()
    }
}

#[cfg(test)]
mod tests {
    use crate::instance_provider::{BeanAnyPtr, BeanPtr};
    use crate::scope::{PrototypeScopeFactory, ScopeFactory, SingletonScopeFactory};

    #[test]
    fn should_support_singletons() {
        let factory = SingletonScopeFactory;
        let mut scope = factory.create_scope();

        let instance = BeanPtr::new(0) as BeanAnyPtr;
        scope.store_instance("name", instance.clone());

        assert!(BeanPtr::ptr_eq(&scope.instance("name").unwrap(), &instance));
        assert!(scope.instance("other").is_none());
    }

    #[test]
    fn should_remove_singletons() {
        let factory = SingletonScopeFactory;
        let mut scope = factory.create_scope();

        scope.store_instance("a", BeanPtr::new(0) as BeanAnyPtr);
        scope.store_instance("b", BeanPtr::new(1) as BeanAnyPtr);

        assert!(scope.remove_instance("a").is_some());
        assert!(scope.instance("a").is_none());
        assert!(scope.instance("b").is_some());

        scope.clear();
        assert!(scope.instance("b").is_none());
    }

    #[test]
    fn should_support_prototypes() {
        let factory = PrototypeScopeFactory;
        let mut scope = factory.create_scope();

        let instance = BeanPtr::new(0) as BeanAnyPtr;
        scope.store_instance("name", instance);

        assert!(scope.instance("name").is_none());
    }
}
