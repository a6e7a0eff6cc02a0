//! One of the basic blocks of dependency injection is a [Bean]. Beans are objects created and
//! managed by a [BeanFactory](crate::factory::BeanFactory), which first constructs them with a
//! zero-argument constructor, and then injects their properties by name.
//!
//! ## Registering beans
//!
//! Any type which wants to be managed by the container needs to implement `Bean`. For
//! convenience, the trait can be automatically derived with all infrastructure if the `derive`
//! feature is enabled:
//!
//! ```
//! use ioc_beans::instance_provider::BeanPtr;
//! use ioc_beans::{bean_alias, injectable, Bean};
//!
//! #[injectable]
//! trait Greeter {
//!     fn greet(&self) -> String;
//! }
//!
//! #[derive(Bean)]
//! struct EnglishGreeter;
//!
//! #[bean_alias]
//! impl Greeter for EnglishGreeter {
//!     fn greet(&self) -> String {
//!         "hello".to_string()
//!     }
//! }
//!
//! #[derive(Bean)]
//! struct Welcome {
//!     // reference to another bean, injected as property "greeter"
//!     greeter: Option<BeanPtr<dyn Greeter + Send + Sync>>,
//!     // literal property injected as "visitorName"
//!     visitor_name: String,
//!     #[bean(property = "max_visits", default = "default_max_visits")]
//!     max_visits: u32,
//!     #[bean(ignore)]
//!     _internal: Vec<u8>,
//! }
//!
//! fn default_max_visits() -> u32 {
//!     10
//! }
//! ```
//!
//! ### Supported `#[bean]` field configuration
//!
//! * `property = "name"` - expose the field as `name`, instead of the camel case version of the
//! field name
//! * `default = "expr"` - call `expr()` for initialization, instead of `Default::default()`
//! * `ignore` - do not expose the field as a property
//!
//! Fields of type `Option<BeanPtr<T>>` (or `Option<Arc<T>>`) accept bean references, while any
//! other field accepts literals which are parsed with [FromStr](std::str::FromStr) (`Option<T>`
//! fields wrap the parsed value in `Some`). The pointer type needs to be spelled out - type aliases
//! are treated as literals.
//!
//! ## Registering bean aliases
//!
//! Aliases are different types which can refer to a concrete bean type. Usually they are simply
//! `dyn Traits`, which makes it possible to inject an abstract `dyn Trait + Send + Sync` instead
//! of the concrete bean type. Each injectable trait should be marked with `#[injectable]`, and
//! each implementation with `#[bean_alias]`, as shown above.

use crate::error::PropertyError;
use crate::instance_provider::{BeanAnyPtr, BeanPtr, ErrorPtr, PropertyArgument};

/// Base trait for beans managed by the container.
///
/// A bean is created in two phases: first with [Bean::instantiate], and then by applying each
/// property from its definition with [Bean::set_property]. The finished bean is then shared as a
/// [BeanPtr], therefore properties are never modified after construction.
pub trait Bean: BeanDowncast<Self> + Send + Sync + Sized {
    /// Names of all properties accepted by [Bean::set_property].
    fn properties() -> &'static [&'static str];

    /// Creates a bean with no properties set.
    fn instantiate() -> Result<Self, ErrorPtr>;

    /// Sets given property. Fails with [PropertyError::UnknownProperty] for names not listed in
    /// [Bean::properties].
    fn set_property(&mut self, name: &str, value: PropertyArgument) -> Result<(), PropertyError>;
}

/// Helper trait for types which can be created from a concrete bean `B`, thus allowing injection
/// of beans as `dyn Trait` types. Typically automatically derived when using the `#[bean_alias]`
/// attribute.
pub trait BeanDowncast<B: Bean>: Injectable {
    fn downcast(source: BeanAnyPtr) -> Result<BeanPtr<Self>, BeanAnyPtr>;
}

/// Marker trait for injectable types - beans and aliases.
pub trait Injectable: 'static {}

pub type BeanObjectPtr = Box<dyn BeanObject>;

/// Type-erased bean under construction.
pub trait BeanObject: Send + Sync {
    fn apply_property(&mut self, name: &str, value: PropertyArgument)
        -> Result<(), PropertyError>;

    /// Finishes construction.
    fn into_shared(self: Box<Self>) -> BeanAnyPtr;
}

impl<B: Bean> BeanObject for B {
    #[inline]
    fn apply_property(
        &mut self,
        name: &str,
        value: PropertyArgument,
    ) -> Result<(), PropertyError> {
        self.set_property(name, value)
    }

    #[inline]
    fn into_shared(self: Box<Self>) -> BeanAnyPtr {
        BeanPtr::<B>::from(self) as BeanAnyPtr
    }
}
