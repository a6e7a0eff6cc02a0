//! Pointers to bean instances and the generic interface for requesting beans by name.

use crate::bean::Injectable;
use crate::error::{BeanCreationError, PropertyError};
use fxhash::FxHashMap;
use std::any::{type_name, Any, TypeId};
use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

pub type BeanPtr<T> = Arc<T>;

pub type BeanAnyPtr = BeanPtr<dyn Any + Send + Sync + 'static>;

/// Error type for user-provided bean constructors.
pub type ErrorPtr = Arc<dyn Error + Send + Sync + 'static>;

/// Casts a type-erased instance to a boxed `BeanPtr<T>`, where `T` is the concrete bean type or
/// one of its aliases. On failure, the original instance is returned.
pub type CastFunction = fn(instance: BeanAnyPtr) -> Result<Box<dyn Any>, BeanAnyPtr>;

/// A fully constructed bean along with information needed to cast it to requested types.
#[derive(Clone)]
pub struct ResolvedBean {
    name: String,
    instance: BeanAnyPtr,
    casts: FxHashMap<TypeId, CastFunction>,
}

impl ResolvedBean {
    pub fn new(
        name: impl Into<String>,
        instance: BeanAnyPtr,
        casts: FxHashMap<TypeId, CastFunction>,
    ) -> Self {
        Self {
            name: name.into(),
            instance,
            casts,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn instance(&self) -> &BeanAnyPtr {
        &self.instance
    }

    /// Tries to cast the instance to `T`, which can be either the concrete bean type or any alias
    /// registered for it.
    pub fn cast<T: Injectable + ?Sized>(&self) -> Option<BeanPtr<T>> {
        let cast = self.casts.get(&TypeId::of::<T>())?;
        cast(self.instance.clone())
            .ok()?
            .downcast::<BeanPtr<T>>()
            .ok()
            .map(|instance| *instance)
    }
}

impl std::fmt::Debug for ResolvedBean {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedBean")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Value handed to a bean when applying one of its properties.
#[derive(Clone, Debug)]
pub enum PropertyArgument {
    Literal(String),
    Bean(ResolvedBean),
}

impl PropertyArgument {
    /// Converts a literal value into the property type.
    pub fn into_literal<T>(self, property: &str) -> Result<T, PropertyError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self {
            Self::Literal(value) => value.parse().map_err(|error: T::Err| {
                PropertyError::InvalidLiteral {
                    property: property.to_string(),
                    reason: error.to_string(),
                    value,
                }
            }),
            Self::Bean(_) => Err(PropertyError::TypeMismatch {
                property: property.to_string(),
                expected: "a literal value",
            }),
        }
    }

    /// Converts a referenced bean into a pointer of the property type.
    pub fn into_bean<T: Injectable + ?Sized>(
        self,
        property: &str,
    ) -> Result<BeanPtr<T>, PropertyError> {
        match self {
            Self::Bean(bean) => bean.cast::<T>().ok_or_else(|| PropertyError::IncompatibleBean {
                property: property.to_string(),
                bean: bean.name,
                expected: type_name::<T>(),
            }),
            Self::Literal(_) => Err(PropertyError::TypeMismatch {
                property: property.to_string(),
                expected: "a bean reference",
            }),
        }
    }
}

/// Generic provider for bean instances.
pub trait BeanInstanceProvider {
    /// Returns a fully initialized instance of the bean with given name, creating it and its
    /// dependencies if needed.
    fn instance_by_name(&mut self, name: &str) -> Result<ResolvedBean, BeanCreationError>;
}

/// Helper trait for [BeanInstanceProvider] providing strongly-typed access.
pub trait TypedBeanInstanceProvider {
    /// Typesafe version of [BeanInstanceProvider::instance_by_name].
    fn instance_by_name_typed<T: Injectable + ?Sized>(
        &mut self,
        name: &str,
    ) -> Result<BeanPtr<T>, BeanCreationError>;
}

impl<P: BeanInstanceProvider + ?Sized> TypedBeanInstanceProvider for P {
    fn instance_by_name_typed<T: Injectable + ?Sized>(
        &mut self,
        name: &str,
    ) -> Result<BeanPtr<T>, BeanCreationError> {
        self.instance_by_name(name)?
            .cast::<T>()
            .ok_or_else(|| BeanCreationError::IncompatibleBean {
                bean: name.to_string(),
                expected: type_name::<T>(),
            })
    }
}
