use thiserror::Error;

/// Broad category of a container error, shared by all error types of this crate.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    /// Unknown bean name.
    NotFound,
    /// Malformed input, e.g. an empty bean name.
    InvalidArgument,
    /// Dependency cycle detected during resolution.
    CircularDependency,
    /// Type not constructible or a property which cannot be applied.
    InvalidDefinition,
}

/// Errors related to defining and registering beans.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum BeanDefinitionError {
    #[error("Bean name cannot be empty")]
    EmptyBeanName,
    #[error("Attempted to register a duplicated bean definition with name: {0}")]
    DuplicateBeanName(String),
    #[error("No bean definition registered with name: {0}")]
    NoSuchBeanDefinition(String),
    #[error("Cannot find a constructible bean type named: {0}")]
    UnknownBeanType(String),
}

impl BeanDefinitionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyBeanName | Self::DuplicateBeanName(_) => ErrorKind::InvalidArgument,
            Self::NoSuchBeanDefinition(_) => ErrorKind::NotFound,
            Self::UnknownBeanType(_) => ErrorKind::InvalidDefinition,
        }
    }
}

/// Errors raised by a bean while applying a single property.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum PropertyError {
    #[error("No setter for property: {0}")]
    UnknownProperty(String),
    #[error("Property '{property}' expects {expected}")]
    TypeMismatch {
        property: String,
        expected: &'static str,
    },
    #[error("Cannot convert value '{value}' of property '{property}': {reason}")]
    InvalidLiteral {
        property: String,
        value: String,
        reason: String,
    },
    #[error("Bean '{bean}' injected into property '{property}' is not compatible with {expected}")]
    IncompatibleBean {
        property: String,
        bean: String,
        expected: &'static str,
    },
}

/// Errors related to creating bean instances.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum BeanCreationError {
    #[error("No bean named: {0}")]
    NoSuchBean(String),
    #[error("Detected dependency cycle for bean: {0}")]
    CircularDependency(String),
    #[error("Cannot set property of bean '{bean}': {source}")]
    InvalidProperty {
        bean: String,
        #[source]
        source: PropertyError,
    },
    #[error("Bean '{bean}' is not compatible with {expected}")]
    IncompatibleBean { bean: String, expected: &'static str },
    #[error("Unrecognized scope '{scope}' used by bean: {bean}")]
    UnrecognizedScope { bean: String, scope: String },
    #[error("Error instantiating bean '{bean}': {reason}")]
    InstantiationFailed { bean: String, reason: String },
}

impl BeanCreationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoSuchBean(_) => ErrorKind::NotFound,
            Self::CircularDependency(_) => ErrorKind::CircularDependency,
            Self::InvalidProperty { .. }
            | Self::IncompatibleBean { .. }
            | Self::UnrecognizedScope { .. }
            | Self::InstantiationFailed { .. } => ErrorKind::InvalidDefinition,
        }
    }
}

/// Errors related to reading declarative bean descriptors.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum DescriptorError {
    #[error("Cannot read bean descriptor: {0}")]
    Read(String),
    #[error("Property '{property}' of bean '{bean}' must have exactly one of 'ref' or 'value'")]
    AmbiguousProperty { bean: String, property: String },
    #[error("Invalid bean definition '{bean}': {source}")]
    Definition {
        bean: String,
        #[source]
        source: BeanDefinitionError,
    },
}

impl DescriptorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Read(_) | Self::AmbiguousProperty { .. } => ErrorKind::InvalidArgument,
            Self::Definition { source, .. } => source.kind(),
        }
    }
}
