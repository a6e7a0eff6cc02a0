//! Declarative bean definitions, read from a descriptor file instead of being registered in code.
//!
//! Descriptors are read with the [config] crate, so any format it supports can be used (JSON,
//! TOML, YAML and others). The format is inferred from the file extension:
//!
//! ```json
//! {
//!   "beans": [
//!     { "id": "userDAO", "class": "UserDaoImpl" },
//!     {
//!       "id": "userService",
//!       "class": "UserService",
//!       "scope": "PROTOTYPE",
//!       "properties": [{ "name": "userDAO", "ref": "userDAO" }]
//!     }
//!   ]
//! }
//! ```
//!
//! `class` is looked up in a [BeanTypeRegistry], either by the simple type name or by the fully
//! qualified one. Each property needs exactly one of `ref` (name of another bean) or `value` (a
//! literal). Loading is all-or-nothing: nothing is registered if any entry is invalid, and a
//! registration failure rolls back the definitions already registered by the same load.

use crate::bean_registry::{BeanDefinitionRegistry, BeanTypeRegistry};
use crate::definition::{BeanDefinition, PropertyValue};
use crate::error::{BeanDefinitionError, DescriptorError};
use config::{Config, ConfigError, File};
use fxhash::FxHashSet;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

pub use config::FileFormat as DescriptorFormat;

#[derive(Deserialize, Clone, Debug)]
struct BeanDescriptor {
    #[serde(default)]
    beans: Vec<BeanElement>,
}

#[derive(Deserialize, Clone, Debug)]
struct BeanElement {
    id: String,
    class: String,
    scope: Option<String>,
    #[serde(default)]
    properties: Vec<PropertyElement>,
}

#[derive(Deserialize, Clone, Debug)]
struct PropertyElement {
    name: String,
    #[serde(rename = "ref")]
    reference: Option<String>,
    value: Option<String>,
}

/// Loads definitions from descriptors into a [BeanDefinitionRegistry].
pub struct DescriptorReader<'a, R: BeanDefinitionRegistry + ?Sized> {
    registry: &'a mut R,
    types: &'a BeanTypeRegistry,
}

impl<'a, R: BeanDefinitionRegistry + ?Sized> DescriptorReader<'a, R> {
    pub fn new(registry: &'a mut R, types: &'a BeanTypeRegistry) -> Self {
        Self { registry, types }
    }

    /// Loads all definitions from given file. Returns the number of registered definitions.
    pub fn load_bean_definitions<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<usize, DescriptorError> {
        let path = path.as_ref();
        let count = self.load(
            Config::builder()
                .add_source(File::from(path).required(true))
                .build(),
        )?;

        info!(
            location = %path.display(),
            count, "Loaded bean definitions"
        );
        Ok(count)
    }

    /// Loads all definitions from in-memory descriptor content.
    pub fn load_bean_definitions_from_str(
        &mut self,
        content: &str,
        format: DescriptorFormat,
    ) -> Result<usize, DescriptorError> {
        let count = self.load(
            Config::builder()
                .add_source(File::from_str(content, format))
                .build(),
        )?;

        info!(count, "Loaded bean definitions");
        Ok(count)
    }

    fn load(&mut self, config: Result<Config, ConfigError>) -> Result<usize, DescriptorError> {
        let descriptor = config
            .and_then(|config| config.try_deserialize::<BeanDescriptor>())
            .map_err(|error| DescriptorError::Read(error.to_string()))?;

        let definitions = descriptor
            .beans
            .into_iter()
            .map(|element| self.convert(element))
            .collect::<Result<Vec<_>, _>>()?;

        let mut ids = FxHashSet::default();
        if let Some((id, _)) = definitions
            .iter()
            .find(|(id, _)| id.trim().is_empty() || !ids.insert(id.as_str()))
        {
            let source = if id.trim().is_empty() {
                BeanDefinitionError::EmptyBeanName
            } else {
                BeanDefinitionError::DuplicateBeanName(id.clone())
            };

            return Err(DescriptorError::Definition {
                bean: id.clone(),
                source,
            });
        }

        let count = definitions.len();
        let mut registered = Vec::with_capacity(count);
        for (id, definition) in definitions {
            debug!(bean = %id, "Registering bean definition from descriptor");

            let previous = self.registry.bean_definition(&id).ok();
            if let Err(source) = self.registry.register_bean_definition(&id, definition) {
                self.rollback(registered);
                return Err(DescriptorError::Definition { bean: id, source });
            }

            registered.push((id, previous));
        }

        Ok(count)
    }

    // restores the registry to its state from before the current load
    fn rollback(&mut self, registered: Vec<(String, Option<BeanDefinition>)>) {
        for (id, previous) in registered.into_iter().rev() {
            if let Err(error) = self.registry.remove_bean_definition(&id) {
                warn!(bean = %id, %error, "Cannot remove partially loaded bean definition");
            }

            if let Some(previous) = previous {
                if let Err(error) = self.registry.register_bean_definition(&id, previous) {
                    warn!(bean = %id, %error, "Cannot restore overridden bean definition");
                }
            }
        }
    }

    fn convert(&self, element: BeanElement) -> Result<(String, BeanDefinition), DescriptorError> {
        let BeanElement {
            id,
            class,
            scope,
            properties,
        } = element;

        let mut definition =
            BeanDefinition::for_type_name(self.types, &class).map_err(|source| {
                DescriptorError::Definition {
                    bean: id.clone(),
                    source,
                }
            })?;

        if let Some(scope) = scope {
            definition.scope_name = scope;
        }

        for property in properties {
            let value = match (property.reference, property.value) {
                (Some(reference), None) => PropertyValue::Reference(reference),
                (None, Some(value)) => PropertyValue::Literal(value),
                _ => {
                    return Err(DescriptorError::AmbiguousProperty {
                        bean: id,
                        property: property.name,
                    })
                }
            };

            definition.set_property(property.name, value);
        }

        Ok((id, definition))
    }
}
