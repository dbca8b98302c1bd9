//! Parsed configuration values.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::ConfigKind;
use crate::constants::GENERIC_MAP_INTERFACE;

/// Generic configuration mapping (insertion-ordered, as written in the file).
pub type ConfigMap = IndexMap<String, serde_json::Value>;

/// A configuration file parsed into a registered typed schema.
#[derive(Clone)]
pub struct TypedConfig {
    schema: String,
    interface: String,
    object: Arc<dyn Any + Send + Sync>,
    tree: serde_json::Value,
}

impl TypedConfig {
    /// Wrap a typed object along with the JSON tree it was built from.
    pub fn new<T: Any + Send + Sync>(
        schema: impl Into<String>,
        interface: impl Into<String>,
        object: T,
        tree: serde_json::Value,
    ) -> Self {
        Self {
            schema: schema.into(),
            interface: interface.into(),
            object: Arc::new(object),
            tree,
        }
    }

    /// Logical name of the schema that produced this value.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Interface name the value is published under.
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// The JSON document the object was deserialized from.
    pub fn tree(&self) -> &serde_json::Value {
        &self.tree
    }

    /// Get a shared handle to the typed object, if it is a `T`.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.object).downcast::<T>().ok()
    }

    /// Returns `true` if the typed object is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.object.as_ref().is::<T>()
    }
}

impl fmt::Debug for TypedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedConfig")
            .field("schema", &self.schema)
            .field("interface", &self.interface)
            .field("tree", &self.tree)
            .finish_non_exhaustive()
    }
}

/// A value published for one configuration file.
///
/// Cloning is cheap: both variants share their payload.
#[derive(Debug, Clone)]
pub enum ConfigValue {
    Typed(TypedConfig),
    Map(Arc<ConfigMap>),
}

impl ConfigValue {
    /// Parse a JSON document into a generic mapping.
    ///
    /// Fails for malformed JSON and for documents whose top level is not an
    /// object.
    pub fn parse_map(content: &str) -> Result<Self, serde_json::Error> {
        let map: ConfigMap = serde_json::from_str(content)?;
        Ok(ConfigValue::Map(Arc::new(map)))
    }

    pub fn kind(&self) -> ConfigKind {
        match self {
            ConfigValue::Typed(_) => ConfigKind::Typed,
            ConfigValue::Map(_) => ConfigKind::Map,
        }
    }

    /// Interface name the value is published under.
    pub fn interface(&self) -> &str {
        match self {
            ConfigValue::Typed(typed) => typed.interface(),
            ConfigValue::Map(_) => GENERIC_MAP_INTERFACE,
        }
    }

    pub fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Map(map) => Some(map),
            ConfigValue::Typed(_) => None,
        }
    }

    pub fn as_typed(&self) -> Option<&TypedConfig> {
        match self {
            ConfigValue::Typed(typed) => Some(typed),
            ConfigValue::Map(_) => None,
        }
    }

    /// Shortcut for `as_typed().and_then(|t| t.downcast::<T>())`.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.as_typed().and_then(TypedConfig::downcast::<T>)
    }

    /// Render the value as JSON, preserving key order.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ConfigValue::Typed(typed) => typed.tree().clone(),
            ConfigValue::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            ),
        }
    }
}
