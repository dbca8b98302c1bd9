//! Typed configuration schemas.
//!
//! The embedding application registers the schemas it expects under
//! logical configuration names (`widget` for `widget.json`). Files without a
//! registered schema are loaded as generic mappings.

use std::collections::HashMap;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::models::TypedConfig;

/// A typed shape a configuration file can be parsed into.
pub trait Schema: Send + Sync {
    /// Logical configuration name (filename without extension).
    fn name(&self) -> &str;

    /// Interface name the parsed object is published under.
    fn interface(&self) -> &str;

    /// Parse file content into the typed shape.
    fn parse(&self, content: &str) -> Result<TypedConfig, serde_json::Error>;
}

/// [`Schema`] backed by a `serde` deserializable type.
pub struct TypedSchema<T> {
    name: String,
    interface: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedSchema<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    /// Schema published under the Rust type name of `T`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_interface(name, std::any::type_name::<T>())
    }

    /// Schema published under an explicit interface name.
    pub fn with_interface(name: impl Into<String>, interface: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interface: interface.into(),
            _marker: PhantomData,
        }
    }
}

impl<T> Schema for TypedSchema<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn interface(&self) -> &str {
        &self.interface
    }

    fn parse(&self, content: &str) -> Result<TypedConfig, serde_json::Error> {
        let tree: serde_json::Value = serde_json::from_str(content)?;
        let object = T::deserialize(&tree)?;
        Ok(TypedConfig::new(&self.name, &self.interface, object, tree))
    }
}

/// Schemas known to the host, keyed by logical configuration name.
#[derive(Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Box<dyn Schema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` as the schema for configuration `name`.
    pub fn register<T>(&mut self, name: impl Into<String>) -> &mut Self
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        self.register_schema(Box::new(TypedSchema::<T>::new(name)))
    }

    /// Register a schema, replacing any previous one with the same name.
    pub fn register_schema(&mut self, schema: Box<dyn Schema>) -> &mut Self {
        let name = schema.name().to_string();
        if let Some(previous) = self.schemas.insert(name.clone(), schema) {
            tracing::debug!(
                name = %name,
                previous = %previous.interface(),
                "replaced schema registration"
            );
        }
        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<T>(mut self, name: impl Into<String>) -> Self
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        self.register::<T>(name);
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Schema> {
        self.schemas.get(name).map(|s| s.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(deny_unknown_fields)]
    struct Widget {
        name: String,
        size: u32,
    }

    #[derive(Debug, Deserialize)]
    struct Gadget {
        #[allow(dead_code)]
        id: u64,
    }

    #[test]
    fn typed_schema_parses_matching_json() {
        let schema = TypedSchema::<Widget>::new("widget");
        let typed = schema.parse(r#"{"name": "knob", "size": 4}"#).unwrap();

        assert_eq!(typed.schema(), "widget");
        assert_eq!(typed.interface(), std::any::type_name::<Widget>());
        assert_eq!(
            *typed.downcast::<Widget>().unwrap(),
            Widget { name: "knob".into(), size: 4 }
        );
        assert_eq!(typed.tree()["size"], 4);
    }

    #[test]
    fn typed_schema_rejects_shape_mismatch() {
        let schema = TypedSchema::<Widget>::new("widget");
        assert!(schema.parse(r#"{"name": "knob"}"#).is_err());
        assert!(schema.parse(r#"{"name": "knob", "size": 4, "extra": true}"#).is_err());
        assert!(schema.parse("{ broken").is_err());
    }

    #[test]
    fn explicit_interface_name_is_used() {
        let schema = TypedSchema::<Widget>::with_interface("widget", "ui.Widget");
        assert_eq!(schema.interface(), "ui.Widget");
        let typed = schema.parse(r#"{"name": "a", "size": 1}"#).unwrap();
        assert_eq!(typed.interface(), "ui.Widget");
    }

    #[test]
    fn registry_lookup_by_name() {
        let registry = SchemaRegistry::new()
            .with::<Widget>("widget")
            .with::<Gadget>("gadget");

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("widget"));
        assert!(registry.get("db").is_none());
        assert_eq!(registry.names(), vec!["gadget", "widget"]);
        assert_eq!(registry.get("gadget").unwrap().name(), "gadget");
    }

    #[test]
    fn re_registering_replaces_schema() {
        let mut registry = SchemaRegistry::new();
        registry.register::<Widget>("thing");
        registry.register::<Gadget>("thing");

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("thing").unwrap().interface(),
            std::any::type_name::<Gadget>()
        );
    }

    #[test]
    fn empty_registry() {
        let registry = SchemaRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.names().is_empty());
    }
}
