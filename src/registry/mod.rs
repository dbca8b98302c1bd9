//! Service registry abstraction.
//!
//! The host owns the registry; the loader only publishes into it and
//! unpublishes what it published. [`InMemoryRegistry`] is a thread-safe
//! implementation for hosts without one of their own, the CLI, and tests.

pub mod memory;

use std::fmt;

use thiserror::Error;

use crate::models::{ConfigValue, ServiceProperties};

pub use memory::{InMemoryRegistry, ServiceRef};

/// Errors reported by a [`ServiceRegistry`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("service '{key}' (id {id}) is not registered")]
    NotRegistered { key: String, id: u64 },

    #[error("registry rejected service '{key}': {reason}")]
    Rejected { key: String, reason: String },

    #[error("registry unavailable: {0}")]
    Unavailable(String),
}

/// Opaque handle returned by [`ServiceRegistry::publish`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceHandle {
    id: u64,
    key: String,
}

impl ServiceHandle {
    /// Registries mint handles; the id only has meaning to the issuer.
    pub fn new(id: u64, key: impl Into<String>) -> Self {
        Self { id, key: key.into() }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Key the service was published under.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for ServiceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.key, self.id)
    }
}

/// Host capability used to make configuration discoverable.
///
/// Implementations synchronise internally: lookups from other components
/// may run while the loader publishes.
pub trait ServiceRegistry: Send + Sync {
    /// Publish `value` under `key` with the given metadata.
    fn publish(
        &self,
        key: &str,
        value: ConfigValue,
        properties: ServiceProperties,
    ) -> Result<ServiceHandle, RegistryError>;

    /// Remove a previous publication.
    fn unpublish(&self, handle: &ServiceHandle) -> Result<(), RegistryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_display_includes_key_and_id() {
        let handle = ServiceHandle::new(7, "db.json");
        assert_eq!(handle.to_string(), "db.json#7");
        assert_eq!(handle.key(), "db.json");
        assert_eq!(handle.id(), 7);
    }

    #[test]
    fn error_messages_name_the_service() {
        let err = RegistryError::NotRegistered { key: "db.json".into(), id: 3 };
        assert!(err.to_string().contains("db.json"));

        let err = RegistryError::Rejected { key: "a.json".into(), reason: "quota".into() };
        assert!(err.to_string().contains("quota"));
    }
}
