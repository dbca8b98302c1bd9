//! In-memory service registry.

use std::sync::{PoisonError, RwLock};

use indexmap::IndexMap;

use super::{RegistryError, ServiceHandle, ServiceRegistry};
use crate::models::{ConfigValue, ServiceProperties};

/// A published service as seen by lookups.
#[derive(Debug, Clone)]
pub struct ServiceRef {
    pub handle: ServiceHandle,
    pub interface: String,
    pub value: ConfigValue,
    pub properties: ServiceProperties,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    /// Publication order is iteration order.
    services: IndexMap<u64, ServiceRef>,
}

/// Registry kept entirely in memory.
///
/// Several services may share a key; key lookups return the most recently
/// published one.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    inner: RwLock<Inner>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest service published under `key`.
    pub fn get(&self, key: &str) -> Option<ServiceRef> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .services
            .values()
            .rev()
            .find(|s| s.handle.key() == key)
            .cloned()
    }

    /// All services published under `interface`, in publication order.
    pub fn find_by_interface(&self, interface: &str) -> Vec<ServiceRef> {
        self.filter(|s| s.interface == interface)
    }

    /// All services whose metadata has `name` = `value`, in publication order.
    pub fn find_by_property(&self, name: &str, value: &str) -> Vec<ServiceRef> {
        self.filter(|s| s.properties.get(name).is_some_and(|v| v == value))
    }

    /// Keys of all live services, in publication order.
    pub fn keys(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .services
            .values()
            .map(|s| s.handle.key().to_string())
            .collect()
    }

    /// Snapshot of all live services, in publication order.
    pub fn services(&self) -> Vec<ServiceRef> {
        self.filter(|_| true)
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .services
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn filter(&self, predicate: impl Fn(&ServiceRef) -> bool) -> Vec<ServiceRef> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .services
            .values()
            .filter(|s| predicate(s))
            .cloned()
            .collect()
    }
}

impl ServiceRegistry for InMemoryRegistry {
    fn publish(
        &self,
        key: &str,
        value: ConfigValue,
        properties: ServiceProperties,
    ) -> Result<ServiceHandle, RegistryError> {
        if key.is_empty() {
            return Err(RegistryError::Rejected {
                key: key.to_string(),
                reason: "empty key".to_string(),
            });
        }

        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.next_id += 1;
        let handle = ServiceHandle::new(inner.next_id, key);
        let service = ServiceRef {
            handle: handle.clone(),
            interface: value.interface().to_string(),
            value,
            properties,
        };
        inner.services.insert(handle.id(), service);
        Ok(handle)
    }

    fn unpublish(&self, handle: &ServiceHandle) -> Result<(), RegistryError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        // Same id under a different key is not the caller's service.
        let owned = inner
            .services
            .get(&handle.id())
            .is_some_and(|s| s.handle == *handle);
        if !owned {
            return Err(RegistryError::NotRegistered {
                key: handle.key().to_string(),
                id: handle.id(),
            });
        }
        inner.services.shift_remove(&handle.id());
        Ok(())
    }
}
