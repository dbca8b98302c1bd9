//! Environment variable abstraction for testability.
//!
//! Production code uses [`Env::real()`] which delegates to [`std::env::var`].
//! Tests and embedding hosts that must not see the process environment use
//! [`Env::from_vars()`], backed by a `HashMap`.

use std::collections::HashMap;

/// Environment variable reader.
#[derive(Clone, Debug)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Create an `Env` that reads from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Create an `Env` backed by explicit key-value pairs only.
    pub fn from_vars(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// An environment with no variables at all.
    pub fn empty() -> Self {
        Self::from_vars(Vec::<(String, String)>::new())
    }

    /// Look up a variable, treating empty values as unset.
    pub fn get(&self, name: &str) -> Option<String> {
        let value = match &self.overrides {
            Some(map) => map.get(name).cloned(),
            None => std::env::var(name).ok(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Returns `true` if the variable is present and non-empty.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::real()
    }
}
