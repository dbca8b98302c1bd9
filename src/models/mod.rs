//! Shared types used across all modules.
//!
//! Parsed configuration values and publication metadata live here so the
//! loader, schemas, and registries import from one place rather than from
//! each other.

pub mod value;

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use value::{ConfigMap, ConfigValue, TypedConfig};

/// Metadata attached to a publication (`service.pid`, `config.file`, ...).
pub type ServiceProperties = IndexMap<String, String>;

/// How a configuration file was parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigKind {
    /// Parsed into a registered schema.
    Typed,
    /// Parsed into a generic ordered mapping.
    Map,
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigKind::Typed => write!(f, "typed"),
            ConfigKind::Map => write!(f, "map"),
        }
    }
}

impl std::str::FromStr for ConfigKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "typed" => Ok(ConfigKind::Typed),
            "map" => Ok(ConfigKind::Map),
            other => Err(format!("unknown config kind: '{other}'. Supported: typed, map")),
        }
    }
}
