//! Host startup properties.
//!
//! Priority (highest to lowest):
//! 1. Values set explicitly by the host (or CLI flags)
//! 2. A TOML properties file
//! 3. Environment variables (`JSONCONFIG_*`)
//!
//! Blank values are treated as unset at every layer.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use thiserror::Error;

use crate::constants;
use crate::env::Env;

/// Errors while reading a properties file.
#[derive(Error, Debug)]
pub enum PropertiesError {
    #[error("failed to read properties file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse properties file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("property '{key}' in {path} must be a scalar value")]
    InvalidValue { path: PathBuf, key: String },
}

/// Which layer supplied a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertySource {
    Explicit,
    File,
    Environment,
}

impl std::fmt::Display for PropertySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertySource::Explicit => write!(f, "explicit"),
            PropertySource::File => write!(f, "properties file"),
            PropertySource::Environment => write!(f, "environment"),
        }
    }
}

/// Layered key/value properties supplied by the host at startup.
#[derive(Debug, Clone, Default)]
pub struct HostProperties {
    explicit: IndexMap<String, String>,
    file: IndexMap<String, String>,
    env: Env,
}

impl HostProperties {
    /// Create properties that fall back to the given environment.
    pub fn new(env: Env) -> Self {
        Self {
            explicit: IndexMap::new(),
            file: IndexMap::new(),
            env,
        }
    }

    /// Properties backed by the real process environment.
    pub fn from_env() -> Self {
        Self::new(Env::real())
    }

    /// Properties that never consult the process environment.
    pub fn isolated() -> Self {
        Self::new(Env::empty())
    }

    /// Set an explicit value, overriding every other layer.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.explicit.insert(key.into(), value.into());
        self
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Read a TOML properties file into the file layer.
    ///
    /// Nested tables are flattened with `.` so `[config] area = "x"` and
    /// `"config.area" = "x"` are equivalent. Later files override earlier
    /// ones key by key.
    pub fn load_file(&mut self, path: &Path) -> Result<(), PropertiesError> {
        let content = std::fs::read_to_string(path).map_err(|e| PropertiesError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        let table: toml::Table = content.parse().map_err(|e| PropertiesError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut flat = IndexMap::new();
        flatten(path, "", &table, &mut flat)?;
        tracing::debug!(path = %path.display(), count = flat.len(), "loaded properties file");
        self.file.extend(flat);
        Ok(())
    }

    /// Look up a property value.
    pub fn get(&self, key: &str) -> Option<String> {
        self.lookup(key).map(|(value, _)| value)
    }

    /// Look up a property value together with the layer that supplied it.
    pub fn lookup(&self, key: &str) -> Option<(String, PropertySource)> {
        if let Some(v) = non_blank(self.explicit.get(key)) {
            return Some((v, PropertySource::Explicit));
        }
        if let Some(v) = non_blank(self.file.get(key)) {
            return Some((v, PropertySource::File));
        }
        env_var_for(key)
            .and_then(|var| self.env.get(var))
            .map(|v| (v, PropertySource::Environment))
    }

    /// Returns `true` if any layer supplies a value for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }
}

/// Environment variable consulted for a property, if any.
pub fn env_var_for(key: &str) -> Option<&'static str> {
    match key {
        constants::PROP_CONFIG_DIR => Some(constants::ENV_CONFIG_DIR),
        constants::PROP_CONFIG_AREA => Some(constants::ENV_CONFIG_AREA),
        constants::PROP_CONFIG_AREA_DEFAULT => Some(constants::ENV_CONFIG_AREA_DEFAULT),
        _ => None,
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

fn flatten(
    path: &Path,
    prefix: &str,
    table: &toml::Table,
    out: &mut IndexMap<String, String>,
) -> Result<(), PropertiesError> {
    for (key, value) in table {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match value {
            toml::Value::String(s) => {
                out.insert(full_key, s.clone());
            }
            toml::Value::Table(inner) => flatten(path, &full_key, inner, out)?,
            toml::Value::Array(_) => {
                return Err(PropertiesError::InvalidValue {
                    path: path.to_path_buf(),
                    key: full_key,
                });
            }
            other => {
                out.insert(full_key, other.to_string());
            }
        }
    }
    Ok(())
}
