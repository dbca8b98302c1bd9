//! Configuration directory resolution.
//!
//! Candidates, first present wins:
//! 1. `jsonconfig.dir` (explicit override)
//! 2. `config.area` (host configuration area)
//! 3. `config.area.default` (host default configuration area)

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::constants;
use crate::properties::HostProperties;

/// Property names consulted for the directory, in priority order.
pub const DIRECTORY_CANDIDATES: [&str; 3] = [
    constants::PROP_CONFIG_DIR,
    constants::PROP_CONFIG_AREA,
    constants::PROP_CONFIG_AREA_DEFAULT,
];

/// Fatal errors while resolving the configuration directory.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "no configuration directory: none of {} is set",
        DIRECTORY_CANDIDATES.join(", ")
    )]
    NoDirectory,

    #[error("invalid configuration directory '{path}': {source}")]
    InvalidPath {
        path: String,
        source: std::io::Error,
    },
}

/// The resolved, absolute directory scanned for configuration files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDirectory {
    path: PathBuf,
    property: Option<&'static str>,
}

impl ConfigDirectory {
    /// Resolve the directory from host properties.
    pub fn resolve(props: &HostProperties) -> Result<Self, ConfigError> {
        let Some((property, raw)) = DIRECTORY_CANDIDATES.iter().find_map(|name| {
            let value = props.get(name)?;
            let path = strip_file_scheme(&value);
            if path.is_empty() {
                tracing::debug!(property = *name, value = %value, "ignoring empty directory property");
                return None;
            }
            Some((*name, path.into_owned()))
        }) else {
            tracing::error!(
                candidates = %DIRECTORY_CANDIDATES.join(", "),
                "no configuration directory configured, aborting"
            );
            return Err(ConfigError::NoDirectory);
        };

        let mut directory = Self::new(&raw)?;
        directory.property = Some(property);
        tracing::debug!(
            property,
            path = %directory.path.display(),
            "resolved configuration directory"
        );
        Ok(directory)
    }

    /// Use `path` directly, made absolute against the working directory.
    ///
    /// The filesystem is not consulted; the directory may not exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let absolute = std::path::absolute(path).map_err(|e| ConfigError::InvalidPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self {
            path: absolute,
            property: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Property the path came from, when resolved from host properties.
    pub fn property(&self) -> Option<&'static str> {
        self.property
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

/// Strip a leading `file:` marker, including the `file://host/path` form.
///
/// `file://name` with nothing after the authority names the root-level
/// directory `/name`.
pub fn strip_file_scheme(raw: &str) -> Cow<'_, str> {
    let raw = raw.trim();
    let Some(rest) = raw.strip_prefix(constants::FILE_SCHEME) else {
        return Cow::Borrowed(raw);
    };
    match rest.strip_prefix("//") {
        Some(authority_and_path) => match authority_and_path.find('/') {
            Some(i) => Cow::Borrowed(&authority_and_path[i..]),
            None if authority_and_path.is_empty() => Cow::Borrowed(""),
            None => Cow::Owned(format!("/{authority_and_path}")),
        },
        None => Cow::Borrowed(rest),
    }
}
