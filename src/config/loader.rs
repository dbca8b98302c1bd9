//! The configuration loader.
//!
//! Scans the configuration directory for `*.json` files in sorted order,
//! parses each one (into its registered schema when there is one, else into
//! a generic mapping) and publishes it under its filename. Per-file failures
//! are logged and skipped; they never abort the pass.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::directory::{ConfigDirectory, ConfigError};
use super::entry::{ConfigEntry, publication_properties, type_key};
use super::report::{LoadReport, SkipStage, SkippedFile};
use crate::constants::CONFIG_EXTENSION;
use crate::models::ConfigValue;
use crate::properties::HostProperties;
use crate::registry::{RegistryError, ServiceRegistry};
use crate::schema::SchemaRegistry;

/// Why a single configuration file was not published.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to publish {path}: {source}")]
    Publish {
        path: PathBuf,
        source: RegistryError,
    },
}

impl FileError {
    pub fn stage(&self) -> SkipStage {
        match self {
            FileError::Read { .. } => SkipStage::Read,
            FileError::Parse { .. } => SkipStage::Parse,
            FileError::Publish { .. } => SkipStage::Publish,
        }
    }
}

/// Loads a directory of JSON files into a [`ServiceRegistry`].
///
/// Entries are published on [`load`](Self::load) and unpublished on
/// [`unload`](Self::unload), [`stop`](Self::stop), or drop.
pub struct ConfigLoader {
    directory: ConfigDirectory,
    schemas: SchemaRegistry,
    registry: Arc<dyn ServiceRegistry>,
    /// Keyed by filename, kept in load order.
    entries: IndexMap<String, ConfigEntry>,
    last_report: Option<LoadReport>,
}

impl ConfigLoader {
    /// Create a loader without loading anything yet.
    pub fn new(
        directory: ConfigDirectory,
        schemas: SchemaRegistry,
        registry: Arc<dyn ServiceRegistry>,
    ) -> Self {
        Self {
            directory,
            schemas,
            registry,
            entries: IndexMap::new(),
            last_report: None,
        }
    }

    /// Resolve the directory from host properties, then load it.
    ///
    /// The only error is a directory that cannot be resolved at all.
    pub fn start(
        props: &HostProperties,
        schemas: SchemaRegistry,
        registry: Arc<dyn ServiceRegistry>,
    ) -> Result<Self, ConfigError> {
        let directory = ConfigDirectory::resolve(props)?;
        info!(
            directory = %directory.path().display(),
            "starting json config loader"
        );

        let mut loader = Self::new(directory, schemas, registry);
        loader.load();
        Ok(loader)
    }

    /// Run a load pass.
    ///
    /// On a loader that already holds entries this is a reload: each file is
    /// published before its previous value is unpublished, files that now
    /// fail keep their previous value, and entries whose file is gone are
    /// unpublished.
    pub fn load(&mut self) -> LoadReport {
        let report = self.run_pass();
        self.last_report = Some(report.clone());
        report
    }

    fn run_pass(&mut self) -> LoadReport {
        let mut report = LoadReport::new(self.directory.path());
        let dir = self.directory.path().to_path_buf();

        if !dir.exists() {
            warn!(
                directory = %dir.display(),
                "no config directory exists, so no configuration will be loaded"
            );
            report.directory_missing = true;
            self.remove_stale(&[], &mut report);
            return report;
        }

        let names = match list_config_files(&dir) {
            Ok(names) => names,
            Err(e) => {
                error!(directory = %dir.display(), error = %e, "couldn't list config directory");
                return report;
            }
        };

        for name in &names {
            self.load_file(&dir, name, &mut report);
        }
        self.remove_stale(&names, &mut report);
        self.entries.sort_keys();

        info!(
            directory = %dir.display(),
            loaded = report.loaded.len(),
            skipped = report.skipped.len(),
            "configuration load complete"
        );
        report
    }

    /// Alias for [`load`](Self::load) that reads better at call sites
    /// refreshing an already started loader.
    pub fn reload(&mut self) -> LoadReport {
        debug!(entries = self.entries.len(), "reloading configuration");
        self.load()
    }

    /// Unpublish every entry. Returns how many were unpublished cleanly.
    ///
    /// Failures are logged and do not stop the remaining entries; the entry
    /// table is empty afterwards either way.
    pub fn unload(&mut self) -> usize {
        info!(entries = self.entries.len(), "stopping json config loader");
        let entries = std::mem::take(&mut self.entries);
        entries.values().filter(|entry| self.release(entry)).count()
    }

    /// Unload and consume the loader.
    pub fn stop(mut self) -> usize {
        self.unload()
    }

    pub fn directory(&self) -> &ConfigDirectory {
        &self.directory
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    /// Report of the most recent load pass, if any ran.
    pub fn last_report(&self) -> Option<&LoadReport> {
        self.last_report.as_ref()
    }

    /// Loaded entries in load order.
    pub fn entries(&self) -> impl Iterator<Item = &ConfigEntry> {
        self.entries.values()
    }

    /// Entry for a filename such as `db.json`.
    pub fn entry(&self, name: &str) -> Option<&ConfigEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn load_file(&mut self, dir: &Path, name: &str, report: &mut LoadReport) {
        let file = dir.join(name);

        let result = self
            .parse_file(&file, name, report)
            .and_then(|value| self.publish(&file, name, value));

        match result {
            Ok(entry) => {
                debug!(file = %file.display(), handle = %entry.handle, "published configuration");
                report.loaded.push(name.to_string());
                // Replace first, then drop the old publication.
                if let Some(previous) = self.entries.insert(name.to_string(), entry) {
                    self.release(&previous);
                }
            }
            Err(e) => {
                error!(file = %file.display(), error = %e, "couldn't load configuration file");
                if self.entries.contains_key(name) {
                    warn!(file = %file.display(), "keeping previously loaded configuration");
                    report.retained.push(name.to_string());
                }
                report.skipped.push(SkippedFile {
                    file: name.to_string(),
                    stage: e.stage(),
                    reason: e.to_string(),
                });
            }
        }
    }

    fn parse_file(
        &self,
        file: &Path,
        name: &str,
        report: &mut LoadReport,
    ) -> Result<ConfigValue, FileError> {
        let content = std::fs::read_to_string(file).map_err(|e| FileError::Read {
            path: file.to_path_buf(),
            source: e,
        })?;
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

        let key = type_key(name);
        match self.schemas.get(key) {
            Some(schema) => match schema.parse(content) {
                Ok(typed) => {
                    debug!(file = %file.display(), schema = key, "parsed typed configuration");
                    return Ok(ConfigValue::Typed(typed));
                }
                Err(e) => {
                    warn!(
                        file = %file.display(),
                        schema = key,
                        error = %e,
                        "configuration does not match its schema, loading as generic map"
                    );
                    report.fallbacks.push(name.to_string());
                }
            },
            None => debug!(file = %file.display(), type_key = key, "no schema registered"),
        }

        ConfigValue::parse_map(content).map_err(|e| FileError::Parse {
            path: file.to_path_buf(),
            source: e,
        })
    }

    fn publish(&self, file: &Path, name: &str, value: ConfigValue) -> Result<ConfigEntry, FileError> {
        let properties = publication_properties(name, file, value.kind());
        let handle = self
            .registry
            .publish(name, value.clone(), properties)
            .map_err(|e| FileError::Publish {
                path: file.to_path_buf(),
                source: e,
            })?;

        Ok(ConfigEntry {
            name: name.to_string(),
            source_file: file.to_path_buf(),
            value,
            handle,
        })
    }

    /// Unpublish entries whose file is no longer listed.
    fn remove_stale(&mut self, listed: &[String], report: &mut LoadReport) {
        let stale: Vec<String> = self
            .entries
            .keys()
            .filter(|name| listed.binary_search(*name).is_err())
            .cloned()
            .collect();

        for name in stale {
            if let Some(entry) = self.entries.shift_remove(&name) {
                info!(file = %entry.source_file.display(), "configuration file removed");
                self.release(&entry);
                report.removed.push(name);
            }
        }
    }

    fn release(&self, entry: &ConfigEntry) -> bool {
        match self.registry.unpublish(&entry.handle) {
            Ok(()) => {
                debug!(handle = %entry.handle, "unpublished configuration");
                true
            }
            Err(e) => {
                warn!(
                    file = %entry.source_file.display(),
                    error = %e,
                    "couldn't unpublish configuration"
                );
                false
            }
        }
    }
}

impl Drop for ConfigLoader {
    fn drop(&mut self) {
        if !self.entries.is_empty() {
            self.unload();
        }
    }
}

impl std::fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("directory", &self.directory)
            .field("schemas", &self.schemas)
            .field("entries", &self.entries.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Sorted names of the regular `*.json` files directly inside `dir`.
fn list_config_files(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(directory = %dir.display(), error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        let Ok(name) = entry.file_name().into_string() else {
            debug!(path = %entry.path().display(), "skipping non UTF-8 filename");
            continue;
        };
        if !name.ends_with(CONFIG_EXTENSION) {
            continue;
        }
        if !entry.path().is_file() {
            debug!(path = %entry.path().display(), "skipping non-file entry");
            continue;
        }
        names.push(name);
    }

    names.sort();
    Ok(names)
}
