//! Configuration directory loading.
//!
//! Resolves the configuration directory from host properties, loads its
//! `.json` files, and publishes them to the host's service registry.

pub mod directory;
pub mod entry;
pub mod loader;
pub mod report;

pub use directory::{ConfigDirectory, ConfigError};
pub use entry::ConfigEntry;
pub use loader::{ConfigLoader, FileError};
pub use report::{LoadReport, SkipStage, SkippedFile};
