//! Outcome of a load pass.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Stage at which a configuration file was given up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipStage {
    Read,
    Parse,
    Publish,
}

impl fmt::Display for SkipStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipStage::Read => write!(f, "read"),
            SkipStage::Parse => write!(f, "parse"),
            SkipStage::Publish => write!(f, "publish"),
        }
    }
}

/// A `.json` file that was not published in this pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub file: String,
    pub stage: SkipStage,
    pub reason: String,
}

/// What a load or reload pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Directory that was scanned.
    pub directory: PathBuf,
    /// Set when the directory did not exist.
    pub directory_missing: bool,
    /// Files published in this pass, in load order.
    pub loaded: Vec<String>,
    /// Files that failed to load.
    pub skipped: Vec<SkippedFile>,
    /// Files whose registered schema rejected them and were loaded as maps.
    pub fallbacks: Vec<String>,
    /// Files that failed on reload and kept their earlier publication.
    pub retained: Vec<String>,
    /// Earlier entries unpublished because their file is gone.
    pub removed: Vec<String>,
}

impl LoadReport {
    pub fn new(directory: &Path) -> Self {
        Self {
            directory: directory.to_path_buf(),
            ..Self::default()
        }
    }

    /// Returns `true` if every `.json` file in the directory was published.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}
