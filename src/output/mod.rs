//! Output renderers for load results: terminal and JSON.

pub mod json;
pub mod terminal;

use serde::Serialize;

use crate::config::{ConfigEntry, LoadReport};
use crate::models::ConfigKind;

/// One published configuration as shown to the user.
#[derive(Debug, Clone, Serialize)]
pub struct PublishedEntry {
    pub key: String,
    pub kind: ConfigKind,
    pub interface: String,
    pub source: String,
}

impl From<&ConfigEntry> for PublishedEntry {
    fn from(entry: &ConfigEntry) -> Self {
        Self {
            key: entry.name.clone(),
            kind: entry.kind(),
            interface: entry.value.interface().to_string(),
            source: entry.source_file.display().to_string(),
        }
    }
}

/// Trait for rendering the outcome of a load pass.
pub trait OutputRenderer {
    /// Render the report and the entries that are currently published.
    fn render(&self, report: &LoadReport, published: &[PublishedEntry]) -> String;
}
