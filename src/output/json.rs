//! JSON output renderer.
//!
//! Outputs `{"directory": ..., "published": [...], "skipped": [...], "summary": {...}}`.

use crate::config::LoadReport;
use crate::output::{OutputRenderer, PublishedEntry};

/// JSON output renderer.
pub struct JsonRenderer;

impl OutputRenderer for JsonRenderer {
    fn render(&self, report: &LoadReport, published: &[PublishedEntry]) -> String {
        let output = serde_json::json!({
            "directory": report.directory,
            "directory_missing": report.directory_missing,
            "published": published,
            "skipped": report.skipped,
            "fallbacks": report.fallbacks,
            "summary": {
                "published": published.len(),
                "skipped": report.skipped.len(),
            },
        });

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }
}
