//! Terminal renderer: styled flowing text, one line per file.

use colored::Colorize;

use crate::config::LoadReport;
use crate::models::ConfigKind;
use crate::output::{OutputRenderer, PublishedEntry};

/// Terminal output renderer with colored, flowing text.
pub struct TerminalRenderer;

impl OutputRenderer for TerminalRenderer {
    fn render(&self, report: &LoadReport, published: &[PublishedEntry]) -> String {
        let mut output = format!(
            "  {} {}\n\n",
            "directory:".dimmed(),
            report.directory.display().to_string().bold()
        );

        if report.directory_missing {
            output.push_str(&format!(
                "  {} {}\n",
                "⚠".yellow().bold(),
                "Directory does not exist, nothing loaded.".yellow()
            ));
            return output;
        }

        if published.is_empty() && report.skipped.is_empty() {
            output.push_str(&format!("  {}\n", "No configuration files found.".dimmed()));
            return output;
        }

        for entry in published {
            let kind = match entry.kind {
                ConfigKind::Typed => "typed".cyan().bold().to_string(),
                ConfigKind::Map => "map".blue().bold().to_string(),
            };
            output.push_str(&format!(
                "  {} {:<5} {}  {}\n        {} {}\n",
                "✔".green().bold(),
                kind,
                entry.key.bold(),
                entry.interface.dimmed(),
                "from".dimmed(),
                entry.source.dimmed(),
            ));
        }

        for skipped in &report.skipped {
            output.push_str(&format!(
                "  {} {:<5} {}  {}\n",
                "✖".red().bold(),
                skipped.stage.to_string().red().bold(),
                skipped.file.bold(),
                skipped.reason.dimmed(),
            ));
        }

        output.push_str(&format!(
            "\n  {} published, {} skipped\n",
            published.len().to_string().green().bold(),
            report.skipped.len().to_string().red().bold(),
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SkipStage, SkippedFile};
    use std::path::Path;

    fn entry(key: &str, kind: ConfigKind) -> PublishedEntry {
        PublishedEntry {
            key: key.into(),
            kind,
            interface: "iface".into(),
            source: format!("/etc/app/{key}"),
        }
    }

    #[test]
    fn render_lists_published_and_skipped() {
        colored::control::set_override(false);
        let mut report = LoadReport::new(Path::new("/etc/app"));
        report.skipped.push(SkippedFile {
            file: "bad.json".into(),
            stage: SkipStage::Parse,
            reason: "EOF while parsing".into(),
        });

        let output = TerminalRenderer.render(
            &report,
            &[entry("a.json", ConfigKind::Map), entry("widget.json", ConfigKind::Typed)],
        );

        assert!(output.contains("/etc/app"));
        assert!(output.contains("a.json"));
        assert!(output.contains("widget.json"));
        assert!(output.contains("typed"));
        assert!(output.contains("from /etc/app/a.json"));
        assert!(output.contains("from /etc/app/widget.json"));
        assert!(output.contains("bad.json"));
        assert!(output.contains("EOF while parsing"));
        assert!(output.contains("2 published, 1 skipped"));
    }

    #[test]
    fn render_missing_directory() {
        colored::control::set_override(false);
        let mut report = LoadReport::new(Path::new("/nowhere"));
        report.directory_missing = true;

        let output = TerminalRenderer.render(&report, &[]);
        assert!(output.contains("does not exist"));
    }

    #[test]
    fn render_empty_directory() {
        colored::control::set_override(false);
        let report = LoadReport::new(Path::new("/empty"));
        let output = TerminalRenderer.render(&report, &[]);
        assert!(output.contains("No configuration files found."));
    }
}
