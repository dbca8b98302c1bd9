//! CLI command definitions and argument parsing.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

use colored::Colorize;

use jsonconfig::config::ConfigDirectory;
use jsonconfig::properties::PropertySource;

/// Describe a resolved directory for `jsonconfig resolve`.
pub fn describe_directory(dir: &ConfigDirectory, source: Option<PropertySource>) -> String {
    let origin = match (dir.property(), source) {
        (Some(property), Some(source)) => format!("{property} ({source})"),
        (Some(property), None) => property.to_string(),
        (None, _) => "direct".to_string(),
    };
    let status = if dir.exists() {
        "exists".green().to_string()
    } else {
        "missing".yellow().to_string()
    };

    format!(
        "  {}  {}\n  {}      {}\n  {}    {}\n",
        "directory:".cyan(),
        dir.path().display().to_string().bold(),
        "from:".cyan(),
        origin,
        "status:".cyan(),
        status,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_resolved_directory() {
        colored::control::set_override(false);
        let props = jsonconfig::properties::HostProperties::isolated().with("config.area", "/srv/area");
        let dir = ConfigDirectory::resolve(&props).unwrap();

        let text = describe_directory(&dir, Some(PropertySource::Explicit));
        assert!(text.contains("/srv/area"));
        assert!(text.contains("config.area (explicit)"));
    }

    #[test]
    fn describes_existing_directory() {
        colored::control::set_override(false);
        let tmp = tempfile::tempdir().unwrap();
        let dir = ConfigDirectory::new(tmp.path()).unwrap();

        let text = describe_directory(&dir, None);
        assert!(text.contains("direct"));
        assert!(text.contains("exists"));
    }
}
