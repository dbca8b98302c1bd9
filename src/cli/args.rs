//! Clap argument types and host property assembly.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use jsonconfig::config::LoadReport;
use jsonconfig::constants;
use jsonconfig::env::Env;
use jsonconfig::output::PublishedEntry;
use jsonconfig::properties::{HostProperties, PropertiesError};

/// Load a directory of JSON configuration files and show what gets published.
#[derive(Parser, Debug)]
#[command(name = "jsonconfig", version = constants::VERSION)]
pub struct Cli {
    /// Configuration directory (sets `jsonconfig.dir`, overriding everything else).
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Host configuration area (sets `config.area`); `file:` URIs are accepted.
    #[arg(long, global = true)]
    pub area: Option<String>,

    /// TOML file with host startup properties.
    #[arg(long, global = true, env = "JSONCONFIG_PROPERTIES")]
    pub properties: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "jsonconfig=trace" (RUST_LOG takes precedence).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Print the resolved configuration directory.
    Resolve,

    /// Load the directory and list published configuration.
    Load(LoadArgs),

    /// Load the directory and print one published value as JSON.
    Show(ShowArgs),

    /// Print version and build information.
    Version,
}

/// Arguments for the `load` subcommand.
#[derive(Parser, Debug)]
pub struct LoadArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Exit non-zero if any configuration file was skipped.
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

/// Arguments for the `show` subcommand.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Publication key (`db.json`) or logical name (`db`).
    pub key: String,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

impl OutputFormat {
    /// Render a load result using the renderer for this format.
    pub fn render(&self, report: &LoadReport, published: &[PublishedEntry]) -> String {
        use jsonconfig::output::OutputRenderer;
        match self {
            OutputFormat::Terminal => {
                jsonconfig::output::terminal::TerminalRenderer.render(report, published)
            }
            OutputFormat::Json => jsonconfig::output::json::JsonRenderer.render(report, published),
        }
    }
}

impl Cli {
    /// Assemble host properties: flags over properties file over environment.
    ///
    /// When no layer supplies `config.area.default`, it is seeded with
    /// `~/.config/jsonconfig` (platform equivalent).
    pub fn host_properties(&self, env: Env) -> Result<HostProperties, PropertiesError> {
        let mut props = HostProperties::new(env);

        if let Some(ref path) = self.properties {
            props.load_file(path)?;
        }
        if let Some(ref dir) = self.dir {
            props.set(constants::PROP_CONFIG_DIR, dir.display().to_string());
        }
        if let Some(ref area) = self.area {
            props.set(constants::PROP_CONFIG_AREA, area.clone());
        }
        if !props.contains(constants::PROP_CONFIG_AREA_DEFAULT) {
            if let Some(default_area) = dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR)) {
                props.set(
                    constants::PROP_CONFIG_AREA_DEFAULT,
                    default_area.display().to_string(),
                );
            }
        }

        Ok(props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("jsonconfig").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn load_defaults_to_terminal() {
        let cli = parse(&["load"]);
        match cli.command {
            Command::Load(args) => {
                assert_eq!(args.format, OutputFormat::Terminal);
                assert!(!args.strict);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["load", "--format", "json", "--strict", "--dir", "/etc/app"]);
        assert_eq!(cli.dir, Some(PathBuf::from("/etc/app")));
        assert!(matches!(
            cli.command,
            Command::Load(LoadArgs { format: OutputFormat::Json, strict: true })
        ));
    }

    #[test]
    fn show_takes_a_key() {
        let cli = parse(&["show", "db"]);
        assert!(matches!(cli.command, Command::Show(ShowArgs { ref key }) if key == "db"));
    }

    #[test]
    fn flags_override_properties_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("host.toml");
        std::fs::write(&path, "\"jsonconfig.dir\" = \"/from/file\"\n\"config.area\" = \"/area/file\"\n").unwrap();

        let cli = parse(&[
            "resolve",
            "--properties",
            path.to_str().unwrap(),
            "--dir",
            "/from/flag",
        ]);
        let props = cli.host_properties(Env::empty()).unwrap();
        assert_eq!(props.get("jsonconfig.dir").as_deref(), Some("/from/flag"));
        assert_eq!(props.get("config.area").as_deref(), Some("/area/file"));
    }

    #[test]
    fn default_area_is_not_overwritten() {
        let cli = parse(&["resolve"]);
        let env = Env::from_vars([("JSONCONFIG_AREA_DEFAULT", "/opt/defaults")]);
        let props = cli.host_properties(env).unwrap();
        assert_eq!(props.get("config.area.default").as_deref(), Some("/opt/defaults"));
    }

    #[test]
    fn missing_properties_file_is_an_error() {
        let cli = parse(&["resolve", "--properties", "/tmp/jsonconfig_absent_props.toml"]);
        assert!(cli.host_properties(Env::empty()).is_err());
    }
}
