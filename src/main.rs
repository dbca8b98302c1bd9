//! jsonconfig: load a directory of JSON configuration files.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use jsonconfig::config::{ConfigDirectory, ConfigLoader};
use jsonconfig::constants;
use jsonconfig::env::Env;
use jsonconfig::logging;
use jsonconfig::output::PublishedEntry;
use jsonconfig::properties::HostProperties;
use jsonconfig::registry::InMemoryRegistry;
use jsonconfig::schema::SchemaRegistry;

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;

use cli::args::{Cli, Command, LoadArgs, ShowArgs};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let env = Env::real();
    logging::init_logging(&env, cli.log_level.as_deref());

    let props = cli
        .host_properties(env)
        .context("failed to load host properties")?;

    match cli.command {
        Command::Resolve => run_resolve(&props),
        Command::Load(args) => run_load(&props, args),
        Command::Show(args) => run_show(&props, args),
        Command::Version => run_version(),
    }
}

/// Print version and build information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

/// Print the resolved configuration directory.
fn run_resolve(props: &HostProperties) -> Result<()> {
    let dir = ConfigDirectory::resolve(props)
        .context("failed to resolve configuration directory")?;
    let source = dir
        .property()
        .and_then(|p| props.lookup(p))
        .map(|(_, source)| source);

    print!("{}", cli::describe_directory(&dir, source));
    Ok(())
}

/// Start a loader over a fresh in-memory registry.
fn start_loader(props: &HostProperties) -> Result<(ConfigLoader, Arc<InMemoryRegistry>)> {
    let registry = Arc::new(InMemoryRegistry::new());
    let loader = ConfigLoader::start(props, SchemaRegistry::new(), registry.clone())
        .context("failed to start configuration loader")?;
    Ok((loader, registry))
}

/// Start the loader and render what was published.
fn run_load(props: &HostProperties, args: LoadArgs) -> Result<()> {
    let (loader, _registry) = start_loader(props)?;
    let report = loader
        .last_report()
        .cloned()
        .context("loader finished without a load report")?;

    let published: Vec<PublishedEntry> = loader.entries().map(PublishedEntry::from).collect();
    print!("{}", args.format.render(&report, &published));

    loader.stop();

    if args.strict && !report.is_clean() {
        bail!(
            "{} configuration file(s) could not be loaded",
            report.skipped.len()
        );
    }
    Ok(())
}

/// Load the directory and print one published value.
fn run_show(props: &HostProperties, args: ShowArgs) -> Result<()> {
    let (loader, registry) = start_loader(props)?;

    let service = registry
        .get(&args.key)
        .or_else(|| registry.get(&format!("{}{}", args.key, constants::CONFIG_EXTENSION)));
    let Some(service) = service else {
        let available = loader
            .entries()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        bail!(
            "no configuration published as '{}' (available: {})",
            args.key,
            if available.is_empty() { "none" } else { available.as_str() },
        );
    };

    let rendered = serde_json::to_string_pretty(&service.value.to_json())
        .context("failed to render configuration")?;
    println!("{rendered}");

    loader.stop();
    Ok(())
}
