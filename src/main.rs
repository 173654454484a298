//! drvsync - driver manifest reconciler and installer
//!
//! Compares a JSON manifest of expected hardware drivers with the drivers
//! installed on the host, and installs whatever is missing or outdated with the
//! platform's native installers.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod cli;
mod commands;
mod domain;
mod download;
mod error;
mod hash;
mod installer;
mod manifest;
mod privileges;
mod probe;
mod progress;
mod reconcile;
mod temp;
mod ui;
mod vendor;

use cli::{Cli, Commands};

/// Log to stderr, and append plain-text logs to `log_file` when it can be opened
fn init_logging(verbose: bool, log_file: &Path) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    let file_layer = match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        ),
        Err(e) => {
            eprintln!("Cannot open log file {}: {e}", log_file.display());
            None
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Available(_) => "available",
        Commands::NotInstalled(_) => "not-installed",
        Commands::DifferentVersions(_) => "different-versions",
        Commands::NeedingUpdate(_) => "needing-update",
        Commands::Installed(_) => "installed",
        Commands::Install(_) => "install",
        Commands::Scan(_) => "scan",
        Commands::Version => "version",
        Commands::Completions(_) => "completions",
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.command.is_operational() {
        init_logging(cli.verbose, &cli.log_file);
        info!(
            version = env!("CARGO_PKG_VERSION"),
            os = std::env::consts::OS,
            arch = std::env::consts::ARCH,
            command = command_name(&cli.command),
            "drvsync starting"
        );
    }

    let result = match cli.command {
        Commands::Available(args) => commands::detect::available(args),
        Commands::NotInstalled(args) => commands::detect::not_installed(args),
        Commands::DifferentVersions(args) => commands::detect::different_versions(args),
        Commands::NeedingUpdate(args) => commands::detect::needing_update(args),
        Commands::Installed(args) => commands::detect::installed(args),
        Commands::Install(args) => commands::install::run(args),
        Commands::Scan(args) => commands::scan::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
