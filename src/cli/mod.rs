//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - detect: arguments shared by the reconciliation views
//! - install: Install command arguments
//! - scan: Scan command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod detect;
pub mod install;
pub mod scan;

pub use completions::CompletionsArgs;
pub use detect::{DetectArgs, InstalledArgs};
pub use install::InstallArgs;
pub use scan::ScanArgs;

/// drvsync - driver manifest reconciler and installer
///
/// Compare a manifest of expected drivers with what is installed and install what is missing.
#[derive(Parser, Debug)]
#[command(
    name = "drvsync",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Reconcile a driver manifest with installed drivers and install what is missing",
    long_about = "drvsync reads a JSON manifest of expected hardware drivers, compares it with the \
                  drivers installed on this machine, and silently installs missing or outdated \
                  drivers with the installer each platform understands (exe, msi, zip, deb, rpm).",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  drvsync needing-update -m drivers.json      \x1b[90m# What would be installed\x1b[0m\n   \
                  drvsync install -m drivers.json --dry-run   \x1b[90m# Plan without installing\x1b[0m\n   \
                  sudo drvsync install -m drivers.json        \x1b[90m# Install missing drivers\x1b[0m\n   \
                  drvsync installed --export installed.json   \x1b[90m# Snapshot installed drivers\x1b[0m\n   \
                  drvsync scan -o drivers.json                \x1b[90m# Generate a manifest skeleton\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Append logs to this file
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "DRVSYNC_LOG_FILE",
        default_value = "drvsync.log"
    )]
    pub log_file: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every manifest driver (optionally for one OS)
    Available(DetectArgs),

    /// List manifest drivers with no matching installed driver
    NotInstalled(DetectArgs),

    /// List matched drivers whose installed version differs from the manifest
    DifferentVersions(DetectArgs),

    /// List drivers that are missing or at a different version
    NeedingUpdate(DetectArgs),

    /// List drivers installed on this machine
    Installed(InstalledArgs),

    /// Download and install drivers that need it
    Install(InstallArgs),

    /// Generate a manifest skeleton from the installed drivers
    Scan(ScanArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

impl Commands {
    /// Whether the command does real work worth a startup banner in the log
    pub fn is_operational(&self) -> bool {
        !matches!(self, Commands::Version | Commands::Completions(_))
    }
}
