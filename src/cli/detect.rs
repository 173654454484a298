use clap::Parser;
use std::path::PathBuf;

use crate::domain::OsKind;

/// Arguments shared by the reconciliation views
#[derive(Parser, Debug, Clone)]
#[command(after_help = "EXAMPLES:\n  \
                  Drivers for Windows only:\n    drvsync available --os-filter windows\n\n\
                  Compare against a snapshot taken on another machine:\n    \
                  drvsync needing-update --installed-from installed.json\n\n\
                  Save the result as a manifest:\n    drvsync not-installed --export missing.json")]
pub struct DetectArgs {
    /// Driver manifest (JSON)
    #[arg(
        long,
        short = 'm',
        value_name = "PATH",
        env = "DRVSYNC_MANIFEST",
        default_value = "drivers.json"
    )]
    pub manifest: PathBuf,

    /// Only consider drivers for this OS (windows, linux)
    #[arg(long, value_name = "OS")]
    pub os_filter: Option<OsKind>,

    /// Write the result to a JSON file as {"drivers": [...]}
    #[arg(long, short = 'e', value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Read installed drivers from a JSON snapshot instead of probing this machine
    #[arg(long, value_name = "PATH")]
    pub installed_from: Option<PathBuf>,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the installed command
#[derive(Parser, Debug, Clone)]
pub struct InstalledArgs {
    /// Write the installed drivers to a JSON file (usable with --installed-from)
    #[arg(long, short = 'e', value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Read installed drivers from a JSON snapshot instead of probing this machine
    #[arg(long, value_name = "PATH")]
    pub installed_from: Option<PathBuf>,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}
