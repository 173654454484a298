use clap::Parser;
use std::path::PathBuf;

/// Arguments for the install command
#[derive(Parser, Debug, Clone)]
#[command(after_help = "EXAMPLES:\n  \
                   Install missing and outdated drivers:\n    sudo drvsync install -m drivers.json\n\n\
                   Show the plan without downloading or installing:\n    drvsync install --dry-run\n\n\
                   Reinstall everything for this OS, downloading again:\n    \
                   sudo drvsync install --all --force\n\n\
                   Reboot afterwards if an installer asks for it:\n    sudo drvsync install --auto-reboot")]
pub struct InstallArgs {
    /// Driver manifest (JSON)
    #[arg(
        long,
        short = 'm',
        value_name = "PATH",
        env = "DRVSYNC_MANIFEST",
        default_value = "drivers.json"
    )]
    pub manifest: PathBuf,

    /// Where driver files are downloaded (default: user cache directory)
    #[arg(long, short = 'd', value_name = "DIR", env = "DRVSYNC_DOWNLOAD_DIR")]
    pub download_dir: Option<PathBuf>,

    /// Install every driver for this OS, not only those needing an update
    #[arg(long)]
    pub all: bool,

    /// Download again even when a file is already cached
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Download attempts per file
    #[arg(long, value_name = "N", default_value_t = 3)]
    pub retries: u32,

    /// Timeout for each download attempt, in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 600)]
    pub timeout: u64,

    /// Show what would be installed without downloading or installing
    #[arg(long)]
    pub dry_run: bool,

    /// Reboot when an installer reports that a reboot is required
    #[arg(long)]
    pub auto_reboot: bool,

    /// Read installed drivers from a JSON snapshot instead of probing this machine
    #[arg(long, value_name = "PATH")]
    pub installed_from: Option<PathBuf>,
}
