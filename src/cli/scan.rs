use clap::Parser;
use std::path::PathBuf;

/// Arguments for the scan command
#[derive(Parser, Debug, Clone)]
#[command(after_help = "EXAMPLES:\n  \
                  Write a manifest skeleton grouped by manufacturer:\n    drvsync scan -o drivers.json\n\n\
                  Write a flat {\"drivers\": [...]} manifest:\n    drvsync scan --flat\n\n\
                  Recognize extra vendors:\n    drvsync scan --vendors vendors.json\n\n\
                  Also suggest where to download each driver:\n    drvsync scan --patterns vendor_download_patterns.json")]
pub struct ScanArgs {
    /// Manifest file to write
    #[arg(long, short = 'o', value_name = "PATH", default_value = "drivers.json")]
    pub output: PathBuf,

    /// Write {"drivers": [...]} instead of grouping by manufacturer
    #[arg(long)]
    pub flat: bool,

    /// Extra vendor table (JSON object keyed by PCI vendor ID)
    #[arg(long, value_name = "PATH")]
    pub vendors: Option<PathBuf>,

    /// Vendor download patterns (JSON); writes download_suggestions.txt next to the manifest
    #[arg(long, value_name = "PATH")]
    pub patterns: Option<PathBuf>,

    /// Read installed drivers from a JSON snapshot instead of probing this machine
    #[arg(long, value_name = "PATH")]
    pub installed_from: Option<PathBuf>,
}
