//! Helpers shared by the commands

use std::path::{Path, PathBuf};

use crate::domain::{InstalledDriver, OsKind};
use crate::error::{Result, platform as platform_error};
use crate::probe::{DriverProbe, SnapshotProbe, SystemProbe};

/// The host OS, or an error on anything but Windows and Linux
pub fn host_os() -> Result<OsKind> {
    OsKind::current().ok_or_else(|| platform_error::unsupported_os(std::env::consts::OS))
}

/// Installed drivers from a snapshot when given, else from probing the host
pub fn installed_drivers(snapshot: Option<&Path>) -> Result<Vec<InstalledDriver>> {
    let probe: Box<dyn DriverProbe> = match snapshot {
        Some(path) => Box::new(SnapshotProbe::load(path)?),
        None => Box::new(SystemProbe::new(host_os()?)),
    };
    Ok(probe.list_installed())
}

/// `<user cache dir>/drvsync/downloads`, or a temp directory without one
pub fn default_download_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(crate::temp::temp_dir_base)
        .join("drvsync")
        .join("downloads")
}
