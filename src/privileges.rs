//! Elevated privilege detection

use tracing::{error, info};

use crate::domain::OsKind;
use crate::error::{Result, platform as platform_error};

/// Whether the process runs as root
#[cfg(unix)]
fn is_elevated() -> bool {
    // SAFETY: geteuid has no preconditions and only returns the effective user ID.
    unsafe { libc::geteuid() == 0 }
}

/// Whether the process runs as Administrator
///
/// `net session` only succeeds from an elevated token.
#[cfg(windows)]
fn is_elevated() -> bool {
    std::process::Command::new("net")
        .arg("session")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(not(any(unix, windows)))]
fn is_elevated() -> bool {
    false
}

/// Fail unless the process can install drivers on `os`
pub fn require_elevated(os: OsKind) -> Result<()> {
    if is_elevated() {
        info!(os = %os, "Running with elevated privileges");
        return Ok(());
    }

    error!(os = %os, "Not running with elevated privileges");
    let message = match os {
        OsKind::Windows => "Administrator privileges are required to install drivers",
        OsKind::Linux => "root privileges are required to install drivers",
    };
    Err(platform_error::not_elevated(message))
}
