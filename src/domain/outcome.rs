//! Installation outcome domain type

use std::fmt;

use super::platform::{InstallerKind, OsKind};

/// Exit code reported when a process could not be launched at all, or when no
/// process was launched because the request could not be served
pub const LAUNCH_FAILED: i32 = -1;

/// Windows installer code for "success, reboot required"
pub const REBOOT_REQUIRED: i32 = 3010;

/// Windows installer code for "success, reboot initiated"
pub const REBOOT_INITIATED: i32 = 1641;

/// Result of one installation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub success: bool,
    /// Native process exit code, or [`LAUNCH_FAILED`]
    pub exit_code: i32,
    /// Strategy that produced this outcome, for diagnostics
    pub method: String,
}

impl InstallOutcome {
    pub fn succeeded(method: impl Into<String>, exit_code: i32) -> Self {
        Self {
            success: true,
            exit_code,
            method: method.into(),
        }
    }

    pub fn failed(method: impl Into<String>, exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
            method: method.into(),
        }
    }

    /// No process could be started
    pub fn launch_failed(method: impl Into<String>) -> Self {
        Self::failed(method, LAUNCH_FAILED)
    }

    /// The (os, type) pair has no installation strategy
    pub fn unsupported(os: OsKind, kind: Option<InstallerKind>) -> Self {
        let kind = kind.map_or("unspecified", InstallerKind::as_str);
        Self::failed(format!("unsupported ({}/{kind})", os.as_str()), LAUNCH_FAILED)
    }

    /// Whether the installer asked for (or started) a reboot
    pub fn needs_reboot(&self) -> bool {
        self.success && matches!(self.exit_code, REBOOT_REQUIRED | REBOOT_INITIATED)
    }
}

impl fmt::Display for InstallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.success { "ok" } else { "failed" };
        write!(f, "{status} via {} (exit code {})", self.method, self.exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_outcome() {
        let outcome = InstallOutcome::unsupported(OsKind::Linux, Some(InstallerKind::Msi));
        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, LAUNCH_FAILED);
        assert_eq!(outcome.method, "unsupported (linux/msi)");
    }

    #[test]
    fn test_needs_reboot() {
        assert!(InstallOutcome::succeeded("msiexec", REBOOT_REQUIRED).needs_reboot());
        assert!(InstallOutcome::succeeded("exe /S", REBOOT_INITIATED).needs_reboot());
        assert!(!InstallOutcome::succeeded("msiexec", 0).needs_reboot());
        assert!(!InstallOutcome::failed("exe", REBOOT_REQUIRED).needs_reboot());
    }

    #[test]
    fn test_display() {
        let outcome = InstallOutcome::failed("dpkg -i", 1);
        assert_eq!(outcome.to_string(), "failed via dpkg -i (exit code 1)");
    }
}
