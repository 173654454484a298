//! Platform domain types
//!
//! Closed enumerations for the operating systems and installer package formats a
//! manifest can name. Parsing is case-insensitive so `"Windows"`, `"windows"` and
//! `"WINDOWS"` are the same value.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Operating system a driver targets, or the host the tool runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsKind {
    Windows,
    Linux,
}

impl OsKind {
    /// Detect the host operating system
    ///
    /// Returns `None` on anything other than Windows or Linux.
    pub fn current() -> Option<Self> {
        match std::env::consts::OS {
            "windows" => Some(OsKind::Windows),
            "linux" => Some(OsKind::Linux),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OsKind::Windows => "windows",
            OsKind::Linux => "linux",
        }
    }
}

impl fmt::Display for OsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsKind::Windows => write!(f, "Windows"),
            OsKind::Linux => write!(f, "Linux"),
        }
    }
}

impl FromStr for OsKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" => Ok(OsKind::Windows),
            "linux" => Ok(OsKind::Linux),
            other => Err(format!("unknown os '{other}', expected windows or linux")),
        }
    }
}

impl Serialize for OsKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Package format of a driver file, which selects the installation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallerKind {
    Exe,
    Msi,
    Zip,
    Deb,
    Rpm,
    /// Cannot be automated; only a note is written
    Manual,
}

impl InstallerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InstallerKind::Exe => "exe",
            InstallerKind::Msi => "msi",
            InstallerKind::Zip => "zip",
            InstallerKind::Deb => "deb",
            InstallerKind::Rpm => "rpm",
            InstallerKind::Manual => "manual",
        }
    }
}

impl fmt::Display for InstallerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstallerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exe" => Ok(InstallerKind::Exe),
            "msi" => Ok(InstallerKind::Msi),
            "zip" => Ok(InstallerKind::Zip),
            "deb" => Ok(InstallerKind::Deb),
            "rpm" => Ok(InstallerKind::Rpm),
            "manual" => Ok(InstallerKind::Manual),
            other => Err(format!(
                "unknown installer type '{other}', expected exe, msi, zip, deb, rpm or manual"
            )),
        }
    }
}

impl Serialize for InstallerKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_kind_parse_case_insensitive() {
        assert_eq!("Windows".parse::<OsKind>(), Ok(OsKind::Windows));
        assert_eq!("LINUX".parse::<OsKind>(), Ok(OsKind::Linux));
        assert!("macos".parse::<OsKind>().is_err());
    }

    #[test]
    fn test_os_kind_display() {
        assert_eq!(OsKind::Windows.to_string(), "Windows");
        assert_eq!(OsKind::Linux.as_str(), "linux");
    }

    #[test]
    fn test_installer_kind_parse() {
        assert_eq!("MSI".parse::<InstallerKind>(), Ok(InstallerKind::Msi));
        assert_eq!(" manual ".parse::<InstallerKind>(), Ok(InstallerKind::Manual));
        assert!("appimage".parse::<InstallerKind>().is_err());
    }

    #[test]
    fn test_installer_kind_serializes_lowercase() {
        let json = serde_json::to_string(&InstallerKind::Deb).unwrap();
        assert_eq!(json, "\"deb\"");
    }
}
