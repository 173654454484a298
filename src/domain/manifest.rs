//! Manifest entry domain type
//!
//! A `ManifestEntry` is the declared expectation for one driver. Only `name` is
//! required; every other field is optional and blank strings are read as absent,
//! so manifests produced by `drvsync scan` (which leaves placeholders empty) load
//! without special cases downstream.
//!
//! An `os` or `type` drvsync does not know is logged and read as absent. The
//! entry still loads: it never matches an OS filter, and installing it reports
//! an unsupported outcome.

use std::fmt;
use std::str::FromStr;

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::platform::{InstallerKind, OsKind};

/// One expected driver from a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub name: String,

    /// Expected version; absent means any version satisfies the entry
    #[serde(
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,

    /// Vendor-format hardware identifier (e.g. `PCI\VEN_8086&DEV_2723`)
    #[serde(
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub device_id: Option<String>,

    #[serde(
        default,
        deserialize_with = "recognized",
        skip_serializing_if = "Option::is_none"
    )]
    pub os: Option<OsKind>,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "recognized",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<InstallerKind>,

    #[serde(
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,

    #[serde(
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_name: Option<String>,

    #[serde(
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub sha256: Option<String>,

    /// Installer flags tried before the built-in silent flag fallbacks
    #[serde(
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub silent_args: Option<String>,
}

impl ManifestEntry {
    /// Create an entry with only a name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            device_id: None,
            os: None,
            kind: None,
            url: None,
            file_name: None,
            sha256: None,
            silent_args: None,
        }
    }

    /// Expected version, or an empty string when any version is accepted
    pub fn version_str(&self) -> &str {
        self.version.as_deref().unwrap_or_default()
    }

    /// Raw device identifier, or an empty string when none is declared
    pub fn device_id_str(&self) -> &str {
        self.device_id.as_deref().unwrap_or_default()
    }

    /// File name to store the downloaded driver under
    ///
    /// Uses `fileName` when declared, else the last path segment of the URL,
    /// else `<name>.<type>` with spaces replaced by underscores.
    pub fn download_file_name(&self) -> String {
        if let Some(ref file_name) = self.file_name {
            return file_name.clone();
        }

        if let Some(segment) = self.url.as_deref().and_then(last_url_segment) {
            return segment.to_string();
        }

        let stem = self.name.trim().replace(' ', "_");
        match self.kind {
            Some(kind) => format!("{stem}.{kind}"),
            None => stem,
        }
    }
}

fn last_url_segment(url: &str) -> Option<&str> {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let after_scheme = without_query
        .split_once("://")
        .map_or(without_query, |(_, rest)| rest);
    // A bare host has no path segment to use
    let (_, path) = after_scheme.split_once('/')?;
    path.rsplit('/').find(|s| !s.is_empty())
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn recognized<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    Ok(non_empty(deserializer)?.and_then(|raw| match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(value = %raw, reason = %e, "Ignoring unrecognized manifest value");
            None
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_entry() {
        let json = r#"{
            "name": "Intel Wi-Fi 6",
            "version": "22.190.0",
            "deviceId": "PCI\\VEN_8086&DEV_2723",
            "os": "Windows",
            "type": "EXE",
            "url": "https://example.com/wifi.exe",
            "sha256": "abc",
            "silentArgs": "/quiet"
        }"#;
        let entry: ManifestEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.name, "Intel Wi-Fi 6");
        assert_eq!(entry.os, Some(OsKind::Windows));
        assert_eq!(entry.kind, Some(InstallerKind::Exe));
        assert_eq!(entry.device_id_str(), "PCI\\VEN_8086&DEV_2723");
        assert_eq!(entry.silent_args.as_deref(), Some("/quiet"));
        assert_eq!(entry.file_name, None);
    }

    #[test]
    fn test_blank_fields_are_absent() {
        let json = r#"{"name": "x", "version": "", "sha256": "  ", "os": "", "type": ""}"#;
        let entry: ManifestEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.version, None);
        assert_eq!(entry.sha256, None);
        assert_eq!(entry.os, None);
        assert_eq!(entry.kind, None);
        assert_eq!(entry.version_str(), "");
    }

    #[test]
    fn test_unknown_os_and_type_read_as_absent() {
        let json = r#"{"name": "Mac Audio", "os": "macos", "type": "pkg", "version": "1.2"}"#;
        let entry: ManifestEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.os, None);
        assert_eq!(entry.kind, None);
        assert_eq!(entry.version.as_deref(), Some("1.2"));
    }

    #[test]
    fn test_wrong_json_type_is_rejected() {
        let json = r#"{"name": "x", "os": 42}"#;
        assert!(serde_json::from_str::<ManifestEntry>(json).is_err());
    }

    #[test]
    fn test_missing_name_is_rejected() {
        assert!(serde_json::from_str::<ManifestEntry>(r#"{"version": "1.0"}"#).is_err());
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let mut entry = ManifestEntry::named("Realtek Audio");
        entry.kind = Some(InstallerKind::Zip);
        entry.device_id = Some("HDAUDIO\\VEN_10EC&DEV_0897".to_string());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "zip");
        assert_eq!(json["deviceId"], "HDAUDIO\\VEN_10EC&DEV_0897");
        assert!(json.get("url").is_none());
    }

    #[test]
    fn test_download_file_name_prefers_declared() {
        let mut entry = ManifestEntry::named("GPU");
        entry.file_name = Some("gpu-setup.exe".to_string());
        entry.url = Some("https://example.com/dl/other.exe".to_string());
        assert_eq!(entry.download_file_name(), "gpu-setup.exe");
    }

    #[test]
    fn test_download_file_name_from_url() {
        let mut entry = ManifestEntry::named("GPU");
        entry.url = Some("https://example.com/dl/driver_531.exe?token=1".to_string());
        assert_eq!(entry.download_file_name(), "driver_531.exe");
    }

    #[test]
    fn test_download_file_name_fallback() {
        let mut entry = ManifestEntry::named("Intel Chipset");
        entry.url = Some("https://example.com".to_string());
        entry.kind = Some(InstallerKind::Msi);
        assert_eq!(entry.download_file_name(), "Intel_Chipset.msi");
    }
}
