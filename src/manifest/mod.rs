//! Manifest loading and export
//!
//! A manifest is JSON in one of three shapes:
//!
//! ```text
//! [ {entry}, ... ]
//! { "drivers": [ {entry}, ... ] }
//! { "manufacturers": [ { "name": "...", "drivers": [ {entry}, ... ] }, ... ] }
//! ```
//!
//! Whatever the shape on disk, loading yields the flattened entry list in file order.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::domain::ManifestEntry;
use crate::error::{DrvsyncError, Result, fs as fs_error, manifest as manifest_error};

/// One manufacturer group of the grouped envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManufacturerGroup {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub drivers: Vec<ManifestEntry>,
}

#[derive(Serialize)]
struct DriversEnvelope<'a, T: Serialize> {
    drivers: &'a [T],
}

#[derive(Serialize)]
struct ManufacturersEnvelope<'a> {
    manufacturers: &'a [ManufacturerGroup],
}

/// Load and flatten a manifest file
pub fn load(path: &Path) -> Result<Vec<ManifestEntry>> {
    if !path.is_file() {
        return Err(manifest_error::not_found(path.display().to_string()));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| fs_error::read_failed(path.display().to_string(), e.to_string()))?;

    let entries = parse(&content).map_err(|e| match e {
        DrvsyncError::ManifestParseFailed { reason, .. } => {
            manifest_error::parse_failed(path.display().to_string(), reason)
        }
        other => other,
    })?;

    info!(
        path = %path.display(),
        count = entries.len(),
        "Loaded drivers from manifest"
    );
    Ok(entries)
}

/// Parse manifest JSON text in any supported envelope
pub fn parse(content: &str) -> Result<Vec<ManifestEntry>> {
    let value: Value = serde_json::from_str(content)?;

    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Object(mut map) => {
            if let Some(drivers) = map.remove("drivers") {
                return Ok(serde_json::from_value(drivers)?);
            }
            if let Some(groups) = map.remove("manufacturers") {
                let groups: Vec<ManufacturerGroup> = serde_json::from_value(groups)?;
                return Ok(groups.into_iter().flat_map(|g| g.drivers).collect());
            }
            Err(manifest_error::invalid(
                "expected a 'drivers' or 'manufacturers' key",
            ))
        }
        _ => Err(manifest_error::invalid(
            "expected an array or an object at the top level",
        )),
    }
}

/// Write rows as `{"drivers": [...]}` pretty JSON, creating parent directories
pub fn export<T: Serialize>(rows: &[T], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&DriversEnvelope { drivers: rows })?;
    write_json(path, &json)?;
    info!(path = %path.display(), count = rows.len(), "Exported drivers");
    Ok(())
}

/// Write groups as `{"manufacturers": [...]}` pretty JSON
pub fn export_grouped(groups: &[ManufacturerGroup], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&ManufacturersEnvelope {
        manufacturers: groups,
    })?;
    write_json(path, &json)?;
    info!(
        path = %path.display(),
        manufacturers = groups.len(),
        "Exported grouped manifest"
    );
    Ok(())
}

fn write_json(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| fs_error::write_failed(parent.display().to_string(), e.to_string()))?;
    }
    fs::write(path, format!("{json}\n"))
        .map_err(|e| fs_error::write_failed(path.display().to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InstallerKind, OsKind};
    use tempfile::TempDir;

    const ENTRY_A: &str = r#"{"name": "Intel Wi-Fi 6", "os": "windows", "type": "exe"}"#;
    const ENTRY_B: &str = r#"{"name": "e1000e", "os": "linux", "type": "deb"}"#;

    #[test]
    fn test_parse_bare_array() {
        let entries = parse(&format!("[{ENTRY_A}, {ENTRY_B}]")).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].kind, Some(InstallerKind::Deb));
    }

    #[test]
    fn test_parse_drivers_envelope() {
        let entries = parse(&format!(r#"{{"drivers": [{ENTRY_A}]}}"#)).unwrap();
        assert_eq!(entries[0].os, Some(OsKind::Windows));
    }

    #[test]
    fn test_parse_manufacturers_envelope_flattens_in_order() {
        let json = format!(
            r#"{{"manufacturers": [
                {{"name": "Intel", "drivers": [{ENTRY_A}]}},
                {{"name": "Empty"}},
                {{"name": "Linux", "drivers": [{ENTRY_B}]}}
            ]}}"#
        );
        let entries = parse(&json).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Intel Wi-Fi 6", "e1000e"]);
    }

    #[test]
    fn test_parse_invalid_shapes() {
        assert!(matches!(
            parse(r#"{"entries": []}"#),
            Err(DrvsyncError::ManifestInvalid { .. })
        ));
        assert!(matches!(
            parse("42"),
            Err(DrvsyncError::ManifestInvalid { .. })
        ));
        assert!(matches!(
            parse("{not json"),
            Err(DrvsyncError::ManifestParseFailed { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = load(&temp.path().join("missing.json"));
        assert!(matches!(result, Err(DrvsyncError::ManifestNotFound { .. })));
    }

    #[test]
    fn test_load_reports_path_on_parse_failure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("drivers.json");
        fs::write(&path, r#"{"drivers": [{"version": "1.0"}]}"#).unwrap();

        let err = load(&path).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("drivers.json"), "{message}");
        assert!(message.contains("missing field `name`"), "{message}");
    }

    #[test]
    fn test_unknown_values_do_not_reject_other_entries() {
        let json = r#"{"drivers": [
            {"name": "Intel Wi-Fi 6", "os": "windows", "type": "exe"},
            {"name": "Mac Audio", "os": "macos", "type": "pkg"},
            {"name": "Odd Package", "os": "linux", "type": "appimage"}
        ]}"#;
        let entries = parse(json).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].kind, Some(InstallerKind::Exe));
        assert_eq!(entries[1].os, None);
        assert_eq!(entries[2].os, Some(OsKind::Linux));
        assert_eq!(entries[2].kind, None);

        let windows = crate::reconcile::available(&entries, Some(OsKind::Windows));
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].name, "Intel Wi-Fi 6");
    }

    #[test]
    fn test_export_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/out/drivers.json");
        let entries = parse(&format!("[{ENTRY_A}, {ENTRY_B}]")).unwrap();

        export(&entries, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("{\n  \"drivers\""));
        assert_eq!(load(&path).unwrap(), entries);
    }

    #[test]
    fn test_export_grouped_is_loadable() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("grouped.json");
        let groups = vec![ManufacturerGroup {
            name: "Intel Corporation".to_string(),
            website: Some("https://www.intel.com".to_string()),
            drivers: parse(&format!("[{ENTRY_A}]")).unwrap(),
        }];

        export_grouped(&groups, &path).unwrap();

        let entries = load(&path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Intel Wi-Fi 6");
    }
}
