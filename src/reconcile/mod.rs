//! Manifest reconciliation
//!
//! Compares manifest entries against the drivers a probe observed and produces four
//! views:
//! - [`available`]: entries for an OS (no installed-state judgment)
//! - [`not_installed`]: available entries with no matching installed driver
//! - [`version_mismatched`]: matched entries whose versions differ
//! - [`needing_update`]: the union of the two, tagged with the current version
//!   when the cause is a mismatch
//!
//! All views borrow from the manifest slice and are recomputed on every call.

pub mod matcher;
pub mod normalize;
pub mod version;

use std::cmp::Ordering;

use serde::{Serialize, Serializer};
use tracing::{debug, info};

use crate::domain::{InstalledDriver, ManifestEntry, OsKind};

pub use matcher::find_match;

/// A matched entry whose installed version differs from the expected one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionMismatch<'a, 'b> {
    pub entry: &'a ManifestEntry,
    pub installed: &'b InstalledDriver,
}

impl Serialize for VersionMismatch<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Row<'r> {
            #[serde(flatten)]
            entry: &'r ManifestEntry,
            installed_version: &'r str,
        }

        Row {
            entry: self.entry,
            installed_version: &self.installed.version,
        }
        .serialize(serializer)
    }
}

/// An entry that needs a new install or an update
///
/// `current_version` is set exactly when the entry is installed at a different
/// version; callers use it to tell an update from a fresh install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingDriver<'a> {
    #[serde(flatten)]
    pub entry: &'a ManifestEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_version: Option<String>,
}

impl PendingDriver<'_> {
    pub fn is_update(&self) -> bool {
        self.current_version.is_some()
    }
}

/// Entries targeting `os_filter`, or every entry when no filter is given
///
/// Entries that declare no OS are excluded whenever a filter is set.
pub fn available(manifest: &[ManifestEntry], os_filter: Option<OsKind>) -> Vec<&ManifestEntry> {
    let entries: Vec<&ManifestEntry> = match os_filter {
        Some(os) => manifest.iter().filter(|e| e.os == Some(os)).collect(),
        None => manifest.iter().collect(),
    };

    if let Some(os) = os_filter {
        info!(os = %os, count = entries.len(), "Filtered manifest by OS");
    }
    entries
}

/// Available entries that no installed driver satisfies
pub fn not_installed<'a>(
    manifest: &'a [ManifestEntry],
    installed: &[InstalledDriver],
    os_filter: Option<OsKind>,
) -> Vec<&'a ManifestEntry> {
    let missing: Vec<&ManifestEntry> = available(manifest, os_filter)
        .into_iter()
        .filter(|entry| find_match(entry, installed).is_none())
        .collect();

    info!(count = missing.len(), "Found drivers not installed");
    missing
}

/// Available entries matched to an installed driver at a different version
///
/// Only pairs where both sides declare a non-empty version are compared.
pub fn version_mismatched<'a, 'b>(
    manifest: &'a [ManifestEntry],
    installed: &'b [InstalledDriver],
    os_filter: Option<OsKind>,
) -> Vec<VersionMismatch<'a, 'b>> {
    let mismatched: Vec<VersionMismatch<'a, 'b>> = available(manifest, os_filter)
        .into_iter()
        .filter_map(|entry| {
            let matched = find_match(entry, installed)?;
            let expected = entry.version_str();
            if expected.is_empty() || matched.version.is_empty() {
                return None;
            }

            let ordering = version::compare(&matched.version, expected);
            debug!(
                name = %entry.name,
                installed = %matched.version,
                expected = %expected,
                ?ordering,
                "Compared driver versions"
            );
            (ordering != Ordering::Equal).then_some(VersionMismatch {
                entry,
                installed: matched,
            })
        })
        .collect();

    info!(count = mismatched.len(), "Found drivers with different versions");
    mismatched
}

/// Entries that are missing or installed at a different version
///
/// Missing entries come first in manifest order, followed by mismatched ones.
/// Duplicates are detected by entry identity, not by content.
pub fn needing_update<'a>(
    manifest: &'a [ManifestEntry],
    installed: &[InstalledDriver],
    os_filter: Option<OsKind>,
) -> Vec<PendingDriver<'a>> {
    let mut pending: Vec<PendingDriver<'a>> = not_installed(manifest, installed, os_filter)
        .into_iter()
        .map(|entry| PendingDriver {
            entry,
            current_version: None,
        })
        .collect();

    for mismatch in version_mismatched(manifest, installed, os_filter) {
        let already_listed = pending
            .iter()
            .any(|p| std::ptr::eq(p.entry, mismatch.entry));
        if !already_listed {
            pending.push(PendingDriver {
                entry: mismatch.entry,
                current_version: Some(mismatch.installed.version.clone()),
            });
        }
    }

    info!(count = pending.len(), "Total drivers needing installation or update");
    pending
}
