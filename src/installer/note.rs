//! Manual installation notes

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::domain::ManifestEntry;

/// Where the note for `entry` goes, next to the driver file
///
/// Spaces and path separators in the name become `_`, so the note never lands
/// in a subdirectory.
pub fn note_path(entry: &ManifestEntry, file: &Path) -> PathBuf {
    let dir = file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let stem = entry.name.replace([' ', '/', '\\'], "_");
    dir.join(format!("{stem}.manual.txt"))
}

/// Write the note; failures are logged and otherwise ignored
pub fn write_manual_note(entry: &ManifestEntry, file: &Path) -> Option<PathBuf> {
    let path = note_path(entry, file);
    let body = format!(
        "Manual Installation Required\n{rule}\n\nDriver: {name}\nURL: {url}\nTimestamp: {ts}\n\nPlease download and install this driver manually.\n",
        rule = "=".repeat(50),
        name = entry.name,
        url = entry.url.as_deref().unwrap_or("No URL provided"),
        ts = chrono::Local::now().to_rfc3339(),
    );

    match fs::write(&path, body) {
        Ok(()) => {
            info!(note = %path.display(), "Created manual installation note");
            Some(path)
        }
        Err(e) => {
            error!(note = %path.display(), error = %e, "Failed to create manual note");
            None
        }
    }
}
