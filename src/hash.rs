//! SHA-256 integrity checks for downloaded driver files

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{error, info, warn};

use crate::error::{Result, fs as fs_error};

/// Calculate the lowercase hex SHA-256 of a file
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path)
        .map_err(|e| fs_error::read_failed(path.display().to_string(), e.to_string()))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| fs_error::read_failed(path.display().to_string(), e.to_string()))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Check a file against an expected SHA-256
///
/// Absent or blank hashes pass without reading the file. Comparison ignores
/// case and surrounding whitespace. A file that cannot be read fails.
pub fn verify(path: &Path, expected: Option<&str>) -> bool {
    let Some(expected) = expected.map(str::trim).filter(|h| !h.is_empty()) else {
        warn!(file = %path.display(), "No hash provided, skipping verification");
        return true;
    };

    match sha256_file(path) {
        Ok(actual) if actual.eq_ignore_ascii_case(expected) => {
            info!(file = %path.display(), "Hash verification passed");
            true
        }
        Ok(actual) => {
            error!(
                file = %path.display(),
                expected = %expected.to_ascii_lowercase(),
                actual = %actual,
                "Hash verification failed"
            );
            false
        }
        Err(e) => {
            error!(file = %path.display(), error = %e, "Could not hash file");
            false
        }
    }
}
