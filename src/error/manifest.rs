//! Manifest errors

use super::DrvsyncError;

/// Creates a manifest not found error
pub fn not_found(path: impl Into<String>) -> DrvsyncError {
    DrvsyncError::ManifestNotFound { path: path.into() }
}

/// Creates a manifest parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> DrvsyncError {
    DrvsyncError::ManifestParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid manifest error
pub fn invalid(message: impl Into<String>) -> DrvsyncError {
    DrvsyncError::ManifestInvalid {
        message: message.into(),
    }
}
