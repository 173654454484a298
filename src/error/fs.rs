//! File system errors

use super::DrvsyncError;

/// Creates a file not found error
pub fn not_found(path: impl Into<String>) -> DrvsyncError {
    DrvsyncError::FileNotFound { path: path.into() }
}

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> DrvsyncError {
    DrvsyncError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> DrvsyncError {
    DrvsyncError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid JSON error for a non-manifest input file
pub fn invalid_json(path: impl Into<String>, reason: impl Into<String>) -> DrvsyncError {
    DrvsyncError::InvalidJson {
        path: path.into(),
        reason: reason.into(),
    }
}
