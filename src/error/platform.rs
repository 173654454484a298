//! Platform errors

use super::DrvsyncError;

/// Creates an unsupported operating system error
pub fn unsupported_os(os: impl Into<String>) -> DrvsyncError {
    DrvsyncError::UnsupportedOs { os: os.into() }
}

/// Creates an insufficient privileges error
pub fn not_elevated(message: impl Into<String>) -> DrvsyncError {
    DrvsyncError::NotElevated {
        message: message.into(),
    }
}
