//! Download errors

use super::DrvsyncError;

/// Creates an HTTP client construction error
pub fn client_failed(reason: impl Into<String>) -> DrvsyncError {
    DrvsyncError::HttpClientFailed {
        reason: reason.into(),
    }
}
