//! Installation run errors

use super::DrvsyncError;

/// Creates the error reported when any driver in a run failed to install
pub fn failed(failed: usize, total: usize) -> DrvsyncError {
    DrvsyncError::InstallationsFailed { failed, total }
}
