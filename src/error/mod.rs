//! Error types and handling for drvsync
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Only configuration problems are errors. Installer failures, download failures
//! and hash mismatches are reported as values (`InstallOutcome`, `bool`) so a single
//! bad driver never aborts a run.
//!
//! This module is organized into sub-modules by error domain:
//! - [`manifest`]: Manifest loading errors
//! - [`platform`]: Host platform and privilege errors
//! - [`fs`]: File system errors
//! - [`download`]: HTTP client construction errors
//! - [`install`]: Run-level installation failures

pub mod download;
pub mod fs;
pub mod install;
pub mod manifest;
pub mod platform;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for drvsync operations
#[derive(Error, Diagnostic, Debug)]
pub enum DrvsyncError {
    // Manifest errors
    #[error("Manifest file not found: {path}")]
    #[diagnostic(
        code(drvsync::manifest::not_found),
        help("Pass the manifest location with --manifest or DRVSYNC_MANIFEST")
    )]
    ManifestNotFound { path: String },

    #[error("Failed to parse manifest: {path}: {reason}")]
    #[diagnostic(code(drvsync::manifest::parse_failed))]
    ManifestParseFailed { path: String, reason: String },

    #[error("Invalid manifest format: {message}")]
    #[diagnostic(
        code(drvsync::manifest::invalid),
        help("Expected an array, an object with a 'drivers' key, or an object with a 'manufacturers' key")
    )]
    ManifestInvalid { message: String },

    // Platform errors
    #[error("Unsupported operating system: {os}")]
    #[diagnostic(
        code(drvsync::platform::unsupported_os),
        help("drvsync installs drivers on Windows and Linux only")
    )]
    UnsupportedOs { os: String },

    #[error("Insufficient privileges: {message}")]
    #[diagnostic(
        code(drvsync::platform::not_elevated),
        help("Run as Administrator on Windows or with sudo on Linux, or use --dry-run")
    )]
    NotElevated { message: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(drvsync::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(drvsync::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(drvsync::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Invalid JSON in {path}: {reason}")]
    #[diagnostic(code(drvsync::fs::invalid_json))]
    InvalidJson { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(drvsync::fs::io_error))]
    IoError { message: String },

    // Download errors
    #[error("Failed to initialize HTTP client: {reason}")]
    #[diagnostic(code(drvsync::download::client_failed))]
    HttpClientFailed { reason: String },

    // Install errors
    #[error("{failed} of {total} driver installations failed")]
    #[diagnostic(
        code(drvsync::install::failed),
        help("See the log file for the commands that were attempted and their exit codes")
    )]
    InstallationsFailed { failed: usize, total: usize },
}

impl From<std::io::Error> for DrvsyncError {
    fn from(err: std::io::Error) -> Self {
        DrvsyncError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for DrvsyncError {
    fn from(err: serde_json::Error) -> Self {
        DrvsyncError::ManifestParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, DrvsyncError>;
