//! Installed-driver probes
//!
//! A probe lists the drivers present on a machine. [`SystemProbe`] asks the
//! host OS tools; [`SnapshotProbe`] replays a JSON export so reconciliation can
//! run against another machine's state (or a fixture in tests).
//!
//! Probing is best effort: a missing tool, a timeout or unparsable output is
//! logged and yields whatever was collected so far.

pub mod linux;
pub mod windows;

use std::fs;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::domain::{InstalledDriver, OsKind};
use crate::error::{Result, fs as fs_error};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Source of the installed-driver set
pub trait DriverProbe {
    fn list_installed(&self) -> Vec<InstalledDriver>;
}

/// Enumerates drivers with the host's own tools
#[derive(Debug, Clone, Copy)]
pub struct SystemProbe {
    os: OsKind,
}

impl SystemProbe {
    pub fn new(os: OsKind) -> Self {
        Self { os }
    }
}

impl DriverProbe for SystemProbe {
    fn list_installed(&self) -> Vec<InstalledDriver> {
        info!(os = %self.os, "Detecting installed drivers");
        let drivers = match self.os {
            OsKind::Windows => windows::list_installed(),
            OsKind::Linux => linux::list_installed(),
        };
        info!(count = drivers.len(), "Detected installed drivers");
        drivers
    }
}

/// Installed drivers read from a previously exported JSON file
#[derive(Debug, Clone)]
pub struct SnapshotProbe {
    drivers: Vec<InstalledDriver>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Bare(Vec<InstalledDriver>),
    Envelope { drivers: Vec<InstalledDriver> },
}

impl SnapshotProbe {
    /// Read a snapshot: a bare array or `{"drivers": [...]}`
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(fs_error::not_found(path.display().to_string()));
        }
        let content = fs::read_to_string(path)
            .map_err(|e| fs_error::read_failed(path.display().to_string(), e.to_string()))?;
        let file: SnapshotFile = serde_json::from_str(&content)
            .map_err(|e| fs_error::invalid_json(path.display().to_string(), e.to_string()))?;
        let drivers = match file {
            SnapshotFile::Bare(drivers) | SnapshotFile::Envelope { drivers } => drivers,
        };
        info!(path = %path.display(), count = drivers.len(), "Loaded installed-driver snapshot");
        Ok(Self { drivers })
    }
}

impl DriverProbe for SnapshotProbe {
    fn list_installed(&self) -> Vec<InstalledDriver> {
        self.drivers.clone()
    }
}

/// Why an enumeration command produced no output
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to launch: {0}")]
    Launch(#[from] std::io::Error),

    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    #[error("exited with status {0}")]
    Failed(i32),
}

/// Run a read-only query command and capture its stdout, killing it at `timeout`
pub fn capture_with_timeout(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> std::result::Result<String, CaptureError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;

    // Drain stdout on a thread so a chatty child never blocks on a full pipe
    let mut stdout = child.stdout.take();
    let reader = thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(ref mut out) = stdout {
            let _ = out.read_to_end(&mut buf);
        }
        buf
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(CaptureError::TimedOut(timeout));
        }
        thread::sleep(POLL_INTERVAL);
    };

    let bytes = reader.join().unwrap_or_default();
    if !status.success() {
        return Err(CaptureError::Failed(status.code().unwrap_or(-1)));
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
