//! Installation orchestrator
//!
//! Turns one manifest entry plus a local driver file into an [`InstallOutcome`].
//! The `(OsKind, InstallerKind)` pair is matched exactly once, here; the per-OS
//! strategy modules never re-check the platform.
//!
//! Nothing in this module returns an error. Launch failures, extraction problems
//! and unsupported combinations all end up as a failed outcome with an exit code.

pub mod cascade;
pub mod linux;
pub mod note;
pub mod reboot;
pub mod runner;
pub mod windows;

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::domain::{InstallOutcome, InstallerKind, ManifestEntry, OsKind};

pub use runner::{CommandRunner, SystemRunner};

/// Dispatches installation requests to the matching strategy
pub struct Orchestrator<R: CommandRunner = SystemRunner> {
    runner: R,
    /// Parent of per-call extraction directories
    temp_root: PathBuf,
}

impl Orchestrator<SystemRunner> {
    pub fn new() -> Self {
        Self::with_runner(SystemRunner)
    }
}

impl Default for Orchestrator<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> Orchestrator<R> {
    pub fn with_runner(runner: R) -> Self {
        Self {
            runner,
            temp_root: crate::temp::temp_dir_base(),
        }
    }

    /// Extract archives under `root` instead of the system temp directory
    #[must_use]
    pub fn temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = root.into();
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Install `entry` from `file` on a host running `os`
    pub fn install(&self, entry: &ManifestEntry, file: &Path, os: OsKind) -> InstallOutcome {
        info!(
            name = %entry.name,
            file = %file.display(),
            kind = entry.kind.map_or("unspecified", InstallerKind::as_str),
            os = %os,
            "Installing driver"
        );

        if entry.kind == Some(InstallerKind::Manual) {
            note::write_manual_note(entry, file);
            return InstallOutcome::succeeded("manual", 0);
        }

        let runner: &dyn CommandRunner = &self.runner;
        let silent_args = entry.silent_args.as_deref();

        let outcome = match (os, entry.kind) {
            (OsKind::Windows, Some(InstallerKind::Exe)) => {
                windows::install_exe(runner, file, silent_args)
            }
            (OsKind::Windows, Some(InstallerKind::Msi)) => windows::install_msi(runner, file),
            (OsKind::Windows, Some(InstallerKind::Zip)) => {
                windows::install_zip(runner, file, silent_args, &self.temp_root)
            }
            (OsKind::Linux, Some(InstallerKind::Deb)) => linux::install_deb(runner, file),
            (OsKind::Linux, Some(InstallerKind::Rpm)) => linux::install_rpm(runner, file),
            (
                OsKind::Windows,
                None | Some(InstallerKind::Deb | InstallerKind::Rpm | InstallerKind::Manual),
            )
            | (
                OsKind::Linux,
                None
                | Some(
                    InstallerKind::Exe
                    | InstallerKind::Msi
                    | InstallerKind::Zip
                    | InstallerKind::Manual,
                ),
            ) => {
                error!(name = %entry.name, os = %os, kind = ?entry.kind, "Unsupported driver type for this OS");
                InstallOutcome::unsupported(os, entry.kind)
            }
        };

        info!(name = %entry.name, outcome = %outcome, "Installation finished");
        outcome
    }
}
