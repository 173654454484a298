//! Domain models for drvsync
//!
//! This module contains pure domain objects: what a manifest declares, what a probe
//! observes and what an installation attempt reports. They carry no I/O.

pub mod driver;
pub mod manifest;
pub mod outcome;
pub mod platform;

pub use driver::InstalledDriver;
pub use manifest::ManifestEntry;
pub use outcome::InstallOutcome;
pub use platform::{InstallerKind, OsKind};
