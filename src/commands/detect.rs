//! Reconciliation views: available, not-installed, different-versions,
//! needing-update and installed
//!
//! Each view prints a listing (or JSON with `--json`) and optionally exports the
//! same rows as `{"drivers": [...]}`.

use serde::Serialize;
use tracing::info;

use crate::cli::{DetectArgs, InstalledArgs};
use crate::error::Result;
use crate::manifest;
use crate::reconcile;
use crate::ui;

use super::helpers::installed_drivers;

#[derive(Serialize)]
struct DriversEnvelope<'a, T: Serialize> {
    drivers: &'a [T],
}

/// Print rows as JSON or with `render`, then export them when asked
fn emit<T: Serialize>(
    rows: &[T],
    json: bool,
    export: Option<&std::path::Path>,
    render: impl FnOnce(&[T]),
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&DriversEnvelope { drivers: rows })?);
    } else {
        render(rows);
    }

    if let Some(path) = export {
        manifest::export(rows, path)?;
        if !json {
            ui::print_exported(path);
        }
    }
    Ok(())
}

pub fn available(args: DetectArgs) -> Result<()> {
    info!(manifest = %args.manifest.display(), "Listing available drivers");
    let entries = manifest::load(&args.manifest)?;
    let rows = reconcile::available(&entries, args.os_filter);
    emit(&rows, args.json, args.export.as_deref(), |rows| {
        ui::print_entries("Available Drivers:", rows);
    })
}

pub fn not_installed(args: DetectArgs) -> Result<()> {
    info!(manifest = %args.manifest.display(), "Listing drivers not installed");
    let entries = manifest::load(&args.manifest)?;
    let installed = installed_drivers(args.installed_from.as_deref())?;
    let rows = reconcile::not_installed(&entries, &installed, args.os_filter);
    emit(&rows, args.json, args.export.as_deref(), |rows| {
        ui::print_entries("Drivers Not Installed:", rows);
    })
}

pub fn different_versions(args: DetectArgs) -> Result<()> {
    info!(manifest = %args.manifest.display(), "Listing drivers with different versions");
    let entries = manifest::load(&args.manifest)?;
    let installed = installed_drivers(args.installed_from.as_deref())?;
    let rows = reconcile::version_mismatched(&entries, &installed, args.os_filter);
    emit(&rows, args.json, args.export.as_deref(), ui::print_mismatches)
}

pub fn needing_update(args: DetectArgs) -> Result<()> {
    info!(manifest = %args.manifest.display(), "Listing drivers needing installation or update");
    let entries = manifest::load(&args.manifest)?;
    let installed = installed_drivers(args.installed_from.as_deref())?;
    let rows = reconcile::needing_update(&entries, &installed, args.os_filter);
    emit(&rows, args.json, args.export.as_deref(), ui::print_pending)
}

pub fn installed(args: InstalledArgs) -> Result<()> {
    let rows = installed_drivers(args.installed_from.as_deref())?;
    emit(&rows, args.json, args.export.as_deref(), ui::print_installed)
}
