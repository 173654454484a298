//! Scan command implementation
//!
//! Builds a manifest skeleton from the drivers installed on this machine:
//! generic OS drivers are dropped, the rest are grouped by manufacturer and
//! given a suggested download file name. URLs and hashes are left for the user;
//! with vendor download patterns, a report of where to look is written too.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::ScanArgs;
use crate::domain::{InstalledDriver, InstallerKind, ManifestEntry, OsKind};
use crate::error::Result;
use crate::manifest::{self, ManufacturerGroup};
use crate::ui;
use crate::vendor::patterns::ReportRow;
use crate::vendor::{self, VendorPatterns, VendorTable};

use super::helpers::{host_os, installed_drivers};

const UNKNOWN_MANUFACTURER: &str = "Unknown Manufacturer";
const SUGGESTIONS_FILE: &str = "download_suggestions.txt";

/// Run scan command
pub fn run(args: ScanArgs) -> Result<()> {
    let os = host_os()?;
    info!(output = %args.output.display(), flat = args.flat, "Scanning installed drivers");

    let mut vendors = VendorTable::builtin();
    if let Some(ref path) = args.vendors {
        vendors.load(path)?;
    }
    info!(vendors = vendors.len(), "Vendor table ready");
    let patterns = args.patterns.as_deref().map(VendorPatterns::load).transpose()?;

    let installed = installed_drivers(args.installed_from.as_deref())?;
    let groups = group_by_manufacturer(&installed, &vendors, os);
    let count: usize = groups.iter().map(|g| g.drivers.len()).sum();
    info!(
        installed = installed.len(),
        kept = count,
        manufacturers = groups.len(),
        "Built manifest skeleton"
    );

    if args.flat {
        let entries: Vec<&ManifestEntry> = groups.iter().flat_map(|g| &g.drivers).collect();
        manifest::export(&entries, &args.output)?;
    } else {
        manifest::export_grouped(&groups, &args.output)?;
    }

    println!("Found {count} non-generic driver(s).");
    ui::print_exported(&args.output);

    if let Some(ref patterns) = patterns {
        let path = suggestions_path(&args.output);
        patterns.write_report(&report_rows(&groups), &path)?;
        println!("Download suggestions written to: {}", path.display());
    }
    Ok(())
}

/// The suggestions report sits in the same directory as the manifest
fn suggestions_path(output: &Path) -> PathBuf {
    output.with_file_name(SUGGESTIONS_FILE)
}

fn report_rows(groups: &[ManufacturerGroup]) -> Vec<ReportRow<'_>> {
    groups
        .iter()
        .flat_map(|group| {
            group.drivers.iter().map(|entry| ReportRow {
                name: &entry.name,
                vendor: &group.name,
                device_type: vendor::device_type(&entry.name, entry.device_id_str()),
            })
        })
        .collect()
}

/// Default installer type for scanned drivers on `os`
fn default_kind(os: OsKind) -> InstallerKind {
    match os {
        OsKind::Windows => InstallerKind::Exe,
        OsKind::Linux => InstallerKind::Deb,
    }
}

/// Non-generic drivers as manifest entries, grouped by manufacturer
///
/// Groups are sorted by name with unknown vendors last; drivers keep probe order.
fn group_by_manufacturer(
    installed: &[InstalledDriver],
    vendors: &VendorTable,
    os: OsKind,
) -> Vec<ManufacturerGroup> {
    let kind = default_kind(os);
    let mut known: BTreeMap<String, ManufacturerGroup> = BTreeMap::new();
    let mut unknown = ManufacturerGroup {
        name: UNKNOWN_MANUFACTURER.to_string(),
        website: None,
        drivers: Vec::new(),
    };

    for driver in installed.iter().filter(|d| !vendor::is_generic_driver(&d.name)) {
        let vendor = vendors.lookup(&driver.device_id);
        let vendor_name = vendor.map_or(UNKNOWN_MANUFACTURER, |v| v.name.as_str());
        let entry = to_entry(driver, vendor_name, os, kind);

        match vendor {
            Some(v) => known
                .entry(v.name.clone())
                .or_insert_with(|| ManufacturerGroup {
                    name: v.name.clone(),
                    website: v.website.clone(),
                    drivers: Vec::new(),
                })
                .drivers
                .push(entry),
            None => unknown.drivers.push(entry),
        }
    }

    let mut groups: Vec<ManufacturerGroup> = known.into_values().collect();
    if !unknown.drivers.is_empty() {
        groups.push(unknown);
    }
    groups
}

fn to_entry(driver: &InstalledDriver, vendor_name: &str, os: OsKind, kind: InstallerKind) -> ManifestEntry {
    let non_empty = |s: &str| Some(s.trim().to_string()).filter(|s| !s.is_empty());

    let mut entry = ManifestEntry::named(driver.name.trim());
    entry.version = non_empty(&driver.version);
    entry.device_id = non_empty(&driver.device_id);
    entry.os = Some(os);
    entry.kind = Some(kind);
    entry.file_name = Some(vendor::suggest_file_name(
        vendor_name,
        &driver.name,
        &driver.device_id,
        &driver.version,
        kind.as_str(),
    ));
    entry
}
