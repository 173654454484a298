//! Install command implementation
//!
//! Load the manifest, work out which drivers this host needs, then download,
//! verify and install them one at a time. A failed driver never stops the run;
//! the command fails at the end if any driver did.

use std::path::Path;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::cli::InstallArgs;
use crate::domain::{InstallOutcome, InstalledDriver, InstallerKind, ManifestEntry, OsKind};
use crate::download::Fetcher;
use crate::error::{Result, install as install_error};
use crate::hash;
use crate::installer::{CommandRunner, Orchestrator, SystemRunner, reboot};
use crate::manifest;
use crate::privileges;
use crate::reconcile::{self, PendingDriver};
use crate::ui;

use super::helpers::{default_download_dir, host_os, installed_drivers};

/// Run install command
pub fn run(args: InstallArgs) -> Result<()> {
    let os = host_os()?;
    info!(
        manifest = %args.manifest.display(),
        os = %os,
        all = args.all,
        force = args.force,
        dry_run = args.dry_run,
        auto_reboot = args.auto_reboot,
        "Starting driver installation"
    );

    if !args.dry_run {
        privileges::require_elevated(os)?;
    }

    let entries = manifest::load(&args.manifest)?;
    let installed = installed_drivers(args.installed_from.as_deref())?;
    let plan = select(&entries, &installed, os, args.all);

    if plan.is_empty() {
        info!("All drivers are up to date");
        println!("All drivers are up to date.");
        return Ok(());
    }

    ui::print_pending(&plan);

    if args.dry_run {
        info!(count = plan.len(), "Dry run, nothing installed");
        println!("Dry run: {} driver(s) would be installed.", plan.len());
        return Ok(());
    }

    let download_dir = args.download_dir.clone().unwrap_or_else(default_download_dir);
    info!(dir = %download_dir.display(), "Using download directory");

    let fetcher = Fetcher::new()?;
    let orchestrator = Orchestrator::new();
    let settings = FetchSettings {
        retries: args.retries,
        timeout: Duration::from_secs(args.timeout),
        force: args.force,
    };

    let outcomes = install_all(&plan, os, &download_dir, &fetcher, &orchestrator, &settings);

    let total = outcomes.len();
    let succeeded = outcomes.iter().filter(|o| o.success).count();
    info!(
        total,
        succeeded,
        failed = total - succeeded,
        success_rate = format!("{:.1}%", ui::success_rate(total, succeeded)),
        "Installation summary"
    );
    ui::print_summary(total, succeeded);

    if outcomes.iter().any(InstallOutcome::needs_reboot) {
        if args.auto_reboot {
            reboot::schedule_reboot(&SystemRunner, os);
        } else {
            warn!("A reboot is required to complete installation");
            println!("A reboot is required to complete installation.");
        }
    }

    if succeeded < total {
        return Err(install_error::failed(total - succeeded, total));
    }
    Ok(())
}

/// Entries to install: those needing an update, or every entry for `os` with `all`
fn select<'a>(
    entries: &'a [ManifestEntry],
    installed: &[InstalledDriver],
    os: OsKind,
    all: bool,
) -> Vec<PendingDriver<'a>> {
    if all {
        reconcile::available(entries, Some(os))
            .into_iter()
            .map(|entry| PendingDriver {
                entry,
                current_version: None,
            })
            .collect()
    } else {
        reconcile::needing_update(entries, installed, Some(os))
    }
}

struct FetchSettings {
    retries: u32,
    timeout: Duration,
    force: bool,
}

/// Install every planned driver strictly in order, one at a time
fn install_all<R: CommandRunner>(
    plan: &[PendingDriver<'_>],
    os: OsKind,
    download_dir: &Path,
    fetcher: &Fetcher,
    orchestrator: &Orchestrator<R>,
    settings: &FetchSettings,
) -> Vec<InstallOutcome> {
    println!();
    plan.iter()
        .enumerate()
        .map(|(index, pending)| {
            let entry = pending.entry;
            info!(
                name = %entry.name,
                step = index + 1,
                of = plan.len(),
                update = pending.is_update(),
                "Processing driver"
            );
            let outcome = install_one(entry, os, download_dir, fetcher, orchestrator, settings);
            ui::print_outcome(entry, &outcome);
            outcome
        })
        .collect()
}

fn install_one<R: CommandRunner>(
    entry: &ManifestEntry,
    os: OsKind,
    download_dir: &Path,
    fetcher: &Fetcher,
    orchestrator: &Orchestrator<R>,
    settings: &FetchSettings,
) -> InstallOutcome {
    let file = download_dir.join(entry.download_file_name());

    // Manual entries only get a note; there is nothing to download
    if entry.kind != Some(InstallerKind::Manual) {
        match entry.url.as_deref() {
            Some(url) => {
                if !fetcher.fetch(url, &file, settings.retries, settings.timeout, settings.force) {
                    return InstallOutcome::launch_failed("download");
                }
            }
            None if file.is_file() => {
                info!(name = %entry.name, file = %file.display(), "No URL, using file already present");
            }
            None => {
                error!(name = %entry.name, "No download URL and no local file");
                return InstallOutcome::launch_failed("download");
            }
        }

        if !hash::verify(&file, entry.sha256.as_deref()) {
            return InstallOutcome::launch_failed("sha256 verification");
        }
    } else if let Err(e) = std::fs::create_dir_all(download_dir) {
        warn!(dir = %download_dir.display(), error = %e, "Failed to create download directory");
    }

    orchestrator.install(entry, &file, os)
}
