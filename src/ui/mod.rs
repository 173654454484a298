//! Console rendering of reconciliation views and install results
//!
//! Everything here writes to stdout. Logs go to stderr and the log file, so
//! piping a listing somewhere keeps only the listing.

use console::Style;

use crate::domain::{InstallOutcome, InstalledDriver, ManifestEntry};
use crate::reconcile::{PendingDriver, VersionMismatch};

const RULE_WIDTH: usize = 60;

fn header(title: &str, count: usize) {
    let rule = "=".repeat(RULE_WIDTH);
    println!();
    println!("{rule}");
    println!("{} {}", Style::new().bold().apply_to(title), count);
    println!("{rule}");
}

fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or("unknown")
}

fn label(text: &str) -> console::StyledObject<&str> {
    Style::new().bold().apply_to(text)
}

fn name(text: &str) -> console::StyledObject<&str> {
    Style::new().bold().yellow().apply_to(text)
}

fn os_and_type(entry: &ManifestEntry) -> String {
    format!(
        "{} {}, {} {}",
        label("OS:"),
        entry.os.map_or("unknown", |os| os.as_str()),
        label("Type:"),
        entry.kind.map_or("unknown", |k| k.as_str())
    )
}

/// Manifest entries, as listed by `available` and `not-installed`
pub fn print_entries(title: &str, entries: &[&ManifestEntry]) {
    header(title, entries.len());
    for entry in entries {
        println!("  - {} (v{})", name(&entry.name), or_unknown(entry.version.as_deref()));
        println!("    {}", os_and_type(entry));
        println!(
            "    {} {}",
            label("Device ID:"),
            entry.device_id.as_deref().unwrap_or("N/A")
        );
        if let Some(ref url) = entry.url {
            println!("    {} {url}", label("URL:"));
        }
        println!();
    }
}

pub fn print_mismatches(mismatches: &[VersionMismatch<'_, '_>]) {
    header("Drivers with Different Versions:", mismatches.len());
    for m in mismatches {
        println!("  - {}", name(&m.entry.name));
        println!("    {} v{}", label("Available:"), m.entry.version_str());
        println!("    {} v{}", label("Installed:"), m.installed.version);
        println!("    {} {}", label("URL:"), m.entry.url.as_deref().unwrap_or("N/A"));
        println!();
    }
}

pub fn print_pending(pending: &[PendingDriver<'_>]) {
    header("Drivers Needing Installation/Update:", pending.len());
    for p in pending {
        match p.current_version {
            Some(ref current) => {
                println!("  - {} {}", name(&p.entry.name), Style::new().cyan().apply_to("(UPDATE)"));
                println!("    {} v{current}", label("Current:"));
                println!("    {} v{}", label("Available:"), or_unknown(p.entry.version.as_deref()));
            }
            None => {
                println!("  - {} {}", name(&p.entry.name), Style::new().green().apply_to("(NEW)"));
                println!("    {} v{}", label("Version:"), or_unknown(p.entry.version.as_deref()));
            }
        }
        println!("    {}", os_and_type(p.entry));
        println!("    {} {}", label("URL:"), p.entry.url.as_deref().unwrap_or("N/A"));
        println!();
    }
}

pub fn print_installed(drivers: &[InstalledDriver]) {
    header("Installed Drivers:", drivers.len());
    for d in drivers {
        let version = if d.version.is_empty() { "unknown" } else { &d.version };
        let device_id = if d.device_id.is_empty() { "N/A" } else { &d.device_id };
        println!("  - {} (v{version})", name(&d.name));
        println!("    {} {device_id}", label("Device ID:"));
        println!();
    }
}

/// One line per installation result
pub fn print_outcome(entry: &ManifestEntry, outcome: &InstallOutcome) {
    let status = if outcome.success {
        Style::new().green().bold().apply_to("OK")
    } else {
        Style::new().red().bold().apply_to("FAILED")
    };
    println!(
        "  [{status}] {} {}",
        name(&entry.name),
        Style::new().dim().apply_to(format!("({})", outcome))
    );
}

pub fn print_summary(total: usize, succeeded: usize) {
    let failed = total - succeeded;
    println!();
    println!("{}", label("Installation summary:"));
    println!("  Total:     {total}");
    println!("  Succeeded: {}", Style::new().green().apply_to(succeeded));
    println!("  Failed:    {}", Style::new().red().apply_to(failed));
    println!("  Success rate: {:.1}%", success_rate(total, succeeded));
}

/// Percentage of successful installs; an empty run counts as fully successful
pub fn success_rate(total: usize, succeeded: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let rate = succeeded as f64 * 100.0 / total as f64;
    rate
}

pub fn print_exported(path: &std::path::Path) {
    println!();
    println!("Results exported to: {}", Style::new().cyan().apply_to(path.display()));
}
