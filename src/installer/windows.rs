//! Windows installation strategies: exe, msi and zip

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};
use walkdir::WalkDir;

use crate::domain::InstallOutcome;

use super::cascade::{Attempt, first_acceptable, run_once, windows_success};
use super::runner::{CommandRunner, Invocation};

/// Silent flags tried, in order, after any entry-specific flags
const SILENT_FLAG_FALLBACKS: &[&str] = &[
    "/S",
    "/silent",
    "/quiet",
    "/verysilent",
    "/s",
    "/s /v\"/qn\"",
    "/S /v\"/qn\"",
];

const MSIEXEC: &str = "msiexec.exe";

/// Install an executable by trying silent flag sets until one is accepted
///
/// If every flag set fails, the installer is launched once more without flags
/// and attached to the terminal. That last launch is never reported as a
/// success: it records what happened, not that the driver got installed.
pub fn install_exe(
    runner: &dyn CommandRunner,
    file: &Path,
    custom_flags: Option<&str>,
) -> InstallOutcome {
    let attempts = exe_attempts(file, custom_flags);
    let outcome = first_acceptable(runner, &attempts);
    if outcome.success {
        return outcome;
    }

    warn!(
        file = %file.display(),
        "All silent installation attempts failed, running installer without arguments"
    );
    let unattended = Attempt::new("exe (no flags)", Invocation::new(file).interactive(), |_| false);
    run_once(runner, &unattended)
}

fn exe_attempts(file: &Path, custom_flags: Option<&str>) -> Vec<Attempt> {
    let mut flag_sets: Vec<&str> = Vec::new();
    if let Some(custom) = custom_flags.map(str::trim).filter(|f| !f.is_empty()) {
        flag_sets.push(custom);
    }
    for fallback in SILENT_FLAG_FALLBACKS {
        if !flag_sets.contains(fallback) {
            flag_sets.push(fallback);
        }
    }

    flag_sets
        .into_iter()
        .map(|flags| {
            Attempt::new(
                format!("exe {flags}"),
                Invocation::new(file).flags(flags),
                windows_success,
            )
        })
        .collect()
}

/// Install an MSI package quietly through the Windows Installer service
pub fn install_msi(runner: &dyn CommandRunner, file: &Path) -> InstallOutcome {
    let attempt = Attempt::new(
        "msiexec /qn",
        Invocation::new(MSIEXEC)
            .arg("/i")
            .arg(file)
            .args(["/qn", "/norestart"]),
        windows_success,
    );
    run_once(runner, &attempt)
}

/// Extract an archive and install the first exe or msi found inside it
///
/// The extraction directory is created under `temp_root` and removed before
/// returning, whatever the outcome.
pub fn install_zip(
    runner: &dyn CommandRunner,
    file: &Path,
    custom_flags: Option<&str>,
    temp_root: &Path,
) -> InstallOutcome {
    let temp = match tempfile::Builder::new()
        .prefix("drvsync-zip-")
        .tempdir_in(temp_root)
    {
        Ok(temp) => temp,
        Err(e) => {
            error!(root = %temp_root.display(), error = %e, "Failed to create extraction directory");
            return InstallOutcome::launch_failed("zip");
        }
    };
    info!(file = %file.display(), dir = %temp.path().display(), "Extracting archive");

    let outcome = match extract(file, temp.path()) {
        Ok(()) => match find_nested_installer(temp.path()) {
            Some(nested) => {
                info!(installer = %nested.display(), "Found installer inside archive");
                let inner = if has_extension(&nested, "msi") {
                    install_msi(runner, &nested)
                } else {
                    install_exe(runner, &nested, custom_flags)
                };
                InstallOutcome {
                    method: format!("zip/{}", inner.method),
                    ..inner
                }
            }
            None => {
                error!(file = %file.display(), "No installer found inside archive");
                InstallOutcome::launch_failed("zip")
            }
        },
        Err(e) => {
            error!(file = %file.display(), error = %e, "Failed to extract archive");
            InstallOutcome::launch_failed("zip")
        }
    };

    let dir = temp.path().to_path_buf();
    match temp.close() {
        Ok(()) => info!(dir = %dir.display(), "Cleaned up extraction directory"),
        Err(e) => warn!(dir = %dir.display(), error = %e, "Failed to clean up extraction directory"),
    }

    outcome
}

fn extract(archive: &Path, dest: &Path) -> Result<(), String> {
    let file = File::open(archive).map_err(|e| e.to_string())?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| e.to_string())?;
    zip.extract(dest).map_err(|e| e.to_string())
}

/// First `.exe` or `.msi` (case-insensitive) by full path order
fn find_nested_installer(dir: &Path) -> Option<PathBuf> {
    let mut installers: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| has_extension(p, "exe") || has_extension(p, "msi"))
        .collect();

    installers.sort();
    installers.into_iter().next()
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .is_some_and(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
}
