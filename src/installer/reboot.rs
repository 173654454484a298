//! Scheduled reboot after installs that asked for one

use tracing::{error, info};

use crate::domain::OsKind;

use super::runner::{CommandRunner, Invocation};

fn reboot_invocation(os: OsKind) -> Invocation {
    match os {
        OsKind::Windows => Invocation::new("shutdown").args(["/r", "/t", "60"]),
        OsKind::Linux => Invocation::new("shutdown").args(["-r", "+1"]),
    }
}

/// Ask the OS to reboot shortly; returns whether the command was accepted
pub fn schedule_reboot(runner: &dyn CommandRunner, os: OsKind) -> bool {
    let invocation = reboot_invocation(os);
    info!(command = %invocation, "Scheduling system reboot");
    match runner.run(&invocation) {
        Ok(0) => true,
        Ok(code) => {
            error!(exit_code = code, "Reboot command failed");
            false
        }
        Err(e) => {
            error!(error = %e, "Failed to launch reboot command");
            false
        }
    }
}
