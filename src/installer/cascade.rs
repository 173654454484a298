//! Ordered fallback cascades
//!
//! The exe, deb and rpm strategies all follow the same shape: try one command,
//! and if its exit code is not acceptable try the next. [`first_acceptable`] is
//! the single driver for all of them.

use tracing::{error, info, warn};

use crate::domain::InstallOutcome;
use crate::domain::outcome::{LAUNCH_FAILED, REBOOT_INITIATED, REBOOT_REQUIRED};

use super::runner::{CommandRunner, Invocation};

/// One step of a cascade
#[derive(Debug, Clone)]
pub struct Attempt {
    /// Short method name recorded in the outcome (e.g. `"dpkg -i"`)
    pub label: String,
    pub invocation: Invocation,
    pub accept: fn(i32) -> bool,
}

impl Attempt {
    pub fn new(label: impl Into<String>, invocation: Invocation, accept: fn(i32) -> bool) -> Self {
        Self {
            label: label.into(),
            invocation,
            accept,
        }
    }
}

/// Success codes of Windows installers: done, reboot required, reboot started
pub fn windows_success(code: i32) -> bool {
    matches!(code, 0 | REBOOT_REQUIRED | REBOOT_INITIATED)
}

/// Only a zero exit code is success
pub fn zero_exit(code: i32) -> bool {
    code == 0
}

/// Run attempts in order until one exits with an accepted code
///
/// A launch failure counts as exit code [`LAUNCH_FAILED`] and moves on to the
/// next attempt. When nothing is accepted, the outcome carries the last
/// attempt's label and code.
pub fn first_acceptable(runner: &dyn CommandRunner, attempts: &[Attempt]) -> InstallOutcome {
    let mut last = InstallOutcome::launch_failed("no attempts");

    for (index, attempt) in attempts.iter().enumerate() {
        info!(
            step = index + 1,
            of = attempts.len(),
            command = %attempt.invocation,
            "Attempting installation"
        );

        let code = match runner.run(&attempt.invocation) {
            Ok(code) => code,
            Err(e) => {
                error!(command = %attempt.invocation, error = %e, "Failed to launch installer");
                LAUNCH_FAILED
            }
        };

        if (attempt.accept)(code) {
            info!(method = %attempt.label, exit_code = code, "Installation successful");
            return InstallOutcome::succeeded(attempt.label.clone(), code);
        }

        warn!(method = %attempt.label, exit_code = code, "Installation attempt failed");
        last = InstallOutcome::failed(attempt.label.clone(), code);
    }

    last
}

/// Run a single invocation; launch failures become [`LAUNCH_FAILED`]
pub fn run_once(runner: &dyn CommandRunner, attempt: &Attempt) -> InstallOutcome {
    first_acceptable(runner, std::slice::from_ref(attempt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installer::runner::testing::ScriptedRunner;

    fn attempt(program: &str) -> Attempt {
        Attempt::new(program, Invocation::new(program), zero_exit)
    }

    #[test]
    fn test_stops_at_first_accepted() {
        let runner = ScriptedRunner::new(|inv| Ok(if inv.program == "b" { 0 } else { 1 }));
        let outcome = first_acceptable(&runner, &[attempt("a"), attempt("b"), attempt("c")]);

        assert!(outcome.success);
        assert_eq!(outcome.method, "b");
        assert_eq!(runner.programs(), vec!["a", "b"]);
    }

    #[test]
    fn test_reports_last_failure() {
        let runner = ScriptedRunner::new(|inv| Ok(if inv.program == "a" { 2 } else { 100 }));
        let outcome = first_acceptable(&runner, &[attempt("a"), attempt("b")]);

        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, 100);
        assert_eq!(outcome.method, "b");
    }

    #[test]
    fn test_launch_failure_continues() {
        let runner = ScriptedRunner::new(|inv| {
            if inv.program == "missing" {
                Err(std::io::Error::new(std::io::ErrorKind::NotFound, "nope"))
            } else {
                Ok(0)
            }
        });
        let outcome = first_acceptable(&runner, &[attempt("missing"), attempt("present")]);
        assert!(outcome.success);
        assert_eq!(outcome.method, "present");
    }

    #[test]
    fn test_all_launches_fail() {
        let runner = ScriptedRunner::not_found();
        let outcome = first_acceptable(&runner, &[attempt("a"), attempt("b")]);
        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, LAUNCH_FAILED);
    }

    #[test]
    fn test_empty_cascade() {
        let runner = ScriptedRunner::always(0);
        let outcome = first_acceptable(&runner, &[]);
        assert!(!outcome.success);
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_windows_success_codes() {
        assert!(windows_success(0));
        assert!(windows_success(3010));
        assert!(windows_success(1641));
        assert!(!windows_success(1603));
        assert!(!zero_exit(3010));
    }
}
