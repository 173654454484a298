//! Process launch seam for installers
//!
//! Every external installer or package tool is started through [`CommandRunner`]
//! so the orchestration logic can be exercised without launching real processes.

use std::ffi::OsString;
use std::fmt;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::domain::outcome::LAUNCH_FAILED;

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
    /// Inherit the terminal instead of capturing output, so the installer can prompt
    pub interactive: bool,
    /// Flag text handed to the process unchanged on Windows
    pub verbatim: Option<String>,
}

impl Invocation {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            interactive: false,
            verbatim: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Use an installer flag string as the whole argument list
    ///
    /// `args` holds the string split with shell quoting rules, so
    /// `/s /v"/qn REBOOT=ReallySuppress"` is two arguments. On Windows the
    /// text itself is passed on the command line as written.
    #[must_use]
    pub fn flags(mut self, flags: &str) -> Self {
        let tokens = shell_words::split(flags).unwrap_or_else(|e| {
            warn!(flags, error = %e, "Unbalanced quotes in installer flags, splitting on whitespace");
            flags.split_whitespace().map(str::to_string).collect()
        });
        self.args = tokens.into_iter().map(OsString::from).collect();
        self.verbatim = Some(flags.to_string());
        self
    }

    #[must_use]
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Arguments as lossy UTF-8 strings
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        if let Some(ref flags) = self.verbatim {
            return write!(f, " {flags}");
        }
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Runs a process to completion and reports its exit code
pub trait CommandRunner {
    /// Launch `invocation` and block until it exits
    ///
    /// `Err` means the process could not be started (missing binary, permission
    /// denied). A process terminated without an exit code reports
    /// [`LAUNCH_FAILED`].
    fn run(&self, invocation: &Invocation) -> std::io::Result<i32>;
}

/// Launches real processes with `std::process::Command`
///
/// No timeout is applied: installers may legitimately run for a long time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> std::io::Result<i32> {
        let mut command = Command::new(&invocation.program);
        apply_args(&mut command, invocation);

        if invocation.interactive {
            let status = command.status()?;
            return Ok(status.code().unwrap_or(LAUNCH_FAILED));
        }

        let output = command.stdin(Stdio::null()).output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stdout.trim().is_empty() {
            debug!(command = %invocation, stdout = %stdout.trim(), "Installer output");
        }
        if !stderr.trim().is_empty() {
            debug!(command = %invocation, stderr = %stderr.trim(), "Installer error output");
        }

        Ok(output.status.code().unwrap_or(LAUNCH_FAILED))
    }
}

fn apply_args(command: &mut Command, invocation: &Invocation) {
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        if let Some(ref flags) = invocation.verbatim {
            command.raw_arg(flags);
            return;
        }
    }
    command.args(&invocation.args);
}
