//! Linux package installation: deb and rpm

use std::path::Path;

use crate::domain::InstallOutcome;

use super::cascade::{Attempt, first_acceptable, zero_exit};
use super::runner::{CommandRunner, Invocation};

/// `dpkg -i`, then `apt install -y` to pull in missing dependencies
pub fn install_deb(runner: &dyn CommandRunner, file: &Path) -> InstallOutcome {
    let attempts = [
        Attempt::new("dpkg -i", Invocation::new("dpkg").arg("-i").arg(file), zero_exit),
        Attempt::new(
            "apt install",
            Invocation::new("apt").args(["install", "-y"]).arg(file),
            zero_exit,
        ),
    ];
    first_acceptable(runner, &attempts)
}

/// `rpm -i`, then `dnf install -y`, then `yum install -y`
pub fn install_rpm(runner: &dyn CommandRunner, file: &Path) -> InstallOutcome {
    let attempts = [
        Attempt::new("rpm -i", Invocation::new("rpm").arg("-i").arg(file), zero_exit),
        Attempt::new(
            "dnf install",
            Invocation::new("dnf").args(["install", "-y"]).arg(file),
            zero_exit,
        ),
        Attempt::new(
            "yum install",
            Invocation::new("yum").args(["install", "-y"]).arg(file),
            zero_exit,
        ),
    ];
    first_acceptable(runner, &attempts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installer::runner::testing::ScriptedRunner;

    #[test]
    fn test_deb_dpkg_success() {
        let runner = ScriptedRunner::always(0);
        let outcome = install_deb(&runner, Path::new("/tmp/e1000e.deb"));
        assert!(outcome.success);
        assert_eq!(outcome.method, "dpkg -i");
        assert_eq!(runner.programs(), vec!["dpkg"]);
        assert_eq!(runner.calls()[0].args_lossy(), vec!["-i", "/tmp/e1000e.deb"]);
    }

    #[test]
    fn test_deb_falls_back_to_apt() {
        let runner = ScriptedRunner::new(|inv| Ok(if inv.program == "dpkg" { 1 } else { 0 }));
        let outcome = install_deb(&runner, Path::new("/tmp/e1000e.deb"));
        assert!(outcome.success);
        assert_eq!(outcome.method, "apt install");
        assert_eq!(
            runner.calls()[1].args_lossy(),
            vec!["install", "-y", "/tmp/e1000e.deb"]
        );
    }

    #[test]
    fn test_deb_reports_last_exit_code() {
        let runner = ScriptedRunner::new(|inv| Ok(if inv.program == "dpkg" { 1 } else { 100 }));
        let outcome = install_deb(&runner, Path::new("x.deb"));
        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, 100);
    }

    #[test]
    fn test_rpm_three_tiers() {
        let runner = ScriptedRunner::new(|inv| Ok(if inv.program == "yum" { 0 } else { 1 }));
        let outcome = install_rpm(&runner, Path::new("x.rpm"));
        assert!(outcome.success);
        assert_eq!(outcome.method, "yum install");
        assert_eq!(runner.programs(), vec!["rpm", "dnf", "yum"]);
    }

    #[test]
    fn test_rpm_missing_dnf_still_tries_yum() {
        let runner = ScriptedRunner::new(|inv| match inv.program.to_str() {
            Some("rpm") => Ok(1),
            Some("dnf") => Err(std::io::Error::new(std::io::ErrorKind::NotFound, "dnf")),
            _ => Ok(0),
        });
        let outcome = install_rpm(&runner, Path::new("x.rpm"));
        assert!(outcome.success);
        assert_eq!(runner.programs(), vec!["rpm", "dnf", "yum"]);
    }

    #[test]
    fn test_rpm_stops_at_first_success() {
        let runner = ScriptedRunner::always(0);
        install_rpm(&runner, Path::new("x.rpm"));
        assert_eq!(runner.programs(), vec!["rpm"]);
    }
}
