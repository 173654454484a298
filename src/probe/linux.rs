//! Linux driver enumeration through `lsmod` and `modinfo`

use std::time::Duration;

use tracing::{debug, error};

use crate::domain::InstalledDriver;

use super::capture_with_timeout;

const LSMOD_TIMEOUT: Duration = Duration::from_secs(30);
const MODINFO_TIMEOUT: Duration = Duration::from_secs(5);

/// Only the first modules are inspected; `modinfo` is slow enough to matter
const MAX_MODULES: usize = 50;

pub fn list_installed() -> Vec<InstalledDriver> {
    let modules = match capture_with_timeout("lsmod", &[], LSMOD_TIMEOUT) {
        Ok(stdout) => parse_lsmod(&stdout),
        Err(e) => {
            error!(error = %e, "Failed to list loaded kernel modules");
            return Vec::new();
        }
    };

    modules
        .iter()
        .take(MAX_MODULES)
        .filter_map(|module| {
            match capture_with_timeout("modinfo", &[module.as_str()], MODINFO_TIMEOUT) {
                Ok(stdout) => Some(parse_modinfo(module, &stdout)),
                Err(e) => {
                    debug!(module = %module, error = %e, "Skipping module");
                    None
                }
            }
        })
        .collect()
}

/// Module names from `lsmod` output, header skipped
pub fn parse_lsmod(output: &str) -> Vec<String> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Version and first PCI alias from `modinfo <module>` output
pub fn parse_modinfo(module: &str, output: &str) -> InstalledDriver {
    let mut driver = InstalledDriver::new(module, "", "");

    for line in output.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "version" if driver.version.is_empty() => driver.version = value.to_string(),
            "alias" if driver.device_id.is_empty() && value.contains("pci:") => {
                driver.device_id = value.to_string();
            }
            _ => {}
        }
    }

    driver
}
