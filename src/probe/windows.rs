//! Windows driver enumeration through `Win32_PnPSignedDriver`

use std::time::Duration;

use serde::Deserialize;
use tracing::{error, warn};

use crate::domain::InstalledDriver;

use super::capture_with_timeout;

const POWERSHELL_TIMEOUT: Duration = Duration::from_secs(60);

const PNP_QUERY: &str = "Get-CimInstance Win32_PnPSignedDriver | \
    Select-Object DeviceName, DriverVersion, HardwareID | \
    ConvertTo-Json -Compress";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PnpSignedDriver {
    device_name: Option<String>,
    driver_version: Option<String>,
    #[serde(rename = "HardwareID")]
    hardware_id: Option<HardwareId>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HardwareId {
    One(String),
    Many(Vec<Option<String>>),
}

// ConvertTo-Json emits a bare object when there is a single result
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PnpOutput {
    Many(Vec<PnpSignedDriver>),
    One(PnpSignedDriver),
}

pub fn list_installed() -> Vec<InstalledDriver> {
    match capture_with_timeout(
        "powershell",
        &["-NoProfile", "-NonInteractive", "-Command", PNP_QUERY],
        POWERSHELL_TIMEOUT,
    ) {
        Ok(stdout) => parse_pnp_json(&stdout),
        Err(e) => {
            error!(error = %e, "Failed to query installed drivers with PowerShell");
            Vec::new()
        }
    }
}

/// Parse the JSON emitted by the PowerShell query
pub fn parse_pnp_json(json: &str) -> Vec<InstalledDriver> {
    if json.trim().is_empty() {
        return Vec::new();
    }

    let rows = match serde_json::from_str::<PnpOutput>(json) {
        Ok(PnpOutput::Many(rows)) => rows,
        Ok(PnpOutput::One(row)) => vec![row],
        Err(e) => {
            warn!(error = %e, "Failed to parse WMI driver information");
            return Vec::new();
        }
    };

    rows.into_iter()
        .map(|row| InstalledDriver {
            name: row.device_name.unwrap_or_default(),
            version: row.driver_version.unwrap_or_default(),
            device_id: match row.hardware_id {
                Some(HardwareId::One(id)) => id,
                Some(HardwareId::Many(ids)) => ids.into_iter().next().flatten().unwrap_or_default(),
                None => String::new(),
            },
        })
        .collect()
}
