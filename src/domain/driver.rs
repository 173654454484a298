//! Installed driver domain type

use serde::{Deserialize, Serialize};

/// A driver observed on the running system
///
/// Produced fresh by every probe. Fields the OS tool did not report are empty
/// strings rather than absent, matching how the probes read them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstalledDriver {
    pub name: String,
    pub version: String,
    /// OS-native identifier (Windows hardware ID or Linux modalias)
    pub device_id: String,
}

impl InstalledDriver {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            device_id: device_id.into(),
        }
    }
}
