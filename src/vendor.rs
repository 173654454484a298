//! PCI vendor lookups for manifest generation
//!
//! A [`VendorTable`] is an explicit value owned by the caller: built from the
//! compiled-in table, optionally extended from a JSON file, then passed to
//! whatever needs it. Nothing here is consulted during reconciliation or
//! installation.

pub mod patterns;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, fs as fs_error};

pub use patterns::VendorPatterns;

/// Manufacturer details for one PCI vendor ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

const BUILTIN_VENDORS: &[(&str, &str, &str)] = &[
    ("8086", "Intel Corporation", "https://www.intel.com/content/www/us/en/download-center/home.html"),
    ("1002", "AMD / ATI", "https://www.amd.com/en/support"),
    ("10DE", "NVIDIA Corporation", "https://www.nvidia.com/Download/index.aspx"),
    ("10EC", "Realtek Semiconductor", "https://www.realtek.com/en/downloads"),
    ("14E4", "Broadcom", "https://www.broadcom.com/support/download-search"),
    ("1CC1", "ADATA Technology", "https://www.adata.com/en/support/downloads"),
    ("1043", "ASUSTeK Computer", "https://www.asus.com/support/download-center/"),
    ("1462", "Micro-Star International (MSI)", "https://www.msi.com/support/download"),
    ("1458", "Gigabyte Technology", "https://www.gigabyte.com/Support"),
    ("1022", "AMD", "https://www.amd.com/en/support"),
];

/// Name fragments of drivers that ship with Windows itself
const WINDOWS_GENERIC_DRIVERS: &[&str] = &[
    "WAN Miniport",
    "Generic software",
    "Microsoft",
    "ACPI",
    "System timer",
    "Programmable interrupt controller",
    "Numeric data processor",
    "High precision event timer",
    "PCI standard",
    "PCI-to-PCI Bridge",
    "Motherboard resources",
    "Computer Device",
    "Remote Desktop",
    "Plug and Play",
    "NDIS Virtual",
    "Local Print Queue",
    "Audio Endpoint",
    "Generic PnP Monitor",
    "Device Firmware",
    "System Firmware",
    "UEFI",
];

/// Vendor ID (4 uppercase hex digits) to manufacturer
#[derive(Debug, Clone)]
pub struct VendorTable {
    vendors: BTreeMap<String, Vendor>,
}

impl Default for VendorTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl VendorTable {
    /// The compiled-in vendor list
    pub fn builtin() -> Self {
        let vendors = BUILTIN_VENDORS
            .iter()
            .map(|(id, name, website)| {
                (
                    (*id).to_string(),
                    Vendor {
                        name: (*name).to_string(),
                        website: Some((*website).to_string()),
                    },
                )
            })
            .collect();
        Self { vendors }
    }

    /// Add or replace vendors from a JSON object keyed by vendor ID
    ///
    /// ```json
    /// { "168C": { "name": "Qualcomm Atheros", "website": "https://..." } }
    /// ```
    pub fn load(&mut self, path: &Path) -> Result<usize> {
        if !path.is_file() {
            return Err(fs_error::not_found(path.display().to_string()));
        }
        let content = fs::read_to_string(path)
            .map_err(|e| fs_error::read_failed(path.display().to_string(), e.to_string()))?;
        let extra: BTreeMap<String, Vendor> = serde_json::from_str(&content)
            .map_err(|e| fs_error::invalid_json(path.display().to_string(), e.to_string()))?;

        let count = extra.len();
        for (id, vendor) in extra {
            self.vendors.insert(id.trim().to_ascii_uppercase(), vendor);
        }
        info!(path = %path.display(), count, "Loaded vendor table");
        Ok(count)
    }

    /// Vendor for a raw device identifier, if its vendor ID is known
    pub fn lookup(&self, device_id: &str) -> Option<&Vendor> {
        self.vendors.get(&extract_vendor_id(device_id)?)
    }

    pub fn len(&self) -> usize {
        self.vendors.len()
    }
}

/// Vendor ID from a Windows hardware ID or a Linux PCI modalias
///
/// `PCI\VEN_8086&DEV_2723` and `pci:v00008086d00002723sv*` both give `8086`.
pub fn extract_vendor_id(device_id: &str) -> Option<String> {
    let upper = device_id.trim().to_ascii_uppercase();

    if let Some(start) = upper.find("VEN_") {
        let rest = &upper[start + 4..];
        let id: String = rest.chars().take_while(|c| *c != '&' && *c != '\\').take(4).collect();
        return (!id.is_empty()).then_some(id);
    }

    if let Some(rest) = upper.strip_prefix("PCI:V") {
        // Modalias vendor IDs are 8 hex digits, zero-padded
        let hex: String = rest.chars().take(8).collect();
        if hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Some(hex[4..].to_string());
        }
    }

    None
}

/// Whether a driver is part of the operating system rather than a vendor package
pub fn is_generic_driver(name: &str) -> bool {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return true;
    }
    WINDOWS_GENERIC_DRIVERS
        .iter()
        .any(|pattern| name.contains(&pattern.to_lowercase()))
}

/// Broad device category from a driver name, falling back to the identifier's bus
pub fn device_type(name: &str, device_id: &str) -> &'static str {
    let name = name.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| name.contains(w));

    if has(&["audio", "sound"]) {
        "Audio"
    } else if has(&["network", "ethernet", "lan"]) {
        "Network"
    } else if has(&["wireless", "wi-fi", "wifi"]) {
        "Wireless"
    } else if has(&["graphics", "display", "video", "radeon", "geforce"]) {
        "Graphics"
    } else if has(&["chipset"]) {
        "Chipset"
    } else if has(&["storage", "disk", "nvme", "sata"]) {
        "Storage"
    } else if has(&["usb"]) {
        "USB"
    } else if has(&["bluetooth"]) {
        "Bluetooth"
    } else if has(&["management engine", "mei"]) {
        "Management Engine"
    } else {
        let id = device_id.to_ascii_uppercase();
        [
            ("HDAUDIO", "Audio"),
            ("DISPLAY", "Graphics"),
            ("NET", "Network"),
            ("SCSI", "Storage"),
            ("USB", "USB Controller"),
            ("PCI", "PCI Device"),
        ]
        .iter()
        .find(|(pattern, _)| id.contains(pattern))
        .map_or("Other", |(_, kind)| *kind)
    }
}

/// Suggested download file name for a scanned driver
///
/// `vendor_Type.ext` for long or generic "device" names, otherwise the cleaned
/// driver name; the version is appended as `_v1_2_3`.
pub fn suggest_file_name(vendor: &str, name: &str, device_id: &str, version: &str, ext: &str) -> String {
    let base = if name.chars().count() > 50 || name.to_lowercase().contains("device") {
        let vendor = vendor
            .replace(" Corporation", "")
            .replace(" Semiconductor", "")
            .replace(" Technology", "")
            .replace('/', "-")
            .replace(' ', "_");
        format!("{vendor}_{}", device_type(name, device_id))
    } else {
        name.replace("(R)", "")
            .replace("(TM)", "")
            .trim()
            .replace(' ', "_")
            .replace('/', "-")
            .chars()
            .take(40)
            .collect()
    };

    let version = version.trim();
    if version.is_empty() || version.eq_ignore_ascii_case("unknown") {
        format!("{base}.{ext}")
    } else {
        format!("{base}_v{}.{ext}", version.replace('.', "_"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_extract_vendor_id() {
        assert_eq!(extract_vendor_id("PCI\\VEN_8086&DEV_2723&SUBSYS_1"), Some("8086".to_string()));
        assert_eq!(extract_vendor_id("hdaudio\\func_01&ven_10ec&dev_0897"), Some("10EC".to_string()));
        assert_eq!(extract_vendor_id("pci:v000010ECd00008168sv*sd*"), Some("10EC".to_string()));
        assert_eq!(extract_vendor_id("ACPI\\PNP0C0B"), None);
        assert_eq!(extract_vendor_id(""), None);
    }

    #[test]
    fn test_builtin_lookup() {
        let table = VendorTable::builtin();
        assert_eq!(table.len(), 10);
        let vendor = table.lookup("PCI\\VEN_10DE&DEV_2484").unwrap();
        assert_eq!(vendor.name, "NVIDIA Corporation");
        assert!(table.lookup("PCI\\VEN_FFFF&DEV_0001").is_none());
    }

    #[test]
    fn test_tables_are_independent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vendors.json");
        fs::write(&path, r#"{"168c": {"name": "Qualcomm Atheros"}, "8086": {"name": "Intel"}}"#).unwrap();

        let mut extended = VendorTable::builtin();
        assert_eq!(extended.load(&path).unwrap(), 2);

        assert_eq!(extended.lookup("PCI\\VEN_168C&DEV_003E").unwrap().name, "Qualcomm Atheros");
        assert_eq!(extended.lookup("PCI\\VEN_8086&DEV_1").unwrap().name, "Intel");
        assert!(VendorTable::builtin().lookup("PCI\\VEN_168C&DEV_003E").is_none());
    }

    #[test]
    fn test_load_errors() {
        let temp = TempDir::new().unwrap();
        let mut table = VendorTable::builtin();
        assert!(table.load(&temp.path().join("missing.json")).is_err());

        let path = temp.path().join("bad.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(table.load(&path).is_err());
        assert_eq!(table.len(), 10);
    }

    #[test]
    fn test_is_generic_driver() {
        assert!(is_generic_driver("WAN Miniport (IKEv2)"));
        assert!(is_generic_driver("Microsoft Basic Display Adapter"));
        assert!(is_generic_driver("   "));
        assert!(!is_generic_driver("Intel(R) Wi-Fi 6 AX201 160MHz"));
    }

    #[test]
    fn test_device_type() {
        assert_eq!(device_type("Realtek High Definition Audio", ""), "Audio");
        assert_eq!(device_type("Intel(R) Wi-Fi 6 AX201", ""), "Wireless");
        assert_eq!(device_type("Unknown thing", "HDAUDIO\\FUNC_01"), "Audio");
        assert_eq!(device_type("Unknown thing", ""), "Other");
    }

    #[test]
    fn test_suggest_file_name() {
        assert_eq!(
            suggest_file_name("Intel Corporation", "Intel(R) Wi-Fi 6 AX201", "", "22.100.0", "exe"),
            "Intel_Wi-Fi_6_AX201_v22_100_0.exe"
        );
        assert_eq!(
            suggest_file_name("Realtek Semiconductor", "High Definition Audio Device", "", "", "exe"),
            "Realtek_Audio.exe"
        );
    }
}
