//! Common test utilities for drvsync integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Manifest covering both platforms: one current, one outdated and one missing driver
#[allow(dead_code)]
pub const MANIFEST: &str = r#"{
  "drivers": [
    {
      "name": "Intel Wi-Fi 6 AX201",
      "version": "22.190.0",
      "deviceId": "PCI\\VEN_8086&DEV_A0F0",
      "os": "windows",
      "type": "exe",
      "url": "https://downloads.example.com/intel/wifi.exe"
    },
    {
      "name": "Realtek Audio",
      "version": "6.0.9",
      "deviceId": "HDAUDIO\\VEN_10EC&DEV_0897",
      "os": "windows",
      "type": "exe",
      "url": "https://downloads.example.com/realtek/audio.exe"
    },
    {
      "name": "e1000e",
      "version": "3.2.6-k",
      "deviceId": "pci:v00008086d000010D3sv*sd*bc*sc*i*",
      "os": "linux",
      "type": "deb"
    },
    {
      "name": "nvidia display driver",
      "version": "535.104",
      "os": "linux",
      "type": "deb",
      "url": "https://downloads.example.com/nvidia/nvidia-driver.deb"
    }
  ]
}"#;

/// Installed drivers as a probe would report them
#[allow(dead_code)]
pub const SNAPSHOT: &str = r#"[
  {
    "name": "Intel(R) Wi-Fi 6 AX201 160MHz",
    "version": "22.190.0",
    "deviceId": "PCI\\VEN_8086&DEV_A0F0&SUBSYS_00748086&REV_1A"
  },
  {
    "name": "Realtek High Definition Audio",
    "version": "6.0.8",
    "deviceId": "HDAUDIO\\FUNC_01&VEN_10EC&DEV_0897&SUBSYS_10438445"
  },
  {
    "name": "e1000e",
    "version": "3.2.6-k",
    "deviceId": "pci:v00008086d000010D3sv*sd*bc*sc*i*"
  },
  {
    "name": "Microsoft Basic Display Adapter",
    "version": "10.0.19041",
    "deviceId": "PCI\\VEN_1234&DEV_1111"
  }
]"#;

/// A temporary directory the binary runs in
pub struct TestWorkspace {
    #[allow(dead_code)]
    pub temp: TempDir,
    pub path: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Workspace with `drivers.json` and `installed.json` written from the shared fixtures
    #[allow(dead_code)]
    pub fn with_fixtures() -> Self {
        let workspace = Self::new();
        workspace.write_file("drivers.json", MANIFEST);
        workspace.write_file("installed.json", SNAPSHOT);
        workspace
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Parse a JSON file from workspace
    #[allow(dead_code)]
    pub fn read_json(&self, path: &str) -> serde_json::Value {
        serde_json::from_str(&self.read_file(path)).expect("Failed to parse JSON")
    }

    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// The real drvsync binary, run inside this workspace with no inherited configuration
    pub fn cmd(&self) -> Command {
        let mut cmd = drvsync_cmd();
        cmd.current_dir(&self.path)
            .env_remove("DRVSYNC_MANIFEST")
            .env_remove("DRVSYNC_DOWNLOAD_DIR")
            .env_remove("DRVSYNC_LOG_FILE")
            .env_remove("RUST_LOG");
        cmd
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn drvsync_cmd() -> Command {
    Command::cargo_bin("drvsync").expect("drvsync binary should be built")
}

/// Names of the rows under `key` in an exported or printed JSON document
#[allow(dead_code)]
pub fn names(value: &serde_json::Value, key: &str) -> Vec<String> {
    value[key]
        .as_array()
        .expect("array of rows")
        .iter()
        .map(|row| row["name"].as_str().unwrap_or_default().to_string())
        .collect()
}
