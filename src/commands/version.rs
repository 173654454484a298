//! Version command implementation

use crate::error::Result;

use super::helpers::host_os;

/// Run version command
pub fn run() -> Result<()> {
    println!("drvsync {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", rustc_version());
    println!("  Profile: {}", build_profile());
    println!();
    println!("Host:");
    println!(
        "  OS: {} ({})",
        std::env::consts::OS,
        match host_os() {
            Ok(_) => "supported",
            Err(_) => "unsupported",
        }
    );
    println!("  Architecture: {}", std::env::consts::ARCH);

    Ok(())
}

fn rustc_version() -> &'static str {
    env!("CARGO_PKG_RUST_VERSION")
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
