//! Scratch space for archive extraction
//!
//! Extraction directories must never land under the working directory, which is
//! where `TMPDIR=tmp` would put them.

use std::env;
use std::path::PathBuf;

/// Absolute directory under which per-install scratch directories are created
pub fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        return t;
    }

    #[cfg(windows)]
    {
        env::var("TEMP")
            .or_else(|_| env::var("TMP"))
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
    }
    #[cfg(not(windows))]
    {
        PathBuf::from("/tmp")
    }
}
