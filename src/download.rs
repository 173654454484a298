//! Driver file downloads
//!
//! Downloads stream into `<dest>.part` and are renamed into place only once
//! complete, so an interrupted transfer never looks like a cached file.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::error::{Result, download as download_error};
use crate::progress::DownloadProgress;

const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);

/// Blocking HTTP downloader with retries and a local cache short-circuit
pub struct Fetcher {
    client: reqwest::blocking::Client,
    /// Wait before the second attempt; doubles for each later attempt
    backoff: Duration,
    show_progress: bool,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("drvsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| download_error::client_failed(e.to_string()))?;

        Ok(Self {
            client,
            backoff: DEFAULT_BACKOFF,
            show_progress: true,
        })
    }

    #[must_use]
    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    #[must_use]
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Download `url` to `dest`
    ///
    /// Returns `true` straight away when `dest` exists and `force` is off.
    /// Otherwise makes up to `retries` attempts (at least one), each bounded by
    /// `timeout`, sleeping 1s, 2s, 4s... between them.
    pub fn fetch(
        &self,
        url: &str,
        dest: &Path,
        retries: u32,
        timeout: Duration,
        force: bool,
    ) -> bool {
        if dest.exists() && !force {
            info!(file = %dest.display(), "File already exists, skipping download");
            return true;
        }

        let attempts = retries.max(1);
        for attempt in 1..=attempts {
            info!(url = %url, attempt, of = attempts, "Downloading");
            match self.fetch_once(url, dest, timeout) {
                Ok(bytes) => {
                    info!(file = %dest.display(), bytes, "Download completed");
                    return true;
                }
                Err(reason) => {
                    warn!(url = %url, attempt, error = %reason, "Download attempt failed");
                    if attempt < attempts {
                        let wait = self.backoff * 2u32.saturating_pow(attempt - 1);
                        info!(seconds = wait.as_secs_f32(), "Retrying");
                        thread::sleep(wait);
                    }
                }
            }
        }

        error!(url = %url, attempts, "Download failed");
        false
    }

    fn fetch_once(&self, url: &str, dest: &Path, timeout: Duration) -> std::result::Result<u64, String> {
        let mut response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| e.to_string())?;

        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let part = part_path(dest);
        let file_name = dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let progress = DownloadProgress::new(
            response.content_length().filter(|_| self.show_progress),
            &file_name,
        );

        let written = stream_to(&mut response, &part, &progress).inspect_err(|_| {
            progress.abandon();
            let _ = fs::remove_file(&part);
        })?;
        progress.finish();

        fs::rename(&part, dest).map_err(|e| e.to_string())?;
        Ok(written)
    }
}

fn stream_to(
    source: &mut impl Read,
    path: &Path,
    progress: &DownloadProgress,
) -> std::result::Result<u64, String> {
    let mut out = BufWriter::new(File::create(path).map_err(|e| e.to_string())?);
    let mut buffer = [0u8; 8192];
    let mut written = 0u64;

    loop {
        let n = source.read(&mut buffer).map_err(|e| e.to_string())?;
        if n == 0 {
            break;
        }
        out.write_all(&buffer[..n]).map_err(|e| e.to_string())?;
        written += n as u64;
        progress.advance(n as u64);
    }

    out.flush().map_err(|e| e.to_string())?;
    Ok(written)
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fetcher() -> Fetcher {
        Fetcher::new()
            .unwrap()
            .backoff(Duration::ZERO)
            .show_progress(false)
    }

    #[test]
    fn test_cached_file_short_circuits() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("driver.exe");
        fs::write(&dest, "cached").unwrap();

        // The URL is never contacted
        assert!(fetcher().fetch("http://invalid.invalid/driver.exe", &dest, 3, Duration::from_secs(1), false));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "cached");
    }

    #[test]
    fn test_unreachable_url_fails_without_leftovers() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("driver.exe");

        let ok = fetcher().fetch("http://127.0.0.1:9/driver.exe", &dest, 2, Duration::from_secs(2), false);

        assert!(!ok);
        assert!(!dest.exists());
        assert!(!part_path(&dest).exists());
    }

    #[test]
    fn test_malformed_url_fails() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("x.bin");
        assert!(!fetcher().fetch("not a url", &dest, 0, Duration::from_secs(1), true));
    }

    #[test]
    fn test_stream_to_writes_everything() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.bin");
        let data = vec![7u8; 20_000];
        let progress = DownloadProgress::new(None, "out.bin");

        let written = stream_to(&mut data.as_slice(), &path, &progress).unwrap();

        assert_eq!(written, 20_000);
        assert_eq!(fs::read(&path).unwrap(), data);
    }

    #[test]
    fn test_part_path() {
        assert_eq!(part_path(Path::new("/d/x.exe")), PathBuf::from("/d/x.exe.part"));
    }
}
