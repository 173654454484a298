//! Download progress bars

use indicatif::{ProgressBar, ProgressStyle};

/// Byte progress for one download
///
/// Hidden when the server does not report a content length.
pub struct DownloadProgress {
    bar: ProgressBar,
}

impl DownloadProgress {
    pub fn new(total_bytes: Option<u64>, file_name: &str) -> Self {
        let bar = match total_bytes {
            Some(total) => {
                let style = ProgressStyle::default_bar()
                    .template("  [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-");
                let bar = ProgressBar::new(total);
                bar.set_style(style);
                bar
            }
            None => ProgressBar::hidden(),
        };
        bar.set_message(truncate(file_name));
        Self { bar }
    }

    pub fn advance(&self, bytes: u64) {
        self.bar.inc(bytes);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Leave the bar where it stopped after an error
    pub fn abandon(&self) {
        self.bar.abandon();
    }
}

/// Keep long file names from wrapping the bar
fn truncate(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() > 40 {
        let tail: String = chars[chars.len() - 37..].iter().collect();
        format!("...{tail}")
    } else {
        name.to_string()
    }
}
