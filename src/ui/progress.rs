//! Progress indicators for long-running operations
//!
//! Uses `linya` for allocation-free progress bars

use linya::{Bar, Progress};

/// Byte-counting progress bar for a single download
pub struct DownloadProgress {
  progress: Progress,
  bar: Bar,
}

impl DownloadProgress {
  /// Create a progress bar for a download of `total` bytes
  pub fn new(total: u64, label: impl Into<String>) -> Self {
    let mut progress = Progress::new();
    let bar = progress.bar(usize::try_from(total).unwrap_or(usize::MAX), label.into());
    Self { progress, bar }
  }

  /// Advance by a received chunk
  pub fn inc(&mut self, bytes: usize) {
    self.progress.inc_and_draw(&self.bar, bytes);
  }
}
