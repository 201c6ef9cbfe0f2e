//! Progress indicator for silent-mode uploads
//!
//! Uses `linya` for an allocation-free progress bar on stderr

use linya::{Bar, Progress};

/// Progress bar over the staged files of one release
pub struct UploadProgress {
  progress: Progress,
  bar: Bar,
}

impl UploadProgress {
  /// Create a new progress bar for `total` staged files
  pub fn new(total: usize, label: impl Into<String>) -> Self {
    let mut progress = Progress::new();
    let bar = progress.bar(total, label.into());
    Self { progress, bar }
  }

  /// Mark one staged file as handled
  pub fn inc(&mut self) {
    self.progress.inc_and_draw(&self.bar, 1);
  }
}
