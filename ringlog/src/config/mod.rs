
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::level::Level;

pub const DEFAULT_CELL_SIZE: usize = 30 * 1024 * 1024;
pub const MIN_CELL_SIZE: usize = 30 * 1024 * 1024;
pub const MAX_CELL_SIZE: usize = 1024 * 1024 * 1024;

/// Clamp a requested cell size into the supported range.
pub fn clamp_cell_size(bytes: usize) -> usize {
  bytes.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE)
}

/// Logger settings, fixed at init time. Deserializable so host applications
/// can keep them in their own configuration files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
  /// Directory the log files are written into, created if missing.
  pub dir: PathBuf,
  /// Program name embedded in the file names.
  pub prog_name: String,
  /// Minimum enqueued level. `Fatal` records ignore this.
  #[serde(default)]
  pub level: Level,
  /// Capacity of one cell in bytes. `None` defers to
  /// `Logger::set_cell_size` (or its default).
  #[serde(default)]
  pub cell_size: Option<usize>,
}

impl Config {
  pub fn new(dir: impl Into<PathBuf>, prog_name: impl Into<String>) -> Self {
    Self {
      dir: dir.into(),
      prog_name: prog_name.into(),
      level: Level::default(),
      cell_size: None,
    }
  }

  #[must_use]
  pub fn with_level(mut self, level: Level) -> Self {
    self.level = level;
    self
  }

  /// Pick the cell capacity, clamped to `[MIN_CELL_SIZE, MAX_CELL_SIZE]`.
  /// Takes precedence over `Logger::set_cell_size`.
  #[must_use]
  pub fn with_cell_size(mut self, bytes: usize) -> Self {
    self.cell_size = Some(clamp_cell_size(bytes));
    self
  }
}
