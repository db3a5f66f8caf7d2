mod __test__;

use serde::{Deserialize, Serialize};

/// Log severity, low is most severe. A record at level `k` is enqueued iff
/// the logger's current level is `>= k`; `Fatal` is always enqueued.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  Fatal = 1,
  Error = 2,
  Warn = 3,
  Info = 4,
  Debug = 5,
  Trace = 6,
}

impl Level {
  /// The bracketed tag that leads every record of this level.
  pub fn tag(self) -> &'static str {
    match self {
      Level::Fatal => "[FATAL]",
      Level::Error => "[ERROR]",
      Level::Warn => "[WARN]",
      Level::Info => "[INFO]",
      Level::Debug => "[DEBUG]",
      Level::Trace => "[TRACE]",
    }
  }

  /// Clamp an arbitrary numeric level into the valid range.
  pub fn clamp_from(raw: u8) -> Level {
    match raw {
      0 | 1 => Level::Fatal,
      2 => Level::Error,
      3 => Level::Warn,
      4 => Level::Info,
      5 => Level::Debug,
      _ => Level::Trace,
    }
  }

  pub(crate) fn from_tracing(level: &tracing::Level) -> Level {
    if *level == tracing::Level::ERROR {
      Level::Error
    } else if *level == tracing::Level::WARN {
      Level::Warn
    } else if *level == tracing::Level::INFO {
      Level::Info
    } else if *level == tracing::Level::DEBUG {
      Level::Debug
    } else {
      Level::Trace
    }
  }
}

impl Default for Level {
  fn default() -> Self {
    Level::Info
  }
}
