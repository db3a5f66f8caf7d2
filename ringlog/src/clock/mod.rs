
use std::cell::RefCell;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Datelike, Local, TimeZone, Timelike};

pub const STAMP_LEN: usize = 19;

const STAMP_FALLBACK: &str = "0000-00-00 00:00:00";

/// Calendar date as the drainer snapshots it for file selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayStamp {
  pub year: i32,
  pub mon: u32,
  pub day: u32,
}

/// Cached wall clock.
///
/// High-rate producers read the clock once per record, and a full local-time
/// conversion plus reformat per call is measurably expensive. The cache
/// splits the work: within one second nothing is recomputed, within one
/// minute only the two seconds digits of the stamp are rewritten, and only a
/// minute rollover pays for the full `chrono::Local` conversion.
pub struct WallClock {
  year: i32,
  mon: u32,
  day: u32,
  hour: u32,
  min: u32,
  sec: u32,
  acc_sec: u64,
  acc_min: u64,
  stamp: [u8; STAMP_LEN],
}

impl WallClock {
  pub fn new() -> Self {
    let mut clock = Self {
      year: 0,
      mon: 0,
      day: 0,
      hour: 0,
      min: 0,
      sec: 0,
      acc_sec: 0,
      acc_min: 0,
      stamp: [b'0'; STAMP_LEN],
    };
    clock.refresh_full(epoch_now().0);
    clock
  }

  /// Seconds since the epoch plus the milliseconds within that second,
  /// refreshing the cached stamp as needed.
  pub fn now(&mut self) -> (u64, u32) {
    let (secs, millis) = epoch_now();
    self.advance_to(secs);
    (secs, millis)
  }

  /// The cached `YYYY-MM-DD HH:MM:SS` string for the last observed second.
  pub fn stamp_str(&self) -> &str {
    std::str::from_utf8(&self.stamp).unwrap_or(STAMP_FALLBACK)
  }

  pub fn date(&self) -> DayStamp {
    DayStamp {
      year: self.year,
      mon: self.mon,
      day: self.day,
    }
  }

  fn advance_to(&mut self, secs: u64) {
    if secs == self.acc_sec {
      return;
    }
    self.sec = (secs % 60) as u32;
    self.acc_sec = secs;
    if secs / 60 != self.acc_min {
      self.refresh_full(secs);
    } else {
      self.rewrite_secs();
    }
  }

  fn refresh_full(&mut self, secs: u64) {
    self.acc_sec = secs;
    self.acc_min = secs / 60;
    if let Some(local) = Local.timestamp_opt(secs as i64, 0).single() {
      self.year = local.year();
      self.mon = local.month();
      self.day = local.day();
      self.hour = local.hour();
      self.min = local.minute();
      self.sec = local.second();
    }
    self.reformat();
  }

  fn reformat(&mut self) {
    let text = format!(
      "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
      self.year, self.mon, self.day, self.hour, self.min, self.sec
    );
    let bytes = text.as_bytes();
    let n = STAMP_LEN.min(bytes.len());
    self.stamp[..n].copy_from_slice(&bytes[..n]);
  }

  fn rewrite_secs(&mut self) {
    self.stamp[STAMP_LEN - 2] = b'0' + (self.sec / 10) as u8;
    self.stamp[STAMP_LEN - 1] = b'0' + (self.sec % 10) as u8;
  }
}

impl Default for WallClock {
  fn default() -> Self {
    Self::new()
  }
}

fn epoch_now() -> (u64, u32) {
  let now = SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .unwrap_or_default();
  (now.as_secs(), now.subsec_millis())
}

thread_local! {
  static CLOCK: RefCell<WallClock> = RefCell::new(WallClock::new());
}

/// Run `f` with this thread's clock. Each thread caches independently, so no
/// lock is held while a record header is formatted.
pub fn with<R>(f: impl FnOnce(&mut WallClock) -> R) -> R {
  CLOCK.with(|clock| f(&mut clock.borrow_mut()))
}
