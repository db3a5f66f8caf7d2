mod __test__;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::cell::CellBuffer;
use crate::clock::DayStamp;

/// Size at which the primary file is rotated away.
pub const ROTATE_LIMIT: u64 = 1024 * 1024 * 1024;

/// Owns the open log file and decides, once per drained cell, which file the
/// bytes belong in.
///
/// File naming: `<dir>/<prog>.<YYYYMMDD>.<pid>.log` for the primary, with a
/// trailing `.<n>` for rotated files, older files carrying larger `n`. If the
/// directory was unusable at init, everything is diverted to `/dev/null` and
/// the rest of the logger keeps running.
pub struct FileSink {
  dir: PathBuf,
  prog: String,
  pid: u32,
  env_ok: bool,
  rotate_limit: u64,
  file: Option<BufWriter<File>>,
  stamp: Option<DayStamp>,
  rotation: u32,
  written: u64,
}

impl FileSink {
  pub fn new(dir: impl Into<PathBuf>, prog: impl Into<String>, env_ok: bool) -> Self {
    Self {
      dir: dir.into(),
      prog: prog.into(),
      pid: std::process::id(),
      env_ok,
      rotate_limit: ROTATE_LIMIT,
      file: None,
      stamp: None,
      rotation: 0,
      written: 0,
    }
  }

  /// Override the rotation threshold.
  #[must_use]
  pub fn with_rotate_limit(mut self, limit: u64) -> Self {
    self.rotate_limit = limit;
    self
  }

  /// Number of files that exist for the current date.
  pub fn rotation(&self) -> u32 {
    self.rotation
  }

  /// Pick the file the next cell is written into. Returns whether an open
  /// file exists afterwards.
  ///
  /// Cases, in order: unusable environment reuses one `/dev/null` handle; no
  /// file yet opens the primary for `stamp`; a day change closes and opens
  /// the new day's primary; crossing the size threshold shifts the rotated
  /// files up by one (highest index first, so no target is overwritten) and
  /// reopens the primary; otherwise the current file is kept.
  pub fn select(&mut self, stamp: DayStamp) -> bool {
    if !self.env_ok {
      if self.file.is_none() {
        self.file = File::create("/dev/null").ok().map(BufWriter::new);
      }
      return self.file.is_some();
    }

    if self.file.is_none() {
      self.open_primary(stamp);
      if self.file.is_some() {
        self.rotation += 1;
      }
    } else if self.stamp.map(|s| s.day) != Some(stamp.day) {
      self.file = None;
      self.open_primary(stamp);
      if self.file.is_some() {
        self.rotation = 1;
      }
    } else if self.written >= self.rotate_limit {
      self.file = None;
      let current = self.stamp.unwrap_or(stamp);
      for i in (1..self.rotation).rev() {
        let _ = fs::rename(self.rotated_path(current, i), self.rotated_path(current, i + 1));
      }
      let _ = fs::rename(self.primary_path(current), self.rotated_path(current, 1));
      self.open_primary(current);
      if self.file.is_some() {
        self.rotation += 1;
      }
    }
    self.file.is_some()
  }

  /// Write one cell's payload and flush the user-space buffer.
  pub fn write_cell(&mut self, cell: &CellBuffer) {
    if let Some(file) = self.file.as_mut() {
      cell.write_to(file);
      self.written += cell.used() as u64;
      if let Err(e) = file.flush() {
        eprintln!("[ringlog] flush failed: {}", e);
      }
    }
  }

  fn open_primary(&mut self, stamp: DayStamp) {
    let path = self.primary_path(stamp);
    match File::create(&path) {
      Ok(file) => {
        self.file = Some(BufWriter::new(file));
        self.stamp = Some(stamp);
        self.written = 0;
      }
      Err(e) => {
        eprintln!("[ringlog] cannot open {}: {}", path.display(), e);
        self.file = None;
      }
    }
  }

  fn primary_path(&self, stamp: DayStamp) -> PathBuf {
    self.dir.join(format!(
      "{}.{:04}{:02}{:02}.{}.log",
      self.prog, stamp.year, stamp.mon, stamp.day, self.pid
    ))
  }

  fn rotated_path(&self, stamp: DayStamp, n: u32) -> PathBuf {
    self.dir.join(format!(
      "{}.{:04}{:02}{:02}.{}.log.{}",
      self.prog, stamp.year, stamp.mon, stamp.day, self.pid, n
    ))
  }
}

/// Create the log directory if missing and probe it for write access. A
/// failed probe is reported on stderr and makes the sink fall back to
/// `/dev/null`; it never fails initialization.
pub fn prepare_dir(dir: &Path) -> bool {
  let mut builder = fs::DirBuilder::new();
  builder.recursive(true);
  #[cfg(unix)]
  {
    use std::os::unix::fs::DirBuilderExt;
    builder.mode(0o777);
  }
  if let Err(e) = builder.create(dir) {
    if e.kind() != std::io::ErrorKind::AlreadyExists {
      eprintln!("[ringlog] cannot create log dir {}: {}", dir.display(), e);
      return false;
    }
  }

  let probe = dir.join(format!(".ringlog.probe.{}", std::process::id()));
  match File::create(&probe) {
    Ok(_) => {
      let _ = fs::remove_file(&probe);
      true
    }
    Err(e) => {
      eprintln!("[ringlog] log dir {} not writable: {}", dir.display(), e);
      false
    }
  }
}
