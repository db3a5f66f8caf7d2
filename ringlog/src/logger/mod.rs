
use std::fmt::{self, Write as _};
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread::{self, JoinHandle};

use crate::clock;
use crate::config::{clamp_cell_size, Config, DEFAULT_CELL_SIZE};
use crate::error::InitError;
use crate::level::Level;
use crate::pipeline::{drain_loop, Pipeline};
use crate::sink::{self, FileSink};
use crate::utils;

/// A single record never exceeds this many bytes; the formatter truncates.
pub const LOG_LEN_LIMIT: usize = 4096;

static LOGGER: OnceLock<Logger> = OnceLock::new();
static CELL_SIZE: AtomicUsize = AtomicUsize::new(DEFAULT_CELL_SIZE);

/// The process-wide logger: producers format records through it, a single
/// background drainer moves them to disk.
pub struct Logger {
  pipeline: Arc<Pipeline>,
  level: AtomicU8,
  drainer: Mutex<Option<JoinHandle<()>>>,
}

impl Logger {
  /// Pick the cell capacity, clamped to `[MIN_CELL_SIZE, MAX_CELL_SIZE]`.
  /// Only has an effect before `init`, and `Config::with_cell_size` wins
  /// over it.
  pub fn set_cell_size(bytes: usize) {
    CELL_SIZE.store(clamp_cell_size(bytes), Ordering::Relaxed);
  }

  /// One-shot initialization: prepare the directory, spawn the drainer,
  /// install the process-wide handle. An unusable directory is not an error;
  /// output is diverted to `/dev/null` instead.
  pub fn init(config: Config) -> Result<&'static Logger, InitError> {
    let mut installed = false;
    let logger = LOGGER.get_or_init(|| {
      installed = true;
      Logger::start(&config)
    });
    if installed {
      Ok(logger)
    } else {
      Err(InitError::AlreadyInitialized)
    }
  }

  /// The installed logger, if `init` has run.
  pub fn handle() -> Option<&'static Logger> {
    LOGGER.get()
  }

  fn start(config: &Config) -> Logger {
    let env_ok = sink::prepare_dir(&config.dir);
    let cell_size = config
      .cell_size
      .map(clamp_cell_size)
      .unwrap_or_else(|| CELL_SIZE.load(Ordering::Relaxed));
    let pipeline = Arc::new(Pipeline::new(cell_size));
    let mut sink = FileSink::new(&config.dir, config.prog_name.clone(), env_ok);

    let worker = Arc::clone(&pipeline);
    let handle = thread::spawn(move || drain_loop(&worker, &mut sink));

    Logger {
      pipeline,
      level: AtomicU8::new(config.level as u8),
      drainer: Mutex::new(Some(handle)),
    }
  }

  pub fn level(&self) -> Level {
    Level::clamp_from(self.level.load(Ordering::Relaxed))
  }

  pub fn set_level(&self, level: Level) {
    self.level.store(level as u8, Ordering::Relaxed);
  }

  /// Whether a record at `level` would be enqueued. `Fatal` always is.
  #[inline]
  pub fn enabled(&self, level: Level) -> bool {
    level == Level::Fatal || self.level.load(Ordering::Relaxed) >= level as u8
  }

  /// Format one record and hand it to the pipeline. Best-effort: nothing
  /// here blocks on I/O and nothing returns an error.
  pub fn try_append(&self, level: Level, args: fmt::Arguments<'_>, file: &str, line: u32, module: &str) {
    let mut record = RecordBuf::new();
    let now_sec = clock::with(|clock| {
      let (sec, millis) = clock.now();
      let _ = write!(
        record,
        "{}[{}.{:03}][{}]{}:{}({}): ",
        level.tag(),
        clock.stamp_str(),
        millis,
        utils::thread_id(),
        file,
        line,
        module
      );
      sec
    });
    let _ = write!(record, "{}", args);
    record.terminate();
    self.pipeline.append(record.as_bytes(), now_sec);
  }

  /// Push a partially filled cell to the drainer right away.
  pub fn flush(&self) {
    self.pipeline.flush();
  }

  /// Drain every accepted record, then stop and join the drainer. Records
  /// appended while this runs are drained on a best-effort basis.
  pub fn flush_and_stop(&self) {
    self.pipeline.begin_stop();
    if let Some(handle) = self.drainer.lock().unwrap().take() {
      let _ = handle.join();
    }
  }
}

/// Truncating record buffer: accepts writes up to `LOG_LEN_LIMIT` bytes and
/// silently discards the rest, keeping the trailing newline.
struct RecordBuf {
  buf: [u8; LOG_LEN_LIMIT],
  len: usize,
}

impl RecordBuf {
  fn new() -> Self {
    Self {
      buf: [0; LOG_LEN_LIMIT],
      len: 0,
    }
  }

  fn as_bytes(&self) -> &[u8] {
    &self.buf[..self.len]
  }

  fn terminate(&mut self) {
    if self.len == LOG_LEN_LIMIT {
      self.buf[LOG_LEN_LIMIT - 1] = b'\n';
    } else {
      self.buf[self.len] = b'\n';
      self.len += 1;
    }
  }
}

impl fmt::Write for RecordBuf {
  fn write_str(&mut self, s: &str) -> fmt::Result {
    let room = LOG_LEN_LIMIT - self.len;
    let take = room.min(s.len());
    self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
    self.len += take;
    Ok(())
  }
}
