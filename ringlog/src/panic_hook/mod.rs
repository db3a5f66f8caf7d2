use std::thread;
use std::time::Duration;

use crate::level::Level;
use crate::logger::Logger;

/// Installs a panic hook that records the panic as a fatal line and pushes
/// it toward the disk before the unwind continues.
pub struct PanicHook;

impl PanicHook {
  pub fn install() {
    std::panic::set_hook(Box::new(|info| {
      eprintln!("[ringlog] captured panic: {}", info);
      if let Some(logger) = Logger::handle() {
        let (file, line) = info
          .location()
          .map(|l| (l.file(), l.line()))
          .unwrap_or(("<unknown>", 0));
        logger.try_append(Level::Fatal, format_args!("panic: {}", info), file, line, "panic");
        logger.flush();
        // let the drainer reach the file before the process unwinds further
        thread::sleep(Duration::from_millis(120));
      }
    }));
  }
}
