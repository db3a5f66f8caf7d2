use std::thread;

use signal_hook::consts::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
use signal_hook::iterator::Signals;

use crate::logger::Logger;

/// Background listener that flushes the pipeline when the process receives a
/// termination signal, so the tail of the log survives an external kill.
pub struct SignalHook;

impl SignalHook {
  pub fn install() {
    let mut signals = match Signals::new([SIGINT, SIGTERM, SIGQUIT, SIGHUP]) {
      Ok(signals) => signals,
      Err(e) => panic!("failed to install signal listener: {}", e),
    };

    thread::spawn(move || {
      for sig in signals.forever() {
        eprintln!("[ringlog] flushing on signal {}", sig);
        if let Some(logger) = Logger::handle() {
          logger.flush();
        }
      }
    });
  }
}
