use std::thread;
use std::time::Duration;

use ringlog::config::Config;
use ringlog::level::Level;
use ringlog::logger::Logger;
use ringlog::panic_hook::PanicHook;
use ringlog::signal_hook::SignalHook;
use ringlog::{log_error, log_info, log_warn, normal};

fn main() {
  let config = Config::new("./logs", "ringlog-simple").with_level(Level::Debug);
  let logger = Logger::init(config).expect("logger init");
  PanicHook::install();
  SignalHook::install();

  log_info!("demo starting with {} workers", 4);

  let workers: Vec<_> = (0..4)
    .map(|w| {
      thread::spawn(move || {
        for i in 0..1000 {
          log_info!("worker {} handled request {}", w, i);
          if i % 250 == 0 {
            log_warn!("worker {} checkpoint at {}", w, i);
          }
          thread::sleep(Duration::from_millis(1));
        }
        log_info!("worker {} done", w);
      })
    })
    .collect();

  for worker in workers {
    if worker.join().is_err() {
      log_error!("a worker panicked");
    }
  }

  normal!("all workers finished");
  logger.flush_and_stop();
  println!("records written to ./logs");
}
