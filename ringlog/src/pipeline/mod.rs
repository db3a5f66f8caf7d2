
use std::sync::{Condvar, Mutex};
use std::time::Duration;

use crate::cell::CellBuffer;
use crate::clock;
use crate::ring::Ring;
use crate::sink::FileSink;

/// Hard ceiling on the combined capacity of all cells.
pub const MEM_LIMIT: usize = 3 * 1024 * 1024 * 1024;

/// Cells the ring starts with.
pub(crate) const INITIAL_CELLS: usize = 3;

/// Seconds after an overflow during which further records are dropped
/// without stderr noise.
const BACKOFF_SECS: u64 = 5;

/// How long the drainer waits for a cell to fill before checking for a
/// partial one.
const DRAIN_WAIT: Duration = Duration::from_secs(1);

struct Shared {
  ring: Ring,
  last_lost: u64,
  stopping: bool,
}

/// The producer/consumer handshake over the cell ring.
///
/// One mutex guards the ring, the cursors and the overflow bookkeeping; one
/// condvar carries "a cell just filled" to the single drainer. Producers
/// never perform I/O, the drainer never allocates cells, and both sides keep
/// file work and record formatting outside the critical section.
pub struct Pipeline {
  shared: Mutex<Shared>,
  ready: Condvar,
  cell_size: usize,
  mem_limit: usize,
}

/// What `drain_once` left for the caller to do.
pub(crate) enum DrainStep {
  /// A sealed payload was moved into the scratch cell and awaits the sink.
  Ready,
  /// Nothing to write this tick.
  Idle,
}

impl Pipeline {
  pub fn new(cell_size: usize) -> Self {
    Self::with_limit(cell_size, MEM_LIMIT)
  }

  pub(crate) fn with_limit(cell_size: usize, mem_limit: usize) -> Self {
    Self {
      shared: Mutex::new(Shared {
        ring: Ring::new(INITIAL_CELLS, cell_size),
        last_lost: 0,
        stopping: false,
      }),
      ready: Condvar::new(),
      cell_size,
      mem_limit,
    }
  }

  pub fn cell_size(&self) -> usize {
    self.cell_size
  }

  /// Accept one formatted record. Best-effort: a full pipeline drops the
  /// record, and within five seconds of an overflow records are dropped
  /// without even a diagnostic, so a stalled disk cannot flood stderr.
  ///
  /// Records are accepted in lock order; within a cell their bytes are laid
  /// out in that same order.
  pub fn append(&self, line: &[u8], now_sec: u64) {
    let mut need_signal = false;
    {
      let mut shared = self.shared.lock().unwrap();
      if shared.last_lost != 0 && now_sec.saturating_sub(shared.last_lost) < BACKOFF_SECS {
        return;
      }
      shared.last_lost = 0;

      if shared.ring.producer().is_free() && shared.ring.producer().avail() >= line.len() {
        shared.ring.producer_mut().append(line);
      } else if shared.ring.producer().is_free() {
        // remainder too small for this record: seal the cell and move on
        shared.ring.producer_mut().seal();
        need_signal = true;
        if shared.ring.producer_next().is_full() {
          // every cell ahead is still waiting on the drainer
          if (shared.ring.cell_count() + 1) * self.cell_size > self.mem_limit {
            eprintln!("[ringlog] no more log space");
            shared.last_lost = now_sec;
            shared.ring.advance_producer();
          } else {
            shared.ring.grow();
          }
        } else {
          shared.ring.advance_producer();
        }
        if shared.last_lost == 0 {
          shared.ring.producer_mut().append(line);
        }
      } else {
        // the producer cell was sealed before we took the lock: overflow
        shared.last_lost = now_sec;
      }
    }
    if need_signal {
      self.ready.notify_one();
    }
  }

  /// One tick of the consumer side.
  ///
  /// Waits up to a second for a cell to fill. A timeout with a partially
  /// filled cell promotes it (this is how records reach the disk during
  /// quiet periods): the cell is sealed and the producer cursor pushed
  /// forward so new records land elsewhere. The sealed payload is then
  /// swapped into `scratch` so the caller can write it with the lock
  /// released.
  pub(crate) fn drain_once(&self, scratch: &mut CellBuffer) -> DrainStep {
    let mut shared = self.shared.lock().unwrap();
    if shared.ring.consumer().is_free() && !shared.stopping {
      let (guard, _) = self.ready.wait_timeout(shared, DRAIN_WAIT).unwrap();
      shared = guard;
    }
    if shared.ring.consumer().is_empty() {
      return DrainStep::Idle;
    }
    if shared.ring.consumer().is_free() {
      // partially filled and nobody ahead of it
      assert_eq!(shared.ring.consumer_index(), shared.ring.producer_index());
      shared.ring.consumer_mut().seal();
      shared.ring.advance_producer();
    }
    shared.ring.consumer_mut().swap_payload(scratch);
    DrainStep::Ready
  }

  /// Put an unwritten payload back. The cell stays sealed and is retried on
  /// the next tick.
  pub(crate) fn restore(&self, scratch: &mut CellBuffer) {
    let mut shared = self.shared.lock().unwrap();
    shared.ring.consumer_mut().swap_payload(scratch);
  }

  /// The written cell is done: free it and move the consumer cursor on.
  pub(crate) fn complete(&self) {
    let mut shared = self.shared.lock().unwrap();
    shared.ring.consumer_mut().clear();
    shared.ring.advance_consumer();
  }

  /// Seal a partially filled cell so the drainer writes it without waiting
  /// for the one-second tick.
  pub fn flush(&self) {
    {
      let mut shared = self.shared.lock().unwrap();
      if shared.ring.consumer_index() == shared.ring.producer_index()
        && shared.ring.producer().is_free()
        && !shared.ring.producer().is_empty()
      {
        shared.ring.producer_mut().seal();
        shared.ring.advance_producer();
      }
    }
    self.ready.notify_one();
  }

  /// Ask the drainer to drain everything that has been accepted and then
  /// exit its loop.
  pub(crate) fn begin_stop(&self) {
    let mut shared = self.shared.lock().unwrap();
    shared.stopping = true;
    drop(shared);
    self.ready.notify_one();
  }

  /// True once a stop was requested and no accepted bytes remain.
  pub(crate) fn finished(&self) -> bool {
    let shared = self.shared.lock().unwrap();
    shared.stopping && shared.ring.consumer().is_empty()
  }

  #[cfg(test)]
  pub(crate) fn with_ring<R>(&self, f: impl FnOnce(&Ring) -> R) -> R {
    let shared = self.shared.lock().unwrap();
    f(&shared.ring)
  }

  #[cfg(test)]
  pub(crate) fn last_lost(&self) -> u64 {
    self.shared.lock().unwrap().last_lost
  }
}

/// The background drainer: drives the handshake and the file sink until a
/// stop is requested and the ring has been drained dry.
pub(crate) fn drain_loop(pipeline: &Pipeline, sink: &mut FileSink) {
  let mut scratch = CellBuffer::new(pipeline.cell_size());
  loop {
    match pipeline.drain_once(&mut scratch) {
      DrainStep::Ready => {
        let stamp = clock::with(|clock| {
          clock.now();
          clock.date()
        });
        if !sink.select(stamp) {
          pipeline.restore(&mut scratch);
          continue;
        }
        sink.write_cell(&scratch);
        scratch.clear();
        pipeline.complete();
      }
      DrainStep::Idle => {
        if pipeline.finished() {
          return;
        }
      }
    }
  }
}
