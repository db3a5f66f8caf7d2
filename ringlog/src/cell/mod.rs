
use std::io::Write;

/// Fill state of a cell. `Full` means the cell is queued for the drainer (or
/// being written by it right now); `Free` means producers may append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
  Free,
  Full,
}

/// Fixed-capacity byte slab that formatted log records are copied into.
///
/// The payload never reallocates: `append` refuses anything that does not fit
/// in the remaining space, so the capacity chosen at construction is the
/// capacity for the cell's whole lifetime.
#[derive(Debug)]
pub struct CellBuffer {
  data: Vec<u8>,
  capacity: usize,
  status: CellStatus,
}

impl CellBuffer {
  pub fn new(capacity: usize) -> Self {
    Self {
      data: Vec::with_capacity(capacity),
      capacity,
      status: CellStatus::Free,
    }
  }

  #[inline]
  pub fn capacity(&self) -> usize {
    self.capacity
  }

  #[inline]
  pub fn used(&self) -> usize {
    self.data.len()
  }

  #[inline]
  pub fn avail(&self) -> usize {
    self.capacity - self.data.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  #[inline]
  pub fn status(&self) -> CellStatus {
    self.status
  }

  #[inline]
  pub fn is_free(&self) -> bool {
    self.status == CellStatus::Free
  }

  #[inline]
  pub fn is_full(&self) -> bool {
    self.status == CellStatus::Full
  }

  /// Copy `bytes` to the end of the payload. Callers must check `avail()`
  /// first; anything that does not fit is silently ignored.
  pub fn append(&mut self, bytes: &[u8]) {
    if self.avail() < bytes.len() {
      return;
    }
    self.data.extend_from_slice(bytes);
  }

  /// Hand the cell over to the drainer.
  pub fn seal(&mut self) {
    self.status = CellStatus::Full;
  }

  pub fn clear(&mut self) {
    self.data.clear();
    self.status = CellStatus::Free;
  }

  /// Emit the payload in one write call. A short or failed write goes to
  /// stderr and is not retried; the payload is left untouched either way.
  pub fn write_to<W: Write>(&self, sink: &mut W) {
    match sink.write(&self.data) {
      Ok(n) if n != self.data.len() => {
        eprintln!("[ringlog] short write, {} of {} bytes", n, self.data.len());
      }
      Ok(_) => {}
      Err(e) => {
        eprintln!("[ringlog] write failed: {}", e);
      }
    }
  }

  /// Exchange payloads with `other` in O(1). Both cells keep their own
  /// status tag, and both must have the same capacity. Used by the drainer
  /// to move a sealed payload out of the ring so the file write happens
  /// outside the pipeline lock.
  pub fn swap_payload(&mut self, other: &mut CellBuffer) {
    std::mem::swap(&mut self.data, &mut other.data);
  }
}
