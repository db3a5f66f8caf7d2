
use crate::cell::CellBuffer;

struct Node {
  cell: CellBuffer,
  next: usize,
  prev: usize,
}

/// Circular doubly-linked chain of cells with a producer cursor and a
/// consumer cursor.
///
/// Stored as an arena of nodes linked by indices, so mid-chain insertion
/// never rewires owned pointers and cells are never moved or dropped until
/// process exit. Nothing here is thread-safe; every caller holds the
/// pipeline mutex.
pub struct Ring {
  nodes: Vec<Node>,
  producer: usize,
  consumer: usize,
  cell_size: usize,
}

impl Ring {
  /// Build a chain of `count` free cells with both cursors on the first one.
  pub fn new(count: usize, cell_size: usize) -> Self {
    assert!(count >= 1, "ring needs at least one cell");
    let mut nodes = Vec::with_capacity(count);
    for i in 0..count {
      nodes.push(Node {
        cell: CellBuffer::new(cell_size),
        next: (i + 1) % count,
        prev: (i + count - 1) % count,
      });
    }
    Self {
      nodes,
      producer: 0,
      consumer: 0,
      cell_size,
    }
  }

  #[inline]
  pub fn cell_count(&self) -> usize {
    self.nodes.len()
  }

  #[inline]
  pub fn producer(&self) -> &CellBuffer {
    &self.nodes[self.producer].cell
  }

  #[inline]
  pub fn producer_mut(&mut self) -> &mut CellBuffer {
    &mut self.nodes[self.producer].cell
  }

  /// The cell right after the producer cursor.
  #[inline]
  pub fn producer_next(&self) -> &CellBuffer {
    &self.nodes[self.nodes[self.producer].next].cell
  }

  #[inline]
  pub fn consumer(&self) -> &CellBuffer {
    &self.nodes[self.consumer].cell
  }

  #[inline]
  pub fn consumer_mut(&mut self) -> &mut CellBuffer {
    &mut self.nodes[self.consumer].cell
  }

  pub fn advance_producer(&mut self) {
    self.producer = self.nodes[self.producer].next;
  }

  pub fn advance_consumer(&mut self) {
    self.consumer = self.nodes[self.consumer].next;
  }

  /// Splice a fresh free cell between the producer cell and its successor,
  /// then move the producer cursor onto it.
  pub fn grow(&mut self) {
    let after = self.producer;
    let next = self.nodes[after].next;
    let fresh = self.nodes.len();
    self.nodes.push(Node {
      cell: CellBuffer::new(self.cell_size),
      next,
      prev: after,
    });
    self.nodes[after].next = fresh;
    self.nodes[next].prev = fresh;
    self.producer = fresh;
  }

  pub fn producer_index(&self) -> usize {
    self.producer
  }

  pub fn consumer_index(&self) -> usize {
    self.consumer
  }

  pub fn next_index(&self, index: usize) -> usize {
    self.nodes[index].next
  }

  pub fn prev_index(&self, index: usize) -> usize {
    self.nodes[index].prev
  }

  pub fn cell(&self, index: usize) -> &CellBuffer {
    &self.nodes[index].cell
  }
}
