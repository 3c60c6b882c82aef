//! Chunk pool for recycling inactive instances.
//!
//! Unlike a fixed-size slab, the pool starts empty and only holds chunks
//! that have left the view. Order is irrelevant for correctness; it is a
//! plain LIFO stack so the most recently parked chunk is reused first.

use super::chunk::Chunk;

/// Stack of inactive chunks awaiting reuse.
#[derive(Debug, Default)]
pub struct ChunkPool {
  free: Vec<Chunk>,
  /// Maximum number of parked chunks. None = unbounded.
  capacity: Option<usize>,
}

impl ChunkPool {
  /// Creates an unbounded pool.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a pool that holds at most `capacity` chunks.
  pub fn with_capacity_limit(capacity: Option<usize>) -> Self {
    Self {
      free: Vec::new(),
      capacity,
    }
  }

  /// Takes a chunk out of the pool.
  ///
  /// Returns None if the pool is empty.
  pub fn acquire(&mut self) -> Option<Chunk> {
    self.free.pop()
  }

  /// Parks an inactive chunk.
  ///
  /// Returns the chunk back as `Err` if the pool is at capacity; the caller
  /// then owns its release.
  pub fn release(&mut self, chunk: Chunk) -> Result<(), Chunk> {
    debug_assert!(!chunk.is_active(), "pooled chunk must be inactive");
    if self.capacity.is_some_and(|cap| self.free.len() >= cap) {
      return Err(chunk);
    }
    self.free.push(chunk);
    Ok(())
  }

  /// Removes every parked chunk, returning them for release.
  pub fn drain(&mut self) -> impl Iterator<Item = Chunk> + '_ {
    self.free.drain(..)
  }

  /// Returns the number of parked chunks.
  pub fn len(&self) -> usize {
    self.free.len()
  }

  /// Returns true if no chunk is parked.
  pub fn is_empty(&self) -> bool {
    self.free.is_empty()
  }

  /// Returns the configured capacity.
  pub fn capacity_limit(&self) -> Option<usize> {
    self.capacity
  }

  /// Iterates over parked chunks.
  pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
    self.free.iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::streaming::ChunkId;

  #[test]
  fn acquire_from_empty_pool_is_none() {
    let mut pool = ChunkPool::new();
    assert!(pool.acquire().is_none());
    assert!(pool.is_empty());
  }

  #[test]
  fn release_then_acquire_reuses_instance() {
    let mut pool = ChunkPool::new();
    pool.release(Chunk::new(ChunkId(1))).unwrap();
    pool.release(Chunk::new(ChunkId(2))).unwrap();
    assert_eq!(pool.len(), 2);

    let chunk = pool.acquire().unwrap();
    assert_eq!(chunk.id(), ChunkId(2));
    assert_eq!(pool.len(), 1);
  }

  #[test]
  fn capacity_limit_rejects_overflow() {
    let mut pool = ChunkPool::with_capacity_limit(Some(1));
    pool.release(Chunk::new(ChunkId(1))).unwrap();
    let rejected = pool.release(Chunk::new(ChunkId(2))).unwrap_err();
    assert_eq!(rejected.id(), ChunkId(2));
    assert_eq!(pool.len(), 1);
  }

  #[test]
  fn drain_empties_pool() {
    let mut pool = ChunkPool::new();
    for i in 0..4 {
      pool.release(Chunk::new(ChunkId(i))).unwrap();
    }
    assert_eq!(pool.drain().count(), 4);
    assert!(pool.is_empty());
  }
}
