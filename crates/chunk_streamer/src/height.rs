//! Per-chunk height offsets.
//!
//! The [`HeightSource`] trait decides how high a chunk sits once placed.
//! Sources must be pure functions of the chunk position so that a chunk
//! leaving and re-entering the view lands at the same height.

use crate::coords::ChunkPos;
use crate::hash::hash31if64;

/// Trait for computing the vertical offset of a chunk.
///
/// The `Send + Sync` bounds let the streamer live in a Bevy resource.
pub trait HeightSource: Send + Sync {
  /// Returns the height for the chunk at the given position.
  fn height(&self, pos: ChunkPos) -> f32;
}

/// Keeps every chunk at height zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatHeight;

impl HeightSource for FlatHeight {
  fn height(&self, _pos: ChunkPos) -> f32 {
    0.0
  }
}

/// Hash-derived height in `[-amplitude, amplitude]`.
///
/// The hash is uniform in `[0, 1)`, but narrowing it to `f32` can round up,
/// so the upper bound is reachable.
#[derive(Clone, Copy, Debug)]
pub struct HashedHeight {
  seed: u64,
  amplitude: f32,
}

impl HashedHeight {
  /// Creates a hashed height source.
  pub fn new(seed: u64, amplitude: f32) -> Self {
    Self { seed, amplitude }
  }

  /// Returns the seed.
  pub fn seed(&self) -> u64 {
    self.seed
  }

  /// Returns the maximum absolute offset.
  pub fn amplitude(&self) -> f32 {
    self.amplitude
  }
}

impl HeightSource for HashedHeight {
  fn height(&self, pos: ChunkPos) -> f32 {
    let t = hash31if64(self.seed as i64, pos.x as i64, pos.z as i64);
    spread(t, self.amplitude)
  }
}

/// Maps a unit value onto `[-amplitude, amplitude]`.
fn spread(t: f64, amplitude: f32) -> f32 {
  (t as f32 * 2.0 - 1.0) * amplitude
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flat_is_always_zero() {
    assert_eq!(FlatHeight.height(ChunkPos::new(3, -2)), 0.0);
    assert_eq!(FlatHeight.height(ChunkPos::new(-900, 12)), 0.0);
  }

  #[test]
  fn hashed_is_deterministic() {
    let a = HashedHeight::new(42, 5.0);
    let b = HashedHeight::new(42, 5.0);
    let pos = ChunkPos::new(3, -2);
    assert_eq!(a.height(pos), a.height(pos));
    assert_eq!(a.height(pos), b.height(pos));
  }

  #[test]
  fn hashed_stays_within_amplitude() {
    let source = HashedHeight::new(7, 2.5);
    for x in -20..20 {
      for z in -20..20 {
        let h = source.height(ChunkPos::new(x, z));
        assert!((-2.5..=2.5).contains(&h), "height {h} at ({x}, {z})");
      }
    }
  }

  #[test]
  fn spread_reaches_both_bounds() {
    assert_eq!(spread(0.0, 2.5), -2.5);
    // Just below 1.0 in f64 rounds to 1.0 in f32.
    assert_eq!(spread(1.0 - f64::EPSILON, 2.5), 2.5);
    assert_eq!(spread(0.5, 2.5), 0.0);
  }

  #[test]
  fn hashed_varies_across_chunks() {
    let source = HashedHeight::new(7, 10.0);
    let first = source.height(ChunkPos::new(0, 0));
    let varied = (1..16).any(|i| source.height(ChunkPos::new(i, 0)) != first);
    assert!(varied);
  }

  #[test]
  fn zero_amplitude_is_flat() {
    let source = HashedHeight::new(7, 0.0);
    assert_eq!(source.height(ChunkPos::new(5, 5)), 0.0);
  }
}
