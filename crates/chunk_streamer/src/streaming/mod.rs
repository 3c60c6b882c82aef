//! Streaming chunk management.
//!
//! This module provides the infrastructure for endless terrain streaming:
//! - [`ChunkPool`]: Recycles chunks that left the view
//! - [`ChunkStreamer`]: Keeps the required square of chunks active around
//!   the reference point
//! - [`StreamingDelta`]: What changed during one streamer pass

mod chunk;
mod pool;
mod streamer;

pub use chunk::{Chunk, ChunkId, ChunkPlacement};
pub use pool::ChunkPool;
pub use streamer::ChunkStreamer;

use crate::coords::ChunkPos;

/// Changes produced by one streamer pass.
///
/// Hosts apply the lists in field order: deactivations first, then
/// releases, then activations. A recycled chunk can appear in both
/// `deactivated` and `activated` of the same delta.
#[derive(Debug, Default, Clone, PartialEq)]
#[must_use = "hosts must apply the delta to keep visuals in sync"]
pub struct StreamingDelta {
  /// Chunks moved to the pool (previous position, chunk).
  pub deactivated: Vec<(ChunkPos, ChunkId)>,
  /// Chunks destroyed outright.
  pub released: Vec<ChunkId>,
  /// Chunks placed in the world, recycled or new.
  pub activated: Vec<ChunkPlacement>,
  /// How many of the activated chunks were created during this pass.
  pub created: usize,
}

impl StreamingDelta {
  /// Returns an empty delta (no changes).
  pub fn empty() -> Self {
    Self::default()
  }

  /// Returns true if nothing changed.
  pub fn is_empty(&self) -> bool {
    self.deactivated.is_empty() && self.released.is_empty() && self.activated.is_empty()
  }

  /// Number of activations served from the pool.
  pub fn recycled(&self) -> usize {
    self.activated.len() - self.created
  }
}

/// Returns iterator over the chunk positions required around a center.
///
/// The neighbourhood is a square of side `2 * radius + 1` (Chebyshev
/// distance), not a circle. Near the `i32` bounds the square is cut off
/// instead of overflowing; centers from [`ChunkGrid::coordinate_of`] always
/// leave room for radii up to [`MAX_VIEW_RADIUS`].
///
/// [`ChunkGrid::coordinate_of`]: crate::ChunkGrid::coordinate_of
/// [`MAX_VIEW_RADIUS`]: crate::MAX_VIEW_RADIUS
pub fn required_positions(center: ChunkPos, radius: i32) -> impl Iterator<Item = ChunkPos> {
  let x_range = center.x.saturating_sub(radius)..=center.x.saturating_add(radius);
  let z_range = center.z.saturating_sub(radius)..=center.z.saturating_add(radius);

  x_range.flat_map(move |x| z_range.clone().map(move |z| ChunkPos::new(x, z)))
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  #[test]
  fn required_positions_form_square() {
    let set: HashSet<_> = required_positions(ChunkPos::new(0, 0), 1).collect();
    assert_eq!(set.len(), 9);
    for x in -1..=1 {
      for z in -1..=1 {
        assert!(set.contains(&ChunkPos::new(x, z)));
      }
    }
  }

  #[test]
  fn required_positions_include_corners() {
    let center = ChunkPos::new(10, -4);
    let set: HashSet<_> = required_positions(center, 3).collect();
    assert_eq!(set.len(), 49);
    assert!(set.contains(&ChunkPos::new(13, -1)));
    assert!(set.contains(&ChunkPos::new(7, -7)));
    assert!(set.iter().all(|p| p.chebyshev_distance(center) <= 3));
  }

  #[test]
  fn zero_radius_is_center_only() {
    let positions: Vec<_> = required_positions(ChunkPos::new(5, 5), 0).collect();
    assert_eq!(positions, vec![ChunkPos::new(5, 5)]);
  }

  #[test]
  fn required_positions_saturate_at_bounds() {
    let corner = ChunkPos::new(i32::MAX, i32::MIN);
    let positions: Vec<_> = required_positions(corner, 1).collect();
    assert_eq!(positions.len(), 4);
    assert!(positions.contains(&ChunkPos::new(i32::MAX - 1, i32::MIN + 1)));
  }

  #[test]
  fn delta_counts_recycled() {
    let delta = StreamingDelta {
      activated: vec![
        ChunkPlacement {
          id: ChunkId(0),
          pos: ChunkPos::new(0, 0),
          translation: bevy::prelude::Vec3::ZERO,
        };
        3
      ],
      created: 1,
      ..StreamingDelta::empty()
    };
    assert_eq!(delta.recycled(), 2);
    assert!(!delta.is_empty());
    assert!(StreamingDelta::empty().is_empty());
  }
}
