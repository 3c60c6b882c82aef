//! Coordinate types and grid constants.
//!
//! The terrain is a flat square grid on the XZ plane:
//! - [`ChunkPos`]: Chunk grid address (i32 per axis)
//! - [`ChunkGrid`]: Maps world positions to chunks and back
//!
//! World Y is never used for addressing; it only carries per-chunk height.

use bevy::prelude::*;

/// Default chunk edge length in world units.
pub const DEFAULT_CHUNK_SIZE: f32 = 20.0;

/// Default view radius in chunks.
pub const DEFAULT_VIEW_RADIUS: i32 = 5;

/// Default minimum time between streaming evaluations, in seconds.
pub const DEFAULT_REEVALUATE_INTERVAL: f32 = 0.5;

/// Largest accepted view radius. A radius of 128 already means 66049 chunks.
pub const MAX_VIEW_RADIUS: i32 = 128;

/// Largest chunk coordinate magnitude produced by [`ChunkGrid::coordinate_of`].
///
/// Leaves room for a full view radius on either side without overflowing
/// `i32`.
pub const MAX_CHUNK_COORD: i32 = i32::MAX - MAX_VIEW_RADIUS;

/// Position in the chunk grid.
///
/// Each chunk spans one [`ChunkGrid::chunk_size`] in X and Z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPos {
  pub x: i32,
  pub z: i32,
}

impl ChunkPos {
  /// Creates a new chunk position.
  pub const fn new(x: i32, z: i32) -> Self {
    Self { x, z }
  }

  /// Chebyshev distance (max of the per-axis distances) to another chunk.
  pub fn chebyshev_distance(self, other: ChunkPos) -> u32 {
    let dx = (self.x as i64 - other.x as i64).unsigned_abs();
    let dz = (self.z as i64 - other.z as i64).unsigned_abs();
    dx.max(dz) as u32
  }

  /// Returns the position offset by the given number of chunks.
  ///
  /// Saturates at the `i32` bounds.
  pub const fn offset(self, dx: i32, dz: i32) -> Self {
    Self::new(self.x.saturating_add(dx), self.z.saturating_add(dz))
  }
}

impl From<(i32, i32)> for ChunkPos {
  fn from((x, z): (i32, i32)) -> Self {
    Self::new(x, z)
  }
}

/// Square grid of fixed-size chunks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChunkGrid {
  chunk_size: f32,
}

impl ChunkGrid {
  /// Creates a grid with the given chunk edge length.
  ///
  /// The edge length must be finite and positive; [`StreamerConfig`]
  /// validation guarantees this for grids built by the streamer.
  ///
  /// [`StreamerConfig`]: crate::StreamerConfig
  pub const fn new(chunk_size: f32) -> Self {
    Self { chunk_size }
  }

  /// Returns the chunk edge length.
  pub const fn chunk_size(&self) -> f32 {
    self.chunk_size
  }

  /// Returns the chunk containing a world position.
  ///
  /// Uses floor division for correct negative coordinate handling.
  /// With a chunk size of 20, x = -5 maps to chunk -1 and x = 20 to chunk 1.
  ///
  /// Coordinates are clamped to `±MAX_CHUNK_COORD`, so positions beyond the
  /// grid's range (including infinities) land on its outermost chunk.
  pub fn coordinate_of(&self, world: Vec3) -> ChunkPos {
    ChunkPos::new(self.axis_of(world.x), self.axis_of(world.z))
  }

  fn axis_of(&self, v: f32) -> i32 {
    // `as` saturates and maps NaN to 0.
    ((v / self.chunk_size).floor() as i32).clamp(-MAX_CHUNK_COORD, MAX_CHUNK_COORD)
  }

  /// Returns the lower corner of a chunk on the XZ plane.
  pub fn origin_of(&self, pos: ChunkPos) -> Vec2 {
    Vec2::new(
      pos.x as f32 * self.chunk_size,
      pos.z as f32 * self.chunk_size,
    )
  }

  /// Returns the center of a chunk at the given height.
  pub fn center_of(&self, pos: ChunkPos, height: f32) -> Vec3 {
    let origin = self.origin_of(pos);
    let half = self.chunk_size / 2.0;
    Vec3::new(origin.x + half, height, origin.y + half)
  }

  /// Returns true if the world position falls inside the chunk.
  ///
  /// Bounds are half-open: the lower edges belong to the chunk, the upper
  /// edges to its neighbours.
  pub fn contains(&self, pos: ChunkPos, world: Vec3) -> bool {
    let min = self.origin_of(pos);
    let max = min + Vec2::splat(self.chunk_size);
    world.x >= min.x && world.x < max.x && world.z >= min.y && world.z < max.y
  }
}

impl Default for ChunkGrid {
  fn default() -> Self {
    Self::new(DEFAULT_CHUNK_SIZE)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn coordinate_of_uses_floor_semantics() {
    let grid = ChunkGrid::new(20.0);
    let x = |v: f32| grid.coordinate_of(Vec3::new(v, 0.0, 0.0)).x;

    assert_eq!(x(20.0), 1);
    assert_eq!(x(19.999), 0);
    assert_eq!(x(0.0), 0);
    assert_eq!(x(-0.001), -1);
    assert_eq!(x(-5.0), -1);
    assert_eq!(x(-20.0), -1);
    assert_eq!(x(-20.001), -2);
  }

  #[test]
  fn coordinate_of_ignores_height() {
    let grid = ChunkGrid::new(20.0);
    assert_eq!(
      grid.coordinate_of(Vec3::new(25.0, -300.0, 5.0)),
      grid.coordinate_of(Vec3::new(25.0, 900.0, 5.0)),
    );
    assert_eq!(
      grid.coordinate_of(Vec3::new(25.0, 0.0, 5.0)),
      ChunkPos::new(1, 0)
    );
  }

  #[test]
  fn coordinate_of_is_monotonic() {
    let grid = ChunkGrid::new(7.5);
    let mut last = i32::MIN;
    for i in -400..400 {
      let c = grid.coordinate_of(Vec3::new(i as f32 * 0.37, 0.0, 0.0)).x;
      assert!(c >= last, "coordinate decreased at step {i}");
      last = c;
    }
  }

  #[test]
  fn center_round_trip_stays_inside_chunk() {
    let grid = ChunkGrid::new(20.0);
    let samples = [
      Vec3::new(0.0, 0.0, 0.0),
      Vec3::new(-0.001, 0.0, 39.99),
      Vec3::new(-1234.5, 3.0, 987.25),
      Vec3::new(59.999, 0.0, -60.0),
    ];

    for world in samples {
      let pos = grid.coordinate_of(world);
      let center = grid.center_of(pos, 0.0);
      assert!(grid.contains(pos, world), "{world:?} not inside {pos:?}");
      assert!(grid.contains(pos, center));
      // Idempotent: the center maps back to the same chunk.
      assert_eq!(grid.coordinate_of(center), pos);
    }
  }

  #[test]
  fn center_of_offsets_by_half_chunk() {
    let grid = ChunkGrid::new(20.0);
    assert_eq!(
      grid.center_of(ChunkPos::new(-1, 2), 3.5),
      Vec3::new(-10.0, 3.5, 50.0)
    );
  }

  #[test]
  fn far_positions_clamp_to_grid_range() {
    let grid = ChunkGrid::new(20.0);
    let at = |x: f32| grid.coordinate_of(Vec3::new(x, 0.0, -x)).x;

    assert_eq!(at(1.0e11), MAX_CHUNK_COORD);
    assert_eq!(at(-1.0e11), -MAX_CHUNK_COORD);
    assert_eq!(at(f32::MAX), MAX_CHUNK_COORD);
    assert_eq!(at(f32::NEG_INFINITY), -MAX_CHUNK_COORD);
    assert_eq!(
      grid.coordinate_of(Vec3::new(f32::INFINITY, 0.0, f32::NAN)),
      ChunkPos::new(MAX_CHUNK_COORD, 0)
    );
  }

  #[test]
  fn offset_saturates() {
    let edge = ChunkPos::new(i32::MAX, i32::MIN);
    assert_eq!(edge.offset(1, -1), edge);
    assert_eq!(ChunkPos::new(1, 1).offset(-2, 3), ChunkPos::new(-1, 4));
  }

  #[test]
  fn chebyshev_distance_is_square() {
    let origin = ChunkPos::new(0, 0);
    assert_eq!(origin.chebyshev_distance(ChunkPos::new(2, 2)), 2);
    assert_eq!(origin.chebyshev_distance(ChunkPos::new(-3, 1)), 3);
    assert_eq!(origin.chebyshev_distance(origin), 0);
  }
}
