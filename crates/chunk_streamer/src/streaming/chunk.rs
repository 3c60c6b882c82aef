//! Runtime chunk instances.

use bevy::prelude::*;

use crate::coords::ChunkPos;

/// Stable identifier of a chunk instance.
///
/// Ids are never reused within one streamer, so hosts can key their own
/// per-chunk state (entities, meshes) on them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId(pub u64);

/// A reusable chunk instance.
///
/// Lives either in the active set (assigned, active) or in the pool
/// (unassigned, inactive).
#[derive(Debug)]
pub struct Chunk {
  id: ChunkId,
  /// Grid position if active, None if in pool.
  pos: Option<ChunkPos>,
  /// World-space placement of the chunk center.
  translation: Vec3,
  active: bool,
}

impl Chunk {
  pub(crate) fn new(id: ChunkId) -> Self {
    Self {
      id,
      pos: None,
      translation: Vec3::ZERO,
      active: false,
    }
  }

  /// Returns the chunk id.
  pub fn id(&self) -> ChunkId {
    self.id
  }

  /// Returns the assigned position, if active.
  pub fn pos(&self) -> Option<ChunkPos> {
    self.pos
  }

  /// Returns the last placement.
  pub fn translation(&self) -> Vec3 {
    self.translation
  }

  /// Returns true if the chunk is placed in the world.
  pub fn is_active(&self) -> bool {
    self.active
  }

  /// Assigns the chunk to a grid position and marks it active.
  pub(crate) fn activate(&mut self, pos: ChunkPos, translation: Vec3) -> ChunkPlacement {
    self.pos = Some(pos);
    self.translation = translation;
    self.active = true;
    self.placement(pos)
  }

  /// Resets the chunk to pool state.
  pub(crate) fn deactivate(&mut self) {
    self.pos = None;
    self.active = false;
  }

  fn placement(&self, pos: ChunkPos) -> ChunkPlacement {
    ChunkPlacement {
      id: self.id,
      pos,
      translation: self.translation,
    }
  }

  /// Returns a copy of the placement if the chunk is active.
  pub(crate) fn current_placement(&self) -> Option<ChunkPlacement> {
    self.pos.map(|pos| self.placement(pos))
  }
}

/// Where an active chunk sits in the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChunkPlacement {
  /// Which chunk instance.
  pub id: ChunkId,
  /// Grid position it is assigned to.
  pub pos: ChunkPos,
  /// World-space center of the chunk, including its height offset.
  pub translation: Vec3,
}
