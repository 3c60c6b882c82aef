//! The chunk streamer.
//!
//! Owns every chunk instance. A chunk is either in the active map (keyed by
//! its grid position) or parked in the pool; it is only destroyed by
//! [`ChunkStreamer::clear_all`] or when a capped pool overflows.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use bevy::prelude::*;

use super::chunk::{Chunk, ChunkId, ChunkPlacement};
use super::pool::ChunkPool;
use super::{StreamingDelta, required_positions};
use crate::config::{ConfigError, StreamerConfig};
use crate::coords::{ChunkGrid, ChunkPos};
use crate::height::HeightSource;

/// Keeps the square of chunks around a reference point active.
///
/// Drive it with [`tick`](Self::tick) once per frame. Evaluation is
/// throttled by the configured interval and only reconciles when the
/// reference crosses into another chunk.
#[derive(Resource)]
pub struct ChunkStreamer {
  config: StreamerConfig,
  grid: ChunkGrid,
  height: Arc<dyn HeightSource>,
  /// Seconds accumulated since the last evaluation.
  idle: f32,
  /// Reference chunk from the last evaluation. None until the first one.
  center: Option<ChunkPos>,
  active: HashMap<ChunkPos, Chunk>,
  pool: ChunkPool,
  next_id: u64,
  created: u64,
  missing_reference_reported: bool,
}

impl ChunkStreamer {
  /// Creates a streamer, rejecting invalid configuration.
  pub fn new(config: StreamerConfig) -> Result<Self, ConfigError> {
    config.validate()?;
    let height = config.height_source();
    Ok(Self {
      grid: ChunkGrid::new(config.chunk_size),
      pool: ChunkPool::with_capacity_limit(config.max_pooled),
      config,
      height,
      idle: 0.0,
      center: None,
      active: HashMap::new(),
      next_id: 0,
      created: 0,
      missing_reference_reported: false,
    })
  }

  /// Replaces the height source used for future placements.
  ///
  /// Chunks that are already active keep their placement until they are
  /// recycled.
  pub fn with_height_source(self, height: impl HeightSource + 'static) -> Self {
    self.with_shared_height_source(Arc::new(height))
  }

  /// Like [`with_height_source`](Self::with_height_source), for a source
  /// that is already shared.
  pub fn with_shared_height_source(mut self, height: Arc<dyn HeightSource>) -> Self {
    self.height = height;
    self
  }

  /// Returns the configuration.
  pub fn config(&self) -> &StreamerConfig {
    &self.config
  }

  /// Returns the chunk grid.
  pub fn grid(&self) -> &ChunkGrid {
    &self.grid
  }

  /// Returns the chunk containing a world position.
  pub fn coordinate_of(&self, world: Vec3) -> ChunkPos {
    self.grid.coordinate_of(world)
  }

  /// Returns where a chunk at the given position is placed, height included.
  pub fn center_of(&self, pos: ChunkPos) -> Vec3 {
    self.grid.center_of(pos, self.height.height(pos))
  }

  /// Returns the reference chunk from the last evaluation.
  pub fn center(&self) -> Option<ChunkPos> {
    self.center
  }

  /// Returns the number of active chunks.
  pub fn active_count(&self) -> usize {
    self.active.len()
  }

  /// Returns the number of pooled chunks.
  pub fn pooled_count(&self) -> usize {
    self.pool.len()
  }

  /// Returns how many chunk instances were ever created.
  pub fn created_count(&self) -> u64 {
    self.created
  }

  /// Returns true if a chunk is active at the given position.
  pub fn is_active(&self, pos: ChunkPos) -> bool {
    self.active.contains_key(&pos)
  }

  /// Returns the active chunk positions.
  pub fn active_positions(&self) -> HashSet<ChunkPos> {
    self.active.keys().copied().collect()
  }

  /// Returns the placement of the active chunk at a position.
  pub fn placement(&self, pos: ChunkPos) -> Option<ChunkPlacement> {
    self.active.get(&pos).and_then(Chunk::current_placement)
  }

  /// Returns the placements of all active chunks.
  pub fn placements(&self) -> impl Iterator<Item = ChunkPlacement> + '_ {
    self.active.values().filter_map(Chunk::current_placement)
  }

  /// Advances the streamer by one frame.
  ///
  /// `reference` is the world position to stream around; None means no
  /// reference is available, which is reported once and otherwise ignored.
  pub fn tick(&mut self, reference: Option<Vec3>, delta_seconds: f32) -> StreamingDelta {
    let Some(reference) = reference else {
      if !self.missing_reference_reported {
        warn!("Chunk streamer has no reference point; streaming is idle until one appears");
        self.missing_reference_reported = true;
      }
      return StreamingDelta::empty();
    };

    self.idle += delta_seconds;
    if self.idle < self.config.reevaluate_interval {
      return StreamingDelta::empty();
    }
    self.idle = 0.0;

    let pos = self.grid.coordinate_of(reference);
    if self.center == Some(pos) {
      return StreamingDelta::empty();
    }
    self.center = Some(pos);
    self.reconcile()
  }

  /// Reconciles unconditionally, ignoring throttle and movement.
  pub fn force_refresh(&mut self) -> StreamingDelta {
    self.idle = 0.0;
    self.reconcile()
  }

  /// Moves the reference to a new position and reconciles immediately.
  pub fn teleport(&mut self, reference: Vec3) -> StreamingDelta {
    self.center = Some(self.grid.coordinate_of(reference));
    self.force_refresh()
  }

  /// Brings the active set in line with the required square around the
  /// last known reference chunk.
  ///
  /// No-op until a reference chunk is known.
  pub fn reconcile(&mut self) -> StreamingDelta {
    let Some(center) = self.center else {
      debug!("Chunk streamer reconcile skipped: no reference chunk yet");
      return StreamingDelta::empty();
    };

    let required: HashSet<ChunkPos> =
      required_positions(center, self.config.view_radius).collect();
    let mut delta = StreamingDelta::empty();

    // Park chunks that left the square before activating anything, so the
    // pool is as full as possible for the activation pass.
    let leaving: Vec<ChunkPos> = self
      .active
      .keys()
      .filter(|pos| !required.contains(pos))
      .copied()
      .collect();
    for pos in leaving {
      let Some(mut chunk) = self.active.remove(&pos) else {
        continue;
      };
      chunk.deactivate();
      let id = chunk.id();
      match self.pool.release(chunk) {
        Ok(()) => delta.deactivated.push((pos, id)),
        Err(_) => delta.released.push(id),
      }
    }

    let mut entering: Vec<ChunkPos> = required
      .into_iter()
      .filter(|pos| !self.active.contains_key(pos))
      .collect();
    entering.sort_unstable();
    for pos in entering {
      let mut chunk = match self.pool.acquire() {
        Some(chunk) => chunk,
        None => {
          delta.created += 1;
          self.create_chunk()
        }
      };
      let placement = chunk.activate(pos, self.center_of(pos));
      self.active.insert(pos, chunk);
      delta.activated.push(placement);
    }

    if !delta.is_empty() {
      debug!(
        "Streamed around {:?}: {} activated ({} new), {} pooled, {} released",
        center,
        delta.activated.len(),
        delta.created,
        delta.deactivated.len(),
        delta.released.len()
      );
    }

    delta
  }

  /// Changes the view radius and reconciles immediately.
  ///
  /// Shrinking parks the outer ring in the pool; growing drains the pool
  /// before creating new chunks.
  pub fn set_view_radius(&mut self, radius: i32) -> Result<StreamingDelta, ConfigError> {
    let config = self.config.clone().with_view_radius(radius);
    config.validate()?;
    self.config = config;
    Ok(self.reconcile())
  }

  /// Destroys every chunk, active or pooled.
  ///
  /// The last known reference chunk is kept, so a following
  /// [`force_refresh`](Self::force_refresh) rebuilds the square in place
  /// from freshly created chunks.
  pub fn clear_all(&mut self) -> StreamingDelta {
    let mut delta = StreamingDelta::empty();
    delta
      .released
      .extend(self.active.drain().map(|(_, chunk)| chunk.id()));
    delta.released.extend(self.pool.drain().map(|chunk| chunk.id()));
    info!("Cleared {} terrain chunks", delta.released.len());
    delta
  }

  fn create_chunk(&mut self) -> Chunk {
    let id = ChunkId(self.next_id);
    self.next_id += 1;
    self.created += 1;
    Chunk::new(id)
  }
}
