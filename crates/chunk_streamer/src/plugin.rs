//! ECS plugin and systems for the chunk streamer.
//!
//! Drives [`ChunkStreamer`] once per frame from the [`StreamingTarget`]
//! position and mirrors every streaming delta onto chunk entities.

use std::collections::HashMap;
use std::sync::Arc;

use bevy::ecs::message::MessageReader;
use bevy::ecs::system::Command;
use bevy::prelude::*;

use crate::config::StreamerConfig;
use crate::height::HeightSource;
use crate::streaming::{ChunkId, ChunkPlacement, ChunkStreamer, StreamingDelta};
use crate::ChunkPos;

/// Marker component for the entity the terrain streams around.
///
/// Exactly one entity should carry it. With none (or several) the streamer
/// treats the reference point as unavailable and idles.
#[derive(Component, Default)]
pub struct StreamingTarget;

/// Component on every chunk entity.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct TerrainChunk {
  /// Chunk instance this entity displays.
  pub id: ChunkId,
  /// Assigned grid position, None while the chunk is pooled.
  pub pos: Option<ChunkPos>,
}

/// Template used to display chunks.
///
/// Meshes are authored at unit size on the XZ plane; chunk entities are
/// scaled by the chunk size. Insert this resource before the first update
/// to use a custom template; otherwise a flat square in the configured
/// colour is created when mesh and material assets are available.
#[derive(Resource, Clone)]
pub struct ChunkVisuals {
  /// Mesh shared by all chunks.
  pub mesh: Handle<Mesh>,
  /// Material applied uniformly to all chunks.
  pub material: Handle<StandardMaterial>,
}

/// Marks [`ChunkVisuals`] as the built-in template, rebuilt whenever the
/// streamer is re-created.
#[derive(Resource)]
struct DefaultChunkVisuals;

/// Maps chunk instances to the entities displaying them.
#[derive(Resource, Default, Debug)]
pub struct ChunkEntities(HashMap<ChunkId, Entity>);

impl ChunkEntities {
  /// Returns the entity displaying a chunk.
  pub fn get(&self, id: ChunkId) -> Option<Entity> {
    self.0.get(&id).copied()
  }

  /// Returns the number of chunk entities.
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Returns true if no chunk entity exists.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

/// Message to manipulate the streamer from any system.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum StreamerRequest {
  /// Reconcile now, ignoring throttle and movement.
  ForceRefresh,
  /// Re-center on a world position immediately.
  Teleport(Vec3),
  /// Destroy every chunk entity.
  ClearAll,
  /// Change the view radius.
  SetViewRadius(i32),
}

/// System set containing the streaming systems, in `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChunkStreamingSet;

/// Command that (re)creates the [`ChunkStreamer`] resource.
///
/// Any existing streamer is replaced and its chunk entities despawned.
/// Invalid configuration is reported with `error!` and leaves streaming
/// disabled, with no streamer resource at all. A built-in chunk template is
/// rebuilt to match the new config; a user-supplied [`ChunkVisuals`] is kept.
///
/// # Example
/// ```ignore
/// fn setup(mut commands: Commands) {
///     commands.queue(InitChunkStreamer::new(StreamerConfig::default()));
/// }
/// ```
pub struct InitChunkStreamer {
  config: StreamerConfig,
  height: Option<Arc<dyn HeightSource>>,
}

impl InitChunkStreamer {
  pub fn new(config: StreamerConfig) -> Self {
    Self {
      config,
      height: None,
    }
  }

  /// Overrides the height source derived from the configuration.
  pub fn with_height_source(mut self, height: impl HeightSource + 'static) -> Self {
    self.height = Some(Arc::new(height));
    self
  }
}

impl Command for InitChunkStreamer {
  fn apply(self, world: &mut World) {
    let stale: Vec<Entity> = world
      .get_resource_mut::<ChunkEntities>()
      .map(|mut entities| entities.0.drain().map(|(_, entity)| entity).collect())
      .unwrap_or_default();
    for entity in stale {
      world.despawn(entity);
    }
    // Built-in template colour follows the new config.
    if world.remove_resource::<DefaultChunkVisuals>().is_some() {
      world.remove_resource::<ChunkVisuals>();
    }

    let streamer = match ChunkStreamer::new(self.config) {
      Ok(streamer) => streamer,
      Err(e) => {
        world.remove_resource::<ChunkStreamer>();
        error!("Invalid terrain streaming config: {e}. Chunk streaming disabled.");
        return;
      }
    };
    let streamer = match self.height {
      Some(height) => streamer.with_shared_height_source(height),
      None => streamer,
    };

    info!(
      "Chunk streamer ready: chunk size {}, view radius {}",
      streamer.config().chunk_size,
      streamer.config().view_radius
    );
    world.insert_resource(streamer);
  }
}

/// Plugin for endless terrain streaming.
///
/// This plugin provides:
/// - Per-frame streaming around the [`StreamingTarget`]
/// - Chunk entity spawning, recycling and despawning
/// - A default flat chunk template when rendering assets exist
/// - [`StreamerRequest`] handling
///
/// Without a config, no streamer exists until [`InitChunkStreamer`] is
/// queued.
#[derive(Default)]
pub struct ChunkStreamerPlugin {
  /// Configuration for the streamer created at startup.
  pub config: Option<StreamerConfig>,
}

impl ChunkStreamerPlugin {
  /// Creates the plugin with a streamer built from the given config.
  pub fn new(config: StreamerConfig) -> Self {
    Self {
      config: Some(config),
    }
  }
}

impl Plugin for ChunkStreamerPlugin {
  fn build(&self, app: &mut App) {
    app
      .init_resource::<ChunkEntities>()
      .add_message::<StreamerRequest>()
      .add_systems(
        Update,
        (
          setup_chunk_visuals.run_if(not(resource_exists::<ChunkVisuals>)),
          handle_streamer_requests,
          tick_streamer,
        )
          .chain()
          .in_set(ChunkStreamingSet),
      );

    if let Some(config) = &self.config {
      InitChunkStreamer::new(config.clone()).apply(app.world_mut());
    }
  }
}

/// System: Creates the default chunk template.
///
/// Skipped in headless apps that have no mesh or material assets.
fn setup_chunk_visuals(
  mut commands: Commands,
  streamer: Option<Res<ChunkStreamer>>,
  meshes: Option<ResMut<Assets<Mesh>>>,
  materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
  let (Some(streamer), Some(mut meshes), Some(mut materials)) = (streamer, meshes, materials)
  else {
    return;
  };

  let [r, g, b] = streamer.config().color;
  let mesh = meshes.add(Plane3d::default().mesh().size(1.0, 1.0));
  let material = materials.add(StandardMaterial {
    base_color: Color::srgb(r, g, b),
    perceptual_roughness: 0.9,
    ..default()
  });
  commands.insert_resource(ChunkVisuals { mesh, material });
  commands.insert_resource(DefaultChunkVisuals);
}

/// System: Applies queued [`StreamerRequest`]s.
fn handle_streamer_requests(
  mut commands: Commands,
  mut requests: MessageReader<StreamerRequest>,
  streamer: Option<ResMut<ChunkStreamer>>,
  mut entities: ResMut<ChunkEntities>,
  visuals: Option<Res<ChunkVisuals>>,
) {
  let Some(mut streamer) = streamer else {
    return;
  };

  for request in requests.read() {
    let delta = match request {
      StreamerRequest::ForceRefresh => streamer.force_refresh(),
      StreamerRequest::Teleport(position) => streamer.teleport(*position),
      StreamerRequest::ClearAll => streamer.clear_all(),
      StreamerRequest::SetViewRadius(radius) => match streamer.set_view_radius(*radius) {
        Ok(delta) => delta,
        Err(e) => {
          warn!("Rejected view radius change: {e}");
          continue;
        }
      },
    };
    let scale = chunk_scale(&streamer);
    apply_delta(
      &mut commands,
      &mut entities,
      visuals.as_deref(),
      scale,
      delta,
    );
  }
}

/// System: Advances the streamer from the target position.
fn tick_streamer(
  mut commands: Commands,
  time: Res<Time>,
  targets: Query<&GlobalTransform, With<StreamingTarget>>,
  streamer: Option<ResMut<ChunkStreamer>>,
  mut entities: ResMut<ChunkEntities>,
  visuals: Option<Res<ChunkVisuals>>,
) {
  let Some(mut streamer) = streamer else {
    return;
  };

  let reference = targets.single().ok().map(GlobalTransform::translation);
  let delta = streamer.tick(reference, time.delta_secs());
  if delta.is_empty() {
    return;
  }

  let scale = chunk_scale(&streamer);
  apply_delta(
    &mut commands,
    &mut entities,
    visuals.as_deref(),
    scale,
    delta,
  );
}

fn chunk_scale(streamer: &ChunkStreamer) -> Vec3 {
  let size = streamer.config().chunk_size;
  Vec3::new(size, 1.0, size)
}

/// Mirrors a streaming delta onto chunk entities.
///
/// Everything goes through commands so that deltas applied within one frame
/// stay ordered even for entities spawned earlier in the same frame.
fn apply_delta(
  commands: &mut Commands,
  entities: &mut ChunkEntities,
  visuals: Option<&ChunkVisuals>,
  scale: Vec3,
  delta: StreamingDelta,
) {
  for (_, id) in delta.deactivated {
    if let Some(entity) = entities.get(id) {
      commands
        .entity(entity)
        .insert((Visibility::Hidden, TerrainChunk { id, pos: None }));
    }
  }

  for id in delta.released {
    if let Some(entity) = entities.0.remove(&id) {
      commands.entity(entity).despawn();
    }
  }

  for placement in delta.activated {
    let ChunkPlacement {
      id,
      pos,
      translation,
    } = placement;
    let components = (
      TerrainChunk { id, pos: Some(pos) },
      Transform::from_translation(translation).with_scale(scale),
      Visibility::Visible,
    );

    if let Some(entity) = entities.get(id) {
      commands.entity(entity).insert(components);
      continue;
    }

    let mut entity = commands.spawn((Name::new(format!("Terrain chunk {}", id.0)), components));
    if let Some(visuals) = visuals {
      entity.insert((
        Mesh3d(visuals.mesh.clone()),
        MeshMaterial3d(visuals.material.clone()),
      ));
    }
    entities.0.insert(id, entity.id());
  }
}
