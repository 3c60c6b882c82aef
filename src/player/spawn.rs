use bevy::prelude::*;
use chunk_streamer::StreamingTarget;

use super::components::{PLAYER_HALF_HEIGHT, Player, PlayerMovementConfig};
use crate::config::ConfigLoaded;
use crate::input::{PlayerInput, player_input_actions};

pub fn spawn_player(
  mut commands: Commands,
  config: Res<ConfigLoaded>,
  mut meshes: ResMut<Assets<Mesh>>,
  mut materials: ResMut<Assets<StandardMaterial>>,
) {
  let player = &config.player;
  let spawn_pos = Vec3::new(0.0, PLAYER_HALF_HEIGHT, 0.0);

  commands.spawn((
    Name::new("Player"),
    Player,
    StreamingTarget, // Terrain streams around this entity
    PlayerMovementConfig {
      speed: player.speed,
      teleport_distance: player.teleport_distance,
    },
    Mesh3d(meshes.add(Cuboid::new(
      PLAYER_HALF_HEIGHT,
      PLAYER_HALF_HEIGHT * 2.0,
      PLAYER_HALF_HEIGHT,
    ))),
    MeshMaterial3d(materials.add(Color::srgb(0.85, 0.35, 0.2))),
    Transform::from_translation(spawn_pos),
    PlayerInput,
    player_input_actions(),
  ));
}
