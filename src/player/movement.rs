use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;
use chunk_streamer::ChunkStreamer;

use super::components::{PLAYER_HALF_HEIGHT, Player, PlayerMovementConfig};
use crate::input::{Move, PlayerInput};

pub fn handle_movement_input(
  mut players: Query<(&Actions<PlayerInput>, &mut Transform, &PlayerMovementConfig), With<Player>>,
  move_actions: Query<(&Action<Move>, &ActionState)>,
  time: Res<Time>,
) {
  for (actions, mut transform, config) in &mut players {
    let mut move_value = Vec2::ZERO;
    for action_entity in actions.iter() {
      if let Ok((action, action_state)) = move_actions.get(action_entity) {
        // Only use input when action is active (Fired or Ongoing)
        if matches!(action_state, ActionState::Fired | ActionState::Ongoing) {
          move_value = **action;
        }
      }
    }

    // Forward is -Z.
    let direction = Vec3::new(move_value.x, 0.0, -move_value.y).normalize_or_zero();
    transform.translation += direction * config.speed * time.delta_secs();
  }
}

/// Keeps the player standing on the chunk below it.
pub fn ride_terrain(
  streamer: Option<Res<ChunkStreamer>>,
  mut players: Query<&mut Transform, With<Player>>,
) {
  let Some(streamer) = streamer else {
    return;
  };
  for mut transform in &mut players {
    let below = streamer.coordinate_of(transform.translation);
    transform.translation.y = streamer.center_of(below).y + PLAYER_HALF_HEIGHT;
  }
}
