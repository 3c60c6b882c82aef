use bevy::prelude::*;

#[derive(Component)]
pub struct Player;

/// Half the height of the player cube; keeps it standing on the ground.
pub const PLAYER_HALF_HEIGHT: f32 = 1.0;

#[derive(Component)]
pub struct PlayerMovementConfig {
  pub speed: f32,
  pub teleport_distance: f32,
}
