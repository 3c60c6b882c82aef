use bevy::prelude::*;

use crate::config::ConfigLoaded;
use crate::player::components::Player;

/// Marker component for the game camera
#[derive(Component)]
pub struct GameCamera;

pub fn setup_camera(mut commands: Commands, config: Res<ConfigLoaded>) {
  let offset = Vec3::from_array(config.camera.offset);
  commands.spawn((
    Name::new("Camera"),
    GameCamera,
    Camera3d::default(),
    Transform::from_translation(offset).looking_at(Vec3::ZERO, Vec3::Y),
  ));
}

/// Keeps the camera at the configured offset from the player.
pub fn camera_follow(
  config: Res<ConfigLoaded>,
  player_query: Query<&Transform, (With<Player>, Without<GameCamera>)>,
  mut camera_query: Query<&mut Transform, With<GameCamera>>,
) {
  let Ok(player) = player_query.single() else {
    return;
  };
  let Ok(mut camera_transform) = camera_query.single_mut() else {
    return;
  };

  let target = player.translation;
  *camera_transform = Transform::from_translation(target + Vec3::from_array(config.camera.offset))
    .looking_at(target, Vec3::Y);
}
