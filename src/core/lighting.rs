use bevy::prelude::*;

pub fn setup_lighting(mut commands: Commands) {
  commands.spawn((
    Name::new("Sun"),
    DirectionalLight {
      illuminance: 10_000.0,
      shadows_enabled: true,
      ..default()
    },
    Transform::from_xyz(30.0, 60.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
  ));
}
