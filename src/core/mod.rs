pub(crate) mod camera;
mod lighting;

use bevy::{prelude::*, transform::TransformSystems};

pub struct CorePlugin;

impl Plugin for CorePlugin {
  fn build(&self, app: &mut App) {
    app
      .insert_resource(ClearColor(Color::srgb(0.55, 0.72, 0.9)))
      .add_systems(Startup, (camera::setup_camera, lighting::setup_lighting))
      .add_systems(
        PostUpdate,
        camera::camera_follow.before(TransformSystems::Propagate),
      );
  }
}
