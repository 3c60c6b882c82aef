mod config;
mod core;
mod input;
mod player;

use bevy::{prelude::*, window::WindowResolution};
use chunk_streamer::ChunkStreamerPlugin;

fn main() {
  let mut app = App::new();

  app
    .add_plugins(DefaultPlugins.set(WindowPlugin {
      primary_window: Some(Window {
        // Replaced from the config on the first frame.
        resolution: WindowResolution::new(1280, 720),
        title: "Endless Terrain".to_string(),
        ..default()
      }),
      ..default()
    }))
    .add_plugins(config::ConfigPlugin)
    .add_plugins(core::CorePlugin)
    .add_plugins(input::InputPlugin)
    .add_plugins(player::PlayerPlugin)
    // Built from the config by ConfigPlugin once it is loaded.
    .add_plugins(ChunkStreamerPlugin::default());

  app.run();
}
