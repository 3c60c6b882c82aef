use bevy::{asset::AssetEvent, ecs::message::MessageReader, prelude::*, window::PrimaryWindow};
use bevy_common_assets::toml::TomlAssetPlugin;
use chunk_streamer::{ChunkStreamer, InitChunkStreamer};

use super::{CONFIG_PATH, ConfigHandle, ConfigLoaded, DemoConfig, parse_or_default};

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
  fn build(&self, app: &mut App) {
    // Asset-based config with hot-reload
    app
      .add_plugins(TomlAssetPlugin::<DemoConfig>::new(&["config.toml"]))
      .add_systems(PreStartup, load_config_sync)
      .add_systems(
        Update,
        (
          watch_config_changes,
          update_window_on_config_change,
          update_streamer_on_config_change,
        )
          .chain(),
      );
  }
}

fn load_config_sync(mut commands: Commands, asset_server: Res<AssetServer>) {
  let handle: Handle<DemoConfig> = asset_server.load("config/terrain.config.toml");
  commands.insert_resource(ConfigHandle(handle));

  let config = parse_or_default(std::fs::read_to_string(CONFIG_PATH));
  commands.insert_resource(ConfigLoaded::from(config));
}

fn watch_config_changes(
  mut commands: Commands,
  config_handle: Res<ConfigHandle>,
  mut messages: MessageReader<AssetEvent<DemoConfig>>,
  configs: Res<Assets<DemoConfig>>,
) {
  for event in messages.read() {
    if let AssetEvent::Modified { id } = event
      && config_handle.0.id() == *id
      && let Some(config) = configs.get(&config_handle.0)
    {
      info!("Config reloaded!");
      commands.insert_resource(ConfigLoaded::from(config.clone()));
    }
  }
}

fn update_window_on_config_change(
  config: Res<ConfigLoaded>,
  mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
  if !config.is_changed() {
    return;
  }
  if let Ok(mut window) = windows.single_mut() {
    window
      .resolution
      .set(config.window.width as f32, config.window.height as f32);
    window.title.clone_from(&config.window.title);
  }
}

/// Rebuilds the streamer when its section of the config changed.
///
/// Also performs the initial build, since the loaded config starts out
/// changed.
fn update_streamer_on_config_change(
  mut commands: Commands,
  config: Res<ConfigLoaded>,
  streamer: Option<Res<ChunkStreamer>>,
) {
  if !config.is_changed() {
    return;
  }
  if streamer.is_some_and(|s| *s.config() == config.streamer) {
    return;
  }
  commands.queue(InitChunkStreamer::new(config.streamer.clone()));
}
