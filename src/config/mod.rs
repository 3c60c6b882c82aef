mod plugin;

use bevy::{asset::Asset, prelude::*, reflect::TypePath};
use chunk_streamer::StreamerConfig;
pub use plugin::ConfigPlugin;
use serde::Deserialize;

/// Path of the demo configuration, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/config/terrain.config.toml";

#[derive(Asset, TypePath, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DemoConfig {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub player: PlayerConfig,
  pub streamer: StreamerConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WindowConfig {
  pub width: u32,
  pub height: u32,
  pub title: String,
}

impl Default for WindowConfig {
  fn default() -> Self {
    Self {
      width: 1280,
      height: 720,
      title: "Endless Terrain".to_string(),
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct CameraConfig {
  /// Camera position relative to the player.
  pub offset: [f32; 3],
}

impl Default for CameraConfig {
  fn default() -> Self {
    Self {
      offset: [0.0, 40.0, 60.0],
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PlayerConfig {
  /// Walk speed in world units per second.
  pub speed: f32,
  /// Distance covered by the teleport key, along +X.
  pub teleport_distance: f32,
}

impl Default for PlayerConfig {
  fn default() -> Self {
    Self {
      speed: 30.0,
      teleport_distance: 1000.0,
    }
  }
}

#[derive(Resource)]
pub struct ConfigHandle(pub Handle<DemoConfig>);

#[derive(Resource, Debug, Clone)]
pub struct ConfigLoaded {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub player: PlayerConfig,
  pub streamer: StreamerConfig,
}

impl From<DemoConfig> for ConfigLoaded {
  fn from(config: DemoConfig) -> Self {
    Self {
      window: config.window,
      camera: config.camera,
      player: config.player,
      streamer: config.streamer,
    }
  }
}

/// Parses the demo configuration, falling back to defaults on any error.
pub fn parse_or_default(source: Result<String, std::io::Error>) -> DemoConfig {
  let source = match source {
    Ok(source) => source,
    Err(e) => {
      warn!("Failed to read {CONFIG_PATH}: {e}. Using defaults.");
      return DemoConfig::default();
    }
  };

  match toml::from_str(&source) {
    Ok(config) => config,
    Err(e) => {
      warn!("Failed to parse {CONFIG_PATH}: {e}. Using defaults.");
      DemoConfig::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bundled_config_parses() {
    let config: DemoConfig =
      toml::from_str(include_str!("../../assets/config/terrain.config.toml")).unwrap();
    assert!(config.streamer.validate().is_ok());
    assert!(config.player.speed > 0.0);
  }

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let config = parse_or_default(Err(err));
    assert_eq!(config.streamer, StreamerConfig::default());
    assert_eq!(config.window.title, "Endless Terrain");
  }

  #[test]
  fn malformed_file_falls_back_to_defaults() {
    let config = parse_or_default(Ok("[streamer]\nchunk_size = \"wide\"".to_string()));
    assert_eq!(config.streamer, StreamerConfig::default());
  }

  #[test]
  fn partial_file_keeps_other_defaults() {
    let config = parse_or_default(Ok("[streamer]\nview_radius = 2".to_string()));
    assert_eq!(config.streamer.view_radius, 2);
    assert_eq!(config.player.speed, 30.0);
  }
}
