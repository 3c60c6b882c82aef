//! Streamer configuration.
//!
//! Configuration is plain data loaded from TOML. Every field has a default,
//! so an empty document is a valid configuration:
//!
//! ```toml
//! chunk_size = 20.0
//! view_radius = 5
//! reevaluate_interval = 0.5
//! color = "#4d8c4d"
//!
//! [height]
//! enabled = true
//! amplitude = 2.0
//! seed = 42
//! ```

use std::path::Path;
use std::sync::Arc;
use std::{fmt, io};

use serde::{Deserialize, Deserializer, de};

use crate::coords::{
  DEFAULT_CHUNK_SIZE, DEFAULT_REEVALUATE_INTERVAL, DEFAULT_VIEW_RADIUS, MAX_VIEW_RADIUS,
};
use crate::height::{FlatHeight, HashedHeight, HeightSource};

/// Default colour of the built-in chunk template.
pub const DEFAULT_CHUNK_COLOR: [f32; 3] = [0.30, 0.55, 0.30];

/// Default maximum height offset when height variation is enabled.
pub const DEFAULT_HEIGHT_AMPLITUDE: f32 = 2.0;

/// Configuration for a [`ChunkStreamer`](crate::ChunkStreamer).
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StreamerConfig {
  /// Chunk edge length in world units. Must be finite and positive.
  pub chunk_size: f32,
  /// Number of chunks kept around the reference chunk in each direction.
  pub view_radius: i32,
  /// Minimum seconds between streaming evaluations.
  pub reevaluate_interval: f32,
  /// Upper bound on pooled chunks. `None` keeps every recycled chunk.
  pub max_pooled: Option<usize>,
  /// sRGB colour of the built-in chunk template.
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub color: [f32; 3],
  /// Per-chunk height variation.
  pub height: HeightConfig,
}

impl Default for StreamerConfig {
  fn default() -> Self {
    Self {
      chunk_size: DEFAULT_CHUNK_SIZE,
      view_radius: DEFAULT_VIEW_RADIUS,
      reevaluate_interval: DEFAULT_REEVALUATE_INTERVAL,
      max_pooled: None,
      color: DEFAULT_CHUNK_COLOR,
      height: HeightConfig::default(),
    }
  }
}

/// Height variation settings.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HeightConfig {
  /// Whether chunks get a per-coordinate height offset.
  pub enabled: bool,
  /// Maximum absolute height offset.
  pub amplitude: f32,
  /// Hash seed. When unset, a random seed is drawn per streamer.
  pub seed: Option<u64>,
}

impl Default for HeightConfig {
  fn default() -> Self {
    Self {
      enabled: false,
      amplitude: DEFAULT_HEIGHT_AMPLITUDE,
      seed: None,
    }
  }
}

impl StreamerConfig {
  /// Sets the chunk edge length.
  pub fn with_chunk_size(mut self, chunk_size: f32) -> Self {
    self.chunk_size = chunk_size;
    self
  }

  /// Sets the view radius in chunks.
  pub fn with_view_radius(mut self, view_radius: i32) -> Self {
    self.view_radius = view_radius;
    self
  }

  /// Sets the minimum seconds between evaluations.
  pub fn with_reevaluate_interval(mut self, seconds: f32) -> Self {
    self.reevaluate_interval = seconds;
    self
  }

  /// Caps the number of pooled chunks.
  pub fn with_max_pooled(mut self, max_pooled: usize) -> Self {
    self.max_pooled = Some(max_pooled);
    self
  }

  /// Enables hashed height variation.
  pub fn with_height_variation(mut self, amplitude: f32, seed: u64) -> Self {
    self.height = HeightConfig {
      enabled: true,
      amplitude,
      seed: Some(seed),
    };
    self
  }

  /// Parses and validates a TOML document.
  pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
    let config: Self = toml::from_str(source).map_err(ConfigError::Parse)?;
    config.validate()?;
    Ok(config)
  }

  /// Reads, parses and validates a TOML file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let source = std::fs::read_to_string(path)?;
    Self::from_toml_str(&source)
  }

  /// Rejects settings that would produce degenerate or unbounded grids.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if !self.chunk_size.is_finite() || self.chunk_size <= 0.0 {
      return Err(ConfigError::InvalidChunkSize(self.chunk_size));
    }
    if self.view_radius < 0 {
      return Err(ConfigError::NegativeViewRadius(self.view_radius));
    }
    if self.view_radius > MAX_VIEW_RADIUS {
      return Err(ConfigError::ViewRadiusTooLarge(self.view_radius));
    }
    if !self.reevaluate_interval.is_finite() || self.reevaluate_interval < 0.0 {
      return Err(ConfigError::InvalidInterval(self.reevaluate_interval));
    }
    if !self.height.amplitude.is_finite() || self.height.amplitude < 0.0 {
      return Err(ConfigError::InvalidAmplitude(self.height.amplitude));
    }
    if self.color.iter().any(|c| !(0.0..=1.0).contains(c)) {
      return Err(ConfigError::InvalidColor(self.color));
    }
    Ok(())
  }

  /// Number of chunks kept active around the reference: `(2r + 1)²`.
  pub fn required_count(&self) -> usize {
    let side = 2 * self.view_radius.max(0) as usize + 1;
    side * side
  }

  /// Builds the height source described by this configuration.
  pub fn height_source(&self) -> Arc<dyn HeightSource> {
    if self.height.enabled {
      let seed = self.height.seed.unwrap_or_else(rand::random);
      Arc::new(HashedHeight::new(seed, self.height.amplitude))
    } else {
      Arc::new(FlatHeight)
    }
  }
}

fn deserialize_hex_color<'de, D>(deserializer: D) -> Result<[f32; 3], D::Error>
where
  D: Deserializer<'de>,
{
  let s: String = Deserialize::deserialize(deserializer)?;
  let s = s.trim_start_matches('#');
  if s.len() != 6 || !s.is_ascii() {
    return Err(de::Error::custom("hex color must be 6 characters"));
  }
  let r = u8::from_str_radix(&s[0..2], 16).map_err(de::Error::custom)?;
  let g = u8::from_str_radix(&s[2..4], 16).map_err(de::Error::custom)?;
  let b = u8::from_str_radix(&s[4..6], 16).map_err(de::Error::custom)?;
  Ok([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
}

/// Error loading or validating a [`StreamerConfig`].
#[derive(Debug)]
pub enum ConfigError {
  /// Reading the configuration file failed.
  Io(io::Error),
  /// The document is not valid TOML for this schema.
  Parse(toml::de::Error),
  /// Chunk size is zero, negative, or not finite.
  InvalidChunkSize(f32),
  /// View radius is below zero.
  NegativeViewRadius(i32),
  /// View radius exceeds [`MAX_VIEW_RADIUS`].
  ViewRadiusTooLarge(i32),
  /// Re-evaluation interval is negative or not finite.
  InvalidInterval(f32),
  /// Height amplitude is negative or not finite.
  InvalidAmplitude(f32),
  /// A colour component lies outside `0..=1`.
  InvalidColor([f32; 3]),
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Io(e) => write!(f, "I/O error: {e}"),
      Self::Parse(e) => write!(f, "parse error: {e}"),
      Self::InvalidChunkSize(v) => write!(f, "chunk_size must be positive, got {v}"),
      Self::NegativeViewRadius(v) => write!(f, "view_radius must not be negative, got {v}"),
      Self::ViewRadiusTooLarge(v) => {
        write!(f, "view_radius must be at most {MAX_VIEW_RADIUS}, got {v}")
      }
      Self::InvalidInterval(v) => {
        write!(f, "reevaluate_interval must be zero or positive, got {v}")
      }
      Self::InvalidAmplitude(v) => {
        write!(f, "height.amplitude must be zero or positive, got {v}")
      }
      Self::InvalidColor(c) => write!(f, "color components must be in 0..=1, got {c:?}"),
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io(e) => Some(e),
      Self::Parse(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ConfigError {
  fn from(err: io::Error) -> Self {
    Self::Io(err)
  }
}
