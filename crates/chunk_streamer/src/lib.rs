//! Chunk Streamer - Endless terrain streaming plugin for Bevy.
//!
//! Keeps a square of fixed-size ground chunks active around a moving
//! reference point. Chunks that leave the view are parked in a pool and
//! recycled for chunks entering it, so the number of live instances stays
//! bounded regardless of how far the reference travels.
//!
//! The streaming core ([`ChunkStreamer`]) is plain data driven by
//! [`ChunkStreamer::tick`]; [`ChunkStreamerPlugin`] wires it into an app.

pub mod config;
pub mod coords;
pub mod hash;
pub mod height;
pub mod plugin;
pub mod streaming;

pub use config::{ConfigError, HeightConfig, StreamerConfig};
pub use coords::{
  ChunkGrid, ChunkPos, DEFAULT_CHUNK_SIZE, DEFAULT_REEVALUATE_INTERVAL, DEFAULT_VIEW_RADIUS,
  MAX_CHUNK_COORD, MAX_VIEW_RADIUS,
};
pub use height::{FlatHeight, HashedHeight, HeightSource};
pub use plugin::{
  ChunkEntities, ChunkStreamerPlugin, ChunkStreamingSet, ChunkVisuals, InitChunkStreamer,
  StreamerRequest, StreamingTarget, TerrainChunk,
};
pub use streaming::{
  Chunk, ChunkId, ChunkPlacement, ChunkPool, ChunkStreamer, StreamingDelta, required_positions,
};
