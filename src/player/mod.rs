pub mod components;
mod controls;
mod movement;
mod spawn;

use bevy::prelude::*;
use chunk_streamer::ChunkStreamingSet;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
  fn build(&self, app: &mut App) {
    app.add_systems(Startup, spawn::spawn_player).add_systems(
      Update,
      (
        movement::handle_movement_input,
        movement::ride_terrain,
        controls::handle_terrain_controls,
      )
        .chain()
        .before(ChunkStreamingSet),
    );
  }
}
