//! Keys that drive the terrain streamer directly.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;
use chunk_streamer::{ChunkStreamer, StreamerRequest};

use super::components::{Player, PlayerMovementConfig};
use crate::input::{ClearTerrain, GrowView, RefreshTerrain, ShrinkView, TeleportAhead};

/// Tracks whether an action already fired during the current press.
#[derive(Default)]
pub struct PressLatch {
  fired_this_press: bool,
}

impl PressLatch {
  /// Returns true only on the first fired frame of a press.
  fn just_pressed<'a>(&mut self, states: impl IntoIterator<Item = &'a ActionState>) -> bool {
    let fired = states
      .into_iter()
      .any(|state| matches!(state, ActionState::Fired));
    if !fired {
      self.fired_this_press = false;
      return false;
    }
    !std::mem::replace(&mut self.fired_this_press, true)
  }
}

#[derive(Default)]
pub struct ControlLatches {
  refresh: PressLatch,
  clear: PressLatch,
  teleport: PressLatch,
  grow: PressLatch,
  shrink: PressLatch,
}

#[allow(clippy::too_many_arguments)]
pub fn handle_terrain_controls(
  refresh: Query<&ActionState, With<Action<RefreshTerrain>>>,
  clear: Query<&ActionState, With<Action<ClearTerrain>>>,
  teleport: Query<&ActionState, With<Action<TeleportAhead>>>,
  grow: Query<&ActionState, With<Action<GrowView>>>,
  shrink: Query<&ActionState, With<Action<ShrinkView>>>,
  mut players: Query<(&mut Transform, &mut GlobalTransform, &PlayerMovementConfig), With<Player>>,
  streamer: Option<Res<ChunkStreamer>>,
  mut requests: MessageWriter<StreamerRequest>,
  mut latches: Local<ControlLatches>,
) {
  if latches.refresh.just_pressed(&refresh) {
    info!("Forcing terrain refresh");
    requests.write(StreamerRequest::ForceRefresh);
  }

  if latches.clear.just_pressed(&clear) {
    requests.write(StreamerRequest::ClearAll);
  }

  if latches.teleport.just_pressed(&teleport)
    && let Ok((mut transform, mut global, config)) = players.single_mut()
  {
    transform.translation.x += config.teleport_distance;
    // The streamer reads GlobalTransform, which is otherwise only refreshed
    // in PostUpdate.
    *global = GlobalTransform::from(*transform);
    info!("Teleported player to {:?}", transform.translation);
    requests.write(StreamerRequest::Teleport(transform.translation));
  }

  let Some(streamer) = streamer else {
    return;
  };
  let radius = streamer.config().view_radius;
  if latches.grow.just_pressed(&grow) {
    requests.write(StreamerRequest::SetViewRadius(radius + 1));
  }
  if latches.shrink.just_pressed(&shrink) {
    requests.write(StreamerRequest::SetViewRadius(radius - 1));
  }
}
