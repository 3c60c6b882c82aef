use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::actions::{
  ClearTerrain, GrowView, Move, PlayerInput, RefreshTerrain, ShrinkView, TeleportAhead,
};

pub fn player_input_actions() -> impl Bundle {
  actions!(PlayerInput[
      (
          Action::<Move>::new(),
          Bindings::spawn((
              Cardinal::wasd_keys(),
              Cardinal::arrows(),
          )),
      ),
      (
          Action::<RefreshTerrain>::new(),
          bindings![KeyCode::KeyR],
      ),
      (
          Action::<ClearTerrain>::new(),
          bindings![KeyCode::KeyC],
      ),
      (
          Action::<TeleportAhead>::new(),
          bindings![KeyCode::KeyT],
      ),
      (
          Action::<GrowView>::new(),
          bindings![KeyCode::Equal, KeyCode::NumpadAdd],
      ),
      (
          Action::<ShrinkView>::new(),
          bindings![KeyCode::Minus, KeyCode::NumpadSubtract],
      ),
  ])
}
