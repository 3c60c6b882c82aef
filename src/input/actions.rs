use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

#[derive(Component)]
pub struct PlayerInput;

/// Planar movement: x = right, y = forward.
#[derive(Debug, InputAction)]
#[action_output(Vec2)]
pub struct Move;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct RefreshTerrain;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct ClearTerrain;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct TeleportAhead;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct GrowView;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct ShrinkView;
