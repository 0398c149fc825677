use bevy::prelude::*;

pub const GAME_TITLE: &str = "Star Catcher";

/// Pixels per second squared, pulling down.
pub const GRAVITY: f32 = 500.0;

pub const PLAYER_COLLIDER: Vec2 = Vec2::new(20.0, 30.0);
pub const COIN_FRAME_SIZE: f32 = 16.0;
pub const COIN_SCALE: f32 = 2.0;
pub const BOMB_SCALE: f32 = 0.1;
/// Bomb collider in world units, already scaled.
pub const BOMB_COLLIDER: Vec2 = Vec2::new(24.0, 24.0);
pub const BOUNDS_THICKNESS: f32 = 40.0;

pub const HUD_FONT_SIZE: f32 = 30.0;
pub const MENU_BACKGROUND: u32 = 0x87_CE_EB;
pub const MUSIC_VOLUME: f64 = 0.5;
pub const JUMP_VOLUME: f64 = 0.5;

/// Speeds are in units per second.
#[derive(Reflect, Resource, Debug, Clone)]
#[reflect(Resource)]
pub struct PlayerSettings {
    /// Level space, origin top-left.
    pub spawn_position: Vec2,
    pub run_speed: f32,
    pub jump_speed: f32,
    pub initial_scale: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            spawn_position: Vec2::new(100.0, 450.0),
            run_speed: 160.0,
            jump_speed: 330.0,
            initial_scale: crate::score::INITIAL_PLAYER_SCALE,
        }
    }
}
