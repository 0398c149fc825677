use bevy::prelude::*;

use crate::level::hex_color;

/// Collecting this many coins completes a level.
pub const COINS_TO_COMPLETE: u32 = 10;
/// The player grows every time the count reaches a multiple of this.
pub const SCALE_BUMP_EVERY: u32 = 5;
pub const SCALE_BUMP: f32 = 0.1;
pub const INITIAL_PLAYER_SCALE: f32 = 2.0;

/// Red, orange, yellow, green, blue, indigo, violet.
pub const TINT_PALETTE: [u32; 7] = [
    0xFF_00_00, 0xFF_A5_00, 0xFF_FF_00, 0x00_FF_00, 0x00_00_FF, 0x4B_00_82, 0xEE_82_EE,
];

pub fn palette_color(index: usize) -> Srgba {
    hex_color(TINT_PALETTE[index % TINT_PALETTE.len()])
}

pub fn coin_counter_text(coins: u32) -> String {
    format!("Coins Collected: {coins}")
}

/// What a single coin collection changed.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinProgress {
    pub coins_collected: u32,
    pub text: String,
    pub tint: Srgba,
    /// New absolute player scale, only when this collection grew the player.
    pub scale: Option<f32>,
    pub level_complete: bool,
}

/// Per-attempt coin count and the cosmetic progression derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    coins_collected: u32,
    color_index: usize,
}

impl ScoreTracker {
    pub const fn coins_collected(&self) -> u32 {
        self.coins_collected
    }

    pub const fn color_index(&self) -> usize {
        self.color_index
    }

    pub fn display_text(&self) -> String {
        coin_counter_text(self.coins_collected)
    }

    // Derived from the count rather than accumulated to keep float error out
    pub fn player_scale(&self) -> f32 {
        (self.coins_collected / SCALE_BUMP_EVERY) as f32 * SCALE_BUMP + INITIAL_PLAYER_SCALE
    }

    pub fn on_coin_collected(&mut self) -> CoinProgress {
        self.coins_collected += 1;
        self.color_index = (self.color_index + 1) % TINT_PALETTE.len();

        let scale =
            (self.coins_collected % SCALE_BUMP_EVERY == 0).then(|| self.player_scale());

        CoinProgress {
            coins_collected: self.coins_collected,
            text: self.display_text(),
            tint: palette_color(self.color_index),
            scale,
            level_complete: self.coins_collected == COINS_TO_COMPLETE,
        }
    }
}
