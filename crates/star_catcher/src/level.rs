use core::time::Duration;

use bevy::prelude::*;
use strum::{Display, EnumIter};

/// Every platform shares the same thickness; only position and width vary.
pub const PLATFORM_HEIGHT: f32 = 20.0;
const PLATFORM_COLOR: u32 = 0x22_8B_22;

/// Converts a `0xRRGGBB` literal into a color.
pub fn hex_color(hex: u32) -> Srgba {
    Srgba::rgb_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

pub fn platform_color() -> Color {
    Color::Srgba(hex_color(PLATFORM_COLOR))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum LevelId {
    #[default]
    Level1,
    Level2,
    Level3,
}

impl LevelId {
    pub fn config(self) -> &'static LevelConfig {
        match self {
            Self::Level1 => &LEVEL_1,
            Self::Level2 => &LEVEL_2,
            Self::Level3 => &LEVEL_3,
        }
    }
}

/// Where a level leads once all of its coins are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextScene {
    Level(LevelId),
    Congratulations,
}

/// A static platform, centered on `(x, y)` in level space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformLayout {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

impl PlatformLayout {
    const fn new(x: f32, y: f32, width: f32) -> Self {
        Self { x, y, width }
    }

    pub const fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub const fn size(&self) -> Vec2 {
        Vec2::new(self.width, PLATFORM_HEIGHT)
    }
}

/// Immutable description of one level.
#[derive(Debug)]
pub struct LevelConfig {
    pub id: LevelId,
    /// `0xRRGGBB`
    pub background: u32,
    pub platforms: &'static [PlatformLayout],
    pub bomb_spawn_interval: Duration,
    pub next: NextScene,
}

impl LevelConfig {
    pub fn background_color(&self) -> Color {
        Color::Srgba(hex_color(self.background))
    }
}

static LEVEL_1: LevelConfig = LevelConfig {
    id: LevelId::Level1,
    background: 0xFF_6B_6B,
    platforms: &[
        PlatformLayout::new(400.0, 590.0, 800.0),
        PlatformLayout::new(700.0, 375.0, 120.0),
        PlatformLayout::new(400.0, 450.0, 120.0),
        PlatformLayout::new(175.0, 500.0, 100.0),
        PlatformLayout::new(600.0, 500.0, 100.0),
        PlatformLayout::new(50.0, 400.0, 100.0),
    ],
    bomb_spawn_interval: Duration::from_millis(1500),
    next: NextScene::Level(LevelId::Level2),
};

static LEVEL_2: LevelConfig = LevelConfig {
    id: LevelId::Level2,
    background: 0xFC_E3_8A,
    platforms: &[
        PlatformLayout::new(400.0, 590.0, 800.0),
        PlatformLayout::new(25.0, 500.0, 150.0),
        PlatformLayout::new(500.0, 400.0, 150.0),
        PlatformLayout::new(200.0, 450.0, 100.0),
        PlatformLayout::new(700.0, 375.0, 100.0),
        PlatformLayout::new(25.0, 350.0, 75.0),
        PlatformLayout::new(300.0, 300.0, 150.0),
        PlatformLayout::new(600.0, 500.0, 50.0),
    ],
    bomb_spawn_interval: Duration::from_millis(1000),
    next: NextScene::Level(LevelId::Level3),
};

static LEVEL_3: LevelConfig = LevelConfig {
    id: LevelId::Level3,
    background: 0x1A_1A_40,
    platforms: &[
        PlatformLayout::new(400.0, 590.0, 800.0),
        PlatformLayout::new(250.0, 500.0, 150.0),
        PlatformLayout::new(550.0, 400.0, 150.0),
        PlatformLayout::new(50.0, 450.0, 125.0),
        PlatformLayout::new(700.0, 350.0, 100.0),
        PlatformLayout::new(400.0, 300.0, 150.0),
        PlatformLayout::new(100.0, 350.0, 100.0),
    ],
    bomb_spawn_interval: Duration::from_millis(500),
    next: NextScene::Congratulations,
};
