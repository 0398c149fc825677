use bevy::color::palettes::css::{LIME, RED};
use bevy::prelude::*;
use catcher_helpers::screen::{BUTTON_FONT_SIZE, TITLE_FONT_SIZE, spawn_button, spawn_label, spawn_screen};

use crate::config::MENU_BACKGROUND;
use crate::level::hex_color;
use crate::scene::SceneEvent;

/// Root of whichever full-window screen is showing.
#[derive(Component, Default)]
pub struct ScreenRoot;

pub fn spawn_menu(mut commands: Commands) {
    spawn_screen(
        &mut commands,
        Color::Srgba(hex_color(MENU_BACKGROUND)),
        ScreenRoot,
    )
    .with_children(|parent| {
        spawn_label(parent, "STAR CATCHER", TITLE_FONT_SIZE, Color::WHITE);
        spawn_button(parent, "START GAME", SceneEvent::Start);
    });
}

pub fn spawn_game_over(mut commands: Commands) {
    spawn_screen(&mut commands, Color::BLACK, ScreenRoot).with_children(|parent| {
        spawn_label(parent, "GAME OVER", TITLE_FONT_SIZE, Color::Srgba(RED));
        spawn_button(parent, "RETRY LEVEL", SceneEvent::Retry);
        spawn_button(parent, "MAIN MENU", SceneEvent::MainMenu);
    });
}

pub fn spawn_congratulations(mut commands: Commands) {
    spawn_screen(&mut commands, Color::BLACK, ScreenRoot).with_children(|parent| {
        spawn_label(parent, "CONGRATULATIONS!", TITLE_FONT_SIZE, Color::Srgba(LIME));
        spawn_label(
            parent,
            "You completed all 3 levels!",
            BUTTON_FONT_SIZE,
            Color::WHITE,
        );
        spawn_button(parent, "RETRY", SceneEvent::Retry);
        spawn_button(parent, "MAIN MENU", SceneEvent::MainMenu);
    });
}
