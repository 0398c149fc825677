mod animation;
mod assets;
mod audio;
mod config;
mod gameplay;
mod physics;
mod player;
mod ui;

pub mod level;
pub mod scene;
pub mod score;
pub mod session;
pub mod spawner;

use bevy::prelude::*;

pub fn run() -> AppExit {
    catcher_helpers::get_default_app(config::GAME_TITLE)
        .add_plugins(assets::AssetsPlugin)
        .add_plugins(physics::PhysicsPlugin)
        .add_plugins(scene::SceneFlowPlugin)
        .add_plugins(gameplay::LevelScenePlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(ui::UiPlugin)
        .add_plugins(audio::GameAudioPlugin)
        .add_systems(Startup, spawn_camera)
        .run()
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((Name::new("Camera"), Camera2d));
}
