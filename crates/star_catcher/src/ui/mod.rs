mod screens;

use bevy::prelude::*;
use catcher_helpers::cleanup::despawn_marked;
use catcher_helpers::screen::send_button_events;
use screens::ScreenRoot;

use crate::assets::AssetState;
use crate::scene::{SceneEvent, SceneFlowSet, Screen};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Menu), screens::spawn_menu)
            .add_systems(OnEnter(Screen::GameOver), screens::spawn_game_over)
            .add_systems(
                OnEnter(Screen::Congratulations),
                screens::spawn_congratulations,
            )
            .add_systems(OnExit(Screen::Menu), despawn_marked::<ScreenRoot>)
            .add_systems(OnExit(Screen::GameOver), despawn_marked::<ScreenRoot>)
            .add_systems(
                OnExit(Screen::Congratulations),
                despawn_marked::<ScreenRoot>,
            )
            // Levels need their assets, so buttons wait for loading to finish
            .add_systems(
                Update,
                send_button_events::<SceneEvent>
                    .before(SceneFlowSet)
                    .run_if(in_state(AssetState::Loaded)),
            );
    }
}
