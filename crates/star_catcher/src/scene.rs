//! Application flow between the menu, the three levels and the end screens.

use bevy::prelude::*;
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::level::{LevelId, NextScene};

#[derive(States, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SceneId {
    #[default]
    Menu,
    Level(LevelId),
    /// Remembers which level to restart on retry.
    GameOver { return_to: LevelId },
    Congratulations,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    Start,
    LevelComplete,
    PlayerHit,
    Retry,
    MainMenu,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    #[error("no transition from {from:?} on {event:?}")]
    InvalidTransition { from: SceneId, event: SceneEvent },
}

/// The fixed transition table.
pub fn next_scene(current: SceneId, event: SceneEvent) -> Result<SceneId, SceneError> {
    let next = match (current, event) {
        (SceneId::Menu, SceneEvent::Start) => SceneId::Level(LevelId::Level1),
        (SceneId::Level(level), SceneEvent::LevelComplete) => match level.config().next {
            NextScene::Level(next) => SceneId::Level(next),
            NextScene::Congratulations => SceneId::Congratulations,
        },
        (SceneId::Level(level), SceneEvent::PlayerHit) => SceneId::GameOver { return_to: level },
        (SceneId::GameOver { return_to }, SceneEvent::Retry) => SceneId::Level(return_to),
        (SceneId::Congratulations, SceneEvent::Retry) => SceneId::Level(LevelId::Level1),
        (SceneId::GameOver { .. } | SceneId::Congratulations, SceneEvent::MainMenu) => {
            SceneId::Menu
        }
        (from, event) => return Err(SceneError::InvalidTransition { from, event }),
    };
    Ok(next)
}

/// Owns the current scene. The `SceneId` state follows it one frame later.
#[derive(Resource, Debug, Default)]
pub struct SceneGraph {
    current: SceneId,
}

impl SceneGraph {
    pub const fn current(&self) -> SceneId {
        self.current
    }

    /// Validates `event` against the current scene and moves to its target.
    /// A rejected event leaves the current scene untouched.
    pub fn transition(&mut self, event: SceneEvent) -> Result<SceneId, SceneError> {
        let next = next_scene(self.current, event)?;
        self.current = next;
        Ok(next)
    }
}

/// The non-level scenes, each backed by a full-window UI screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Menu,
    GameOver,
    Congratulations,
}

impl ComputedStates for Screen {
    type SourceStates = SceneId;

    fn compute(scene: SceneId) -> Option<Self> {
        match scene {
            SceneId::Menu => Some(Self::Menu),
            SceneId::GameOver { .. } => Some(Self::GameOver),
            SceneId::Congratulations => Some(Self::Congratulations),
            SceneId::Level(_) => None,
        }
    }
}

/// Present while any level is being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InLevel;

impl ComputedStates for InLevel {
    type SourceStates = SceneId;

    fn compute(scene: SceneId) -> Option<Self> {
        matches!(scene, SceneId::Level(_)).then_some(Self)
    }
}

/// Systems that turn [`SceneEvent`]s into state changes.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SceneFlowSet;

pub struct SceneFlowPlugin;

impl Plugin for SceneFlowPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<SceneId>()
            .add_computed_state::<Screen>()
            .add_computed_state::<InLevel>()
            .init_resource::<SceneGraph>()
            .add_event::<SceneEvent>()
            .add_systems(Update, apply_scene_events.in_set(SceneFlowSet));

        for level in LevelId::iter() {
            app.add_systems(OnEnter(SceneId::Level(level)), move || {
                info!("Entering {level}");
            })
            .add_systems(OnExit(SceneId::Level(level)), move || {
                info!("Leaving {level}");
            });
        }
    }
}

// Only the first accepted event of a frame counts, so a level cannot be both
// completed and lost at once
fn apply_scene_events(
    mut events: EventReader<SceneEvent>,
    mut graph: ResMut<SceneGraph>,
    mut next_state: ResMut<NextState<SceneId>>,
) {
    let mut applied = false;
    for &event in events.read() {
        if applied {
            debug!("Dropping {event:?}, a scene change is already pending");
            continue;
        }

        let from = graph.current();
        match graph.transition(event) {
            Ok(to) => {
                info!("Scene {from:?} -> {to:?} on {event:?}");
                next_state.set(to);
                applied = true;
            }
            Err(error) => warn!("{error}"),
        }
    }
}
