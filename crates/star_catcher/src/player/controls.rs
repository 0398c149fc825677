use avian2d::prelude::*;
use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::animation::{FrameAnimation, SpriteClip};
use crate::audio::SoundEvent;
use crate::config::{PLAYER_COLLIDER, PlayerSettings};
use crate::gameplay::Platform;
use crate::level::PLATFORM_HEIGHT;
use crate::player::inputs::Action;
use crate::player::{Player, PlayerDisabled};
use crate::session::Cue;

/// Vertical speed below which a player on top of a platform counts as standing.
const GROUNDED_SPEED: f32 = 5.0;
/// How deep the player's feet may sink into a platform top while resting on it.
const FOOT_TOLERANCE: f32 = 4.0;

/// Left wins when both directions are held.
pub fn run_direction(left: bool, right: bool) -> f32 {
    if left {
        -1.0
    } else if right {
        1.0
    } else {
        0.0
    }
}

/// True when the feet rest on the platform top, not on its side or underside.
pub fn stands_on(feet: f32, platform_center: f32) -> bool {
    feet >= platform_center + PLATFORM_HEIGHT / 2.0 - FOOT_TOLERANCE
}

pub fn is_grounded(on_platform: bool, vertical_speed: f32) -> bool {
    on_platform && vertical_speed.abs() < GROUNDED_SPEED
}

pub fn run(
    mut query: Query<
        (
            &ActionState<Action>,
            &mut LinearVelocity,
            &mut Sprite,
            &mut FrameAnimation,
        ),
        (With<Player>, Without<PlayerDisabled>),
    >,
    player_settings: Res<PlayerSettings>,
) {
    for (action_state, mut velocity, mut sprite, mut animation) in &mut query {
        let direction = run_direction(
            action_state.pressed(&Action::Left),
            action_state.pressed(&Action::Right),
        );
        velocity.x = direction * player_settings.run_speed;

        if direction.abs() < f32::EPSILON {
            animation.play(SpriteClip::Idle);
        } else {
            sprite.flip_x = direction < 0.0;
            animation.play(SpriteClip::Run);
        }
    }
}

pub fn jump(
    mut query: Query<
        (
            &ActionState<Action>,
            &CollidingEntities,
            &Position,
            &Transform,
            &mut LinearVelocity,
        ),
        (With<Player>, Without<PlayerDisabled>),
    >,
    platforms: Query<&Position, With<Platform>>,
    player_settings: Res<PlayerSettings>,
    mut sound_events: EventWriter<SoundEvent>,
) {
    for (action_state, colliding, position, transform, mut velocity) in &mut query {
        // The collider grows with the sprite
        let feet = position.y - PLAYER_COLLIDER.y / 2.0 * transform.scale.y;
        let on_platform = colliding
            .iter()
            .filter_map(|&entity| platforms.get(entity).ok())
            .any(|platform| stands_on(feet, platform.y));

        if action_state.pressed(&Action::Jump) && is_grounded(on_platform, velocity.y) {
            velocity.y = player_settings.jump_speed;
            sound_events.send(SoundEvent::Play(Cue::Jump));
        }
    }
}
