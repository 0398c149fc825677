pub mod controls;
pub mod inputs;

use avian2d::prelude::*;
use bevy::prelude::*;
use catcher_helpers::level_to_world;
use leafwing_input_manager::prelude::*;

use crate::animation::{FrameAnimation, SpriteClip};
use crate::assets::GameAssets;
use crate::config::{PLAYER_COLLIDER, PlayerSettings};
use crate::gameplay::{LevelEntity, LevelSystems};
use crate::physics::player_layers;
use crate::scene::{InLevel, SceneFlowSet};
use crate::session::LevelEffect;

const PLAYER_Z: f32 = 2.0;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<inputs::Action>::default())
            .register_type::<PlayerSettings>()
            .insert_resource(PlayerSettings::default())
            .add_systems(
                Update,
                (
                    apply_player_effects.in_set(LevelSystems::ApplyEffects),
                    (controls::run, controls::jump)
                        .after(SceneFlowSet)
                        .run_if(in_state(InLevel)),
                ),
            );
    }
}

#[derive(Component, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// The player was hit: hidden, out of the physics world and deaf to input.
#[derive(Component, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerDisabled;

pub fn spawn_player(
    commands: &mut Commands,
    assets: &GameAssets,
    player_settings: &PlayerSettings,
) -> Entity {
    let scale = player_settings.initial_scale;
    commands
        .spawn((
            Name::new("Player"),
            Player,
            LevelEntity,
            Sprite::from_atlas_image(
                assets.knight.clone(),
                TextureAtlas {
                    layout: assets.knight_layout.clone(),
                    index: SpriteClip::Idle.frames().0,
                },
            ),
            FrameAnimation::new(SpriteClip::Idle),
            Transform::from_translation(
                level_to_world(player_settings.spawn_position).extend(PLAYER_Z),
            )
            .with_scale(Vec3::new(scale, scale, 1.0)),
            RigidBody::Dynamic,
            // Scales with the sprite, like the sprite's own frame
            Collider::rectangle(PLAYER_COLLIDER.x, PLAYER_COLLIDER.y),
            LockedAxes::ROTATION_LOCKED,
            Friction::new(0.0),
            Restitution::new(0.0),
            player_layers(),
            CollidingEntities::default(),
            InputManagerBundle::<inputs::Action> {
                input_map: inputs::create_input_map(),
                ..default()
            },
        ))
        .id()
}

fn apply_player_effects(
    mut commands: Commands,
    mut effects: EventReader<LevelEffect>,
    mut player_query: Query<(Entity, &mut Sprite, &mut Transform), With<Player>>,
) {
    for effect in effects.read() {
        for (player, mut sprite, mut transform) in &mut player_query {
            match effect {
                LevelEffect::TintPlayer(tint) => sprite.color = Color::Srgba(*tint),
                LevelEffect::ScalePlayer(scale) => {
                    transform.scale = Vec3::new(*scale, *scale, 1.0);
                }
                LevelEffect::DisablePlayer => {
                    commands.entity(player).insert((
                        PlayerDisabled,
                        Visibility::Hidden,
                        RigidBody::Static,
                        LinearVelocity::ZERO,
                        CollisionLayers::NONE,
                    ));
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::palette_color;

    fn effects_app() -> (App, Entity) {
        let mut app = App::new();
        app.add_event::<LevelEffect>()
            .add_systems(Update, apply_player_effects);
        let player = app
            .world_mut()
            .spawn((Player, Sprite::default(), Transform::default()))
            .id();
        (app, player)
    }

    #[test]
    fn tint_and_scale_reach_the_sprite() {
        let (mut app, player) = effects_app();
        app.world_mut()
            .send_event(LevelEffect::TintPlayer(palette_color(3)));
        app.world_mut().send_event(LevelEffect::ScalePlayer(2.1));
        app.update();

        let world = app.world();
        assert_eq!(
            world.get::<Sprite>(player).map(|sprite| sprite.color),
            Some(Color::Srgba(palette_color(3))),
            "tinted green"
        );
        assert_eq!(
            world.get::<Transform>(player).map(|transform| transform.scale),
            Some(Vec3::new(2.1, 2.1, 1.0)),
            "scaled"
        );
    }

    #[test]
    fn disabled_player_is_hidden() {
        let (mut app, player) = effects_app();
        app.world_mut().send_event(LevelEffect::DisablePlayer);
        app.update();

        let world = app.world();
        assert!(world.get::<PlayerDisabled>(player).is_some(), "marked");
        assert_eq!(
            world.get::<Visibility>(player),
            Some(&Visibility::Hidden),
            "hidden"
        );
    }

    #[test]
    fn unrelated_effects_leave_the_player_alone() {
        let (mut app, player) = effects_app();
        app.world_mut().send_event(LevelEffect::DisableCoin);
        app.update();

        assert!(
            app.world().get::<PlayerDisabled>(player).is_none(),
            "still enabled"
        );
    }
}
