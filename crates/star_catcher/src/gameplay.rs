use avian2d::prelude::*;
use bevy::prelude::*;
use catcher_helpers::cleanup::despawn_marked;
use catcher_helpers::{WINDOW_HEIGHT, WINDOW_WIDTH, level_to_world, level_velocity_to_world};
use strum::IntoEnumIterator;

use crate::animation::{FrameAnimation, SpriteClip, animate_sprites};
use crate::assets::GameAssets;
use crate::audio::SoundEvent;
use crate::config::{
    BOMB_COLLIDER, BOMB_SCALE, BOUNDS_THICKNESS, COIN_FRAME_SIZE, COIN_SCALE, HUD_FONT_SIZE,
    PlayerSettings,
};
use crate::level::{LevelId, PLATFORM_HEIGHT, platform_color};
use crate::physics::{
    OverlapQueue, bomb_layers, bounds_layers, coin_layers, collect_overlaps, pickup_layers,
    platform_layers,
};
use crate::player::spawn_player;
use crate::scene::{InLevel, SceneEvent, SceneFlowSet, SceneId};
use crate::session::{INITIAL_COIN_POSITION, LevelEffect, LevelSession};
use crate::spawner::{BombId, BombSpawn};

const BACKGROUND_Z: f32 = 0.0;
const PLATFORM_Z: f32 = 0.5;
const COIN_Z: f32 = 1.0;
const BOMB_Z: f32 = 3.0;

/// Tags everything that belongs to the level being played.
#[derive(Component, Default)]
pub struct LevelEntity;

#[derive(Component)]
pub struct Platform;

#[derive(Component)]
pub struct Coin;

#[derive(Component)]
pub struct CoinPickup;

#[derive(Component, Debug)]
pub struct Bomb {
    pub id: BombId,
}

#[derive(Component)]
struct CoinCounterText;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelSystems {
    Advance,
    ApplyEffects,
}

pub struct LevelScenePlugin;

impl Plugin for LevelScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LevelEffect>()
            .configure_sets(
                Update,
                (LevelSystems::Advance, LevelSystems::ApplyEffects)
                    .chain()
                    .before(SceneFlowSet)
                    .run_if(in_state(InLevel)),
            )
            .add_systems(
                Update,
                (
                    (collect_overlaps, advance_session)
                        .chain()
                        .in_set(LevelSystems::Advance)
                        .run_if(resource_exists::<LevelSession>),
                    (
                        apply_coin_effects,
                        apply_bomb_effects,
                        update_coin_counter,
                        forward_sounds,
                    )
                        .in_set(LevelSystems::ApplyEffects),
                    animate_sprites.run_if(in_state(InLevel)),
                ),
            );

        for level in LevelId::iter() {
            app.add_systems(OnEnter(SceneId::Level(level)), enter_level)
                .add_systems(
                    OnExit(SceneId::Level(level)),
                    (exit_level, despawn_marked::<LevelEntity>),
                );
        }
    }
}

fn enter_level(
    mut commands: Commands,
    scene: Res<State<SceneId>>,
    assets: Res<GameAssets>,
    player_settings: Res<PlayerSettings>,
    mut effects: EventWriter<LevelEffect>,
) {
    let SceneId::Level(level) = *scene.get() else {
        return;
    };
    let config = level.config();

    commands.spawn((
        Name::new("Background"),
        LevelEntity,
        Sprite::from_color(
            config.background_color(),
            Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT),
        ),
        Transform::from_xyz(0.0, 0.0, BACKGROUND_Z),
    ));

    for platform in config.platforms {
        commands.spawn((
            Name::new("Platform"),
            Platform,
            LevelEntity,
            Sprite::from_color(platform_color(), platform.size()),
            Transform::from_translation(level_to_world(platform.center()).extend(PLATFORM_Z)),
            RigidBody::Static,
            Collider::rectangle(platform.width, PLATFORM_HEIGHT),
            Friction::new(0.0),
            platform_layers(),
        ));
    }

    spawn_bounds(&mut commands);
    spawn_player(&mut commands, &assets, &player_settings);
    spawn_coin(&mut commands, &assets);
    spawn_coin_counter(&mut commands);

    let session = LevelSession::new(config, fastrand::Rng::new());
    effects.send_batch(session.begin());
    commands.insert_resource(session);
    info!("{level} ready, bombs every {:?}", config.bomb_spawn_interval);
}

fn exit_level(
    mut commands: Commands,
    mut overlaps: ResMut<OverlapQueue>,
    mut sound_events: EventWriter<SoundEvent>,
) {
    commands.remove_resource::<LevelSession>();
    overlaps.clear();
    sound_events.send(SoundEvent::StopMusic);
}

// Walls around the visible area keep the player and coin on screen
fn spawn_bounds(commands: &mut Commands) {
    let half = BOUNDS_THICKNESS / 2.0;
    let walls = [
        (Vec2::new(-half, WINDOW_HEIGHT / 2.0), Vec2::new(BOUNDS_THICKNESS, WINDOW_HEIGHT)),
        (
            Vec2::new(WINDOW_WIDTH + half, WINDOW_HEIGHT / 2.0),
            Vec2::new(BOUNDS_THICKNESS, WINDOW_HEIGHT),
        ),
        (Vec2::new(WINDOW_WIDTH / 2.0, -half), Vec2::new(WINDOW_WIDTH, BOUNDS_THICKNESS)),
        (
            Vec2::new(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT + half),
            Vec2::new(WINDOW_WIDTH, BOUNDS_THICKNESS),
        ),
    ];

    for (center, size) in walls {
        commands.spawn((
            Name::new("Bounds"),
            LevelEntity,
            Transform::from_translation(level_to_world(center).extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            Friction::new(0.0),
            bounds_layers(),
        ));
    }
}

fn spawn_coin(commands: &mut Commands, assets: &GameAssets) {
    commands
        .spawn((
            Name::new("Coin"),
            Coin,
            LevelEntity,
            Sprite::from_atlas_image(
                assets.coin.clone(),
                TextureAtlas {
                    layout: assets.coin_layout.clone(),
                    index: SpriteClip::Spin.frames().0,
                },
            ),
            FrameAnimation::new(SpriteClip::Spin),
            Transform::from_translation(level_to_world(INITIAL_COIN_POSITION).extend(COIN_Z))
                .with_scale(Vec3::new(COIN_SCALE, COIN_SCALE, 1.0)),
            RigidBody::Dynamic,
            Collider::rectangle(COIN_FRAME_SIZE, COIN_FRAME_SIZE),
            LockedAxes::ROTATION_LOCKED,
            Restitution::new(0.0),
            coin_layers(),
        ))
        .with_children(|coin| {
            coin.spawn((
                CoinPickup,
                Transform::default(),
                Collider::rectangle(COIN_FRAME_SIZE, COIN_FRAME_SIZE),
                Sensor,
                pickup_layers(),
            ));
        });
}

fn spawn_bomb(commands: &mut Commands, assets: &GameAssets, bomb: &BombSpawn) {
    commands
        .spawn((
            Name::new("Bomb"),
            Bomb { id: bomb.id },
            LevelEntity,
            Transform::from_translation(level_to_world(bomb.position).extend(BOMB_Z)),
            Visibility::default(),
            RigidBody::Dynamic,
            Collider::rectangle(BOMB_COLLIDER.x, BOMB_COLLIDER.y),
            Sensor,
            Mass(1.0),
            LinearVelocity(level_velocity_to_world(bomb.velocity)),
            bomb_layers(),
        ))
        .with_children(|parent| {
            // Only the sprite is scaled, the collider is already in world units
            parent.spawn((
                Sprite::from_image(assets.bomb.clone()),
                Transform::from_scale(Vec3::new(BOMB_SCALE, BOMB_SCALE, 1.0)),
            ));
        });
}

fn spawn_coin_counter(commands: &mut Commands) {
    commands.spawn((
        Name::new("Coin counter"),
        LevelEntity,
        CoinCounterText,
        Text::new(""),
        TextFont {
            font_size: HUD_FONT_SIZE,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(WINDOW_WIDTH / 2.0),
            top: Val::Px(16.0),
            ..default()
        },
    ));
}

fn advance_session(
    time: Res<Time>,
    mut session: ResMut<LevelSession>,
    mut overlaps: ResMut<OverlapQueue>,
    mut effects: EventWriter<LevelEffect>,
    mut scene_events: EventWriter<SceneEvent>,
) {
    let overlaps = core::mem::take(&mut overlaps.0);
    let report = session.tick(time.delta(), &overlaps);
    effects.send_batch(report.effects);

    if let Some(outcome) = report.outcome {
        info!("{} finished: {outcome:?}", session.config().id);
        scene_events.send(outcome.into());
    }
}

fn apply_coin_effects(
    mut effects: EventReader<LevelEffect>,
    mut coin_query: Query<
        (
            &mut Position,
            &mut LinearVelocity,
            &mut RigidBody,
            &mut CollisionLayers,
            &mut Visibility,
        ),
        (With<Coin>, Without<CoinPickup>),
    >,
    mut pickup_query: Query<&mut CollisionLayers, (With<CoinPickup>, Without<Coin>)>,
) {
    for effect in effects.read() {
        let enabled = match effect {
            LevelEffect::PlaceCoin(_) => true,
            LevelEffect::DisableCoin => false,
            _ => continue,
        };

        for (mut position, mut velocity, mut body, mut layers, mut visibility) in &mut coin_query
        {
            if let LevelEffect::PlaceCoin(target) = effect {
                position.0 = level_to_world(*target);
                *velocity = LinearVelocity::ZERO;
            }
            *body = if enabled {
                RigidBody::Dynamic
            } else {
                RigidBody::Static
            };
            *layers = if enabled {
                coin_layers()
            } else {
                CollisionLayers::NONE
            };
            *visibility = if enabled {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }

        for mut layers in &mut pickup_query {
            *layers = if enabled {
                pickup_layers()
            } else {
                CollisionLayers::NONE
            };
        }
    }
}

fn apply_bomb_effects(
    mut commands: Commands,
    mut effects: EventReader<LevelEffect>,
    assets: Res<GameAssets>,
    bomb_query: Query<(Entity, &Bomb)>,
) {
    for effect in effects.read() {
        match effect {
            LevelEffect::SpawnBomb(bomb) => spawn_bomb(&mut commands, &assets, bomb),
            LevelEffect::RemoveBomb(id) => {
                for (entity, bomb) in &bomb_query {
                    if bomb.id == *id {
                        commands.entity(entity).despawn_recursive();
                    }
                }
            }
            _ => {}
        }
    }
}

fn update_coin_counter(
    mut effects: EventReader<LevelEffect>,
    mut text_query: Query<&mut Text, With<CoinCounterText>>,
) {
    for effect in effects.read() {
        if let LevelEffect::SetCoinText(counter) = effect {
            for mut text in &mut text_query {
                text.0.clone_from(counter);
            }
        }
    }
}

fn forward_sounds(
    mut effects: EventReader<LevelEffect>,
    mut sound_events: EventWriter<SoundEvent>,
) {
    for effect in effects.read() {
        let sound = match effect {
            LevelEffect::StartMusic => SoundEvent::StartMusic,
            LevelEffect::StopMusic => SoundEvent::StopMusic,
            LevelEffect::Play(cue) => SoundEvent::Play(*cue),
            _ => continue,
        };
        sound_events.send(sound);
    }
}
