use avian2d::prelude::*;
use bevy::prelude::*;

use crate::config;
use crate::gameplay::{Bomb, CoinPickup};
use crate::player::{Player, PlayerDisabled};
use crate::session::Overlap;

#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    Player,
    Platform,
    Bounds,
    /// The solid coin body that rests on platforms.
    Coin,
    /// The sensor around the coin the player collects.
    Pickup,
    Bomb,
}

/// Player overlaps seen since the level session last ticked.
#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct OverlapQueue(pub Vec<Overlap>);

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Gravity(Vec2::new(0.0, -config::GRAVITY)))
            .init_resource::<OverlapQueue>()
            .add_plugins(PhysicsPlugins::default());
    }
}

pub fn player_layers() -> CollisionLayers {
    CollisionLayers::new(
        GameLayer::Player,
        [
            GameLayer::Platform,
            GameLayer::Bounds,
            GameLayer::Pickup,
            GameLayer::Bomb,
        ],
    )
}

pub fn platform_layers() -> CollisionLayers {
    CollisionLayers::new(
        GameLayer::Platform,
        [GameLayer::Player, GameLayer::Coin],
    )
}

pub fn bounds_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Bounds, [GameLayer::Player, GameLayer::Coin])
}

pub fn coin_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Coin, [GameLayer::Platform, GameLayer::Bounds])
}

pub fn pickup_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Pickup, GameLayer::Player)
}

// Bombs ignore platforms and walls, only the player matters
pub fn bomb_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Bomb, GameLayer::Player)
}

/// Turns the physics engine's collision starts into player overlaps.
pub fn collect_overlaps(
    mut collisions: EventReader<CollisionStarted>,
    players: Query<(), (With<Player>, Without<PlayerDisabled>)>,
    pickups: Query<(), With<CoinPickup>>,
    bombs: Query<&Bomb>,
    mut queue: ResMut<OverlapQueue>,
) {
    for &CollisionStarted(first, second) in collisions.read() {
        let other = if players.contains(first) {
            second
        } else if players.contains(second) {
            first
        } else {
            continue;
        };

        if pickups.contains(other) {
            queue.push(Overlap::Coin);
        } else if let Ok(bomb) = bombs.get(other) {
            queue.push(Overlap::Bomb(bomb.id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawner::BombId;

    fn overlap_app() -> App {
        let mut app = App::new();
        app.add_event::<CollisionStarted>()
            .init_resource::<OverlapQueue>()
            .add_systems(Update, collect_overlaps);
        app
    }

    #[test]
    fn player_overlaps_are_queued_in_order() {
        let mut app = overlap_app();
        let player = app.world_mut().spawn(Player).id();
        let pickup = app.world_mut().spawn(CoinPickup).id();
        let bomb = app.world_mut().spawn(Bomb { id: BombId(3) }).id();

        app.world_mut()
            .send_event(CollisionStarted(pickup, player));
        app.world_mut()
            .send_event(CollisionStarted(player, bomb));
        app.update();

        assert_eq!(
            app.world().resource::<OverlapQueue>().0,
            vec![Overlap::Coin, Overlap::Bomb(BombId(3))],
            "either collision order is recognised"
        );
    }

    #[test]
    fn collisions_without_the_player_are_ignored() {
        let mut app = overlap_app();
        let pickup = app.world_mut().spawn(CoinPickup).id();
        let bomb = app.world_mut().spawn(Bomb { id: BombId(0) }).id();
        let platform = app.world_mut().spawn_empty().id();

        app.world_mut()
            .send_event(CollisionStarted(pickup, bomb));
        app.world_mut()
            .send_event(CollisionStarted(bomb, platform));
        app.update();

        assert!(
            app.world().resource::<OverlapQueue>().is_empty(),
            "nothing queued"
        );
    }

    #[test]
    fn disabled_player_collects_nothing() {
        let mut app = overlap_app();
        let player = app.world_mut().spawn((Player, PlayerDisabled)).id();
        let pickup = app.world_mut().spawn(CoinPickup).id();

        app.world_mut()
            .send_event(CollisionStarted(player, pickup));
        app.update();

        assert!(
            app.world().resource::<OverlapQueue>().is_empty(),
            "nothing queued"
        );
    }
}
