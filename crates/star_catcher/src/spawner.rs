use core::ops::RangeInclusive;
use core::time::Duration;

use bevy::prelude::*;

/// Spawn ranges are in level space (origin top-left, y down), inclusive.
pub const COIN_SPAWN_X: RangeInclusive<i32> = 50..=750;
pub const COIN_SPAWN_Y: RangeInclusive<i32> = 0..=50;
pub const BOMB_SPAWN_X: RangeInclusive<i32> = 50..=750;
pub const BOMB_SPAWN_Y: f32 = 0.0;
/// Downward speed a bomb starts falling with, in units per second.
pub const BOMB_FALL_SPEED: f32 = 250.0;
pub const BOMB_LIFETIME: Duration = Duration::from_millis(8000);

/// Identifies a bomb within one level session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BombId(pub u32);

/// Everything the engine needs to create a bomb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BombSpawn {
    pub id: BombId,
    pub position: Vec2,
    /// Level space, positive y falls.
    pub velocity: Vec2,
}

#[derive(Debug)]
struct LiveBomb {
    id: BombId,
    lifetime: Timer,
}

/// Picks coin positions, creates bombs on a fixed period and expires them.
#[derive(Debug)]
pub struct EntitySpawner {
    rng: fastrand::Rng,
    spawn_timer: Timer,
    live_bombs: Vec<LiveBomb>,
    next_bomb_id: u32,
}

impl EntitySpawner {
    pub fn new(bomb_spawn_interval: Duration, rng: fastrand::Rng) -> Self {
        Self {
            rng,
            spawn_timer: Timer::new(bomb_spawn_interval, TimerMode::Repeating),
            live_bombs: Vec::new(),
            next_bomb_id: 0,
        }
    }

    pub fn bomb_spawn_interval(&self) -> Duration {
        self.spawn_timer.duration()
    }

    pub fn live_bomb_count(&self) -> usize {
        self.live_bombs.len()
    }

    pub fn is_live(&self, id: BombId) -> bool {
        self.live_bombs.iter().any(|bomb| bomb.id == id)
    }

    /// A new resting position for the single coin, above the playable platforms.
    pub fn spawn_coin(&mut self) -> Vec2 {
        let x = self.rng.i32(COIN_SPAWN_X);
        let y = self.rng.i32(COIN_SPAWN_Y);
        Vec2::new(x as f32, y as f32)
    }

    /// Creates a bomb at the top of the level and starts its lifetime.
    pub fn spawn_bomb(&mut self) -> BombSpawn {
        let id = BombId(self.next_bomb_id);
        self.next_bomb_id += 1;

        self.live_bombs.push(LiveBomb {
            id,
            lifetime: Timer::new(BOMB_LIFETIME, TimerMode::Once),
        });

        BombSpawn {
            id,
            position: Vec2::new(self.rng.i32(BOMB_SPAWN_X) as f32, BOMB_SPAWN_Y),
            velocity: Vec2::new(0.0, BOMB_FALL_SPEED),
        }
    }

    /// Advances the spawn timer, creating one bomb per elapsed period.
    pub fn tick_spawns(&mut self, delta: Duration) -> Vec<BombSpawn> {
        self.spawn_timer.tick(delta);
        (0..self.spawn_timer.times_finished_this_tick())
            .map(|_| self.spawn_bomb())
            .collect()
    }

    /// Advances every bomb's lifetime and forgets the ones that ran out.
    pub fn expire_bombs(&mut self, delta: Duration) -> Vec<BombId> {
        let mut expired = Vec::new();
        self.live_bombs.retain_mut(|bomb| {
            if bomb.lifetime.tick(delta).finished() {
                expired.push(bomb.id);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Forgets a bomb destroyed by a collision. Returns false for unknown or
    /// already expired bombs.
    pub fn destroy_bomb(&mut self, id: BombId) -> bool {
        let before = self.live_bombs.len();
        self.live_bombs.retain(|bomb| bomb.id != id);
        self.live_bombs.len() != before
    }

    /// Drops every pending timer; nothing spawns or expires afterwards.
    pub fn cancel(&mut self) {
        self.live_bombs.clear();
        self.spawn_timer.pause();
    }
}
