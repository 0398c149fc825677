//! One attempt at one level.
//!
//! [`LevelSession`] owns the per-attempt state and turns elapsed time plus the
//! overlaps reported by physics into an ordered list of [`LevelEffect`]s. The
//! engine side applies the effects; the session never touches the world.

use core::time::Duration;

use bevy::prelude::*;

use crate::level::LevelConfig;
use crate::scene::SceneEvent;
use crate::score::ScoreTracker;
use crate::spawner::{BombId, BombSpawn, EntitySpawner};

/// Where the coin sits when a level starts, in level space.
pub const INITIAL_COIN_POSITION: Vec2 = Vec2::new(400.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Coin,
    Explosion,
    Jump,
}

/// An instruction for the engine, in the order it has to be applied.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum LevelEffect {
    StartMusic,
    StopMusic,
    Play(Cue),
    SetCoinText(String),
    /// Reactivate the coin at a level-space position with zero velocity.
    PlaceCoin(Vec2),
    DisableCoin,
    TintPlayer(Srgba),
    ScalePlayer(f32),
    SpawnBomb(BombSpawn),
    RemoveBomb(BombId),
    DisablePlayer,
}

/// A player overlap detected by physics since the last tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    Coin,
    Bomb(BombId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Playing,
    LevelComplete,
    PlayerHit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    Complete,
    PlayerHit,
}

impl From<LevelOutcome> for SceneEvent {
    fn from(outcome: LevelOutcome) -> Self {
        match outcome {
            LevelOutcome::Complete => Self::LevelComplete,
            LevelOutcome::PlayerHit => Self::PlayerHit,
        }
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct TickReport {
    pub effects: Vec<LevelEffect>,
    pub outcome: Option<LevelOutcome>,
}

#[derive(Resource, Debug)]
pub struct LevelSession {
    config: &'static LevelConfig,
    phase: SessionPhase,
    score: ScoreTracker,
    spawner: EntitySpawner,
}

impl LevelSession {
    pub fn new(config: &'static LevelConfig, rng: fastrand::Rng) -> Self {
        Self {
            config,
            phase: SessionPhase::Playing,
            score: ScoreTracker::default(),
            spawner: EntitySpawner::new(config.bomb_spawn_interval, rng),
        }
    }

    pub const fn config(&self) -> &'static LevelConfig {
        self.config
    }

    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub const fn score(&self) -> &ScoreTracker {
        &self.score
    }

    pub const fn spawner(&self) -> &EntitySpawner {
        &self.spawner
    }

    /// Effects that set the level up when it is entered.
    pub fn begin(&self) -> Vec<LevelEffect> {
        vec![
            LevelEffect::StartMusic,
            LevelEffect::SetCoinText(self.score.display_text()),
            LevelEffect::PlaceCoin(INITIAL_COIN_POSITION),
        ]
    }

    /// Resolves `overlaps` in order, then advances bomb expiry and spawning.
    ///
    /// Once the session reached a terminal phase every later tick is empty.
    pub fn tick(&mut self, delta: Duration, overlaps: &[Overlap]) -> TickReport {
        let mut report = TickReport::default();
        if self.phase != SessionPhase::Playing {
            return report;
        }

        // The coin is disabled as soon as it is collected, so it counts once per tick
        let mut coin_taken = false;
        for overlap in overlaps {
            match *overlap {
                Overlap::Coin if coin_taken => {}
                Overlap::Coin => {
                    coin_taken = true;
                    self.collect_coin(&mut report);
                }
                Overlap::Bomb(id) => self.hit_bomb(id, &mut report),
            }

            if report.outcome.is_some() {
                return report;
            }
        }

        for id in self.spawner.expire_bombs(delta) {
            report.effects.push(LevelEffect::RemoveBomb(id));
        }

        for bomb in self.spawner.tick_spawns(delta) {
            debug!("Spawning bomb {:?} at x = {}", bomb.id, bomb.position.x);
            report.effects.push(LevelEffect::SpawnBomb(bomb));
        }

        report
    }

    fn collect_coin(&mut self, report: &mut TickReport) {
        report.effects.push(LevelEffect::Play(Cue::Coin));
        report.effects.push(LevelEffect::DisableCoin);

        let progress = self.score.on_coin_collected();
        debug!(
            "{}: coin {} collected",
            self.config.id, progress.coins_collected
        );

        report.effects.push(LevelEffect::SetCoinText(progress.text));
        report.effects.push(LevelEffect::TintPlayer(progress.tint));
        if let Some(scale) = progress.scale {
            report.effects.push(LevelEffect::ScalePlayer(scale));
        }

        if progress.level_complete {
            report.effects.push(LevelEffect::StopMusic);
            self.finish(LevelOutcome::Complete, report);
        } else {
            let position = self.spawner.spawn_coin();
            report.effects.push(LevelEffect::PlaceCoin(position));
        }
    }

    fn hit_bomb(&mut self, id: BombId, report: &mut TickReport) {
        if !self.spawner.destroy_bomb(id) {
            debug!("Ignoring overlap with bomb {id:?}, it is already gone");
            return;
        }

        report.effects.extend([
            LevelEffect::StopMusic,
            LevelEffect::Play(Cue::Explosion),
            LevelEffect::RemoveBomb(id),
            LevelEffect::DisablePlayer,
        ]);
        self.finish(LevelOutcome::PlayerHit, report);
    }

    fn finish(&mut self, outcome: LevelOutcome, report: &mut TickReport) {
        self.phase = match outcome {
            LevelOutcome::Complete => SessionPhase::LevelComplete,
            LevelOutcome::PlayerHit => SessionPhase::PlayerHit,
        };
        self.spawner.cancel();
        report.outcome = Some(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelId;
    use crate::score::{INITIAL_PLAYER_SCALE, palette_color};
    use crate::spawner::BOMB_LIFETIME;

    const FRAME: Duration = Duration::from_millis(16);

    fn session(level: LevelId) -> LevelSession {
        LevelSession::new(level.config(), fastrand::Rng::with_seed(42))
    }

    fn spawned_bombs(report: &TickReport) -> Vec<BombSpawn> {
        report
            .effects
            .iter()
            .filter_map(|effect| match effect {
                LevelEffect::SpawnBomb(bomb) => Some(*bomb),
                _ => None,
            })
            .collect()
    }

    /// Ticks until the first bomb shows up.
    fn first_bomb(session: &mut LevelSession) -> BombSpawn {
        let interval = session.config().bomb_spawn_interval;
        let report = session.tick(interval, &[]);
        let bombs = spawned_bombs(&report);
        assert_eq!(bombs.len(), 1, "one bomb per interval");
        bombs[0]
    }

    #[test]
    fn entering_a_level_starts_music_and_places_the_coin() {
        let session = session(LevelId::Level1);
        assert_eq!(
            session.begin(),
            vec![
                LevelEffect::StartMusic,
                LevelEffect::SetCoinText("Coins Collected: 0".to_owned()),
                LevelEffect::PlaceCoin(Vec2::new(400.0, 0.0)),
            ],
            "entry effects"
        );
        assert_eq!(session.phase(), SessionPhase::Playing, "initial phase");
    }

    #[test]
    fn coin_effects_follow_the_collection_order() {
        let mut session = session(LevelId::Level1);
        let report = session.tick(FRAME, &[Overlap::Coin]);

        assert_eq!(report.outcome, None, "one coin does not finish the level");
        assert_eq!(
            &report.effects[..4],
            &[
                LevelEffect::Play(Cue::Coin),
                LevelEffect::DisableCoin,
                LevelEffect::SetCoinText("Coins Collected: 1".to_owned()),
                LevelEffect::TintPlayer(palette_color(1)),
            ],
            "sound, disable, text, tint"
        );
        assert!(
            matches!(report.effects[4], LevelEffect::PlaceCoin(_)),
            "coin respawns last, got {:?}",
            report.effects[4]
        );
    }

    #[test]
    fn respawned_coin_stays_inside_the_spawn_band() {
        let mut session = session(LevelId::Level2);
        for _ in 0..9 {
            let report = session.tick(FRAME, &[Overlap::Coin]);
            let position = report
                .effects
                .iter()
                .find_map(|effect| match effect {
                    LevelEffect::PlaceCoin(position) => Some(*position),
                    _ => None,
                })
                .expect("coin was not respawned");
            assert!((50.0..=750.0).contains(&position.x), "x = {}", position.x);
            assert!((0.0..=50.0).contains(&position.y), "y = {}", position.y);
        }
    }

    #[test]
    fn duplicate_coin_overlaps_in_one_tick_count_once() {
        let mut session = session(LevelId::Level1);
        session.tick(FRAME, &[Overlap::Coin, Overlap::Coin, Overlap::Coin]);
        assert_eq!(session.score().coins_collected(), 1, "single collection");
    }

    #[test]
    fn tenth_coin_completes_the_level_after_the_scale_bump() {
        let mut session = session(LevelId::Level1);
        for coins in 1..10 {
            let report = session.tick(FRAME, &[Overlap::Coin]);
            assert_eq!(report.outcome, None, "still playing after {coins} coins");
        }

        let report = session.tick(FRAME, &[Overlap::Coin]);
        assert_eq!(
            report.outcome,
            Some(LevelOutcome::Complete),
            "tenth coin completes"
        );
        assert_eq!(
            report.effects,
            vec![
                LevelEffect::Play(Cue::Coin),
                LevelEffect::DisableCoin,
                LevelEffect::SetCoinText("Coins Collected: 10".to_owned()),
                LevelEffect::TintPlayer(palette_color(10)),
                LevelEffect::ScalePlayer(session.score().player_scale()),
                LevelEffect::StopMusic,
            ],
            "no respawn once complete"
        );
        assert_eq!(session.phase(), SessionPhase::LevelComplete, "terminal");
        assert!(
            (session.score().player_scale() - INITIAL_PLAYER_SCALE - 0.2).abs() < 1e-5,
            "two scale bumps"
        );
    }

    #[test]
    fn fifth_coin_grows_the_player() {
        let mut session = session(LevelId::Level1);
        for _ in 0..4 {
            let report = session.tick(FRAME, &[Overlap::Coin]);
            assert!(
                !report
                    .effects
                    .iter()
                    .any(|effect| matches!(effect, LevelEffect::ScalePlayer(_))),
                "no growth before the fifth coin"
            );
        }

        let report = session.tick(FRAME, &[Overlap::Coin]);
        let scaled = report.effects.iter().find_map(|effect| match effect {
            LevelEffect::ScalePlayer(scale) => Some(*scale),
            _ => None,
        });
        assert!(
            scaled.is_some_and(|scale| (scale - 2.1).abs() < 1e-5),
            "grown to 2.1, got {scaled:?}"
        );
    }

    #[test]
    fn bomb_overlap_ends_the_attempt() {
        let mut session = session(LevelId::Level2);
        session.tick(FRAME, &[Overlap::Coin]);
        session.tick(FRAME, &[Overlap::Coin]);
        let bomb = first_bomb(&mut session);

        let report = session.tick(FRAME, &[Overlap::Bomb(bomb.id)]);

        assert_eq!(report.outcome, Some(LevelOutcome::PlayerHit), "player hit");
        assert_eq!(
            report.effects,
            vec![
                LevelEffect::StopMusic,
                LevelEffect::Play(Cue::Explosion),
                LevelEffect::RemoveBomb(bomb.id),
                LevelEffect::DisablePlayer,
            ],
            "hit effects"
        );
        assert_eq!(session.phase(), SessionPhase::PlayerHit, "terminal");
        assert_eq!(session.score().coins_collected(), 2, "score kept for the attempt");
    }

    #[test]
    fn overlaps_after_a_hit_in_the_same_tick_are_dropped() {
        let mut session = session(LevelId::Level1);
        let bomb = first_bomb(&mut session);

        let report = session.tick(FRAME, &[Overlap::Bomb(bomb.id), Overlap::Coin]);

        assert_eq!(report.outcome, Some(LevelOutcome::PlayerHit), "player hit");
        assert_eq!(session.score().coins_collected(), 0, "coin ignored");
    }

    #[test]
    fn overlap_with_an_expired_bomb_is_ignored() {
        let mut session = session(LevelId::Level1);
        let bomb = first_bomb(&mut session);
        session.tick(BOMB_LIFETIME, &[]);

        let report = session.tick(FRAME, &[Overlap::Bomb(bomb.id)]);
        assert_eq!(report.outcome, None, "stale bomb");
        assert_eq!(session.phase(), SessionPhase::Playing, "still playing");
    }

    #[test]
    fn bombs_spawn_at_the_level_interval() {
        for (level, interval_ms) in [
            (LevelId::Level1, 1500),
            (LevelId::Level2, 1000),
            (LevelId::Level3, 500),
        ] {
            let mut session = session(level);
            assert_eq!(
                session.spawner().bomb_spawn_interval(),
                Duration::from_millis(interval_ms),
                "{level} interval"
            );
            let early = session.tick(Duration::from_millis(interval_ms - 1), &[]);
            assert!(spawned_bombs(&early).is_empty(), "{level} early");
            let due = session.tick(Duration::from_millis(1), &[]);
            assert_eq!(spawned_bombs(&due).len(), 1, "{level} due");
        }
    }

    #[test]
    fn bombs_do_not_block_coin_collection() {
        let mut session = session(LevelId::Level3);
        let report = session.tick(Duration::from_millis(2000), &[Overlap::Coin]);

        assert_eq!(session.score().coins_collected(), 1, "coin counted");
        assert_eq!(spawned_bombs(&report).len(), 4, "bombs kept spawning");
    }

    #[test]
    fn uncollided_bomb_is_removed_after_eight_seconds() {
        let mut session = session(LevelId::Level1);
        let bomb = first_bomb(&mut session);

        let report = session.tick(Duration::from_millis(7999), &[]);
        assert!(
            !report.effects.contains(&LevelEffect::RemoveBomb(bomb.id)),
            "alive at 7999ms"
        );

        let report = session.tick(Duration::from_millis(1), &[]);
        assert!(
            report.effects.contains(&LevelEffect::RemoveBomb(bomb.id)),
            "removed at 8000ms"
        );
    }

    #[test]
    fn finished_session_emits_nothing() {
        let mut session = session(LevelId::Level3);
        let bomb = first_bomb(&mut session);
        session.tick(FRAME, &[Overlap::Bomb(bomb.id)]);

        let report = session.tick(Duration::from_secs(30), &[Overlap::Coin]);
        assert_eq!(report, TickReport::default(), "no leaked timers");
        assert_eq!(session.spawner().live_bomb_count(), 0, "bombs forgotten");
    }

    #[test]
    fn fresh_session_starts_from_zero() {
        let mut first = session(LevelId::Level1);
        for _ in 0..3 {
            first.tick(FRAME, &[Overlap::Coin]);
        }

        let retry = session(LevelId::Level1);
        assert_eq!(retry.score().coins_collected(), 0, "coins reset");
        assert_eq!(retry.score().color_index(), 0, "tint reset");
    }

    #[test]
    fn outcomes_map_to_scene_events() {
        assert_eq!(
            SceneEvent::from(LevelOutcome::Complete),
            SceneEvent::LevelComplete,
            "complete"
        );
        assert_eq!(
            SceneEvent::from(LevelOutcome::PlayerHit),
            SceneEvent::PlayerHit,
            "hit"
        );
    }
}
