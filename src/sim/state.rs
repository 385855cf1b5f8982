//! World state and core simulation types
//!
//! One `GameState` holds everything a single run needs. It is mutated only by
//! the spawner, the combat resolver and the ledger.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::ledger::{Ledger, Upgrades};
use crate::consts::*;
use crate::tuning::Tuning;

/// The static point the player defends
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hive {
    pub pos: Vec2,
    pub radius: f32,
}

impl Default for Hive {
    fn default() -> Self {
        Self {
            pos: Vec2::new(HIVE_X, HIVE_Y),
            radius: HIVE_RADIUS,
        }
    }
}

/// A homing enemy. Velocity is fixed at spawn and never re-aimed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub health: i32,
    pub max_health: i32,
}

impl Enemy {
    /// Fraction of health remaining (for health bars)
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

/// A player shot. Damage is snapshotted from the upgrades at fire time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: u32,
}

/// Particle color tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParticleColor {
    /// Enemy destroyed by a projectile
    Death,
    /// Enemy reached the hive
    Impact,
}

impl ParticleColor {
    pub fn hex(&self) -> &'static str {
        match self {
            ParticleColor::Death => "#ffaa00",
            ParticleColor::Impact => "#ff4444",
        }
    }

    pub fn rgb(&self) -> [f32; 3] {
        match self {
            ParticleColor::Death => [1.0, 0.667, 0.0],
            ParticleColor::Impact => [1.0, 0.267, 0.267],
        }
    }
}

/// A purely cosmetic particle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in ticks
    pub life: u32,
    pub color: ParticleColor,
}

/// Per-run health and score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunState {
    pub health: u32,
    /// Whole seconds survived
    pub score: u64,
    /// Set once when health first reaches zero
    pub game_over: bool,
}

/// Things that happened during a tick or action, for sound cues and logging
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    EnemySpawned { pos: Vec2 },
    ShotFired { target: Vec2 },
    HiveHit { damage: u32, health: u32 },
    EnemyKilled { pos: Vec2, reward: u32 },
    UpgradePurchased { kind: super::ledger::UpgradeKind, cost: u32 },
    GameOver { score: u64 },
}

/// Complete state of one run
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance table for this run
    pub tuning: Tuning,
    pub hive: Hive,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Timestamp of the last accepted shot (ms)
    pub last_shot: f64,
    /// Timestamp of the last spawn (ms)
    pub last_spawn: f64,
    pub difficulty: f32,
    /// Current gap between spawns (ms)
    pub spawn_interval_ms: f64,
    /// Wall-clock run start (ms)
    pub start_time: f64,
    /// Ticks advanced this run
    pub time_ticks: u64,
    pub run: RunState,
    pub ledger: Ledger,
    /// Events not yet drained by the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub rng: Pcg32,
}

impl GameState {
    /// Create a fresh run carrying the given upgrades
    pub fn new(seed: u64, tuning: Tuning, upgrades: Upgrades, now: f64) -> Self {
        let ledger = Ledger::new(tuning.starting_money, upgrades);
        let mut state = Self {
            seed,
            hive: Hive::default(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            last_shot: 0.0,
            last_spawn: 0.0,
            difficulty: tuning.start_difficulty,
            spawn_interval_ms: tuning.base_spawn_interval_ms,
            start_time: now,
            time_ticks: 0,
            run: RunState {
                health: upgrades.max_health,
                score: 0,
                game_over: false,
            },
            ledger,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };
        state.reset(now);
        state
    }

    /// Re-initialize the run, keeping the purchased upgrades
    pub fn reset(&mut self, now: f64) {
        self.hive = Hive::default();
        self.enemies.clear();
        self.projectiles.clear();
        self.particles.clear();
        self.events.clear();
        self.last_shot = 0.0;
        self.last_spawn = 0.0;
        self.difficulty = self.tuning.start_difficulty;
        // Recomputed from difficulty after the first tick
        self.spawn_interval_ms = self.tuning.base_spawn_interval_ms;
        self.start_time = now;
        self.time_ticks = 0;
        self.ledger.money = self.tuning.starting_money;
        self.run = RunState {
            health: self.ledger.upgrades.max_health,
            score: 0,
            game_over: false,
        };
        self.rng = Pcg32::seed_from_u64(self.seed);
    }

    pub fn max_health(&self) -> u32 {
        self.ledger.upgrades.max_health
    }

    /// Whole seconds elapsed since the run started
    pub fn elapsed_secs(&self, now: f64) -> u64 {
        ((now - self.start_time) / 1000.0).floor().max(0.0) as u64
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> GameState {
        let tuning = Tuning::default();
        let upgrades = Upgrades::from_tuning(&tuning);
        GameState::new(7, tuning, upgrades, 10_000.0)
    }

    #[test]
    fn test_new_state_defaults() {
        let state = fresh();
        assert_eq!(state.hive.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.hive.radius, 40.0);
        assert_eq!(state.difficulty, 1.0);
        assert_eq!(state.spawn_interval_ms, 2000.0);
        assert_eq!(state.run.health, 100);
        assert_eq!(state.ledger.money, 50);
        assert_eq!(state.start_time, 10_000.0);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_reset_keeps_upgrades() {
        let mut state = fresh();
        state.ledger.upgrades.damage = 3;
        state.ledger.upgrades.max_health = 150;
        state.ledger.money = 999;
        state.difficulty = 4.0;
        state.run.health = 10;
        state.enemies.push(Enemy {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: ENEMY_RADIUS,
            health: 1,
            max_health: 1,
        });

        state.reset(20_000.0);

        assert!(state.enemies.is_empty());
        assert_eq!(state.ledger.upgrades.damage, 3);
        assert_eq!(state.ledger.money, 50);
        assert_eq!(state.run.health, 150);
        assert_eq!(state.difficulty, 1.0);
        assert_eq!(state.start_time, 20_000.0);
        assert_eq!(state.last_shot, 0.0);
    }

    #[test]
    fn test_elapsed_secs_floors() {
        let state = fresh();
        assert_eq!(state.elapsed_secs(10_000.0), 0);
        assert_eq!(state.elapsed_secs(10_999.0), 0);
        assert_eq!(state.elapsed_secs(11_000.0), 1);
        assert_eq!(state.elapsed_secs(72_500.0), 62);
        // Clock skew never produces a negative score
        assert_eq!(state.elapsed_secs(5_000.0), 0);
    }

    #[test]
    fn test_health_fraction() {
        let enemy = Enemy {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: ENEMY_RADIUS,
            health: 1,
            max_health: 4,
        };
        assert_eq!(enemy.health_fraction(), 0.25);
    }
}
