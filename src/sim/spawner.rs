//! Enemy spawning
//!
//! Enemies appear just outside a random arena edge and fly in a straight line
//! toward where the hive was when they spawned.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameEvent, GameState};
use crate::consts::*;
use crate::tuning::Tuning;

/// Arena edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Point just outside this edge. `t` in [0, 1) picks the spot along it.
    pub fn spawn_point(&self, t: f32) -> Vec2 {
        match self {
            Side::Top => Vec2::new(t * ARENA_WIDTH, -SPAWN_OFFSET),
            Side::Right => Vec2::new(ARENA_WIDTH + SPAWN_OFFSET, t * ARENA_HEIGHT),
            Side::Bottom => Vec2::new(t * ARENA_WIDTH, ARENA_HEIGHT + SPAWN_OFFSET),
            Side::Left => Vec2::new(-SPAWN_OFFSET, t * ARENA_HEIGHT),
        }
    }
}

/// Spawn interval for a difficulty level (ms), floored at the minimum
pub fn spawn_interval_for(difficulty: f32, tuning: &Tuning) -> f64 {
    (tuning.base_spawn_interval_ms - difficulty as f64 * tuning.spawn_interval_per_difficulty_ms)
        .max(tuning.min_spawn_interval_ms)
}

/// Build an enemy at `pos` aimed at `target`
pub fn enemy_toward(pos: Vec2, target: Vec2, difficulty: f32, tuning: &Tuning) -> Enemy {
    let speed = tuning.enemy_base_speed + difficulty * tuning.enemy_speed_per_difficulty;
    let health = tuning.enemy_base_health + (difficulty / 2.0).floor() as i32;
    Enemy {
        pos,
        vel: (target - pos).normalize_or_zero() * speed,
        radius: ENEMY_RADIUS,
        health,
        max_health: health,
    }
}

/// Insert one enemy at a random edge
pub fn spawn_enemy(state: &mut GameState) {
    let side = Side::ALL[state.rng.random_range(0..Side::ALL.len())];
    let pos = side.spawn_point(state.rng.random::<f32>());
    let enemy = enemy_toward(pos, state.hive.pos, state.difficulty, &state.tuning);

    log::trace!(
        "Spawned enemy at ({:.0}, {:.0}) hp {} speed {:.2}",
        pos.x,
        pos.y,
        enemy.health,
        enemy.vel.length()
    );
    state.enemies.push(enemy);
    state.events.push(GameEvent::EnemySpawned { pos });
}

/// Spawn at most one enemy if the spawn interval has elapsed.
/// Returns whether an enemy was spawned.
pub fn maybe_spawn(state: &mut GameState, now: f64) -> bool {
    if now - state.last_spawn <= state.spawn_interval_ms {
        return false;
    }
    spawn_enemy(state);
    state.last_spawn = now;
    true
}
