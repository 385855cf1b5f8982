//! Per-frame simulation tick and the fire action
//!
//! One call to `tick` spawns, moves, collides and scores. It runs to
//! completion and leaves no dead entity behind.

use glam::Vec2;
use rand::Rng;

use super::collision::{circles_overlap, enemy_in_bounds, projectile_in_bounds};
use super::spawner::{maybe_spawn, spawn_interval_for};
use super::state::{GameEvent, GameState, Particle, ParticleColor, Projectile};
use crate::consts::*;

/// Advance the game state by one tick at wall-clock time `now` (ms)
pub fn tick(state: &mut GameState, now: f64) {
    state.time_ticks += 1;

    maybe_spawn(state, now);

    // Difficulty ramps per tick, not per second
    state.difficulty += state.tuning.difficulty_per_tick;
    state.spawn_interval_ms = spawn_interval_for(state.difficulty, &state.tuning);

    resolve_hive_contacts(state);
    state.enemies.retain(|e| enemy_in_bounds(e.pos));

    for proj in &mut state.projectiles {
        proj.pos += proj.vel;
    }
    resolve_projectile_hits(state);

    update_particles(state);

    state.run.score = state.elapsed_secs(now);
}

/// Move enemies and apply damage for every one that reaches the hive
fn resolve_hive_contacts(state: &mut GameState) {
    let hive = state.hive;
    let mut impacts: Vec<Vec2> = Vec::new();

    state.enemies.retain_mut(|enemy| {
        enemy.pos += enemy.vel;
        if circles_overlap(enemy.pos, enemy.radius, hive.pos, hive.radius) {
            impacts.push(enemy.pos);
            false
        } else {
            true
        }
    });

    for pos in impacts {
        let damage = state.tuning.hive_contact_damage;
        state.run.health = state.run.health.saturating_sub(damage);
        state.events.push(GameEvent::HiveHit {
            damage,
            health: state.run.health,
        });

        if state.run.health == 0 && !state.run.game_over {
            state.run.game_over = true;
            state.events.push(GameEvent::GameOver {
                score: state.run.score,
            });
        }

        spawn_particle_burst(state, pos, ParticleColor::Impact);
    }
}

/// Each projectile hits at most the first overlapping enemy and is consumed
/// by any hit. Projectiles that miss are culled once out of bounds.
fn resolve_projectile_hits(state: &mut GameState) {
    let enemies = &mut state.enemies;
    let mut kills: Vec<Vec2> = Vec::new();

    state.projectiles.retain(|proj| {
        let Some(idx) = enemies
            .iter()
            .position(|e| circles_overlap(proj.pos, proj.radius, e.pos, e.radius))
        else {
            return projectile_in_bounds(proj.pos);
        };

        let enemy = &mut enemies[idx];
        enemy.health -= proj.damage as i32;
        if enemy.health <= 0 {
            kills.push(enemies.remove(idx).pos);
        }
        false
    });

    for pos in kills {
        let reward = state.tuning.kill_reward;
        state.ledger.award(reward);
        state.events.push(GameEvent::EnemyKilled { pos, reward });
        spawn_particle_burst(state, pos, ParticleColor::Death);
    }
}

fn update_particles(state: &mut GameState) {
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.vel.y += PARTICLE_GRAVITY;
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);
}

/// Emit a ring of particles at `pos`
pub fn spawn_particle_burst(state: &mut GameState, pos: Vec2, color: ParticleColor) {
    for i in 0..PARTICLE_COUNT {
        let angle = std::f32::consts::TAU * i as f32 / PARTICLE_COUNT as f32;
        let speed: f32 = state.rng.random_range(2.0..4.0);
        state.particles.push(Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: PARTICLE_LIFE,
            color,
        });
    }
}

/// Fire a projectile from the hive toward `target`.
///
/// Rejected while the shot cooldown is running, and when the target is the
/// hive center itself (there is no direction to fire in). A rejected shot
/// does not restart the cooldown.
pub fn shoot(state: &mut GameState, target: Vec2, now: f64) -> bool {
    let cooldown = state.ledger.upgrades.fire_cooldown_ms(&state.tuning);
    if now - state.last_shot < cooldown {
        return false;
    }

    let Some(dir) = (target - state.hive.pos).try_normalize() else {
        log::debug!("Ignoring shot aimed at the hive center");
        return false;
    };

    state.last_shot = now;
    state.projectiles.push(Projectile {
        pos: state.hive.pos,
        vel: dir * state.tuning.projectile_speed,
        radius: PROJECTILE_RADIUS,
        damage: state.ledger.upgrades.damage,
    });
    state.events.push(GameEvent::ShotFired { target });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Enemy;
    use crate::sim::{Upgrades, UpgradeKind};
    use crate::tuning::Tuning;

    fn fresh() -> GameState {
        let tuning = Tuning::default();
        let mut state = GameState::new(12345, tuning.clone(), Upgrades::from_tuning(&tuning), 0.0);
        // Keep the spawner quiet unless a test wants it
        state.last_spawn = f64::MAX / 2.0;
        state
    }

    fn enemy_at(pos: Vec2, vel: Vec2, health: i32) -> Enemy {
        Enemy {
            pos,
            vel,
            radius: ENEMY_RADIUS,
            health,
            max_health: health,
        }
    }

    fn projectile_at(pos: Vec2, vel: Vec2, damage: u32) -> Projectile {
        Projectile {
            pos,
            vel,
            radius: PROJECTILE_RADIUS,
            damage,
        }
    }

    #[test]
    fn test_difficulty_ramps_every_tick() {
        let mut state = fresh();
        for i in 0..1000 {
            tick(&mut state, i as f64 * 16.0);
        }
        assert!((state.difficulty - 1.5).abs() < 1e-3);
        assert!((state.spawn_interval_ms - 1925.0).abs() < 0.1);
        assert_eq!(state.time_ticks, 1000);
    }

    #[test]
    fn test_first_tick_spawns_immediately() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, tuning.clone(), Upgrades::from_tuning(&tuning), 5000.0);
        tick(&mut state, 5000.0);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.last_spawn, 5000.0);
        assert!(matches!(state.events[0], GameEvent::EnemySpawned { .. }));
    }

    #[test]
    fn test_enemy_reaching_hive_costs_ten_health() {
        let mut state = fresh();
        // Will be 51 from center after moving: 40 + 12 = 52 threshold
        state
            .enemies
            .push(enemy_at(Vec2::new(452.0, 300.0), Vec2::new(-1.0, 0.0), 5));
        tick(&mut state, 100.0);

        assert!(state.enemies.is_empty());
        assert_eq!(state.run.health, 90);
        assert_eq!(state.particles.len(), PARTICLE_COUNT);
        assert!(
            state
                .particles
                .iter()
                .all(|p| p.color == ParticleColor::Impact && p.life == PARTICLE_LIFE - 1)
        );
        assert!(!state.run.game_over);
    }

    #[test]
    fn test_hive_contact_beats_pending_projectile() {
        let mut state = fresh();
        state
            .enemies
            .push(enemy_at(Vec2::new(452.0, 300.0), Vec2::new(-1.0, 0.0), 5));
        // A projectile that would also have hit the enemy this tick
        state
            .projectiles
            .push(projectile_at(Vec2::new(440.0, 300.0), Vec2::new(8.0, 0.0), 1));
        tick(&mut state, 100.0);

        assert_eq!(state.run.health, 90);
        assert!(state.enemies.is_empty());
        assert_eq!(state.ledger.money, 50);
        // Nothing left to hit, so the projectile flies on
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_game_over_fires_once() {
        let mut state = fresh();
        state.run.health = 15;
        for dy in [-5.0, 0.0, 5.0] {
            state
                .enemies
                .push(enemy_at(Vec2::new(445.0, 300.0 + dy), Vec2::ZERO, 3));
        }
        tick(&mut state, 100.0);

        assert_eq!(state.run.health, 0);
        assert!(state.run.game_over);
        let game_overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_enemies_leaving_arena_are_culled_without_penalty() {
        let mut state = fresh();
        state
            .enemies
            .push(enemy_at(Vec2::new(849.5, 100.0), Vec2::new(1.0, 0.0), 2));
        state
            .enemies
            .push(enemy_at(Vec2::new(-20.0, 100.0), Vec2::new(1.0, 0.0), 2));
        tick(&mut state, 100.0);

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos, Vec2::new(-19.0, 100.0));
        assert_eq!(state.run.health, 100);
    }

    #[test]
    fn test_non_lethal_hit_consumes_projectile() {
        let mut state = fresh();
        state
            .enemies
            .push(enemy_at(Vec2::new(200.0, 100.0), Vec2::ZERO, 3));
        state
            .projectiles
            .push(projectile_at(Vec2::new(190.0, 100.0), Vec2::new(8.0, 0.0), 1));
        tick(&mut state, 100.0);

        assert!(state.projectiles.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 2);
        assert_eq!(state.ledger.money, 50);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_projectile_hits_only_first_enemy() {
        let mut state = fresh();
        state
            .enemies
            .push(enemy_at(Vec2::new(200.0, 100.0), Vec2::ZERO, 1));
        state
            .enemies
            .push(enemy_at(Vec2::new(204.0, 100.0), Vec2::ZERO, 1));
        state
            .projectiles
            .push(projectile_at(Vec2::new(194.0, 100.0), Vec2::new(8.0, 0.0), 1));
        tick(&mut state, 100.0);

        assert!(state.projectiles.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos, Vec2::new(204.0, 100.0));
        assert_eq!(state.ledger.money, 55);
    }

    #[test]
    fn test_two_projectiles_two_hits_same_tick() {
        let mut state = fresh();
        state
            .enemies
            .push(enemy_at(Vec2::new(200.0, 100.0), Vec2::ZERO, 2));
        state
            .projectiles
            .push(projectile_at(Vec2::new(192.0, 100.0), Vec2::new(8.0, 0.0), 1));
        state
            .projectiles
            .push(projectile_at(Vec2::new(208.0, 100.0), Vec2::new(-8.0, 0.0), 1));
        tick(&mut state, 100.0);

        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.ledger.money, 55);
        assert_eq!(state.particles.len(), PARTICLE_COUNT);
    }

    #[test]
    fn test_projectiles_leaving_arena_are_culled() {
        let mut state = fresh();
        state
            .projectiles
            .push(projectile_at(Vec2::new(795.0, 300.0), Vec2::new(8.0, 0.0), 1));
        state
            .projectiles
            .push(projectile_at(Vec2::new(400.0, 300.0), Vec2::new(0.0, 8.0), 1));
        tick(&mut state, 100.0);

        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos, Vec2::new(400.0, 308.0));
    }

    #[test]
    fn test_particles_fall_and_expire() {
        let mut state = fresh();
        state.particles.push(Particle {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::new(1.0, 0.0),
            life: 2,
            color: ParticleColor::Death,
        });
        tick(&mut state, 100.0);
        assert_eq!(state.particles[0].pos, Vec2::new(101.0, 100.0));
        assert!((state.particles[0].vel.y - PARTICLE_GRAVITY).abs() < 1e-6);
        assert_eq!(state.particles[0].life, 1);

        tick(&mut state, 116.0);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_score_follows_wall_clock() {
        let mut state = fresh();
        tick(&mut state, 999.0);
        assert_eq!(state.run.score, 0);
        // One tick, but eight seconds of wall clock (e.g. after a pause)
        tick(&mut state, 8_250.0);
        assert_eq!(state.run.score, 8);
    }

    #[test]
    fn test_shoot_cooldown() {
        let mut state = fresh();
        let target = Vec2::new(700.0, 300.0);

        assert!(shoot(&mut state, target, 1000.0));
        assert!(!shoot(&mut state, target, 1299.0));
        assert_eq!(state.projectiles.len(), 1);
        assert!(shoot(&mut state, target, 1300.0));
        assert_eq!(state.projectiles.len(), 2);

        // Faster fire rate shortens the cooldown
        state.ledger.money = 1000;
        let tuning = state.tuning.clone();
        assert!(state.ledger.purchase(UpgradeKind::FireRate, 75, &mut state.run, &tuning));
        assert!(state.ledger.purchase(UpgradeKind::FireRate, 75, &mut state.run, &tuning));
        assert!(shoot(&mut state, target, 1450.0));
    }

    #[test]
    fn test_shot_aims_at_target() {
        let mut state = fresh();
        state.ledger.upgrades.damage = 3;
        assert!(shoot(&mut state, Vec2::new(400.0, 0.0), 1000.0));

        let proj = &state.projectiles[0];
        assert_eq!(proj.pos, Vec2::new(400.0, 300.0));
        assert!((proj.vel - Vec2::new(0.0, -8.0)).length() < 1e-5);
        assert_eq!(proj.damage, 3);
        assert_eq!(proj.radius, PROJECTILE_RADIUS);
        assert_eq!(state.last_shot, 1000.0);
    }

    #[test]
    fn test_damage_is_snapshotted_at_fire_time() {
        let mut state = fresh();
        assert!(shoot(&mut state, Vec2::new(700.0, 300.0), 1000.0));
        state.ledger.upgrades.damage = 5;
        assert_eq!(state.projectiles[0].damage, 1);
    }

    #[test]
    fn test_shot_at_hive_center_is_rejected() {
        let mut state = fresh();
        assert!(!shoot(&mut state, Vec2::new(HIVE_X, HIVE_Y), 1000.0));
        assert!(state.projectiles.is_empty());
        assert!(state.events.is_empty());
        // Cooldown wasn't consumed
        assert_eq!(state.last_shot, 0.0);
        assert!(shoot(&mut state, Vec2::new(401.0, 300.0), 1000.0));
    }

    #[test]
    fn test_kill_an_enemy_with_two_shots() {
        let mut state = fresh();
        state.spawn_interval_ms = 2000.0;
        state.last_spawn = 0.0;
        tick(&mut state, 5000.0);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 2);
        assert_eq!(state.enemies[0].max_health, 2);

        // Park the enemy where the shots will land
        state.enemies[0].pos = Vec2::new(500.0, 300.0);
        state.enemies[0].vel = Vec2::ZERO;

        for now in [5016.0, 5032.0] {
            state
                .projectiles
                .push(projectile_at(Vec2::new(485.0, 300.0), Vec2::new(8.0, 0.0), 1));
            tick(&mut state, now);
        }

        assert!(state.enemies.is_empty());
        assert_eq!(state.ledger.money, 55);
        let bursts = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
            .count();
        assert_eq!(bursts, 1);
        assert_eq!(state.particles.len(), PARTICLE_COUNT);
        assert!(state.particles.iter().all(|p| p.color == ParticleColor::Death));
    }
}
