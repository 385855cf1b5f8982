//! Scene projection
//!
//! Turns a read-only `GameState` into a triangle list. No gameplay side
//! effects: the same state always produces the same vertices.

use glam::Vec2;
use std::f32::consts::PI;

use super::shapes::{circle, ellipse, hexagon, rect, ring};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Enemy, GameState};

const CIRCLE_SEGMENTS: u32 = 24;
const SMALL_SEGMENTS: u32 = 10;
/// Grass strip along the bottom of the arena
const GRASS_TOP: f32 = 550.0;
const HEALTH_BAR_HEIGHT: f32 = 4.0;
const HEALTH_BAR_GAP: f32 = 8.0;
const PARTICLE_DRAW_RADIUS: f32 = 3.0;

/// Build the full frame, back to front
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(
        2048 + state.enemies.len() * 200 + state.particles.len() * SMALL_SEGMENTS as usize * 3,
    );

    // Background
    vertices.extend(rect(
        Vec2::ZERO,
        Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
        colors::SKY,
    ));
    vertices.extend(rect(
        Vec2::new(0.0, GRASS_TOP),
        Vec2::new(ARENA_WIDTH, ARENA_HEIGHT - GRASS_TOP),
        colors::GRASS,
    ));

    // Hive with six honeycomb cells
    let hive = state.hive;
    vertices.extend(circle(hive.pos, hive.radius, colors::HIVE, CIRCLE_SEGMENTS * 2));
    vertices.extend(ring(
        hive.pos,
        hive.radius - 1.5,
        hive.radius + 1.5,
        colors::HIVE_TRIM,
        CIRCLE_SEGMENTS * 2,
    ));
    for i in 0..6 {
        let angle = PI / 3.0 * i as f32;
        let cell = hive.pos + Vec2::new(angle.cos(), angle.sin()) * 15.0;
        vertices.extend(hexagon(cell, 6.0, colors::HIVE_TRIM));
    }

    for enemy in &state.enemies {
        push_enemy(&mut vertices, enemy, settings.health_bars);
    }

    for proj in &state.projectiles {
        vertices.extend(circle(proj.pos, proj.radius, colors::PROJECTILE, SMALL_SEGMENTS));
        vertices.extend(ring(
            proj.pos,
            proj.radius,
            proj.radius + 1.0,
            colors::PROJECTILE_TRIM,
            SMALL_SEGMENTS,
        ));
    }

    if settings.particles {
        for p in &state.particles {
            let [r, g, b] = p.color.rgb();
            let alpha = (p.life as f32 / PARTICLE_LIFE as f32).clamp(0.0, 1.0);
            vertices.extend(circle(p.pos, PARTICLE_DRAW_RADIUS, [r, g, b, alpha], SMALL_SEGMENTS));
        }
    }

    vertices
}

/// Wasp body, two wings and an optional health bar
fn push_enemy(vertices: &mut Vec<Vertex>, enemy: &Enemy, health_bar: bool) {
    vertices.extend(circle(enemy.pos, enemy.radius, colors::ENEMY, CIRCLE_SEGMENTS));
    for side in [-1.0, 1.0] {
        vertices.extend(ellipse(
            enemy.pos + Vec2::new(10.0 * side, 0.0),
            Vec2::new(8.0, 4.0),
            colors::WING,
            SMALL_SEGMENTS,
        ));
    }

    if health_bar {
        let width = enemy.radius * 2.0;
        let origin = enemy.pos - Vec2::new(width / 2.0, enemy.radius + HEALTH_BAR_GAP);
        vertices.extend(rect(
            origin,
            Vec2::new(width, HEALTH_BAR_HEIGHT),
            colors::HEALTH_BAR_BG,
        ));
        vertices.extend(rect(
            origin,
            Vec2::new(width * enemy.health_fraction(), HEALTH_BAR_HEIGHT),
            colors::HEALTH_BAR_FG,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Particle, ParticleColor, Upgrades};
    use crate::tuning::Tuning;

    fn fresh() -> GameState {
        let tuning = Tuning::default();
        GameState::new(1, tuning.clone(), Upgrades::from_tuning(&tuning), 0.0)
    }

    fn wasp(health: i32) -> Enemy {
        Enemy {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            radius: ENEMY_RADIUS,
            health,
            max_health: 2,
        }
    }

    #[test]
    fn test_scene_does_not_touch_state() {
        let mut state = fresh();
        state.enemies.push(wasp(2));
        let before = state.clone();
        let a = build_scene(&state, &Settings::default());
        let b = build_scene(&state, &Settings::default());
        assert_eq!(a, b);
        assert_eq!(state.enemies, before.enemies);
        assert_eq!(a.len() % 3, 0);
    }

    #[test]
    fn test_health_bar_shrinks_with_damage() {
        let settings = Settings::default();
        let mut full = fresh();
        full.enemies.push(wasp(2));
        let mut hurt = fresh();
        hurt.enemies.push(wasp(1));

        let green_width = |verts: &[Vertex]| {
            let xs: Vec<f32> = verts
                .iter()
                .filter(|v| v.color == colors::HEALTH_BAR_FG)
                .map(|v| v.position[0])
                .collect();
            xs.iter().cloned().fold(f32::MIN, f32::max) - xs.iter().cloned().fold(f32::MAX, f32::min)
        };
        let full_width = green_width(&build_scene(&full, &settings));
        let hurt_width = green_width(&build_scene(&hurt, &settings));
        assert!((full_width - 24.0).abs() < 1e-4);
        assert!((hurt_width - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_particles_fade_and_can_be_disabled() {
        let mut state = fresh();
        state.particles.push(Particle {
            pos: Vec2::new(50.0, 50.0),
            vel: Vec2::ZERO,
            life: 15,
            color: ParticleColor::Death,
        });

        let with = build_scene(&state, &Settings::default());
        assert!(with.iter().any(|v| v.color == [1.0, 0.667, 0.0, 0.5]));

        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        let without = build_scene(&state, &settings);
        assert_eq!(with.len() - without.len(), (SMALL_SEGMENTS * 3) as usize);
    }
}
