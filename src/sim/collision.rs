//! Collision and bounds tests
//!
//! Everything in the arena is a circle, so a hit is simply two centers closer
//! than the sum of their radii.

use glam::Vec2;

use crate::consts::*;

/// True when two circles overlap (touching edges do not count)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) < reach * reach
}

/// Enemies stay alive while inside the arena plus the cull margin
#[inline]
pub fn enemy_in_bounds(pos: Vec2) -> bool {
    pos.x > -ENEMY_CULL_MARGIN
        && pos.x < ARENA_WIDTH + ENEMY_CULL_MARGIN
        && pos.y > -ENEMY_CULL_MARGIN
        && pos.y < ARENA_HEIGHT + ENEMY_CULL_MARGIN
}

/// Projectiles vanish as soon as they leave the visible arena
#[inline]
pub fn projectile_in_bounds(pos: Vec2) -> bool {
    pos.x > 0.0 && pos.x < ARENA_WIDTH && pos.y > 0.0 && pos.y < ARENA_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlap() {
        let a = Vec2::new(100.0, 100.0);
        assert!(circles_overlap(a, 5.0, Vec2::new(110.0, 100.0), 12.0));
        assert!(circles_overlap(a, 5.0, a, 12.0));
        // Exactly touching is a miss
        assert!(!circles_overlap(a, 5.0, Vec2::new(117.0, 100.0), 12.0));
        assert!(!circles_overlap(a, 5.0, Vec2::new(100.0, 130.0), 12.0));
    }

    #[test]
    fn test_enemy_bounds_include_margin() {
        assert!(enemy_in_bounds(Vec2::new(-20.0, 300.0)));
        assert!(enemy_in_bounds(Vec2::new(820.0, 620.0)));
        assert!(enemy_in_bounds(Vec2::new(849.9, -49.9)));
        assert!(!enemy_in_bounds(Vec2::new(-50.0, 300.0)));
        assert!(!enemy_in_bounds(Vec2::new(400.0, 650.0)));
    }

    #[test]
    fn test_projectile_bounds_are_strict() {
        assert!(projectile_in_bounds(Vec2::new(400.0, 300.0)));
        assert!(projectile_in_bounds(Vec2::new(799.0, 1.0)));
        assert!(!projectile_in_bounds(Vec2::new(0.0, 300.0)));
        assert!(!projectile_in_bounds(Vec2::new(800.0, 300.0)));
        assert!(!projectile_in_bounds(Vec2::new(400.0, 600.5)));
    }
}
