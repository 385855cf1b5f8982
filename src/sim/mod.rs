//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Wall-clock timestamps are passed in, never read
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each collection)

pub mod collision;
pub mod ledger;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, enemy_in_bounds, projectile_in_bounds};
pub use ledger::{Ledger, UpgradeKind, Upgrades};
pub use spawner::{Side, maybe_spawn, spawn_enemy, spawn_interval_for};
pub use state::{
    Enemy, GameEvent, GameState, Hive, Particle, ParticleColor, Projectile, RunState,
};
pub use tick::{shoot, spawn_particle_burst, tick};
