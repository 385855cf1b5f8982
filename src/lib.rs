//! Hive Defense - an arcade wave-defense game
//!
//! Core modules:
//! - `sim`: Simulation (spawning, combat, economy, world state)
//! - `game`: Screen state machine and the entry points the UI calls
//! - `clock`: Display-refresh tick gating
//! - `renderer`: Scene projection and WebGPU pipeline
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod clock;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use clock::{FrameToken, SimulationClock};
pub use game::{FrameOutcome, Game, Overlay, Screen, Snapshot};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
///
/// Arena and hive geometry are fixed: collision math and spawn positions are
/// defined relative to them.
pub mod consts {
    /// Logical arena size
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Hive sits in the middle of the arena
    pub const HIVE_X: f32 = 400.0;
    pub const HIVE_Y: f32 = 300.0;
    pub const HIVE_RADIUS: f32 = 40.0;

    pub const ENEMY_RADIUS: f32 = 12.0;
    /// Enemies spawn this far outside the visible edge
    pub const SPAWN_OFFSET: f32 = 20.0;
    /// Enemies are culled once they drift this far outside the arena
    pub const ENEMY_CULL_MARGIN: f32 = 50.0;

    pub const PROJECTILE_RADIUS: f32 = 5.0;

    /// Particles per burst
    pub const PARTICLE_COUNT: usize = 8;
    /// Particle lifetime in ticks
    pub const PARTICLE_LIFE: u32 = 30;
    /// Downward pull added to particle vy every tick
    pub const PARTICLE_GRAVITY: f32 = 0.1;
}
