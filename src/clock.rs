//! Display-refresh tick gating
//!
//! The host schedules one callback per display refresh. Every scheduled
//! callback carries the `FrameToken` that was current when the loop started;
//! stopping the clock invalidates all outstanding tokens, so a callback left
//! over from a previous run (or from before a pause) can never tick the world.

/// Identifies one uninterrupted stream of frame callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

/// Generation counter guarding the tick stream
#[derive(Debug, Default)]
pub struct SimulationClock {
    generation: u64,
    running: bool,
    /// Ticks accepted since the clock was created
    ticks: u64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new tick stream, invalidating any previous one
    pub fn start(&mut self) -> FrameToken {
        self.generation += 1;
        self.running = true;
        FrameToken(self.generation)
    }

    /// Halt the current tick stream
    pub fn stop(&mut self) {
        if self.running {
            self.generation += 1;
            self.running = false;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Token of the live stream, if any
    pub fn current(&self) -> Option<FrameToken> {
        self.running.then_some(FrameToken(self.generation))
    }

    /// Whether a callback holding `token` may tick
    pub fn accepts(&self, token: FrameToken) -> bool {
        self.running && token.0 == self.generation
    }

    pub(crate) fn record_tick(&mut self) {
        self.ticks += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
