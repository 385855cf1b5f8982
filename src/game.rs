//! Screen state machine and the entry points the UI layer calls
//!
//! ```text
//!   Menu ──start_run──▶ Active ◀──Escape──▶ Suspended(Paused)
//!                        │  ▲                    ▲
//!                  shop  ▼  │ shop               │ Escape
//!                    Suspended(Shop) ────────────┘
//!                        │
//!   Active ──health 0──▶ GameOver ──start_run──▶ Active (upgrades kept)
//!   any ──return_to_menu──▶ Menu (upgrades reset)
//! ```
//!
//! Only `Active` runs the simulation clock.

use glam::Vec2;
use serde::Serialize;

use crate::clock::{FrameToken, SimulationClock};
use crate::sim::{self, GameEvent, GameState, UpgradeKind, Upgrades};
use crate::tuning::Tuning;

/// Overlay shown while the simulation is suspended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Overlay {
    Paused,
    Shop,
}

/// Which screen the player is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Screen {
    Menu,
    Active,
    /// Run in progress but frozen behind an overlay
    Suspended(Overlay),
    GameOver,
}

impl Screen {
    /// A run exists (active, paused, shopping)
    pub fn in_run(&self) -> bool {
        matches!(self, Screen::Active | Screen::Suspended(_))
    }
}

/// Result of a display-refresh callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// One tick ran; schedule the next frame with the same token
    Ticked,
    /// The token is stale or the run isn't active; stop scheduling
    Halted,
}

/// Read-only HUD values, copied out after a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub screen: Screen,
    pub score: u64,
    pub money: u32,
    pub health: u32,
    pub max_health: u32,
    pub damage: u32,
    pub fire_rate: f32,
    pub difficulty: f32,
    pub enemies: usize,
    pub projectiles: usize,
    pub particles: usize,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Health as a 0-100 percentage of max health
    pub fn health_percent(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32 * 100.0
    }
}

/// One game session: owns the world and gates its tick stream
pub struct Game {
    screen: Screen,
    world: Option<GameState>,
    tuning: Tuning,
    clock: SimulationClock,
    seed: u64,
    runs: u64,
}

impl Game {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            screen: Screen::Menu,
            world: None,
            tuning,
            clock: SimulationClock::new(),
            seed,
            runs: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Read-only view of the world for rendering
    pub fn world(&self) -> Option<&GameState> {
        self.world.as_ref()
    }

    /// Token the host should schedule frames with, while active
    pub fn frame_token(&self) -> Option<FrameToken> {
        self.clock.current()
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    fn enter(&mut self, screen: Screen) {
        if screen == self.screen {
            return;
        }
        log::debug!("Screen {:?} -> {:?}", self.screen, screen);
        self.screen = screen;
        if screen == Screen::Active {
            self.clock.start();
        } else {
            self.clock.stop();
        }
    }

    /// Start (or restart) a run. Upgrades carry over from the previous run
    /// unless the player went back to the menu in between.
    pub fn start_run(&mut self, now: f64) -> FrameToken {
        let upgrades = self
            .world
            .as_ref()
            .map(|w| w.ledger.upgrades)
            .unwrap_or_else(|| Upgrades::from_tuning(&self.tuning));

        self.runs += 1;
        let seed = self.seed.wrapping_add(self.runs);
        self.world = Some(GameState::new(seed, self.tuning.clone(), upgrades, now));

        log::info!(
            "Run {} started (seed {}, damage {}, fire rate {:.1}x, max health {})",
            self.runs,
            seed,
            upgrades.damage,
            upgrades.fire_rate,
            upgrades.max_health
        );

        // Always a fresh stream, even when restarting from Active
        self.screen = Screen::Active;
        self.clock.start()
    }

    /// Escape key: toggle the pause menu (closes the shop)
    pub fn toggle_pause(&mut self) {
        match self.screen {
            Screen::Active | Screen::Suspended(Overlay::Shop) => {
                self.enter(Screen::Suspended(Overlay::Paused))
            }
            Screen::Suspended(Overlay::Paused) => self.enter(Screen::Active),
            Screen::Menu | Screen::GameOver => {}
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        match (self.screen, paused) {
            (Screen::Active | Screen::Suspended(Overlay::Shop), true) => {
                self.enter(Screen::Suspended(Overlay::Paused))
            }
            (Screen::Suspended(Overlay::Paused), false) => self.enter(Screen::Active),
            _ => {}
        }
    }

    /// Open or close the shop. The shop can't be opened over the pause menu.
    pub fn open_shop(&mut self, open: bool) {
        match (self.screen, open) {
            (Screen::Active, true) => self.enter(Screen::Suspended(Overlay::Shop)),
            (Screen::Suspended(Overlay::Shop), false) => self.enter(Screen::Active),
            _ => {}
        }
    }

    pub fn toggle_shop(&mut self) {
        let open = self.screen != Screen::Suspended(Overlay::Shop);
        self.open_shop(open);
    }

    /// Fire at an arena point. Only accepted while the run is active.
    pub fn shoot_at(&mut self, x: f32, y: f32, now: f64) -> bool {
        if self.screen != Screen::Active {
            return false;
        }
        match self.world.as_mut() {
            Some(world) => sim::shoot(world, Vec2::new(x, y), now),
            None => false,
        }
    }

    /// Buy an upgrade at an explicit price
    pub fn purchase(&mut self, kind: UpgradeKind, cost: u32) -> bool {
        if !self.screen.in_run() {
            return false;
        }
        let Some(world) = self.world.as_mut() else {
            return false;
        };

        let bought = world
            .ledger
            .purchase(kind, cost, &mut world.run, &world.tuning);
        if bought {
            world.events.push(GameEvent::UpgradePurchased { kind, cost });
        }
        bought
    }

    /// Buy an upgrade at its shop price
    pub fn buy(&mut self, kind: UpgradeKind) -> bool {
        let cost = self.tuning.cost_of(kind);
        self.purchase(kind, cost)
    }

    /// Tear down the run and reset upgrades
    pub fn return_to_menu(&mut self) {
        self.enter(Screen::Menu);
        self.world = None;
        log::info!("Returned to menu");
    }

    /// Display-refresh callback: run exactly one tick if `token` is live
    pub fn frame(&mut self, token: FrameToken, now: f64) -> FrameOutcome {
        if self.screen != Screen::Active || !self.clock.accepts(token) {
            return FrameOutcome::Halted;
        }
        let Some(world) = self.world.as_mut() else {
            return FrameOutcome::Halted;
        };

        sim::tick(world, now);
        self.clock.record_tick();

        if world.run.game_over {
            log::info!(
                "Game over: survived {}s, ${} in the bank",
                world.run.score,
                world.ledger.money
            );
            self.enter(Screen::GameOver);
        }
        FrameOutcome::Ticked
    }

    /// Take events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.world
            .as_mut()
            .map(GameState::drain_events)
            .unwrap_or_default()
    }

    pub fn snapshot(&self) -> Snapshot {
        let upgrades = self
            .world
            .as_ref()
            .map(|w| w.ledger.upgrades)
            .unwrap_or_else(|| Upgrades::from_tuning(&self.tuning));

        match &self.world {
            Some(world) => Snapshot {
                screen: self.screen,
                score: world.run.score,
                money: world.ledger.money,
                health: world.run.health,
                max_health: upgrades.max_health,
                damage: upgrades.damage,
                fire_rate: upgrades.fire_rate,
                difficulty: world.difficulty,
                enemies: world.enemies.len(),
                projectiles: world.projectiles.len(),
                particles: world.particles.len(),
            },
            None => Snapshot {
                screen: self.screen,
                score: 0,
                money: self.tuning.starting_money,
                health: upgrades.max_health,
                max_health: upgrades.max_health,
                damage: upgrades.damage,
                fire_rate: upgrades.fire_rate,
                difficulty: self.tuning.start_difficulty,
                enemies: 0,
                projectiles: 0,
                particles: 0,
            },
        }
    }
}
