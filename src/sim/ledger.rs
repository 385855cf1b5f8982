//! Money and purchasable upgrades
//!
//! Purchases either fully apply or do nothing: a purchase the player cannot
//! afford leaves money and every stat untouched.

use serde::{Deserialize, Serialize};

use super::state::RunState;
use crate::tuning::Tuning;

/// Items sold in the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    /// Restore health (capped at max health)
    Heal,
    /// +1 projectile damage
    Damage,
    /// +0.5x fire rate
    FireRate,
    /// +50 max health (and current health)
    MaxHealth,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 4] = [
        UpgradeKind::Heal,
        UpgradeKind::Damage,
        UpgradeKind::FireRate,
        UpgradeKind::MaxHealth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeKind::Heal => "Heal",
            UpgradeKind::Damage => "Damage",
            UpgradeKind::FireRate => "Fire Rate",
            UpgradeKind::MaxHealth => "Max Health",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "heal" | "health" => Some(UpgradeKind::Heal),
            "damage" => Some(UpgradeKind::Damage),
            "firerate" | "fire_rate" | "fire rate" => Some(UpgradeKind::FireRate),
            "maxhealth" | "max_health" | "max health" => Some(UpgradeKind::MaxHealth),
            _ => None,
        }
    }
}

/// Stat multipliers bought with money
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Upgrades {
    /// Damage carried by each new projectile
    pub damage: u32,
    /// Fire-rate multiplier (divides the shot cooldown)
    pub fire_rate: f32,
    pub max_health: u32,
}

impl Default for Upgrades {
    fn default() -> Self {
        Self::from_tuning(&Tuning::default())
    }
}

impl Upgrades {
    /// Starting upgrades for a balance table
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            damage: 1,
            fire_rate: 1.0,
            max_health: tuning.starting_max_health,
        }
    }

    /// Minimum time between shots (ms)
    pub fn fire_cooldown_ms(&self, tuning: &Tuning) -> f64 {
        tuning.base_fire_cooldown_ms / self.fire_rate as f64
    }
}

/// Money plus upgrades
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub money: u32,
    pub upgrades: Upgrades,
}

impl Ledger {
    pub fn new(money: u32, upgrades: Upgrades) -> Self {
        Self { money, upgrades }
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.money >= cost
    }

    /// Credit a kill reward
    pub fn award(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
    }

    /// Spend `cost` and apply exactly one effect. Returns false (and changes
    /// nothing) when the player can't afford it.
    pub fn purchase(
        &mut self,
        kind: UpgradeKind,
        cost: u32,
        run: &mut RunState,
        tuning: &Tuning,
    ) -> bool {
        let Some(remaining) = self.money.checked_sub(cost) else {
            log::debug!(
                "Rejected {} purchase: cost {} > money {}",
                kind.as_str(),
                cost,
                self.money
            );
            return false;
        };
        self.money = remaining;

        match kind {
            UpgradeKind::Heal => {
                run.health = (run.health + tuning.heal_amount).min(self.upgrades.max_health);
            }
            UpgradeKind::Damage => {
                self.upgrades.damage += tuning.damage_step;
            }
            UpgradeKind::FireRate => {
                self.upgrades.fire_rate += tuning.fire_rate_step;
            }
            UpgradeKind::MaxHealth => {
                self.upgrades.max_health += tuning.max_health_step;
                run.health += tuning.max_health_step;
            }
        }

        log::debug!(
            "Bought {} for ${} (money left {})",
            kind.as_str(),
            cost,
            self.money
        );
        true
    }
}
