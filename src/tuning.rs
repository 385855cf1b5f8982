//! Data-driven game balance
//!
//! Every number a designer might want to tweak lives here. Defaults reproduce
//! the shipped game; a JSON file can override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::sim::UpgradeKind;

/// Balance table consulted by the spawner, combat resolver and ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Difficulty ===
    /// Difficulty at run start
    pub start_difficulty: f32,
    /// Added to difficulty once per tick (frame-rate coupled)
    pub difficulty_per_tick: f32,

    // === Spawning ===
    /// Spawn interval at difficulty 0 (ms)
    pub base_spawn_interval_ms: f64,
    /// Interval reduction per difficulty point (ms)
    pub spawn_interval_per_difficulty_ms: f64,
    /// Floor for the spawn interval (ms)
    pub min_spawn_interval_ms: f64,
    /// Enemy speed = base + difficulty * per_difficulty (units/tick)
    pub enemy_base_speed: f32,
    pub enemy_speed_per_difficulty: f32,
    /// Enemy health = base + floor(difficulty / 2)
    pub enemy_base_health: i32,

    // === Combat ===
    /// Health lost when an enemy reaches the hive
    pub hive_contact_damage: u32,
    /// Money awarded per kill
    pub kill_reward: u32,
    /// Projectile speed (units/tick)
    pub projectile_speed: f32,
    /// Cooldown between shots at fire-rate 1.0 (ms)
    pub base_fire_cooldown_ms: f64,

    // === Economy ===
    pub starting_money: u32,
    pub starting_max_health: u32,
    pub heal_amount: u32,
    pub max_health_step: u32,
    pub damage_step: u32,
    pub fire_rate_step: f32,
    pub heal_cost: u32,
    pub damage_cost: u32,
    pub fire_rate_cost: u32,
    pub max_health_cost: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            start_difficulty: 1.0,
            difficulty_per_tick: 0.0005,

            base_spawn_interval_ms: 2000.0,
            spawn_interval_per_difficulty_ms: 50.0,
            min_spawn_interval_ms: 500.0,
            enemy_base_speed: 0.5,
            enemy_speed_per_difficulty: 0.1,
            enemy_base_health: 2,

            hive_contact_damage: 10,
            kill_reward: 5,
            projectile_speed: 8.0,
            base_fire_cooldown_ms: 300.0,

            starting_money: 50,
            starting_max_health: 100,
            heal_amount: 50,
            max_health_step: 50,
            damage_step: 1,
            fire_rate_step: 0.5,
            heal_cost: 30,
            damage_cost: 50,
            fire_rate_cost: 75,
            max_health_cost: 100,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) balance table from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Shop price for an upgrade
    pub fn cost_of(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::Heal => self.heal_cost,
            UpgradeKind::Damage => self.damage_cost,
            UpgradeKind::FireRate => self.fire_rate_cost,
            UpgradeKind::MaxHealth => self.max_health_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "kill_reward": 9, "heal_cost": 12 }"#).unwrap();
        assert_eq!(tuning.kill_reward, 9);
        assert_eq!(tuning.heal_cost, 12);
        assert_eq!(tuning.projectile_speed, 8.0);
        assert_eq!(tuning.starting_money, 50);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Tuning::from_json("{ kill_reward: }").is_err());
        assert!(Tuning::from_json(r#"{ "kill_reward": "lots" }"#).is_err());
    }

    #[test]
    fn test_shop_prices() {
        let tuning = Tuning::default();
        assert_eq!(tuning.cost_of(UpgradeKind::Heal), 30);
        assert_eq!(tuning.cost_of(UpgradeKind::Damage), 50);
        assert_eq!(tuning.cost_of(UpgradeKind::FireRate), 75);
        assert_eq!(tuning.cost_of(UpgradeKind::MaxHealth), 100);
    }
}
