use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use holdout_core::components::PlayerStats;
use holdout_core::config::UpgradeRecord;
use holdout_core::enums::{GameState, UpgradeType};
use holdout_core::state::UpgradeView;

use crate::ledger::{Ledger, LedgerError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpgradeError {
    #[error("no catalog entry for upgrade {0}")]
    UnknownUpgrade(UpgradeType),
    #[error("{upgrade} already at max level {level}")]
    MaxLevel { upgrade: UpgradeType, level: u32 },
    #[error("cannot afford {upgrade}: have {balance}, need {cost}")]
    InsufficientFunds {
        upgrade: UpgradeType,
        balance: u32,
        cost: u32,
    },
    #[error("upgrades are not available during {0}")]
    NotAvailable(GameState),
    #[error("no player to upgrade")]
    NoPlayer,
}

/// Change to the player's stats produced by one upgrade level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StatDelta {
    /// Seconds removed from the fire cooldown.
    FireCooldown(f32),
    BulletDamage(f32),
    MoveSpeed(f32),
}

/// Map an upgrade type and level magnitude to the stat change it makes.
pub fn effect_for(upgrade: UpgradeType, magnitude: f32) -> StatDelta {
    match upgrade {
        UpgradeType::FireRate => StatDelta::FireCooldown(magnitude),
        UpgradeType::Damage => StatDelta::BulletDamage(magnitude),
        UpgradeType::MoveSpeed => StatDelta::MoveSpeed(magnitude),
    }
}

impl StatDelta {
    /// Apply to `stats`. The fire cooldown never drops below `min_fire_cooldown`.
    pub fn apply(&self, stats: &mut PlayerStats, min_fire_cooldown: f32) {
        match *self {
            StatDelta::FireCooldown(amount) => {
                stats.fire_cooldown_secs =
                    (stats.fire_cooldown_secs - amount).max(min_fire_cooldown);
            }
            StatDelta::BulletDamage(amount) => stats.bullet_damage += amount,
            StatDelta::MoveSpeed(amount) => stats.move_speed += amount,
        }
    }
}

/// Result of a successful purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeReceipt {
    pub upgrade: UpgradeType,
    pub cost: u32,
    pub new_level: u32,
    pub next_cost: Option<u32>,
    pub delta: StatDelta,
    pub balance: u32,
}

/// Upgrade catalog plus the per-type levels bought this session.
#[derive(Debug, Clone)]
pub struct UpgradeProgression {
    catalog: Vec<UpgradeRecord>,
    levels: BTreeMap<UpgradeType, u32>,
    min_fire_cooldown: f32,
}

impl UpgradeProgression {
    pub fn new(catalog: Vec<UpgradeRecord>, min_fire_cooldown: f32) -> Self {
        Self {
            catalog,
            levels: BTreeMap::new(),
            min_fire_cooldown,
        }
    }

    pub fn record(&self, upgrade: UpgradeType) -> Option<&UpgradeRecord> {
        self.catalog.iter().find(|r| r.upgrade_type == upgrade)
    }

    pub fn records(&self) -> &[UpgradeRecord] {
        &self.catalog
    }

    /// Current level; 0 if never bought.
    pub fn level(&self, upgrade: UpgradeType) -> u32 {
        self.levels.get(&upgrade).copied().unwrap_or(0)
    }

    /// Price of the next level. `None` at max level or for a type with no record.
    pub fn upgrade_cost(&self, upgrade: UpgradeType) -> Option<u32> {
        self.record(upgrade)?.cost_at(self.level(upgrade))
    }

    /// Effect magnitude of `level`, or 0.0 if the type or level is unknown.
    pub fn level_value(&self, upgrade: UpgradeType, level: u32) -> f32 {
        match self.record(upgrade) {
            Some(record) => record.level_value(level),
            None => {
                warn!(%upgrade, level, "level value requested for unknown upgrade");
                0.0
            }
        }
    }

    /// Buy one level of `upgrade`. On any failure nothing changes.
    pub fn try_upgrade(
        &mut self,
        upgrade: UpgradeType,
        ledger: &mut Ledger,
        stats: &mut PlayerStats,
    ) -> Result<UpgradeReceipt, UpgradeError> {
        let record = self
            .record(upgrade)
            .ok_or(UpgradeError::UnknownUpgrade(upgrade))?;
        let level = self.level(upgrade);
        let cost = record
            .cost_at(level)
            .ok_or(UpgradeError::MaxLevel { upgrade, level })?;

        let balance = ledger.try_spend(cost).map_err(|e| match e {
            LedgerError::InsufficientFunds { balance, cost } => UpgradeError::InsufficientFunds {
                upgrade,
                balance,
                cost,
            },
        })?;

        let new_level = level + 1;
        let delta = effect_for(upgrade, record.level_value(new_level));
        let next_cost = record.cost_at(new_level);
        delta.apply(stats, self.min_fire_cooldown);
        self.levels.insert(upgrade, new_level);

        info!(%upgrade, new_level, cost, balance, "upgrade purchased");
        Ok(UpgradeReceipt {
            upgrade,
            cost,
            new_level,
            next_cost,
            delta,
            balance,
        })
    }

    /// One view per catalog record, in catalog order.
    pub fn views(&self) -> Vec<UpgradeView> {
        self.catalog
            .iter()
            .map(|r| {
                let level = self.level(r.upgrade_type);
                UpgradeView {
                    upgrade: r.upgrade_type,
                    name: r.name.clone(),
                    level,
                    max_level: r.max_level,
                    next_cost: r.cost_at(level),
                }
            })
            .collect()
    }

    /// Forget all purchases.
    pub fn reset(&mut self) {
        self.levels.clear();
    }
}
