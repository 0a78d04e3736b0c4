//! Notifications emitted by the simulation for UI and audio adapters.
//!
//! Notifications are fire-and-forget: the core never waits on a reply.
//! They are queued in emission order and drained once per tick.

use serde::{Deserialize, Serialize};

use crate::enums::{GameState, UpgradeType};
use crate::types::{EntityId, Position};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Notification {
    // --- Game flow ---
    StateChanged { state: GameState },
    WaveStarted,
    WaveCleared,
    UpgradeTimeStarted,
    GameOver,

    // --- HUD ---
    CurrencyChanged { balance: u32 },
    /// `current` is 1-based; 0 before the first wave.
    WaveProgress { current: u32, total: u32 },
    EnemiesRemaining { count: u32 },
    /// `next_cost` is `None` once the upgrade is at max level.
    UpgradeUiChanged {
        upgrade: UpgradeType,
        level: u32,
        next_cost: Option<u32>,
    },

    // --- Combat ---
    HealthChanged {
        entity: EntityId,
        current: f32,
        max: f32,
    },
    EnemyDied { entity: EntityId, position: Position },
    /// Enemy walked off the bottom of the arena.
    EnemyEscaped { entity: EntityId },
    CoinFading { entity: EntityId },
    BarricadeDestroyed,
}
