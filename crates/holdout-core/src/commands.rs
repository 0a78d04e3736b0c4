//! Player commands sent from an adapter to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::UpgradeType;

/// All possible adapter actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Game flow ---
    /// Leave Ready and start the first wave.
    StartGame,
    /// Leave UpgradeTime and start the next wave.
    StartNextWave,
    /// End the session immediately.
    TriggerGameOver,
    /// Clear the arena and return to Ready.
    Reset,

    // --- Upgrades ---
    /// Buy one level of an upgrade.
    TryUpgrade { upgrade: UpgradeType },

    // --- Input ---
    /// Movement direction for the player; normalized by the core.
    SetMovement { x: f32, y: f32 },
}
