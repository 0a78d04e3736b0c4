//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game state. Exactly one is current at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Idle, before the first wave.
    #[default]
    Ready,
    /// Enemies are spawning and combat is live.
    WaveInProgress,
    /// Spawning paused; upgrades can be purchased.
    UpgradeTime,
    /// Terminal. Only a reset leaves this state.
    GameOver,
}

/// Entity category, used by spawn requests and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityCategory {
    Player,
    Enemy,
    Bullet,
    Barricade,
    Coin,
}

/// Enemy flavour. Every kind shares the same behavior; kinds differ by data only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Zombie,
}

/// Player stat that an upgrade acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UpgradeType {
    /// Shortens the autonomous fire cooldown.
    FireRate,
    /// Raises bullet damage.
    Damage,
    /// Raises player move speed.
    MoveSpeed,
}

impl UpgradeType {
    pub const ALL: [UpgradeType; 3] = [
        UpgradeType::FireRate,
        UpgradeType::Damage,
        UpgradeType::MoveSpeed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FireRate => "fire_rate",
            Self::Damage => "damage",
            Self::MoveSpeed => "move_speed",
        }
    }
}

impl std::fmt::Display for UpgradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Ready => "Ready",
            Self::WaveInProgress => "Wave In Progress",
            Self::UpgradeTime => "Upgrade Time",
            Self::GameOver => "Game Over",
        };
        f.write_str(name)
    }
}
