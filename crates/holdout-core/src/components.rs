//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::EnemyKind;
use crate::types::WaveTag;

/// Current and maximum hit points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

/// Marks the player unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Player stats that upgrades modify.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Seconds between autonomous shots.
    pub fire_cooldown_secs: f32,
    pub bullet_damage: f32,
    /// Units per second.
    pub move_speed: f32,
}

/// Autonomous fire timer attached to the player.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FireControl {
    /// Ticks until the next shot; 0 = fire this tick.
    pub ticks_until_ready: u64,
}

/// Enemy data record. One record type covers every enemy kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub move_speed: f32,
    pub attack_damage: f32,
    /// Attacks per second.
    pub attack_speed: f32,
    pub drop_coin_amount: u32,
    /// Wave run that spawned this enemy (`None` when spawned by an adapter).
    pub wave: Option<WaveTag>,
}

/// Siege state of an enemy against the barricade.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Siege {
    /// Whether the enemy overlapped the barricade on the last collision pass.
    pub engaged: bool,
    /// Ticks until the next strike while engaged.
    pub attack_cooldown_ticks: u64,
}

/// Player projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet {
    pub damage: f32,
}

/// Collectible coin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coin {
    pub value: u32,
    /// Ticks until the coin disappears.
    pub lifetime_ticks: u64,
    /// Ticks until the coin starts fading.
    pub fade_in_ticks: u64,
    pub fading: bool,
}

/// Marks the defended structure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Barricade;

/// Death has been processed; the entity is removed during cleanup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Dying;

/// Entity is consumed (bullet hit, coin collected or expired) and is removed during cleanup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Despawn;
