//! Game state snapshot: the complete visible state handed to adapters each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::Notification;
use crate::types::{EntityId, Position, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub state: GameState,
    pub wave: WaveView,
    pub balance: u32,
    pub player: Option<PlayerView>,
    pub barricade: Option<BarricadeView>,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub coins: Vec<CoinView>,
    pub upgrades: Vec<UpgradeView>,
    /// Notifications emitted since the previous snapshot, in order.
    pub notifications: Vec<Notification>,
}

/// Wave HUD values.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WaveView {
    /// 1-based wave number; 0 before the first wave.
    pub current: u32,
    pub total: u32,
    pub spawned: u32,
    pub remaining: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: EntityId,
    pub position: Position,
    pub fire_cooldown_secs: f32,
    pub bullet_damage: f32,
    pub move_speed: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarricadeView {
    pub id: EntityId,
    pub position: Position,
    pub health: f32,
    pub max_health: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub position: Position,
    pub health: f32,
    pub max_health: f32,
    /// True while the enemy is attacking the barricade.
    pub besieging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub id: EntityId,
    pub position: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinView {
    pub id: EntityId,
    pub position: Position,
    pub value: u32,
    /// Cosmetic blink phase; the renderer decides what it looks like.
    pub fading: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeView {
    pub upgrade: UpgradeType,
    pub name: String,
    pub level: u32,
    pub max_level: u32,
    pub next_cost: Option<u32>,
}
