//! Static configuration tables supplied at session start.
//!
//! Everything here is read-only once the engine is built. Tables load from
//! JSON; every field has a default so partial files are accepted.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::*;
use crate::enums::{EnemyKind, UpgradeType};

/// Failure to read or parse a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One wave of the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveSpec {
    pub enemy_count: u32,
    /// Seconds between consecutive spawns.
    pub spawn_interval: f32,
    /// Applied to enemy max health for this wave.
    pub health_multiplier: f32,
}

/// Static cost/value table for one upgrade type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeRecord {
    pub upgrade_type: UpgradeType,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub max_level: u32,
    pub base_price: u32,
    /// Effect magnitude per level; index 0 is level 1.
    pub level_values: Vec<f32>,
}

impl UpgradeRecord {
    /// Effect magnitude for `level`. Out-of-range levels and missing rows
    /// yield 0.0 ("no effect") and a warning.
    pub fn level_value(&self, level: u32) -> f32 {
        if level > 0 && level <= self.max_level {
            if let Some(&value) = self.level_values.get(level as usize - 1) {
                return value;
            }
        }
        warn!(
            upgrade = %self.upgrade_type,
            level,
            "invalid upgrade level requested, using zero effect"
        );
        0.0
    }

    /// Price of going from `current_level` to `current_level + 1`.
    /// `None` once `current_level` has reached the cap.
    pub fn cost_at(&self, current_level: u32) -> Option<u32> {
        if current_level >= self.max_level {
            return None;
        }
        let cost =
            self.base_price as f32 * (current_level + 1) as f32 * UPGRADE_COST_FACTOR;
        Some(cost.round() as u32)
    }

    pub fn is_max_level(&self, current_level: u32) -> bool {
        current_level >= self.max_level
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    pub enemy_spawn_y: f32,
    pub enemy_spawn_margin: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTemplate {
    pub start_x: f32,
    pub start_y: f32,
    pub move_speed: f32,
    pub fire_cooldown_secs: f32,
    pub min_fire_cooldown_secs: f32,
    pub bullet_damage: f32,
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTemplate {
    pub kind: EnemyKind,
    pub max_health: f32,
    pub move_speed: f32,
    pub attack_damage: f32,
    pub attack_speed: f32,
    pub drop_coin_amount: u32,
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletTemplate {
    pub speed: f32,
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinTemplate {
    pub value: u32,
    pub lifetime_secs: f32,
    pub fade_start_secs: f32,
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarricadeTemplate {
    pub max_health: f32,
    pub y: f32,
    pub height: f32,
}

/// Integrator policy switches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Losing the barricade ends the session.
    pub game_over_on_barricade_loss: bool,
}

/// Complete static configuration for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena: ArenaConfig,
    pub player: PlayerTemplate,
    pub enemy: EnemyTemplate,
    pub bullet: BulletTemplate,
    pub coin: CoinTemplate,
    pub barricade: BarricadeTemplate,
    pub waves: Vec<WaveSpec>,
    pub upgrades: Vec<UpgradeRecord>,
    pub rules: Rules,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            enemy_spawn_y: ENEMY_SPAWN_Y,
            enemy_spawn_margin: ENEMY_SPAWN_MARGIN,
        }
    }
}

impl Default for PlayerTemplate {
    fn default() -> Self {
        Self {
            start_x: PLAYER_START_X,
            start_y: PLAYER_START_Y,
            move_speed: PLAYER_MOVE_SPEED,
            fire_cooldown_secs: PLAYER_FIRE_COOLDOWN,
            min_fire_cooldown_secs: MIN_FIRE_COOLDOWN,
            bullet_damage: PLAYER_BULLET_DAMAGE,
            size: PLAYER_SIZE,
        }
    }
}

impl Default for EnemyTemplate {
    fn default() -> Self {
        Self {
            kind: EnemyKind::Zombie,
            max_health: ENEMY_MAX_HEALTH,
            move_speed: ENEMY_MOVE_SPEED,
            attack_damage: ENEMY_ATTACK_DAMAGE,
            attack_speed: ENEMY_ATTACK_SPEED,
            drop_coin_amount: ENEMY_DROP_COIN_AMOUNT,
            size: ENEMY_SIZE,
        }
    }
}

impl Default for BulletTemplate {
    fn default() -> Self {
        Self {
            speed: BULLET_SPEED,
            size: BULLET_SIZE,
        }
    }
}

impl Default for CoinTemplate {
    fn default() -> Self {
        Self {
            value: COIN_VALUE,
            lifetime_secs: COIN_LIFETIME,
            fade_start_secs: COIN_FADE_START,
            size: COIN_SIZE,
        }
    }
}

impl Default for BarricadeTemplate {
    fn default() -> Self {
        Self {
            max_health: BARRICADE_MAX_HEALTH,
            y: BARRICADE_Y,
            height: BARRICADE_HEIGHT,
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            game_over_on_barricade_loss: true,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            player: PlayerTemplate::default(),
            enemy: EnemyTemplate::default(),
            bullet: BulletTemplate::default(),
            coin: CoinTemplate::default(),
            barricade: BarricadeTemplate::default(),
            waves: default_waves(),
            upgrades: default_upgrades(),
            rules: Rules::default(),
        }
    }
}

/// Ten escalating waves: more enemies, faster cadence, tougher enemies.
pub fn default_waves() -> Vec<WaveSpec> {
    (0..DEFAULT_WAVE_COUNT)
        .map(|i| WaveSpec {
            enemy_count: 5 + 2 * i as u32,
            spawn_interval: (2.0 - 0.15 * i as f32).max(0.5),
            health_multiplier: 1.0 + 0.25 * i as f32,
        })
        .collect()
}

/// FireRate, Damage and MoveSpeed, five levels each.
pub fn default_upgrades() -> Vec<UpgradeRecord> {
    vec![
        UpgradeRecord {
            upgrade_type: UpgradeType::FireRate,
            name: "Fire Rate".into(),
            description: "Shortens the time between shots.".into(),
            max_level: UPGRADE_MAX_LEVEL,
            base_price: UPGRADE_BASE_PRICE,
            level_values: vec![0.05, 0.05, 0.05, 0.1, 0.1],
        },
        UpgradeRecord {
            upgrade_type: UpgradeType::Damage,
            name: "Damage".into(),
            description: "Each bullet hits harder.".into(),
            max_level: UPGRADE_MAX_LEVEL,
            base_price: UPGRADE_BASE_PRICE,
            level_values: vec![1.0, 1.0, 1.0, 2.0, 2.0],
        },
        UpgradeRecord {
            upgrade_type: UpgradeType::MoveSpeed,
            name: "Move Speed".into(),
            description: "Move faster to grab coins.".into(),
            max_level: UPGRADE_MAX_LEVEL,
            base_price: UPGRADE_BASE_PRICE,
            level_values: vec![0.5, 0.5, 0.5, 0.5, 1.0],
        },
    ]
}

impl GameConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty JSON (used to dump the defaults as a template).
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Apply the configuration-error fallbacks: bad records are dropped or
    /// repaired with a warning instead of failing the session.
    pub fn sanitized(mut self) -> Self {
        if self.waves.is_empty() {
            warn!("wave list is empty; the first wave start will end the game");
        }

        let before = self.waves.len();
        self.waves.retain(|w| w.enemy_count > 0);
        if self.waves.len() != before {
            warn!(
                dropped = before - self.waves.len(),
                "dropped waves with zero enemies"
            );
        }

        for (i, wave) in self.waves.iter_mut().enumerate() {
            if !wave.spawn_interval.is_finite() || wave.spawn_interval < 0.0 {
                warn!(wave = i + 1, "invalid spawn interval, using 0");
                wave.spawn_interval = 0.0;
            }
            if !wave.health_multiplier.is_finite() || wave.health_multiplier <= 0.0 {
                warn!(wave = i + 1, "invalid health multiplier, using 1.0");
                wave.health_multiplier = 1.0;
            }
        }

        let mut seen = Vec::new();
        self.upgrades.retain(|record| {
            if seen.contains(&record.upgrade_type) {
                warn!(upgrade = %record.upgrade_type, "duplicate upgrade record ignored");
                return false;
            }
            seen.push(record.upgrade_type);
            true
        });

        for record in &self.upgrades {
            if (record.level_values.len() as u32) < record.max_level {
                warn!(
                    upgrade = %record.upgrade_type,
                    rows = record.level_values.len(),
                    max_level = record.max_level,
                    "upgrade has fewer level values than levels; missing levels have no effect"
                );
            }
        }

        self
    }

    /// Look up the static table for an upgrade type.
    pub fn upgrade(&self, upgrade: UpgradeType) -> Option<&UpgradeRecord> {
        self.upgrades.iter().find(|r| r.upgrade_type == upgrade)
    }
}
