//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player, barricade, enemy, bullet and coin entities with
//! appropriate component bundles, and validates adapter spawn requests.

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use holdout_core::components::*;
use holdout_core::config::{
    BarricadeTemplate, BulletTemplate, CoinTemplate, EnemyTemplate, GameConfig, PlayerTemplate,
};
use holdout_core::enums::EntityCategory;
use holdout_core::types::{secs_to_ticks, Hitbox, Position, Velocity, WaveTag};

/// Per-request tweaks applied on top of the configured template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeOverrides {
    /// Enemy or barricade max health.
    pub max_health: Option<f32>,
    /// Enemy or player move speed.
    pub move_speed: Option<f32>,
    /// Bullet damage or enemy attack damage.
    pub damage: Option<f32>,
    pub coin_value: Option<u32>,
    pub drop_coin_amount: Option<u32>,
}

/// Adapter request to place an entity in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub category: EntityCategory,
    pub position: Position,
    #[serde(default)]
    pub overrides: AttributeOverrides,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpawnError {
    #[error("a {0:?} already exists")]
    AlreadyPresent(EntityCategory),
    #[error("spawn position ({x}, {y}) is not finite")]
    InvalidPosition { x: f32, y: f32 },
    #[error("override {field} = {value} is out of range")]
    InvalidOverride { field: &'static str, value: f32 },
}

/// Populate a fresh session: the player and the barricade.
pub fn setup_session(world: &mut World, config: &GameConfig) {
    spawn_player(world, &config.player);
    spawn_barricade(world, &config.barricade, config.arena.width);
}

pub fn spawn_player(world: &mut World, template: &PlayerTemplate) -> Entity {
    let stats = PlayerStats {
        fire_cooldown_secs: template.fire_cooldown_secs,
        bullet_damage: template.bullet_damage,
        move_speed: template.move_speed,
    };

    world.spawn((
        Player,
        Position::new(template.start_x, template.start_y),
        Velocity::default(),
        Hitbox::new(template.size, template.size),
        stats,
        FireControl::default(),
    ))
}

/// The barricade spans the full arena width at a fixed height.
pub fn spawn_barricade(world: &mut World, template: &BarricadeTemplate, arena_width: f32) -> Entity {
    world.spawn((
        Barricade,
        Position::new(arena_width * 0.5, template.y),
        Hitbox::new(arena_width, template.height),
        Health {
            current: template.max_health,
            max: template.max_health,
        },
    ))
}

/// Spawn an enemy walking toward the bottom of the arena.
/// Health is scaled by `health_multiplier` before the enemy is visible to any system.
pub fn spawn_enemy(
    world: &mut World,
    template: &EnemyTemplate,
    position: Position,
    health_multiplier: f32,
    wave: Option<WaveTag>,
) -> Entity {
    let max_health = template.max_health * health_multiplier;

    world.spawn((
        Enemy {
            kind: template.kind,
            move_speed: template.move_speed,
            attack_damage: template.attack_damage,
            attack_speed: template.attack_speed,
            drop_coin_amount: template.drop_coin_amount,
            wave,
        },
        position,
        Velocity::new(0.0, -template.move_speed),
        Hitbox::new(template.size, template.size),
        Health {
            current: max_health,
            max: max_health,
        },
        Siege::default(),
    ))
}

/// Spawn a bullet travelling straight up.
pub fn spawn_bullet(
    world: &mut World,
    template: &BulletTemplate,
    position: Position,
    damage: f32,
) -> Entity {
    world.spawn((
        Bullet { damage },
        position,
        Velocity::new(0.0, template.speed),
        Hitbox::new(template.size, template.size),
    ))
}

pub fn spawn_coin(world: &mut World, template: &CoinTemplate, position: Position, value: u32) -> Entity {
    world.spawn((
        Coin {
            value,
            lifetime_ticks: secs_to_ticks(template.lifetime_secs),
            fade_in_ticks: secs_to_ticks(template.fade_start_secs),
            fading: false,
        },
        position,
        Hitbox::new(template.size, template.size),
    ))
}

/// Validate and carry out an adapter spawn request.
pub fn spawn_from_request(
    world: &mut World,
    config: &GameConfig,
    request: &SpawnRequest,
) -> Result<Entity, SpawnError> {
    let pos = request.position;
    if !pos.0.is_finite() {
        return Err(SpawnError::InvalidPosition {
            x: pos.x(),
            y: pos.y(),
        });
    }
    let o = &request.overrides;
    check_non_negative("max_health", o.max_health)?;
    check_non_negative("move_speed", o.move_speed)?;
    check_non_negative("damage", o.damage)?;

    let entity = match request.category {
        EntityCategory::Player => {
            if world.query::<&Player>().iter().next().is_some() {
                return Err(SpawnError::AlreadyPresent(EntityCategory::Player));
            }
            let mut template = config.player;
            template.start_x = pos.x();
            template.start_y = pos.y();
            if let Some(speed) = o.move_speed {
                template.move_speed = speed;
            }
            if let Some(damage) = o.damage {
                template.bullet_damage = damage;
            }
            spawn_player(world, &template)
        }
        EntityCategory::Barricade => {
            if world.query::<&Barricade>().iter().next().is_some() {
                return Err(SpawnError::AlreadyPresent(EntityCategory::Barricade));
            }
            let mut template = config.barricade;
            template.y = pos.y();
            if let Some(health) = o.max_health {
                template.max_health = health;
            }
            spawn_barricade(world, &template, config.arena.width)
        }
        EntityCategory::Enemy => {
            let mut template = config.enemy;
            if let Some(health) = o.max_health {
                template.max_health = health;
            }
            if let Some(speed) = o.move_speed {
                template.move_speed = speed;
            }
            if let Some(damage) = o.damage {
                template.attack_damage = damage;
            }
            if let Some(drop) = o.drop_coin_amount {
                template.drop_coin_amount = drop;
            }
            spawn_enemy(world, &template, pos, 1.0, None)
        }
        EntityCategory::Bullet => {
            let damage = o.damage.unwrap_or(config.player.bullet_damage);
            spawn_bullet(world, &config.bullet, pos, damage)
        }
        EntityCategory::Coin => {
            let value = o.coin_value.unwrap_or(config.coin.value);
            spawn_coin(world, &config.coin, pos, value)
        }
    };
    Ok(entity)
}

fn check_non_negative(field: &'static str, value: Option<f32>) -> Result<(), SpawnError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(SpawnError::InvalidOverride { field, value: v }),
        _ => Ok(()),
    }
}
