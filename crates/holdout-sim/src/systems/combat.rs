//! Combat resolution: damage, death processing and overlap checks.
//!
//! Bullets hit the first overlapping live enemy and are consumed. The
//! player collects any coin it touches. Deaths are processed exactly once;
//! the `Dying` marker makes every later hit a no-op.

use hecs::{Entity, World};
use tracing::{info, warn};

use holdout_campaign::Ledger;
use holdout_core::components::*;
use holdout_core::config::CoinTemplate;
use holdout_core::events::Notification;
use holdout_core::types::{EntityId, Hitbox, Position, WaveTag};

use crate::world_setup;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CombatError {
    #[error("damage must be a non-negative number, got {0}")]
    InvalidDamage(f32),
}

/// What a call to [`apply_damage`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target missing, already dying, or without health.
    Ignored,
    Damaged,
    Killed,
}

/// An enemy that left play this tick, killed or escaped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedEnemy {
    pub entity: Entity,
    pub wave: Option<WaveTag>,
}

/// Outcomes the engine settles during bookkeeping.
#[derive(Debug, Default)]
pub struct CombatLog {
    pub resolved: Vec<ResolvedEnemy>,
    pub barricade_destroyed: bool,
}

impl CombatLog {
    pub fn clear(&mut self) {
        self.resolved.clear();
        self.barricade_destroyed = false;
    }
}

pub fn entity_id(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

/// Reduce `entity`'s health by `amount` and run death processing if it drops to zero.
pub fn apply_damage(
    world: &mut World,
    entity: Entity,
    amount: f32,
    coin: &CoinTemplate,
    notifications: &mut Vec<Notification>,
    log: &mut CombatLog,
) -> Result<DamageOutcome, CombatError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(CombatError::InvalidDamage(amount));
    }
    if world.get::<&Dying>(entity).is_ok() {
        return Ok(DamageOutcome::Ignored);
    }

    let (current, max) = match world.get::<&mut Health>(entity) {
        Ok(mut health) => {
            health.current = (health.current - amount).max(0.0);
            (health.current, health.max)
        }
        Err(_) => return Ok(DamageOutcome::Ignored),
    };

    notifications.push(Notification::HealthChanged {
        entity: entity_id(entity),
        current,
        max,
    });

    if current > 0.0 {
        return Ok(DamageOutcome::Damaged);
    }
    on_death(world, entity, coin, notifications, log);
    Ok(DamageOutcome::Killed)
}

fn on_death(
    world: &mut World,
    entity: Entity,
    coin: &CoinTemplate,
    notifications: &mut Vec<Notification>,
    log: &mut CombatLog,
) {
    let _ = world.insert_one(entity, Dying);

    let enemy = world.get::<&Enemy>(entity).ok().map(|e| *e);
    if let Some(enemy) = enemy {
        let position = world
            .get::<&Position>(entity)
            .map(|p| *p)
            .unwrap_or_default();
        for _ in 0..enemy.drop_coin_amount {
            world_setup::spawn_coin(world, coin, position, coin.value);
        }
        notifications.push(Notification::EnemyDied {
            entity: entity_id(entity),
            position,
        });
        log.resolved.push(ResolvedEnemy {
            entity,
            wave: enemy.wave,
        });
        return;
    }

    if world.get::<&Barricade>(entity).is_ok() {
        info!("barricade destroyed");
        notifications.push(Notification::BarricadeDestroyed);
        log.barricade_destroyed = true;
    }
}

/// Bullet→enemy hits and player→coin pickups.
pub fn run(
    world: &mut World,
    coin: &CoinTemplate,
    ledger: &mut Ledger,
    notifications: &mut Vec<Notification>,
    log: &mut CombatLog,
) {
    resolve_bullet_hits(world, coin, notifications, log);
    collect_coins(world, ledger, notifications);
}

fn resolve_bullet_hits(
    world: &mut World,
    coin: &CoinTemplate,
    notifications: &mut Vec<Notification>,
    log: &mut CombatLog,
) {
    let enemies: Vec<(Entity, Position, Hitbox)> = world
        .query::<(&Enemy, &Position, &Hitbox, Option<&Dying>)>()
        .iter()
        .filter(|(_, (_, _, _, dying))| dying.is_none())
        .map(|(e, (_, pos, hitbox, _))| (e, *pos, *hitbox))
        .collect();
    if enemies.is_empty() {
        return;
    }

    let bullets: Vec<(Entity, Position, Hitbox, f32)> = world
        .query::<(&Bullet, &Position, &Hitbox, Option<&Despawn>)>()
        .iter()
        .filter(|(_, (_, _, _, despawn))| despawn.is_none())
        .map(|(e, (bullet, pos, hitbox, _))| (e, *pos, *hitbox, bullet.damage))
        .collect();

    for (bullet, bullet_pos, bullet_box, damage) in bullets {
        // Skip enemies killed by an earlier bullet this tick.
        let target = enemies.iter().find(|(enemy, pos, hitbox)| {
            world.get::<&Dying>(*enemy).is_err() && bullet_box.overlaps(&bullet_pos, hitbox, pos)
        });
        let Some(&(enemy, _, _)) = target else {
            continue;
        };

        if let Err(err) = apply_damage(world, enemy, damage, coin, notifications, log) {
            warn!(%err, "bullet damage rejected");
        }
        let _ = world.insert_one(bullet, Despawn);
    }
}

fn collect_coins(world: &mut World, ledger: &mut Ledger, notifications: &mut Vec<Notification>) {
    let player = world
        .query::<(&Player, &Position, &Hitbox)>()
        .iter()
        .next()
        .map(|(_, (_, pos, hitbox))| (*pos, *hitbox));
    let Some((player_pos, player_box)) = player else {
        return;
    };

    let picked: Vec<(Entity, u32)> = world
        .query::<(&Coin, &Position, &Hitbox, Option<&Despawn>)>()
        .iter()
        .filter(|(_, (_, pos, hitbox, despawn))| {
            despawn.is_none() && player_box.overlaps(&player_pos, hitbox, pos)
        })
        .map(|(e, (coin, _, _, _))| (e, coin.value))
        .collect();

    for (entity, value) in picked {
        if ledger.credit(value) {
            notifications.push(Notification::CurrencyChanged {
                balance: ledger.balance(),
            });
        }
        let _ = world.insert_one(entity, Despawn);
    }
}
