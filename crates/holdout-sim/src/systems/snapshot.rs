//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only and never modifies the world.

use hecs::World;

use holdout_campaign::UpgradeProgression;
use holdout_core::components::*;
use holdout_core::enums::GameState;
use holdout_core::events::Notification;
use holdout_core::state::*;
use holdout_core::types::{Position, SimTime};

use super::combat::entity_id;
use super::wave_spawner::WaveScheduler;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    state: GameState,
    scheduler: &WaveScheduler,
    balance: u32,
    upgrades: &UpgradeProgression,
    notifications: Vec<Notification>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        state,
        wave: WaveView {
            current: scheduler.wave_number(),
            total: scheduler.total_waves(),
            spawned: scheduler.spawned(),
            remaining: scheduler.remaining(),
        },
        balance,
        player: build_player(world),
        barricade: build_barricade(world),
        enemies: build_enemies(world),
        bullets: build_bullets(world),
        coins: build_coins(world),
        upgrades: upgrades.views(),
        notifications,
    }
}

fn build_player(world: &World) -> Option<PlayerView> {
    world
        .query::<(&Player, &Position, &PlayerStats)>()
        .iter()
        .next()
        .map(|(e, (_, pos, stats))| PlayerView {
            id: entity_id(e),
            position: *pos,
            fire_cooldown_secs: stats.fire_cooldown_secs,
            bullet_damage: stats.bullet_damage,
            move_speed: stats.move_speed,
        })
}

fn build_barricade(world: &World) -> Option<BarricadeView> {
    world
        .query::<(&Barricade, &Position, &Health)>()
        .iter()
        .next()
        .map(|(e, (_, pos, health))| BarricadeView {
            id: entity_id(e),
            position: *pos,
            health: health.current,
            max_health: health.max,
        })
}

/// Enemies sorted by id so snapshots are stable across archetype moves.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Position, &Health, &Siege)>()
        .iter()
        .map(|(e, (enemy, pos, health, siege))| EnemyView {
            id: entity_id(e),
            kind: enemy.kind,
            position: *pos,
            health: health.current,
            max_health: health.max,
            besieging: siege.engaged,
        })
        .collect();
    enemies.sort_by_key(|v| v.id);
    enemies
}

fn build_bullets(world: &World) -> Vec<BulletView> {
    let mut bullets: Vec<BulletView> = world
        .query::<(&Bullet, &Position)>()
        .iter()
        .map(|(e, (_, pos))| BulletView {
            id: entity_id(e),
            position: *pos,
        })
        .collect();
    bullets.sort_by_key(|v| v.id);
    bullets
}

fn build_coins(world: &World) -> Vec<CoinView> {
    let mut coins: Vec<CoinView> = world
        .query::<(&Coin, &Position)>()
        .iter()
        .map(|(e, (coin, pos))| CoinView {
            id: entity_id(e),
            position: *pos,
            value: coin.value,
            fading: coin.fading,
        })
        .collect();
    coins.sort_by_key(|v| v.id);
    coins
}
