//! Cleanup system: removes dying, consumed and out-of-bounds entities.

use hecs::{Entity, World};

use holdout_core::components::{Bullet, Despawn, Dying, Enemy};
use holdout_core::config::ArenaConfig;
use holdout_core::events::Notification;
use holdout_core::types::{Hitbox, Position};

use super::combat::{entity_id, CombatLog, ResolvedEnemy};

/// Remove entities marked for removal or outside the arena.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    arena: &ArenaConfig,
    despawn_buffer: &mut Vec<Entity>,
    notifications: &mut Vec<Notification>,
    log: &mut CombatLog,
) {
    despawn_buffer.clear();

    for (entity, (dying, despawn)) in world.query_mut::<(Option<&Dying>, Option<&Despawn>)>() {
        if dying.is_some() || despawn.is_some() {
            despawn_buffer.push(entity);
        }
    }

    // Bullets that left the top of the arena.
    for (entity, (_bullet, pos, hitbox, despawn)) in
        world.query_mut::<(&Bullet, &Position, &Hitbox, Option<&Despawn>)>()
    {
        if despawn.is_none() && pos.y() - hitbox.half_extents.y > arena.height {
            despawn_buffer.push(entity);
        }
    }

    // Enemies that walked off the bottom. They count as resolved but drop nothing.
    for (entity, (enemy, pos, hitbox, dying)) in
        world.query_mut::<(&Enemy, &Position, &Hitbox, Option<&Dying>)>()
    {
        if dying.is_none() && pos.y() + hitbox.half_extents.y < 0.0 {
            notifications.push(Notification::EnemyEscaped {
                entity: entity_id(entity),
            });
            log.resolved.push(ResolvedEnemy {
                entity,
                wave: enemy.wave,
            });
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
