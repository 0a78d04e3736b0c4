//! Kinematic integration system.
//!
//! Sets velocities from player intent and siege state, then
//! updates Position from Velocity each tick: position += velocity * dt.

use glam::Vec2;
use hecs::World;

use holdout_core::components::{Despawn, Dying, Enemy, Player, PlayerStats, Siege};
use holdout_core::config::ArenaConfig;
use holdout_core::constants::DT;
use holdout_core::types::{Hitbox, Position, Velocity};

/// Run movement for every live entity with Position + Velocity.
/// `intent` must already be normalized (or zero).
pub fn run(world: &mut World, intent: Vec2, arena: &ArenaConfig) {
    for (_entity, (_player, stats, vel)) in
        world.query_mut::<(&Player, &PlayerStats, &mut Velocity)>()
    {
        vel.0 = intent * stats.move_speed;
    }

    // Besieging enemies hold position.
    for (_entity, (enemy, siege, vel)) in world.query_mut::<(&Enemy, &Siege, &mut Velocity)>() {
        vel.0 = if siege.engaged {
            Vec2::ZERO
        } else {
            Vec2::new(0.0, -enemy.move_speed)
        };
    }

    for (_entity, (pos, vel, dying, despawn)) in
        world.query_mut::<(&mut Position, &Velocity, Option<&Dying>, Option<&Despawn>)>()
    {
        if dying.is_some() || despawn.is_some() {
            continue;
        }
        pos.0 += vel.0 * DT;
    }

    clamp_player(world, arena);
}

/// Keep the player's hitbox inside the arena.
fn clamp_player(world: &mut World, arena: &ArenaConfig) {
    let bounds = Vec2::new(arena.width, arena.height);
    for (_entity, (_player, pos, hitbox)) in world.query_mut::<(&Player, &mut Position, &Hitbox)>() {
        let min = hitbox.half_extents.min(bounds * 0.5);
        let max = (bounds - hitbox.half_extents).max(min);
        pos.0 = pos.0.clamp(min, max);
    }
}
