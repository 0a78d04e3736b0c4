//! Autonomous player fire: one bullet per fire cooldown, straight up.

use hecs::World;

use holdout_core::components::{FireControl, Player, PlayerStats};
use holdout_core::config::BulletTemplate;
use holdout_core::constants::FIRE_POINT_OFFSET;
use holdout_core::types::{secs_to_ticks, Position};

use crate::world_setup;

/// Advance every fire timer and spawn the bullets that are due.
/// The first shot leaves on the first tick the player is active.
pub fn run(world: &mut World, bullet: &BulletTemplate) {
    let mut shots: Vec<(Position, f32)> = Vec::new();

    for (_entity, (_player, pos, stats, fire)) in
        world.query_mut::<(&Player, &Position, &PlayerStats, &mut FireControl)>()
    {
        if fire.ticks_until_ready == 0 {
            let muzzle = Position::new(pos.x(), pos.y() + FIRE_POINT_OFFSET);
            shots.push((muzzle, stats.bullet_damage));
            fire.ticks_until_ready = secs_to_ticks(stats.fire_cooldown_secs).max(1);
        }
        fire.ticks_until_ready -= 1;
    }

    for (muzzle, damage) in shots {
        world_setup::spawn_bullet(world, bullet, muzzle, damage);
    }
}
