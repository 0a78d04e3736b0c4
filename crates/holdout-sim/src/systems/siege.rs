//! Enemy siege of the barricade.
//!
//! An enemy touching the barricade stops and strikes it once on contact,
//! then every `1 / attack_speed` seconds. Leaving contact cancels the timer.

use hecs::{Entity, World};
use tracing::warn;

use holdout_core::components::{Barricade, Dying, Enemy, Siege};
use holdout_core::config::CoinTemplate;
use holdout_core::events::Notification;
use holdout_core::types::{secs_to_ticks, Hitbox, Position};

use super::combat::{self, CombatLog};

/// Ticks between strikes. Non-positive speeds never strike again after contact.
pub fn attack_interval_ticks(attack_speed: f32) -> u64 {
    if attack_speed.is_finite() && attack_speed > 0.0 {
        secs_to_ticks(1.0 / attack_speed).max(1)
    } else {
        u64::MAX
    }
}

pub fn run(
    world: &mut World,
    coin: &CoinTemplate,
    notifications: &mut Vec<Notification>,
    log: &mut CombatLog,
) {
    let barricade: Option<(Entity, Position, Hitbox)> = world
        .query::<(&Barricade, &Position, &Hitbox, Option<&Dying>)>()
        .iter()
        .find(|(_, (_, _, _, dying))| dying.is_none())
        .map(|(e, (_, pos, hitbox, _))| (e, *pos, *hitbox));

    let mut strikes: Vec<f32> = Vec::new();

    for (_entity, (enemy, pos, hitbox, siege, dying)) in
        world.query_mut::<(&Enemy, &Position, &Hitbox, &mut Siege, Option<&Dying>)>()
    {
        let touching = match (&barricade, dying) {
            (Some((_, bar_pos, bar_box)), None) => hitbox.overlaps(pos, bar_box, bar_pos),
            _ => false,
        };

        if !touching {
            *siege = Siege::default();
            continue;
        }

        if !siege.engaged {
            siege.engaged = true;
            siege.attack_cooldown_ticks = 0;
        }
        if siege.attack_cooldown_ticks == 0 {
            strikes.push(enemy.attack_damage);
            siege.attack_cooldown_ticks = attack_interval_ticks(enemy.attack_speed);
        }
        siege.attack_cooldown_ticks -= 1;
    }

    let Some((target, _, _)) = barricade else {
        return;
    };
    for damage in strikes {
        if let Err(err) = combat::apply_damage(world, target, damage, coin, notifications, log) {
            warn!(%err, "siege damage rejected");
        }
    }
}
