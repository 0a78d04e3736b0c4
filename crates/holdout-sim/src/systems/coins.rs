//! Coin decay: coins start fading after a delay and vanish when their lifetime runs out.

use hecs::{Entity, World};

use holdout_core::components::{Coin, Despawn};
use holdout_core::events::Notification;

use super::combat::entity_id;

pub fn run(world: &mut World, notifications: &mut Vec<Notification>) {
    let mut expired: Vec<Entity> = Vec::new();

    for (entity, (coin, despawn)) in world.query_mut::<(&mut Coin, Option<&Despawn>)>() {
        if despawn.is_some() {
            continue;
        }

        coin.lifetime_ticks = coin.lifetime_ticks.saturating_sub(1);
        if !coin.fading {
            coin.fade_in_ticks = coin.fade_in_ticks.saturating_sub(1);
            if coin.fade_in_ticks == 0 {
                coin.fading = true;
                notifications.push(Notification::CoinFading {
                    entity: entity_id(entity),
                });
            }
        }
        if coin.lifetime_ticks == 0 {
            expired.push(entity);
        }
    }

    for entity in expired {
        let _ = world.insert_one(entity, Despawn);
    }
}
