//! Scripted player used by the headless runner.
//!
//! Reads a snapshot and returns the commands a simple player would send:
//! start the game, line up under the lowest enemy, sweep up coins, and
//! between waves buy the cheapest affordable upgrade before moving on.

use glam::Vec2;

use holdout_core::commands::PlayerCommand;
use holdout_core::enums::GameState;
use holdout_core::state::GameStateSnapshot;

/// Distance under which the autopilot considers itself on target.
const DEADBAND: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Where the player waits when there is nothing to chase.
    home: Vec2,
    /// Last steering sent, to avoid resending the same intent every tick.
    last_steer: Option<Vec2>,
}

impl Autopilot {
    pub fn new(home: Vec2) -> Self {
        Self {
            home,
            last_steer: None,
        }
    }

    pub fn decide(&mut self, snap: &GameStateSnapshot) -> Vec<PlayerCommand> {
        let mut commands = Vec::new();
        match snap.state {
            GameState::Ready => commands.push(PlayerCommand::StartGame),
            GameState::WaveInProgress => self.steer(snap, &mut commands),
            GameState::UpgradeTime => {
                self.steer(snap, &mut commands);
                if snap.coins.is_empty() {
                    commands.push(shop(snap));
                }
            }
            GameState::GameOver => {}
        }
        commands
    }

    fn steer(&mut self, snap: &GameStateSnapshot, commands: &mut Vec<PlayerCommand>) {
        let Some(player) = &snap.player else {
            return;
        };
        let at = player.position.0;

        let nearest_coin = snap
            .coins
            .iter()
            .map(|c| c.position.0)
            .min_by(|a, b| a.distance(at).total_cmp(&b.distance(at)));
        let lowest_enemy = snap
            .enemies
            .iter()
            .map(|e| e.position.0)
            .min_by(|a, b| a.y.total_cmp(&b.y));

        let target = match (nearest_coin, lowest_enemy) {
            (Some(coin), _) => coin,
            (None, Some(enemy)) => Vec2::new(enemy.x, self.home.y),
            (None, None) => self.home,
        };

        let delta = target - at;
        let steer = if delta.length() < DEADBAND {
            Vec2::ZERO
        } else {
            delta.normalize_or_zero()
        };
        if self.last_steer != Some(steer) {
            self.last_steer = Some(steer);
            commands.push(PlayerCommand::SetMovement {
                x: steer.x,
                y: steer.y,
            });
        }
    }
}

/// Cheapest affordable upgrade, or the next wave if nothing is affordable.
fn shop(snap: &GameStateSnapshot) -> PlayerCommand {
    snap.upgrades
        .iter()
        .filter_map(|u| u.next_cost.map(|cost| (cost, u.upgrade)))
        .filter(|(cost, _)| *cost <= snap.balance)
        .min_by_key(|(cost, _)| *cost)
        .map(|(_, upgrade)| PlayerCommand::TryUpgrade { upgrade })
        .unwrap_or(PlayerCommand::StartNextWave)
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdout_core::enums::{EnemyKind, UpgradeType};
    use holdout_core::state::{CoinView, EnemyView, PlayerView, UpgradeView};
    use holdout_core::types::{EntityId, Position};

    fn snapshot(state: GameState) -> GameStateSnapshot {
        GameStateSnapshot {
            state,
            player: Some(PlayerView {
                id: EntityId(1),
                position: Position::new(4.5, 1.5),
                fire_cooldown_secs: 0.5,
                bullet_damage: 1.0,
                move_speed: 5.0,
            }),
            ..Default::default()
        }
    }

    fn upgrade(upgrade: UpgradeType, next_cost: Option<u32>) -> UpgradeView {
        UpgradeView {
            upgrade,
            name: upgrade.to_string(),
            level: 0,
            max_level: 5,
            next_cost,
        }
    }

    #[test]
    fn starts_the_game_from_ready() {
        let mut pilot = Autopilot::new(Vec2::new(4.5, 1.5));
        assert_eq!(
            pilot.decide(&snapshot(GameState::Ready)),
            vec![PlayerCommand::StartGame]
        );
        assert!(pilot.decide(&snapshot(GameState::GameOver)).is_empty());
    }

    #[test]
    fn lines_up_under_the_lowest_enemy() {
        let mut pilot = Autopilot::new(Vec2::new(4.5, 1.5));
        let mut snap = snapshot(GameState::WaveInProgress);
        for (id, x, y) in [(2, 1.0, 12.0), (3, 7.5, 8.0)] {
            snap.enemies.push(EnemyView {
                id: EntityId(id),
                kind: EnemyKind::Zombie,
                position: Position::new(x, y),
                health: 10.0,
                max_health: 10.0,
                besieging: false,
            });
        }

        let commands = pilot.decide(&snap);
        assert_eq!(commands, vec![PlayerCommand::SetMovement { x: 1.0, y: 0.0 }]);
        // Same intent is not resent.
        assert!(pilot.decide(&snap).is_empty());
    }

    #[test]
    fn chases_coins_before_shopping() {
        let mut pilot = Autopilot::new(Vec2::new(4.5, 1.5));
        let mut snap = snapshot(GameState::UpgradeTime);
        snap.coins.push(CoinView {
            id: EntityId(9),
            position: Position::new(4.5, 5.5),
            value: 1,
            fading: false,
        });

        let commands = pilot.decide(&snap);
        assert_eq!(commands, vec![PlayerCommand::SetMovement { x: 0.0, y: 1.0 }]);
    }

    #[test]
    fn buys_cheapest_affordable_then_moves_on() {
        let mut pilot = Autopilot::new(Vec2::new(4.5, 1.5));
        let mut snap = snapshot(GameState::UpgradeTime);
        snap.balance = 40;
        snap.upgrades = vec![
            upgrade(UpgradeType::FireRate, Some(30)),
            upgrade(UpgradeType::Damage, Some(15)),
            upgrade(UpgradeType::MoveSpeed, None),
        ];
        assert_eq!(
            pilot.decide(&snap).last(),
            Some(&PlayerCommand::TryUpgrade {
                upgrade: UpgradeType::Damage
            })
        );

        snap.balance = 10;
        assert_eq!(
            pilot.decide(&snap).last(),
            Some(&PlayerCommand::StartNextWave)
        );
    }
}
