#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::config::{GameConfig, UpgradeRecord, WaveSpec};
    use crate::enums::*;
    use crate::events::Notification;
    use crate::state::GameStateSnapshot;
    use crate::types::{secs_to_ticks, EntityId, Hitbox, Position, SimTime};

    fn record() -> UpgradeRecord {
        UpgradeRecord {
            upgrade_type: UpgradeType::Damage,
            name: "Damage".into(),
            description: String::new(),
            max_level: 5,
            base_price: 10,
            level_values: vec![1.0, 1.0, 1.0, 2.0, 2.0],
        }
    }

    #[test]
    fn test_upgrade_cost_formula() {
        let r = record();
        assert_eq!(r.cost_at(0), Some(15));
        assert_eq!(r.cost_at(1), Some(30));
        assert_eq!(r.cost_at(4), Some(75));
        assert_eq!(r.cost_at(5), None);
        assert_eq!(r.cost_at(9), None);
    }

    #[test]
    fn test_upgrade_cost_rounds_half_away_from_zero() {
        let r = UpgradeRecord {
            base_price: 7,
            ..record()
        };
        // 7 * 1 * 1.5 = 10.5
        assert_eq!(r.cost_at(0), Some(11));
    }

    #[test]
    fn test_level_value_bounds() {
        let r = record();
        assert_eq!(r.level_value(1), 1.0);
        assert_eq!(r.level_value(5), 2.0);
        assert_eq!(r.level_value(0), 0.0);
        assert_eq!(r.level_value(6), 0.0);
    }

    #[test]
    fn test_level_value_missing_row_is_zero() {
        let r = UpgradeRecord {
            level_values: vec![1.0, 1.0],
            ..record()
        };
        assert_eq!(r.level_value(2), 1.0);
        assert_eq!(r.level_value(3), 0.0);
    }

    #[test]
    fn test_default_config_shape() {
        let config = GameConfig::default();
        assert_eq!(config.waves.len(), 10);
        assert_eq!(config.upgrades.len(), 3);
        assert!(config.rules.game_over_on_barricade_loss);
        for t in UpgradeType::ALL {
            assert!(config.upgrade(t).is_some(), "missing record for {t}");
        }
        // Waves escalate.
        assert!(config.waves[9].enemy_count > config.waves[0].enemy_count);
        assert!(config.waves[9].spawn_interval <= config.waves[0].spawn_interval);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let json = r#"{
            "waves": [ { "enemy_count": 3, "spawn_interval": 1.0, "health_multiplier": 1.0 } ],
            "player": { "move_speed": 7.0 }
        }"#;
        let config = GameConfig::from_json_str(json).unwrap();
        assert_eq!(config.waves.len(), 1);
        assert_eq!(config.player.move_speed, 7.0);
        assert_eq!(config.player.fire_cooldown_secs, 0.5);
        assert_eq!(config.upgrades.len(), 3);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, crate::config::ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load(std::path::Path::new("/nonexistent/holdout.json")).unwrap_err();
        assert!(matches!(err, crate::config::ConfigError::Io { .. }));
    }

    #[test]
    fn test_sanitized_drops_bad_records() {
        let mut config = GameConfig::default();
        config.waves = vec![
            WaveSpec {
                enemy_count: 0,
                spawn_interval: 1.0,
                health_multiplier: 1.0,
            },
            WaveSpec {
                enemy_count: 2,
                spawn_interval: -1.0,
                health_multiplier: f32::NAN,
            },
        ];
        config.upgrades.push(record());
        let config = config.sanitized();

        assert_eq!(config.waves.len(), 1);
        assert_eq!(config.waves[0].spawn_interval, 0.0);
        assert_eq!(config.waves[0].health_multiplier, 1.0);
        // The duplicate Damage record is dropped; the first one wins.
        assert_eq!(config.upgrades.len(), 3);
        assert_eq!(config.upgrade(UpgradeType::Damage).unwrap().name, "Damage");
    }

    #[test]
    fn test_secs_to_ticks() {
        assert_eq!(secs_to_ticks(1.0), 30);
        assert_eq!(secs_to_ticks(0.5), 15);
        assert_eq!(secs_to_ticks(0.0), 0);
        assert_eq!(secs_to_ticks(-2.0), 0);
        assert_eq!(secs_to_ticks(f32::INFINITY), 0);
    }

    #[test]
    fn test_hitbox_overlap() {
        let a = Hitbox::new(1.0, 1.0);
        let b = Hitbox::new(1.0, 1.0);
        assert!(a.overlaps(&Position::new(0.0, 0.0), &b, &Position::new(0.9, 0.0)));
        // Edges touching.
        assert!(a.overlaps(&Position::new(0.0, 0.0), &b, &Position::new(1.0, 0.0)));
        assert!(!a.overlaps(&Position::new(0.0, 0.0), &b, &Position::new(1.1, 0.0)));
        assert!(!a.overlaps(&Position::new(0.0, 0.0), &b, &Position::new(0.0, 1.5)));
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..30 {
            time.advance();
        }
        assert_eq!(time.tick, 30);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_player_command_wire_format() {
        let cmd: PlayerCommand =
            serde_json::from_str(r#"{"type":"TryUpgrade","upgrade":"FireRate"}"#).unwrap();
        assert_eq!(
            cmd,
            PlayerCommand::TryUpgrade {
                upgrade: UpgradeType::FireRate
            }
        );

        let cmd: PlayerCommand =
            serde_json::from_str(r#"{"type":"SetMovement","x":1.0,"y":0.0}"#).unwrap();
        assert_eq!(cmd, PlayerCommand::SetMovement { x: 1.0, y: 0.0 });
    }

    #[test]
    fn test_notification_serialization() {
        let n = Notification::UpgradeUiChanged {
            upgrade: UpgradeType::Damage,
            level: 5,
            next_cost: None,
        };
        let json = serde_json::to_string(&n).unwrap();
        assert!(json.contains(r#""type":"UpgradeUiChanged""#));
        assert!(json.contains(r#""next_cost":null"#));

        let n = Notification::EnemyDied {
            entity: EntityId(42),
            position: Position::new(1.0, 2.0),
        };
        let back: Notification = serde_json::from_str(&serde_json::to_string(&n).unwrap()).unwrap();
        assert_eq!(n, back);
    }

    #[test]
    fn test_empty_snapshot_serializes() {
        let snapshot = GameStateSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains(r#""state":"Ready""#));
        assert!(json.contains(r#""player":null"#));
    }

    #[test]
    fn test_state_display() {
        assert_eq!(GameState::WaveInProgress.to_string(), "Wave In Progress");
        assert_eq!(UpgradeType::MoveSpeed.to_string(), "move_speed");
    }
}
