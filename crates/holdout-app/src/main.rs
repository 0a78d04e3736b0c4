//! holdout: headless runner for the HOLDOUT simulation.
//!
//! Usage:
//!   holdout run --seed 7 --config holdout.json --max-ticks 20000
//!   holdout realtime --seconds 30
//!   holdout dump-config > holdout.json

use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use glam::Vec2;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use holdout_app::autopilot::Autopilot;
use holdout_app::game_loop;
use holdout_core::config::GameConfig;
use holdout_core::enums::GameState;
use holdout_core::events::Notification;
use holdout_core::state::GameStateSnapshot;
use holdout_sim::engine::{SimConfig, SimulationEngine};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "realtime" => cmd_realtime(&args[2..]),
        "dump-config" => cmd_dump_config(),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(message) = result {
        error!("{message}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "holdout: HOLDOUT wave-defense simulation runner\n\
         \n\
         Commands:\n\
         \n\
         run          Play a session with the autopilot as fast as possible\n\
         \n\
           --seed <N>         RNG seed (default: 42)\n\
           --config <path>    JSON game config (default: built-in tables)\n\
           --max-ticks <N>    Stop after N ticks (default: 100000)\n\
         \n\
         realtime     Play with the autopilot on the 30Hz game loop thread\n\
         \n\
           --seed <N>         RNG seed (default: 42)\n\
           --config <path>    JSON game config (default: built-in tables)\n\
           --seconds <N>      Wall-clock run time (default: 10)\n\
         \n\
         dump-config  Print the built-in config as JSON\n\
         \n\
         Logging is controlled with RUST_LOG (default: info).\n"
    );
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<Option<T>, String> {
    for i in 0..args.len() {
        if args[i] == flag {
            let value = args
                .get(i + 1)
                .ok_or_else(|| format!("{flag} needs a value"))?;
            return value
                .parse()
                .map(Some)
                .map_err(|_| format!("invalid value for {flag}: {value}"));
        }
    }
    Ok(None)
}

fn load_sim_config(args: &[String]) -> Result<SimConfig, String> {
    let seed = parse_flag::<u64>(args, "--seed")?.unwrap_or(42);
    let game = match parse_flag::<PathBuf>(args, "--config")? {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            GameConfig::load(&path).map_err(|e| e.to_string())?
        }
        None => GameConfig::default(),
    };
    Ok(SimConfig { seed, game })
}

fn cmd_run(args: &[String]) -> Result<(), String> {
    let config = load_sim_config(args)?;
    let max_ticks = parse_flag::<u64>(args, "--max-ticks")?.unwrap_or(100_000);
    let home = Vec2::new(config.game.player.start_x, config.game.player.start_y);

    let mut engine = SimulationEngine::new(config);
    let mut pilot = Autopilot::new(home);
    let mut snapshot = engine.tick();

    for _ in 0..max_ticks {
        if snapshot.state == GameState::GameOver {
            break;
        }
        engine.queue_commands(pilot.decide(&snapshot));
        snapshot = engine.tick();
        log_milestones(&snapshot);
    }

    print_summary(&snapshot)
}

fn cmd_realtime(args: &[String]) -> Result<(), String> {
    let config = load_sim_config(args)?;
    let seconds = parse_flag::<u64>(args, "--seconds")?.unwrap_or(10);
    let home = Vec2::new(config.game.player.start_x, config.game.player.start_y);

    let handle = game_loop::spawn_game_loop(config, log_milestones)
        .map_err(|e| format!("failed to start game loop: {e}"))?;
    let mut pilot = Autopilot::new(home);

    let deadline = Instant::now() + Duration::from_secs(seconds);
    info!(seconds, "running in real time");

    'run: while Instant::now() < deadline {
        if let Some(snapshot) = handle.snapshot() {
            if snapshot.state == GameState::GameOver {
                break;
            }
            for command in pilot.decide(&snapshot) {
                if !handle.send(command) {
                    break 'run;
                }
            }
        }
        std::thread::sleep(game_loop::TICK_DURATION);
    }

    let last = handle.snapshot();
    handle.shutdown();
    match last {
        Some(snapshot) => print_summary(&snapshot),
        None => Err("game loop produced no snapshot".into()),
    }
}

fn cmd_dump_config() -> Result<(), String> {
    let json = GameConfig::default()
        .to_json_pretty()
        .map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

fn log_milestones(snapshot: &GameStateSnapshot) {
    for note in &snapshot.notifications {
        match note {
            Notification::WaveCleared => info!(
                wave = snapshot.wave.current,
                balance = snapshot.balance,
                "wave cleared"
            ),
            Notification::BarricadeDestroyed => info!(tick = snapshot.time.tick, "barricade down"),
            Notification::GameOver => info!(
                wave = snapshot.wave.current,
                tick = snapshot.time.tick,
                "game over"
            ),
            _ => {}
        }
    }
}

fn print_summary(snapshot: &GameStateSnapshot) -> Result<(), String> {
    let summary = serde_json::json!({
        "state": snapshot.state,
        "tick": snapshot.time.tick,
        "elapsed_secs": snapshot.time.elapsed_secs,
        "wave": snapshot.wave.current,
        "total_waves": snapshot.wave.total,
        "balance": snapshot.balance,
        "barricade_health": snapshot.barricade.as_ref().map(|b| b.health),
        "upgrades": snapshot.upgrades,
    });
    let json = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
