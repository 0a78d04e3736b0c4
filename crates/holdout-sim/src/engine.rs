//! Simulation engine: owns the ECS world and advances the game one tick at a time.
//!
//! `SimulationEngine` owns the hecs ECS world, the wave scheduler, the game
//! state machine, the ledger and upgrade progression. It processes player
//! commands, runs all systems, and produces `GameStateSnapshot`s. Completely
//! headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use holdout_campaign::{Ledger, UpgradeError, UpgradeProgression, UpgradeReceipt};
use holdout_core::commands::PlayerCommand;
use holdout_core::components::{Player, PlayerStats};
use holdout_core::config::GameConfig;
use holdout_core::enums::{GameState, UpgradeType};
use holdout_core::events::Notification;
use holdout_core::state::GameStateSnapshot;
use holdout_core::types::{EntityId, SimTime};

use crate::flow::{self, FlowTrigger};
use crate::systems;
use crate::systems::combat::{entity_id, CombatError, CombatLog, DamageOutcome};
use crate::systems::wave_spawner::{WaveScheduler, WaveStart};
use crate::world_setup::{self, SpawnError, SpawnRequest};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Static tables for the session.
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: GameConfig,
    seed: u64,
    time: SimTime,
    state: GameState,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    notifications: Vec<Notification>,
    combat_log: CombatLog,
    scheduler: WaveScheduler,
    ledger: Ledger,
    upgrades: UpgradeProgression,
    movement_intent: Vec2,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    /// The arena is populated and the game waits in Ready.
    pub fn new(config: SimConfig) -> Self {
        let game = config.game.sanitized();
        let mut world = World::new();
        world_setup::setup_session(&mut world, &game);

        let mut engine = Self {
            world,
            scheduler: WaveScheduler::new(game.waves.clone()),
            upgrades: UpgradeProgression::new(
                game.upgrades.clone(),
                game.player.min_fire_cooldown_secs,
            ),
            config: game,
            seed: config.seed,
            time: SimTime::default(),
            state: GameState::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            notifications: Vec::new(),
            combat_log: CombatLog::default(),
            ledger: Ledger::default(),
            movement_intent: Vec2::ZERO,
        };
        engine.scheduler.announce(&mut engine.notifications);
        engine
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if matches!(self.state, GameState::WaveInProgress | GameState::UpgradeTime) {
            self.run_systems();
            self.time.advance();
        }

        let notifications = std::mem::take(&mut self.notifications);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.state,
            &self.scheduler,
            self.ledger.balance(),
            &self.upgrades,
            notifications,
        )
    }

    // --- Direct operations ---

    /// Ready → WaveInProgress. Returns false if not in Ready.
    pub fn start_game(&mut self) -> bool {
        self.transition(FlowTrigger::Start)
    }

    /// UpgradeTime → WaveInProgress. Returns false if not in UpgradeTime.
    pub fn start_next_wave(&mut self) -> bool {
        self.transition(FlowTrigger::StartNextWave)
    }

    /// End the session now. Returns false if already over.
    pub fn trigger_game_over(&mut self) -> bool {
        self.transition(FlowTrigger::GameOver)
    }

    /// Restart the current wave from its first spawn without advancing.
    pub fn restart_wave(&mut self) -> bool {
        if self.state != GameState::WaveInProgress {
            return false;
        }
        self.scheduler.restart_wave(&mut self.notifications)
    }

    /// Clear the arena, the economy and the wave sequence, then return to Ready.
    pub fn reset(&mut self) {
        self.world.clear();
        world_setup::setup_session(&mut self.world, &self.config);
        self.time = SimTime::default();
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.scheduler.reset();
        self.scheduler.announce(&mut self.notifications);
        self.upgrades.reset();
        self.combat_log.clear();
        self.despawn_buffer.clear();
        self.movement_intent = Vec2::ZERO;
        if self.ledger.set_balance(0) {
            self.notifications
                .push(Notification::CurrencyChanged { balance: 0 });
        }
        self.transition(FlowTrigger::Reset);
        info!("session reset");
    }

    /// Buy one level of `upgrade`. Only allowed during UpgradeTime.
    pub fn try_upgrade(&mut self, upgrade: UpgradeType) -> Result<UpgradeReceipt, UpgradeError> {
        if self.state != GameState::UpgradeTime {
            return Err(UpgradeError::NotAvailable(self.state));
        }
        let player = self.player_entity().ok_or(UpgradeError::NoPlayer)?;
        let mut stats = self
            .world
            .get::<&mut PlayerStats>(player)
            .map_err(|_| UpgradeError::NoPlayer)?;

        let receipt = self
            .upgrades
            .try_upgrade(upgrade, &mut self.ledger, &mut stats)?;
        drop(stats);

        self.notifications.push(Notification::CurrencyChanged {
            balance: receipt.balance,
        });
        self.notifications.push(Notification::UpgradeUiChanged {
            upgrade,
            level: receipt.new_level,
            next_cost: receipt.next_cost,
        });
        Ok(receipt)
    }

    /// Price of the next level of `upgrade`; `None` at max level or if unknown.
    pub fn upgrade_cost(&self, upgrade: UpgradeType) -> Option<u32> {
        self.upgrades.upgrade_cost(upgrade)
    }

    pub fn upgrade_level(&self, upgrade: UpgradeType) -> u32 {
        self.upgrades.level(upgrade)
    }

    /// Set the player's movement direction. Normalized; non-finite input stops the player.
    pub fn set_movement_intent(&mut self, direction: Vec2) {
        self.movement_intent = if direction.is_finite() {
            direction.normalize_or_zero()
        } else {
            Vec2::ZERO
        };
    }

    /// Place an entity on request of an adapter.
    pub fn spawn(&mut self, request: SpawnRequest) -> Result<EntityId, SpawnError> {
        let entity = world_setup::spawn_from_request(&mut self.world, &self.config, &request)?;
        debug!(category = ?request.category, id = %entity_id(entity), "adapter spawn");
        Ok(entity_id(entity))
    }

    /// Damage an entity directly. Deaths are settled on the next running tick.
    pub fn apply_damage(&mut self, id: EntityId, amount: f32) -> Result<DamageOutcome, CombatError> {
        let Some(entity) = Entity::from_bits(id.0) else {
            if !amount.is_finite() || amount < 0.0 {
                return Err(CombatError::InvalidDamage(amount));
            }
            return Ok(DamageOutcome::Ignored);
        };
        systems::combat::apply_damage(
            &mut self.world,
            entity,
            amount,
            &self.config.coin,
            &mut self.notifications,
            &mut self.combat_log,
        )
    }

    /// Take the notifications emitted since the last tick or drain.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // --- Accessors ---

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn balance(&self) -> u32 {
        self.ledger.balance()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &WaveScheduler {
        &self.scheduler
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Credit coins without a pickup (for tests and tools).
    pub fn grant_coins(&mut self, amount: u32) {
        if self.ledger.credit(amount) {
            self.notifications.push(Notification::CurrencyChanged {
                balance: self.ledger.balance(),
            });
        }
    }

    fn player_entity(&self) -> Option<Entity> {
        self.world
            .query::<&Player>()
            .iter()
            .next()
            .map(|(e, _)| e)
    }

    // --- Commands ---

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => {
                self.start_game();
            }
            PlayerCommand::StartNextWave => {
                self.start_next_wave();
            }
            PlayerCommand::TriggerGameOver => {
                self.trigger_game_over();
            }
            PlayerCommand::Reset => self.reset(),
            PlayerCommand::TryUpgrade { upgrade } => {
                if let Err(err) = self.try_upgrade(upgrade) {
                    warn!(%upgrade, %err, "upgrade rejected");
                }
            }
            PlayerCommand::SetMovement { x, y } => {
                self.set_movement_intent(Vec2::new(x, y));
            }
        }
    }

    // --- State machine ---

    /// Apply `trigger`. Commits the new state, then emits its entry
    /// notifications and runs its entry actions. Returns false if rejected.
    fn transition(&mut self, trigger: FlowTrigger) -> bool {
        let Some(next) = flow::next_state(self.state, trigger) else {
            debug!(state = %self.state, ?trigger, "transition rejected");
            return false;
        };
        let previous = self.state;
        self.state = next;
        info!(from = %previous, to = %next, ?trigger, "state changed");
        self.notifications.extend(flow::entry_notifications(next));

        match next {
            GameState::WaveInProgress => {
                if self.scheduler.start_next_wave(&mut self.notifications) == WaveStart::Exhausted {
                    self.transition(FlowTrigger::SequenceExhausted);
                }
            }
            GameState::UpgradeTime => {
                for view in self.upgrades.views() {
                    self.notifications.push(Notification::UpgradeUiChanged {
                        upgrade: view.upgrade,
                        level: view.level,
                        next_cost: view.next_cost,
                    });
                }
            }
            GameState::GameOver => self.scheduler.cancel(),
            GameState::Ready => {}
        }
        true
    }

    // --- Systems ---

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Movement (player intent, enemies down unless besieging, bullets up)
        systems::movement::run(&mut self.world, self.movement_intent, &self.config.arena);
        // 2. Autonomous fire
        systems::fire_control::run(&mut self.world, &self.config.bullet);
        // 3. Bullet hits and coin pickups
        systems::combat::run(
            &mut self.world,
            &self.config.coin,
            &mut self.ledger,
            &mut self.notifications,
            &mut self.combat_log,
        );
        // 4. Barricade siege
        systems::siege::run(
            &mut self.world,
            &self.config.coin,
            &mut self.notifications,
            &mut self.combat_log,
        );
        // 5. Coin fade and expiry
        systems::coins::run(&mut self.world, &mut self.notifications);
        // 6. Cleanup (dying, consumed, out of bounds)
        systems::cleanup::run(
            &mut self.world,
            &self.config.arena,
            &mut self.despawn_buffer,
            &mut self.notifications,
            &mut self.combat_log,
        );
        // 7. Bookkeeping
        self.settle();
    }

    /// Report deaths to the scheduler, apply the barricade-loss policy,
    /// detect wave clear and advance the spawn timeline.
    fn settle(&mut self) {
        for resolved in self.combat_log.resolved.drain(..) {
            self.scheduler
                .record_enemy_death(resolved.wave, &mut self.notifications);
        }

        if std::mem::take(&mut self.combat_log.barricade_destroyed)
            && self.config.rules.game_over_on_barricade_loss
        {
            self.transition(FlowTrigger::GameOver);
        }

        if self.state == GameState::WaveInProgress && self.scheduler.take_cleared() {
            self.transition(FlowTrigger::WaveCleared);
        }

        if self.state == GameState::WaveInProgress {
            systems::wave_spawner::run(
                &mut self.world,
                &mut self.rng,
                &mut self.scheduler,
                &self.config.arena,
                &self.config.enemy,
            );
        }
    }
}
