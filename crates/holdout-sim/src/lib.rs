//! Simulation engine for HOLDOUT.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for adapters.

pub mod engine;
pub mod flow;
pub mod systems;
pub mod world_setup;

pub use holdout_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use systems::combat::{CombatError, DamageOutcome};
pub use world_setup::{AttributeOverrides, SpawnError, SpawnRequest};
