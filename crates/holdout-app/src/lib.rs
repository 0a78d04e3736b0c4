//! HOLDOUT headless runner.
//!
//! This crate wires together the simulation crates and drives them either
//! as fast as possible or paced in real time on a dedicated thread.

pub mod autopilot;
pub mod game_loop;
pub mod state;

pub use holdout_core as core;
