//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state. All state lives in components, except the wave
//! scheduler, which the engine owns and passes in.

pub mod cleanup;
pub mod coins;
pub mod combat;
pub mod fire_control;
pub mod movement;
pub mod siege;
pub mod snapshot;
pub mod wave_spawner;
