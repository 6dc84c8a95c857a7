//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Fixed per-tick updates only; the single wall-clock input (reload
//!   deadlines) flows through the command queue, never through state
//! - Stable iteration order (entity insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod command;
pub mod state;
pub mod tick;

pub use collision::{fully_outside, hits_on};
pub use command::{Command, CommandQueue, QueuedCommand};
pub use state::{
    Cannonball, Controls, Explosion, GameEvent, GamePhase, GameState, Player, PlayerId, Viewport,
};
pub use tick::{KeySnapshot, RESTART_KEY, TickInput, tick};
