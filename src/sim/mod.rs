//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through the delta passed to `tick`
//! - Seeded RNG only
//! - Obstacles kept in creation order
//! - No rendering, audio, storage or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod physics;
pub mod scoring;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Bounds, check_collision};
pub use spawner::ObstacleSpawner;
pub use state::{GameEvent, GamePhase, GameSession, GameSnapshot, GameState, Obstacle, Player};
pub use tick::{TickInput, apply_activation, tick};
