//! Flappy Bunny - A side-scrolling gap-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `game`: Frame driver tying the simulation to storage and audio
//! - `renderer`: WebGPU rendering pipeline and presentation effects
//! - `platform`: Input latching and frame timing
//! - `persistence`: Key-value storage for the best score and settings
//! - `tuning`: Game configuration

pub mod audio;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::Settings;
pub use tuning::{ConfigError, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Default tuning (per tick, pixels)
    pub const GRAVITY: f32 = 0.12;
    pub const FLAP_IMPULSE: f32 = -4.2;
    pub const GAP_HEIGHT: f32 = 220.0;
    pub const OBSTACLE_SPEED: f32 = 0.8;
    /// Milliseconds between obstacle spawns
    pub const SPAWN_INTERVAL_MS: f32 = 2800.0;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    /// Strip at the bottom of the playfield that counts as floor
    pub const GROUND_HEIGHT: f32 = 25.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 80.0;
    pub const PLAYER_RADIUS: f32 = 16.0;
    /// Rotation is velocity * factor, clamped to [min, max]
    pub const ROTATION_FACTOR: f32 = 0.06;
    pub const ROTATION_MIN: f32 = -0.5;
    pub const ROTATION_MAX: f32 = 1.2;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    /// Lowest allowed gap top
    pub const MIN_GAP_TOP: f32 = 60.0;
    /// Space kept below the gap when choosing its top
    pub const SPAWN_FLOOR_MARGIN: f32 = 80.0;
    /// Horizontal slack added to each obstacle side for collision only
    pub const COLLISION_MARGIN: f32 = 5.0;
    /// Obstacles are dropped once their right edge is this far past x = 0
    pub const CULL_MARGIN: f32 = 10.0;

    /// Longest frame delta fed to the spawner (ms)
    pub const MAX_FRAME_DT_MS: f32 = 250.0;
}
