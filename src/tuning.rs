//! Data-driven game tuning
//!
//! Everything here is fixed when a [`Game`](crate::Game) is created. Tests
//! build configs with non-default values to get deterministic scenarios.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a [`GameConfig`] cannot drive a session
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: f32 },
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("gap of {gap} leaves no room for obstacles in a playfield {height} tall")]
    GapTooLarge { gap: f32, height: f32 },
}

/// Simulation tuning. Units are pixels and ticks unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Vertical velocity set on each flap (negative is up)
    pub impulse: f32,
    /// Vertical clearance between top and bottom barriers
    pub gap_height: f32,
    /// Leftward obstacle movement per tick
    pub obstacle_speed: f32,
    /// Time between obstacle spawns in milliseconds
    pub spawn_interval_ms: f32,
    pub playfield_width: f32,
    pub playfield_height: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            impulse: FLAP_IMPULSE,
            gap_height: GAP_HEIGHT,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the spawner can always place a playable gap
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("gravity", self.gravity),
            ("impulse", self.impulse),
            ("gapHeight", self.gap_height),
            ("obstacleSpeed", self.obstacle_speed),
            ("spawnIntervalMs", self.spawn_interval_ms),
            ("playfieldWidth", self.playfield_width),
            ("playfieldHeight", self.playfield_height),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        // Obstacles must drift left to ever be scored or culled
        let positives = &fields[2..];
        for &(field, value) in positives {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.max_gap_top() < MIN_GAP_TOP {
            return Err(ConfigError::GapTooLarge {
                gap: self.gap_height,
                height: self.playfield_height,
            });
        }
        Ok(())
    }

    /// Highest gap top the spawner may choose
    pub fn max_gap_top(&self) -> f32 {
        self.playfield_height - self.gap_height - SPAWN_FLOOR_MARGIN
    }

    /// Y coordinate the player must stay above
    pub fn floor_y(&self) -> f32 {
        self.playfield_height - GROUND_HEIGHT
    }

    /// Player spawn height
    pub fn start_y(&self) -> f32 {
        self.playfield_height / 2.0
    }
}
