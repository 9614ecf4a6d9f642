//! Game state and core simulation types
//!
//! The state machine owns everything here. Presentation only ever sees a
//! borrowed [`GameSnapshot`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawner::ObstacleSpawner;
use crate::consts::*;
use crate::tuning::GameConfig;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first activation
    Start,
    /// Active session
    Playing,
    /// Session over, overlay shown until the next activation
    Dead,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new session began (start -> playing)
    SessionStarted,
    /// Impulse applied during a session
    Flapped,
    ObstacleSpawned { id: u32 },
    /// Score after the increment
    Scored { score: u32 },
    /// Session ended with this score (playing -> dead)
    Collided { score: u32 },
    /// Best score grew to this value
    NewBest { best: u32 },
    /// Dead -> start
    ReturnedToStart,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center position; x never changes
    pub pos: Vec2,
    /// Vertical velocity (positive is down)
    pub vel_y: f32,
    /// Presentation tilt derived from velocity
    pub rotation: f32,
    /// Hitbox radius
    pub radius: f32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, config.start_y()),
            vel_y: 0.0,
            rotation: 0.0,
            radius: PLAYER_RADIUS,
        }
    }

    /// Replace vertical velocity with the flap impulse
    pub fn flap(&mut self, impulse: f32) {
        self.vel_y = impulse;
    }
}

/// A pair of barriers with a gap between them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Height of the top barrier, i.e. where the gap begins
    pub top_height: f32,
    /// Already counted toward the score
    pub scored: bool,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, top_height: f32) -> Self {
        Self {
            id,
            x,
            top_height,
            scored: false,
        }
    }

    /// Right edge, without the collision margin
    pub fn right_edge(&self) -> f32 {
        self.x + OBSTACLE_WIDTH
    }

    /// Where the bottom barrier begins
    pub fn gap_bottom(&self, gap_height: f32) -> f32 {
        self.top_height + gap_height
    }
}

/// Everything scoped to one session. Rebuilt from scratch on start -> playing.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub player: Player,
    /// In creation order, which is also left-to-right
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub spawner: ObstacleSpawner,
    /// Ticks spent playing this session
    pub ticks: u64,
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            player: Player::new(config),
            obstacles: Vec::new(),
            score: 0,
            spawner: ObstacleSpawner::new(),
            ticks: 0,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub phase: GamePhase,
    pub session: GameSession,
    /// Best score across all sessions, including ones from earlier runs
    pub best_score: u32,
    /// Spawner randomness, seeded at creation
    pub rng: Pcg32,
    /// Total ticks since creation
    pub time_ticks: u64,
}

impl GameState {
    /// Create a game on the start screen
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let session = GameSession::new(&config);
        Self {
            config,
            phase: GamePhase::Start,
            session,
            best_score: 0,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
        }
    }

    /// Same as [`GameState::new`] with a previously persisted best score
    pub fn with_best_score(config: GameConfig, seed: u64, best_score: u32) -> Self {
        let mut state = Self::new(config, seed);
        state.best_score = best_score;
        state
    }

    /// Throw away the current session and start a fresh one
    pub fn reset_session(&mut self) {
        self.session = GameSession::new(&self.config);
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn player(&self) -> &Player {
        &self.session.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.session.obstacles
    }
}

/// Read-only view handed to presentation each frame
#[derive(Debug, Clone, Copy)]
pub struct GameSnapshot<'a> {
    pub phase: GamePhase,
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub score: u32,
    pub best_score: u32,
    pub config: &'a GameConfig,
    /// Events produced by the tick that led to this frame
    pub events: &'a [GameEvent],
    /// Driver timestamp for time-based animation (ms)
    pub elapsed_ms: f64,
}

impl<'a> GameSnapshot<'a> {
    pub fn new(state: &'a GameState, events: &'a [GameEvent], elapsed_ms: f64) -> Self {
        Self {
            phase: state.phase,
            player: &state.session.player,
            obstacles: &state.session.obstacles,
            score: state.session.score,
            best_score: state.best_score,
            config: &state.config,
            events,
            elapsed_ms,
        }
    }
}
