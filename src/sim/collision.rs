//! Collision detection between the player and the playfield
//!
//! Pure functions only: nothing here mutates state or touches rendering.
//! Every comparison is strict, so a player exactly tangent to a barrier or
//! to the ceiling/floor is not colliding.

use glam::Vec2;

use super::state::Obstacle;
use crate::consts::{COLLISION_MARGIN, OBSTACLE_WIDTH};
use crate::tuning::GameConfig;

/// Vertical limits of the playfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Top of the playfield (y = 0)
    pub ceiling: f32,
    /// Top of the ground strip
    pub floor: f32,
}

impl Bounds {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            ceiling: 0.0,
            floor: config.floor_y(),
        }
    }
}

/// Player left the playfield vertically
#[inline]
pub fn hits_bounds(y: f32, radius: f32, bounds: &Bounds) -> bool {
    y - radius < bounds.ceiling || y + radius > bounds.floor
}

/// Player's horizontal extent overlaps the obstacle widened by the collision margin
#[inline]
pub fn overlaps_horizontally(x: f32, radius: f32, obstacle: &Obstacle) -> bool {
    x + radius > obstacle.x - COLLISION_MARGIN
        && x - radius < obstacle.x + OBSTACLE_WIDTH + COLLISION_MARGIN
}

/// Player touches the top or bottom barrier of one obstacle
pub fn hits_obstacle(pos: Vec2, radius: f32, obstacle: &Obstacle, gap_height: f32) -> bool {
    if !overlaps_horizontally(pos.x, radius, obstacle) {
        return false;
    }
    pos.y - radius < obstacle.top_height || pos.y + radius > obstacle.gap_bottom(gap_height)
}

/// True if the player is touching the ceiling, the floor, or any barrier
pub fn check_collision(
    pos: Vec2,
    radius: f32,
    obstacles: &[Obstacle],
    gap_height: f32,
    bounds: &Bounds,
) -> bool {
    hits_bounds(pos.y, radius, bounds)
        || obstacles
            .iter()
            .any(|obstacle| hits_obstacle(pos, radius, obstacle, gap_height))
}
