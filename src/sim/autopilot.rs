//! Demo mode: decides when to activate so the game plays itself

use super::state::{GamePhase, GameState, Obstacle};
use crate::consts::COLLISION_MARGIN;

/// How far below the aim point the player may sink before flapping
const SINK_TOLERANCE: f32 = 20.0;

/// The first obstacle the player has not fully cleared yet
pub fn next_obstacle(state: &GameState) -> Option<&Obstacle> {
    let player = state.player();
    state
        .obstacles()
        .iter()
        .find(|o| o.right_edge() + COLLISION_MARGIN > player.pos.x - player.radius)
}

/// Height the autopilot tries to hold
pub fn aim_y(state: &GameState) -> f32 {
    match next_obstacle(state) {
        Some(obstacle) => obstacle.top_height + state.config.gap_height / 2.0,
        None => state.config.start_y(),
    }
}

/// Whether an activation should be synthesised this tick.
///
/// Starts sessions from the start screen but never leaves the dead screen;
/// callers decide when to restart.
pub fn wants_activation(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Start => true,
        GamePhase::Dead => false,
        GamePhase::Playing => {
            let player = state.player();
            player.vel_y >= 0.0 && player.pos.y > aim_y(state) + SINK_TOLERANCE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::{TickInput, tick};
    use crate::tuning::GameConfig;

    const DT: f32 = 1000.0 / 60.0;

    #[test]
    fn test_starts_from_start_screen() {
        let state = GameState::new(GameConfig::default(), 1);
        assert!(wants_activation(&state));
    }

    #[test]
    fn test_aims_for_gap_center() {
        let mut state = GameState::new(GameConfig::default(), 1);
        state.phase = GamePhase::Playing;
        state.session.obstacles.push(Obstacle::new(1, 300.0, 100.0));
        assert_eq!(aim_y(&state), 100.0 + state.config.gap_height / 2.0);

        state.session.player.pos.y = 260.0;
        state.session.player.vel_y = 1.0;
        assert!(wants_activation(&state));

        // Rising already
        state.session.player.vel_y = -1.0;
        assert!(!wants_activation(&state));
    }

    #[test]
    fn test_skips_cleared_obstacles() {
        let mut state = GameState::new(GameConfig::default(), 1);
        state.session.obstacles.push(Obstacle::new(1, -50.0, 60.0));
        state.session.obstacles.push(Obstacle::new(2, 300.0, 200.0));
        assert_eq!(next_obstacle(&state).map(|o| o.id), Some(2));
    }

    #[test]
    fn test_survives_open_sky() {
        // No obstacles ever spawn; the autopilot alone must keep the player airborne
        let config = GameConfig {
            spawn_interval_ms: 1.0e9,
            ..Default::default()
        };
        let mut state = GameState::new(config, 5);
        for _ in 0..2000 {
            let input = TickInput {
                activate: wants_activation(&state),
            };
            tick(&mut state, &input, DT);
        }
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
