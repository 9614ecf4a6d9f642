//! Per-frame simulation tick and the start/playing/dead state machine
//!
//! Order within one tick:
//! 1. Pending activation is applied (may change phase)
//! 2. If playing: spawn, integrate, scroll + score + cull, collide
//!
//! Rendering happens after the tick, so it always sees the post-transition state.

use super::collision::{Bounds, check_collision};
use super::state::{GameEvent, GamePhase, GameState};
use super::{physics, scoring, spawner};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// At least one activation (tap/click/jump key) arrived since the last tick
    pub activate: bool,
}

/// Advance the game by one frame. `dt_ms` drives only the spawn timer.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.activate {
        apply_activation(state, &mut events);
    }

    if state.phase == GamePhase::Playing {
        step_playing(state, dt_ms, &mut events);
    }

    state.time_ticks += 1;
    events
}

/// Handle one activation according to the current phase
pub fn apply_activation(state: &mut GameState, events: &mut Vec<GameEvent>) {
    match state.phase {
        GamePhase::Start => {
            state.reset_session();
            state.session.player.flap(state.config.impulse);
            state.phase = GamePhase::Playing;
            log::info!("Session started (best {})", state.best_score);
            events.push(GameEvent::SessionStarted);
        }
        GamePhase::Playing => {
            state.session.player.flap(state.config.impulse);
            events.push(GameEvent::Flapped);
        }
        GamePhase::Dead => {
            state.phase = GamePhase::Start;
            events.push(GameEvent::ReturnedToStart);
        }
    }
}

fn step_playing(state: &mut GameState, dt_ms: f32, events: &mut Vec<GameEvent>) {
    let config = &state.config;
    let session = &mut state.session;
    session.ticks += 1;

    if let Some(obstacle) = session.spawner.advance(dt_ms, config, &mut state.rng) {
        log::debug!(
            "Spawned obstacle {} with gap top {:.1}",
            obstacle.id,
            obstacle.top_height
        );
        events.push(GameEvent::ObstacleSpawned { id: obstacle.id });
        session.obstacles.push(obstacle);
    }

    physics::integrate_player(&mut session.player, config.gravity);
    physics::advance_obstacles(&mut session.obstacles, config.obstacle_speed);

    let points = scoring::award_points(&mut session.obstacles, session.player.pos.x);
    if points > 0 {
        session.score += points;
        events.push(GameEvent::Scored {
            score: session.score,
        });
    }

    spawner::cull_offscreen(&mut session.obstacles);

    let player = &session.player;
    if check_collision(
        player.pos,
        player.radius,
        &session.obstacles,
        config.gap_height,
        &Bounds::from_config(config),
    ) {
        end_session(state, events);
    }
}

/// Playing -> dead. The best score is folded in here and nowhere else.
fn end_session(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let score = state.session.score;
    state.phase = GamePhase::Dead;
    events.push(GameEvent::Collided { score });
    log::info!(
        "Session over after {} ticks with score {}",
        state.session.ticks,
        score
    );

    if score > state.best_score {
        state.best_score = score;
        log::info!("New best score: {}", score);
        events.push(GameEvent::NewBest { best: score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::Obstacle;
    use crate::tuning::GameConfig;
    use proptest::prelude::*;

    const DT: f32 = 1000.0 / 60.0;

    fn activate() -> TickInput {
        TickInput { activate: true }
    }

    fn playing_state() -> GameState {
        let mut state = GameState::new(GameConfig::default(), 12345);
        let mut events = Vec::new();
        apply_activation(&mut state, &mut events);
        state
    }

    #[test]
    fn test_start_to_playing() {
        let mut state = GameState::new(GameConfig::default(), 12345);

        // No input keeps the start screen
        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::Start);

        let events = tick(&mut state, &activate(), DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(events.first(), Some(&GameEvent::SessionStarted));
        // Impulse then one tick of gravity
        assert!((state.player().vel_y - (FLAP_IMPULSE + GRAVITY)).abs() < 1e-5);
    }

    #[test]
    fn test_flap_scenario() {
        let mut state = playing_state();
        let mut events = Vec::new();

        apply_activation(&mut state, &mut events);
        assert_eq!(events, vec![GameEvent::Flapped]);
        assert_eq!(state.player().vel_y, -4.2);

        let y_before = state.player().pos.y;
        tick(&mut state, &TickInput::default(), DT);
        assert!((state.player().vel_y - -4.08).abs() < 1e-5);
        assert!((y_before - state.player().pos.y - 4.08).abs() < 1e-4);
    }

    #[test]
    fn test_free_fall_follows_gravity() {
        let mut state = playing_state();
        for _ in 0..20 {
            let v0 = state.player().vel_y;
            let y0 = state.player().pos.y;
            tick(&mut state, &TickInput::default(), DT);
            if state.phase != GamePhase::Playing {
                break;
            }
            assert_eq!(state.player().vel_y, v0 + GRAVITY);
            assert_eq!(state.player().pos.y, y0 + state.player().vel_y);
        }
    }

    #[test]
    fn test_falls_to_death_and_returns_to_start() {
        let mut state = GameState::new(GameConfig::default(), 1);
        tick(&mut state, &activate(), DT);

        let mut ticks = 0;
        while state.phase == GamePhase::Playing {
            tick(&mut state, &TickInput::default(), DT);
            ticks += 1;
            assert!(ticks < 10_000, "player never hit the floor");
        }
        assert_eq!(state.phase, GamePhase::Dead);

        // Dead stays dead without input
        let frozen_y = state.player().pos.y;
        for _ in 0..5 {
            let events = tick(&mut state, &TickInput::default(), DT);
            assert!(events.is_empty());
        }
        assert_eq!(state.phase, GamePhase::Dead);
        assert_eq!(state.player().pos.y, frozen_y);

        // One activation goes back to the start screen only
        let events = tick(&mut state, &activate(), DT);
        assert_eq!(events, vec![GameEvent::ReturnedToStart]);
        assert_eq!(state.phase, GamePhase::Start);
    }

    #[test]
    fn test_score_resets_on_new_session() {
        let mut state = playing_state();
        state.session.score = 5;
        state.phase = GamePhase::Dead;

        tick(&mut state, &activate(), DT);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.score(), 5);

        tick(&mut state, &activate(), DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_collision_ends_session() {
        let mut state = playing_state();
        // Barrier right on top of the player with a gap far below
        let x = state.player().pos.x;
        state.session.obstacles.push(Obstacle::new(99, x - 10.0, 500.0));

        let events = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::Dead);
        assert!(events.contains(&GameEvent::Collided { score: 0 }));
        // Zero never beats the default best
        assert!(!events.iter().any(|e| matches!(e, GameEvent::NewBest { .. })));
    }

    #[test]
    fn test_best_score_updates_once() {
        let mut state = GameState::with_best_score(GameConfig::default(), 1, 5);
        tick(&mut state, &activate(), DT);
        state.session.score = 7;
        state.session.player.pos.y = -100.0;

        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(events.contains(&GameEvent::NewBest { best: 7 }));
        assert_eq!(state.best_score, 7);

        // Repeated dead ticks never emit again
        for _ in 0..10 {
            assert!(tick(&mut state, &TickInput::default(), DT).is_empty());
        }
        assert_eq!(state.best_score, 7);

        // A worse session leaves the best alone
        tick(&mut state, &activate(), DT);
        tick(&mut state, &activate(), DT);
        state.session.score = 3;
        state.session.player.pos.y = -100.0;
        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(events.contains(&GameEvent::Collided { score: 3 }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::NewBest { .. })));
        assert_eq!(state.best_score, 7);
    }

    #[test]
    fn test_scoring_through_tick() {
        let mut state = playing_state();
        let x = state.player().pos.x;
        // Right edge a hair in front of the player, gap wide open around it
        let top = state.player().pos.y - 100.0;
        state
            .session
            .obstacles
            .push(Obstacle::new(99, x - OBSTACLE_WIDTH + 0.5, top));

        let events = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(events.contains(&GameEvent::Scored { score: 1 }));
        assert_eq!(state.score(), 1);

        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Scored { .. })));
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_spawner_runs_only_while_playing() {
        let config = GameConfig {
            spawn_interval_ms: 30.0,
            ..Default::default()
        };
        let mut state = GameState::new(config, 4);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(state.obstacles().is_empty());

        let events = tick(&mut state, &activate(), DT);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::ObstacleSpawned { .. })));
        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(events.contains(&GameEvent::ObstacleSpawned { id: 1 }));
        assert_eq!(state.obstacles().len(), 1);
        assert_eq!(state.obstacles()[0].x, PLAYFIELD_WIDTH - OBSTACLE_SPEED);
    }

    #[test]
    fn test_determinism() {
        let config = GameConfig {
            spawn_interval_ms: 200.0,
            ..Default::default()
        };
        let mut state1 = GameState::new(config.clone(), 99999);
        let mut state2 = GameState::new(config, 99999);

        for i in 0..300 {
            let input = TickInput {
                activate: i % 25 == 0,
            };
            tick(&mut state1, &input, DT);
            tick(&mut state2, &input, DT);
        }

        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.score(), state2.score());
        assert_eq!(state1.player().pos, state2.player().pos);
        let tops1: Vec<f32> = state1.obstacles().iter().map(|o| o.top_height).collect();
        let tops2: Vec<f32> = state2.obstacles().iter().map(|o| o.top_height).collect();
        assert_eq!(tops1, tops2);
    }

    proptest! {
        #[test]
        fn prop_best_is_max_of_sessions(scores in prop::collection::vec(0u32..50, 1..8), initial in 0u32..20) {
            let mut state = GameState::with_best_score(GameConfig::default(), 3, initial);
            for &score in &scores {
                // Start a session, force its score, then crash into the ceiling
                tick(&mut state, &activate(), DT);
                prop_assert_eq!(state.phase, GamePhase::Playing);
                prop_assert_eq!(state.score(), 0);
                state.session.score = score;
                state.session.player.pos.y = -100.0;
                tick(&mut state, &TickInput::default(), DT);
                prop_assert_eq!(state.phase, GamePhase::Dead);
                tick(&mut state, &activate(), DT);
                prop_assert_eq!(state.phase, GamePhase::Start);
            }
            let expected = scores.iter().copied().max().unwrap_or(0).max(initial);
            prop_assert_eq!(state.best_score, expected);
        }

        #[test]
        fn prop_score_never_decreases(seed in any::<u64>(), flaps in prop::collection::vec(any::<bool>(), 1..600)) {
            let config = GameConfig {
                spawn_interval_ms: 300.0,
                ..Default::default()
            };
            let mut state = GameState::new(config, seed);
            tick(&mut state, &activate(), DT);
            let mut last = 0;
            for flap in flaps {
                if state.phase != GamePhase::Playing {
                    break;
                }
                tick(&mut state, &TickInput { activate: flap }, DT);
                prop_assert!(state.score() >= last);
                last = state.score();
            }
        }
    }
}
