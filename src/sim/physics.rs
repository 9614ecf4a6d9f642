//! Per-tick motion integration

use super::state::{Obstacle, Player};
use crate::consts::{ROTATION_FACTOR, ROTATION_MAX, ROTATION_MIN};

/// Apply gravity then velocity (semi-implicit Euler, one tick)
pub fn integrate_player(player: &mut Player, gravity: f32) {
    player.vel_y += gravity;
    player.pos.y += player.vel_y;
    player.rotation = rotation_for_velocity(player.vel_y);
}

/// Tilt used when drawing the player
#[inline]
pub fn rotation_for_velocity(vel_y: f32) -> f32 {
    (vel_y * ROTATION_FACTOR).clamp(ROTATION_MIN, ROTATION_MAX)
}

/// Scroll every obstacle left by `speed`
pub fn advance_obstacles(obstacles: &mut [Obstacle], speed: f32) {
    for obstacle in obstacles {
        obstacle.x -= speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::GameConfig;
    use proptest::prelude::*;

    #[test]
    fn test_flap_then_fall() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        let y0 = player.pos.y;

        player.flap(-4.2);
        integrate_player(&mut player, 0.12);

        assert!((player.vel_y - -4.08).abs() < 1e-5);
        assert!((player.pos.y - (y0 - 4.08)).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_clamped() {
        assert_eq!(rotation_for_velocity(-100.0), ROTATION_MIN);
        assert_eq!(rotation_for_velocity(100.0), ROTATION_MAX);
        assert!((rotation_for_velocity(5.0) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_obstacles_scroll_left() {
        let mut obstacles = vec![Obstacle::new(1, 400.0, 100.0), Obstacle::new(2, 200.0, 80.0)];
        advance_obstacles(&mut obstacles, 0.8);
        assert!((obstacles[0].x - 399.2).abs() < 1e-4);
        assert!((obstacles[1].x - 199.2).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_integration_law(vel in -10.0f32..10.0, y in 0.0f32..600.0, g in 0.0f32..1.0) {
            let mut player = Player::new(&GameConfig::default());
            player.pos.y = y;
            player.vel_y = vel;

            integrate_player(&mut player, g);

            prop_assert_eq!(player.vel_y, vel + g);
            prop_assert_eq!(player.pos.y, y + (vel + g));
            prop_assert!(player.rotation >= ROTATION_MIN && player.rotation <= ROTATION_MAX);
        }
    }
}
