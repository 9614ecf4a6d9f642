//! Points for obstacles the player has cleared

use super::state::Obstacle;

/// Flag every unscored obstacle whose right edge is behind `player_x`.
/// Each obstacle contributes at most one point over its lifetime.
pub fn award_points(obstacles: &mut [Obstacle], player_x: f32) -> u32 {
    let mut points = 0;
    for obstacle in obstacles.iter_mut().filter(|o| !o.scored) {
        if obstacle.right_edge() < player_x {
            obstacle.scored = true;
            points += 1;
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::OBSTACLE_WIDTH;
    use proptest::prelude::*;

    #[test]
    fn test_scores_once_when_passed() {
        let mut obstacles = vec![Obstacle::new(1, 80.0 - OBSTACLE_WIDTH, 100.0)];

        // Right edge exactly at player x: not yet passed
        assert_eq!(award_points(&mut obstacles, 80.0), 0);
        assert!(!obstacles[0].scored);

        obstacles[0].x -= 0.8;
        assert_eq!(award_points(&mut obstacles, 80.0), 1);
        assert!(obstacles[0].scored);

        // Idempotent afterwards
        obstacles[0].x -= 0.8;
        assert_eq!(award_points(&mut obstacles, 80.0), 0);
    }

    #[test]
    fn test_multiple_obstacles_same_tick() {
        let mut obstacles = vec![
            Obstacle::new(1, -20.0, 100.0),
            Obstacle::new(2, 0.0, 100.0),
            Obstacle::new(3, 300.0, 100.0),
        ];
        assert_eq!(award_points(&mut obstacles, 80.0), 2);
        assert!(!obstacles[2].scored);
    }

    proptest! {
        #[test]
        fn prop_each_obstacle_scores_at_most_once(xs in prop::collection::vec(-100.0f32..400.0, 0..12), steps in 1usize..400) {
            let mut obstacles: Vec<Obstacle> = xs
                .iter()
                .enumerate()
                .map(|(i, &x)| Obstacle::new(i as u32, x, 100.0))
                .collect();
            let mut total = 0;
            for _ in 0..steps {
                for o in obstacles.iter_mut() {
                    o.x -= 0.8;
                }
                total += award_points(&mut obstacles, 80.0);
            }
            prop_assert!(total as usize <= obstacles.len());
            prop_assert_eq!(total as usize, obstacles.iter().filter(|o| o.scored).count());
            for o in &obstacles {
                prop_assert_eq!(o.scored, o.right_edge() < 80.0);
            }
        }
    }
}
