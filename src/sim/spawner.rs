//! Timed obstacle spawning and culling

use rand::Rng;

use super::state::Obstacle;
use crate::consts::{CULL_MARGIN, MIN_GAP_TOP};
use crate::tuning::GameConfig;

/// Accumulates elapsed time and emits an obstacle each interval
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    timer_ms: f32,
    next_id: u32,
}

impl Default for ObstacleSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleSpawner {
    pub fn new() -> Self {
        Self {
            timer_ms: 0.0,
            next_id: 1,
        }
    }

    pub fn timer_ms(&self) -> f32 {
        self.timer_ms
    }

    /// Advance the timer by `dt_ms`; returns a new obstacle when the interval is reached.
    ///
    /// The timer restarts from zero on spawn, any overshoot is dropped.
    pub fn advance<R: Rng>(
        &mut self,
        dt_ms: f32,
        config: &GameConfig,
        rng: &mut R,
    ) -> Option<Obstacle> {
        self.timer_ms += dt_ms;
        if self.timer_ms < config.spawn_interval_ms {
            return None;
        }
        self.timer_ms = 0.0;
        Some(self.spawn(config, rng))
    }

    /// Create an obstacle at the right edge with a random gap
    pub fn spawn<R: Rng>(&mut self, config: &GameConfig, rng: &mut R) -> Obstacle {
        let id = self.next_id;
        self.next_id += 1;

        let (lo, hi) = gap_top_range(config);
        let top_height = if hi > lo { rng.random_range(lo..=hi) } else { lo };

        Obstacle::new(id, config.playfield_width, top_height)
    }
}

/// Inclusive range the gap top is drawn from
pub fn gap_top_range(config: &GameConfig) -> (f32, f32) {
    (MIN_GAP_TOP, config.max_gap_top())
}

/// Drop obstacles whose right edge has scrolled fully off the left side.
/// Returns how many were removed.
pub fn cull_offscreen(obstacles: &mut Vec<Obstacle>) -> usize {
    let before = obstacles.len();
    obstacles.retain(|o| o.right_edge() >= -CULL_MARGIN);
    before - obstacles.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::OBSTACLE_WIDTH;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_on_interval() {
        let config = GameConfig {
            spawn_interval_ms: 100.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(7);
        let mut spawner = ObstacleSpawner::new();

        assert!(spawner.advance(60.0, &config, &mut rng).is_none());
        let obstacle = spawner.advance(40.0, &config, &mut rng).expect("spawn at threshold");
        assert_eq!(obstacle.x, config.playfield_width);
        assert_eq!(obstacle.id, 1);
        assert!(!obstacle.scored);
        assert_eq!(spawner.timer_ms(), 0.0);
    }

    #[test]
    fn test_overshoot_is_discarded() {
        let config = GameConfig {
            spawn_interval_ms: 100.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(7);
        let mut spawner = ObstacleSpawner::new();

        // A single huge delta yields one obstacle, not three
        assert!(spawner.advance(350.0, &config, &mut rng).is_some());
        assert_eq!(spawner.timer_ms(), 0.0);
        assert!(spawner.advance(10.0, &config, &mut rng).is_none());
    }

    #[test]
    fn test_ids_increase() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut spawner = ObstacleSpawner::new();
        let a = spawner.spawn(&config, &mut rng);
        let b = spawner.spawn(&config, &mut rng);
        assert!(b.id > a.id);
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let config = GameConfig::default();
        let mut spawner1 = ObstacleSpawner::new();
        let mut spawner2 = ObstacleSpawner::new();
        let mut rng1 = Pcg32::seed_from_u64(42);
        let mut rng2 = Pcg32::seed_from_u64(42);
        for _ in 0..10 {
            let a = spawner1.spawn(&config, &mut rng1);
            let b = spawner2.spawn(&config, &mut rng2);
            assert_eq!(a.top_height, b.top_height);
        }
    }

    #[test]
    fn test_cull_offscreen() {
        let mut obstacles = vec![
            Obstacle::new(1, -OBSTACLE_WIDTH - CULL_MARGIN - 0.5, 100.0),
            Obstacle::new(2, -OBSTACLE_WIDTH - CULL_MARGIN, 100.0),
            Obstacle::new(3, 200.0, 100.0),
        ];
        assert_eq!(cull_offscreen(&mut obstacles), 1);
        let ids: Vec<u32> = obstacles.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    proptest! {
        #[test]
        fn prop_gap_within_bounds(seed in any::<u64>(), height in 400.0f32..1200.0, gap in 100.0f32..260.0) {
            let config = GameConfig {
                playfield_height: height,
                gap_height: gap,
                ..Default::default()
            };
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut spawner = ObstacleSpawner::new();
            let obstacle = spawner.spawn(&config, &mut rng);

            prop_assert!(obstacle.top_height >= MIN_GAP_TOP);
            prop_assert!(obstacle.top_height <= config.max_gap_top());
            // Both barriers have non-negative height
            prop_assert!(obstacle.gap_bottom(gap) <= height);
        }
    }
}
