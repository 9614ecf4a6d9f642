//! Cosmetic state owned by the presentation layer
//!
//! Particles and glitch bursts react to tick events but never feed back into
//! the simulation. They use their own RNG so visual jitter never disturbs
//! obstacle generation.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{GameEvent, GameSnapshot};

/// Vertical offset of flap bubbles from the player center
const BUBBLE_OFFSET_Y: f32 = 15.0;
const FLAP_BUBBLES: usize = 6;
const DEATH_BUBBLES: usize = 15;

/// Frames of glitch after a flap
pub const FLAP_GLITCH_FRAMES: u32 = 10;
/// Frames of glitch after a crash
pub const DEATH_GLITCH_FRAMES: u32 = 30;
/// Chance per frame of a faint glitch with no trigger
const RANDOM_GLITCH_CHANCE: f64 = 0.01;
const BURST_INTENSITY: f32 = 0.3;
const FLICKER_INTENSITY: f32 = 0.1;

/// A single bubble
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 when spawned, removed at 0
    pub life: f32,
    /// Life lost per frame
    pub decay: f32,
    pub radius: f32,
    /// Drawn as a square instead of a round bubble
    pub glitch: bool,
}

impl Particle {
    fn update(&mut self) {
        self.pos += self.vel;
        self.life -= self.decay;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Glitch burst countdown
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlitchState {
    pub frames_left: u32,
}

impl GlitchState {
    /// Start a burst, never shortening one already running
    pub fn trigger(&mut self, frames: u32) {
        self.frames_left = self.frames_left.max(frames);
    }

    /// Intensity to draw this frame (0 = none). Counts the burst down.
    pub fn next_intensity<R: Rng>(&mut self, rng: &mut R) -> f32 {
        if self.frames_left > 0 {
            self.frames_left -= 1;
            BURST_INTENSITY
        } else if rng.random_bool(RANDOM_GLITCH_CHANCE) {
            FLICKER_INTENSITY
        } else {
            0.0
        }
    }
}

/// All cosmetic state for one presenter
pub struct Effects {
    pub particles: Vec<Particle>,
    pub glitch: GlitchState,
    /// Intensity chosen for the current frame
    pub glitch_intensity: f32,
    /// Whether glitch styling (jitter, square pixels, scanlines) is drawn at all
    pub glitch_enabled: bool,
    pub rng: Pcg32,
}

impl Effects {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            glitch: GlitchState::default(),
            glitch_intensity: 0.0,
            glitch_enabled: true,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// React to the latest tick and advance one frame
    pub fn update(&mut self, snapshot: &GameSnapshot<'_>, particles: bool, glitch: bool) {
        let at = snapshot.player.pos;
        for event in snapshot.events {
            match event {
                GameEvent::SessionStarted => {
                    self.particles.clear();
                    self.glitch = GlitchState::default();
                    self.spawn_bubbles(at + Vec2::new(0.0, BUBBLE_OFFSET_Y));
                }
                GameEvent::Flapped => {
                    self.spawn_bubbles(at + Vec2::new(0.0, BUBBLE_OFFSET_Y));
                    self.glitch.trigger(FLAP_GLITCH_FRAMES);
                }
                GameEvent::Collided { .. } => {
                    self.spawn_death_burst(at);
                    self.glitch.trigger(DEATH_GLITCH_FRAMES);
                }
                _ => {}
            }
        }

        if !particles {
            self.particles.clear();
        }
        for p in &mut self.particles {
            p.update();
        }
        self.particles.retain(Particle::is_alive);

        self.glitch_enabled = glitch;
        self.glitch_intensity = self.glitch.next_intensity(&mut self.rng);
        if !glitch {
            self.glitch_intensity = 0.0;
        }
    }

    /// Small bubbles drifting up from a flap
    pub fn spawn_bubbles(&mut self, at: Vec2) {
        for _ in 0..FLAP_BUBBLES {
            let rng = &mut self.rng;
            self.particles.push(Particle {
                pos: at + Vec2::new(rng.random_range(-8.0..8.0), rng.random_range(-8.0..8.0)),
                vel: Vec2::new(rng.random_range(-1.5..1.5), rng.random_range(-3.0..-1.0)),
                life: 1.0,
                decay: rng.random_range(0.02..0.05),
                radius: rng.random_range(2.0..5.0),
                glitch: rng.random_bool(0.2),
            });
        }
    }

    /// Larger, slower bubbles scattered on a crash
    pub fn spawn_death_burst(&mut self, at: Vec2) {
        for _ in 0..DEATH_BUBBLES {
            let rng = &mut self.rng;
            self.particles.push(Particle {
                pos: at + Vec2::new(rng.random_range(-15.0..15.0), rng.random_range(-15.0..15.0)),
                vel: Vec2::new(rng.random_range(-3.0..3.0), rng.random_range(-4.0..0.0)),
                life: 1.0,
                decay: rng.random_range(0.01..0.03),
                radius: rng.random_range(3.0..7.0),
                glitch: true,
            });
        }
    }

    /// Random offset in [-amount, amount) on both axes
    pub fn jitter(&mut self, amount: f32) -> Vec2 {
        Vec2::new(
            self.rng.random_range(-amount..amount),
            self.rng.random_range(-amount..amount),
        )
    }
}

// === Time-based animation (elapsed milliseconds in, pure values out) ===

/// Vertical bob of the start-screen preview
pub fn bob_offset(elapsed_ms: f64) -> f32 {
    ((elapsed_ms * 0.003).sin() * 10.0) as f32
}

/// Gentle tilt of the start-screen preview
pub fn preview_tilt(elapsed_ms: f64) -> f32 {
    ((elapsed_ms * 0.002).sin() * 0.08) as f32
}

/// Pulse in [0, 1] for prompts
pub fn pulse(elapsed_ms: f64) -> f32 {
    (0.5 + (elapsed_ms * 0.005).sin() * 0.5) as f32
}

/// Prompt opacity in [0.5, 1]
pub fn prompt_alpha(elapsed_ms: f64) -> f32 {
    0.5 + pulse(elapsed_ms) * 0.5
}

/// Cloud drift (px, negative moves left)
pub fn cloud_offset(elapsed_ms: f64) -> f32 {
    (-elapsed_ms * 0.018) as f32
}

/// Wave phase (radians)
pub fn wave_phase(elapsed_ms: f64) -> f32 {
    (elapsed_ms * 0.0012) as f32
}

/// Verdict shown on the game-over overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreRating {
    Legendary,
    Good,
    Rookie,
}

impl ScoreRating {
    pub fn for_score(score: u32) -> Self {
        if score >= 20 {
            Self::Legendary
        } else if score >= 10 {
            Self::Good
        } else {
            Self::Rookie
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Legendary => "BUNNY.EXE",
            Self::Good => "GUD BUNNY",
            Self::Rookie => "LOSER BUNNY",
        }
    }

    /// CSS class used by the HUD
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Legendary => "rating-legendary",
            Self::Good => "rating-good",
            Self::Rookie => "rating-rookie",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, GameState};
    use crate::tuning::GameConfig;

    fn update_with(effects: &mut Effects, events: &[GameEvent]) {
        let state = GameState::new(GameConfig::default(), 1);
        let snapshot = GameSnapshot {
            phase: GamePhase::Playing,
            ..GameSnapshot::new(&state, events, 0.0)
        };
        effects.update(&snapshot, true, true);
    }

    #[test]
    fn test_flap_spawns_bubbles_and_short_glitch() {
        let mut effects = Effects::new(3);
        update_with(&mut effects, &[GameEvent::Flapped]);
        assert_eq!(effects.particles.len(), FLAP_BUBBLES);
        assert_eq!(effects.glitch_intensity, BURST_INTENSITY);
        assert_eq!(effects.glitch.frames_left, FLAP_GLITCH_FRAMES - 1);
        for p in &effects.particles {
            assert!(p.vel.y < -1.0 + 1e-6);
            assert!(p.life < 1.0);
        }
    }

    #[test]
    fn test_death_burst_is_all_glitch() {
        let mut effects = Effects::new(3);
        update_with(&mut effects, &[GameEvent::Collided { score: 2 }]);
        assert_eq!(effects.particles.len(), DEATH_BUBBLES);
        assert!(effects.particles.iter().all(|p| p.glitch));
        assert_eq!(effects.glitch.frames_left, DEATH_GLITCH_FRAMES - 1);
    }

    #[test]
    fn test_session_start_clears_old_particles() {
        let mut effects = Effects::new(3);
        update_with(&mut effects, &[GameEvent::Collided { score: 0 }]);
        update_with(&mut effects, &[GameEvent::SessionStarted]);
        assert_eq!(effects.particles.len(), FLAP_BUBBLES);
        assert_eq!(effects.glitch.frames_left, 0);
    }

    #[test]
    fn test_particles_fade_out() {
        let mut effects = Effects::new(9);
        update_with(&mut effects, &[GameEvent::Flapped]);
        // Slowest decay is 0.02 per frame
        for _ in 0..60 {
            update_with(&mut effects, &[]);
        }
        assert!(effects.particles.is_empty());
    }

    #[test]
    fn test_disabled_effects() {
        let mut effects = Effects::new(3);
        let state = GameState::new(GameConfig::default(), 1);
        let events = [GameEvent::Flapped];
        effects.update(&GameSnapshot::new(&state, &events, 0.0), false, false);
        assert!(effects.particles.is_empty());
        assert_eq!(effects.glitch_intensity, 0.0);
        assert!(!effects.glitch_enabled);

        effects.update(&GameSnapshot::new(&state, &[], 0.0), true, true);
        assert!(effects.glitch_enabled);
    }

    #[test]
    fn test_glitch_burst_counts_down() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut glitch = GlitchState::default();
        glitch.trigger(DEATH_GLITCH_FRAMES);
        glitch.trigger(FLAP_GLITCH_FRAMES);
        for _ in 0..DEATH_GLITCH_FRAMES {
            assert_eq!(glitch.next_intensity(&mut rng), BURST_INTENSITY);
        }
        assert_eq!(glitch.frames_left, 0);
        assert!(glitch.next_intensity(&mut rng) < BURST_INTENSITY);
    }

    #[test]
    fn test_animation_curves() {
        assert_eq!(bob_offset(0.0), 0.0);
        assert_eq!(preview_tilt(0.0), 0.0);
        assert_eq!(pulse(0.0), 0.5);
        assert_eq!(prompt_alpha(0.0), 0.75);
        for t in [0.0, 100.0, 314.0, 1234.5, 99_999.0] {
            assert!(bob_offset(t).abs() <= 10.0);
            assert!(preview_tilt(t).abs() <= 0.08);
            assert!((0.0..=1.0).contains(&pulse(t)));
            assert!((0.5..=1.0).contains(&prompt_alpha(t)));
        }
        // Quarter period of the bob
        let peak = std::f64::consts::FRAC_PI_2 / 0.003;
        assert!((bob_offset(peak) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_score_rating_tiers() {
        assert_eq!(ScoreRating::for_score(0), ScoreRating::Rookie);
        assert_eq!(ScoreRating::for_score(9), ScoreRating::Rookie);
        assert_eq!(ScoreRating::for_score(10), ScoreRating::Good);
        assert_eq!(ScoreRating::for_score(19), ScoreRating::Good);
        assert_eq!(ScoreRating::for_score(20), ScoreRating::Legendary);
        assert_ne!(ScoreRating::Good.label(), ScoreRating::Rookie.label());
    }
}
