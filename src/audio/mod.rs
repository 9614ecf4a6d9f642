//! Audio cues
//!
//! The simulation never talks to audio directly. The [`Game`](crate::Game)
//! driver maps tick events to the three cues below. Implementations swallow
//! their own failures; a blocked or missing audio device is never an error.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Discrete sounds the game can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Impulse during a session
    Flap,
    /// Session ended
    Collide,
    /// New session began
    SessionStart,
}

impl AudioCue {
    /// Cue for a tick event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flapped => Some(AudioCue::Flap),
            GameEvent::Collided { .. } => Some(AudioCue::Collide),
            GameEvent::SessionStarted => Some(AudioCue::SessionStart),
            _ => None,
        }
    }
}

/// Fire-and-forget sound output
pub trait AudioSink {
    fn on_flap(&mut self);
    fn on_collide(&mut self);
    fn on_session_start(&mut self);

    /// Called once, after the first user interaction. Browsers refuse to
    /// start audio before one.
    fn unlock(&mut self) {}

    /// Pick up changed volume or mute settings
    fn apply_settings(&mut self, _settings: &Settings) {}

    fn play(&mut self, cue: AudioCue) {
        match cue {
            AudioCue::Flap => self.on_flap(),
            AudioCue::Collide => self.on_collide(),
            AudioCue::SessionStart => self.on_session_start(),
        }
    }
}

/// Logs cues instead of playing them (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn on_flap(&mut self) {
        log::trace!("cue: flap");
    }

    fn on_collide(&mut self) {
        log::debug!("cue: collide");
    }

    fn on_session_start(&mut self) {
        log::debug!("cue: session start");
    }
}
