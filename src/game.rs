//! Frame driver
//!
//! [`Game`] is what a platform loop talks to. It owns the simulation state,
//! latches input between frames, and turns tick events into audio cues and
//! best-score writes. Rendering is left to the caller through [`Presenter`].

use crate::audio::{AudioCue, AudioSink};
use crate::persistence::{KeyValueStore, load_best_score, save_best_score};
use crate::platform::{ActivationLatch, ActivationSource, FirstInteraction, FrameClock};
use crate::renderer::Presenter;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameSnapshot, GameState, TickInput, autopilot, tick};
use crate::tuning::{ConfigError, GameConfig};

pub struct Game<S: KeyValueStore, A: AudioSink> {
    state: GameState,
    input: ActivationLatch,
    first_interaction: FirstInteraction,
    clock: FrameClock,
    store: S,
    audio: A,
    autopilot: bool,
    /// Events from the most recent tick
    events: Vec<GameEvent>,
    /// Timestamp of the most recent frame (ms)
    elapsed_ms: f64,
}

impl<S: KeyValueStore, A: AudioSink> Game<S, A> {
    /// Validate `config`, read the best score from `store`, and sit on the start screen
    pub fn new(config: GameConfig, seed: u64, store: S, audio: A) -> Result<Self, ConfigError> {
        config.validate()?;
        let best = load_best_score(&store);
        log::info!("Game initialized with seed {} (best {})", seed, best);
        Ok(Self {
            state: GameState::with_best_score(config, seed, best),
            input: ActivationLatch::new(),
            first_interaction: FirstInteraction::new(),
            clock: FrameClock::new(),
            store,
            audio,
            autopilot: false,
            events: Vec::new(),
            elapsed_ms: 0.0,
        })
    }

    /// Record an activation. Takes effect at the next frame; several
    /// activations before then count once.
    pub fn activate(&mut self, source: ActivationSource) {
        if self.first_interaction.consume() {
            self.audio.unlock();
        }
        self.input.activate(source);
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.autopilot != enabled {
            log::info!("Autopilot {}", if enabled { "on" } else { "off" });
        }
        self.autopilot = enabled;
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Advance one display refresh at `timestamp_ms`
    pub fn frame(&mut self, timestamp_ms: f64) -> GameSnapshot<'_> {
        let dt_ms = self.clock.advance(timestamp_ms);
        self.elapsed_ms = timestamp_ms;
        self.advance(dt_ms);
        self.snapshot()
    }

    /// Advance one tick with an explicit delta
    pub fn step(&mut self, dt_ms: f32) -> GameSnapshot<'_> {
        self.elapsed_ms += dt_ms as f64;
        self.advance(dt_ms);
        self.snapshot()
    }

    /// Advance one refresh and hand the result to `presenter`
    pub fn run_frame<P: Presenter + ?Sized>(&mut self, timestamp_ms: f64, presenter: &mut P) {
        let snapshot = self.frame(timestamp_ms);
        presenter.draw_frame(&snapshot);
    }

    /// Forget the last refresh timestamp, e.g. when the page was hidden.
    /// The next frame then advances by zero instead of the time spent away.
    pub fn pause_clock(&mut self) {
        self.clock.reset();
    }

    /// Persist changed settings and hand them to audio. A failed write is
    /// logged; the new settings still apply for this run.
    pub fn apply_settings(&mut self, settings: &Settings) {
        if let Err(e) = settings.save(&mut self.store) {
            log::warn!("Could not persist settings: {}", e);
        }
        self.audio.apply_settings(settings);
    }

    fn advance(&mut self, dt_ms: f32) {
        if self.autopilot && autopilot::wants_activation(&self.state) {
            self.input.activate(ActivationSource::Autopilot);
        }
        let input = TickInput {
            activate: self.input.take(),
        };

        self.events = tick(&mut self.state, &input, dt_ms);
        self.dispatch();
    }

    fn dispatch(&mut self) {
        for event in &self.events {
            if let Some(cue) = AudioCue::for_event(event) {
                self.audio.play(cue);
            }
            if let GameEvent::NewBest { best } = *event {
                // Written the moment it changes; a failed write never ends the session
                if let Err(e) = save_best_score(&mut self.store, best) {
                    log::warn!("Could not persist best score {}: {}", best, e);
                }
            }
        }
    }

    pub fn snapshot(&self) -> GameSnapshot<'_> {
        GameSnapshot::new(&self.state, &self.events, self.elapsed_ms)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Events produced by the most recent tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }
}
