//! Audio using the Web Audio API
//!
//! Procedurally generated sound effects, plus an optional `<audio id="backgroundMusic">`
//! element for music.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use super::AudioSink;
use crate::settings::Settings;

/// Log a rejected media promise (autoplay policy, suspended device) instead of
/// leaving it unhandled
fn warn_on_rejection(promise: js_sys::Promise, what: &'static str) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            log::warn!("{} rejected: {:?}", what, e);
        }
    });
}

fn resume(ctx: &AudioContext) {
    match ctx.resume() {
        Ok(promise) => warn_on_rejection(promise, "AudioContext resume"),
        Err(e) => log::warn!("AudioContext resume failed: {:?}", e),
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    music: Option<HtmlAudioElement>,
    sfx_volume: f32,
    music_volume: f32,
    unlocked: bool,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        let music = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("backgroundMusic"))
            .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());
        if music.is_none() {
            log::info!("No background music element");
        }
        Self {
            ctx,
            music,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            unlocked: false,
        }
    }

    /// Play the music from wherever it is
    fn play_music(&self) {
        if let Some(music) = &self.music {
            music.set_volume(self.music_volume as f64);
            match music.play() {
                Ok(promise) => warn_on_rejection(promise, "Background music playback"),
                Err(e) => log::warn!("Background music playback failed: {:?}", e),
            }
        }
    }

    fn restart_music(&self) {
        if let Some(music) = &self.music {
            music.set_current_time(0.0);
        }
        self.play_music();
    }

    fn stop_music(&self) {
        if let Some(music) = &self.music {
            let _ = music.pause();
        }
    }

    /// Context ready for a sound effect, resumed if suspended
    fn ready_ctx(&self) -> Option<&AudioContext> {
        if self.sfx_volume <= 0.0 {
            return None;
        }
        let ctx = self.ctx.as_ref()?;
        if ctx.state() == web_sys::AudioContextState::Suspended {
            resume(ctx);
        }
        Some(ctx)
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Flap - quick rising chirp
    fn play_flap(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();
        let vol = self.sfx_volume;

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(400.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(800.0, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.14).ok();
    }

    /// Crash - descending saw, then a sad little melody
    fn play_game_over(&self, ctx: &AudioContext) {
        let vol = self.sfx_volume;
        if let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sawtooth) {
            let t = ctx.current_time();
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(400.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(80.0, t + 0.4)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }

        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = 0.5 + i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }
}

impl AudioSink for AudioManager {
    fn unlock(&mut self) {
        if self.unlocked {
            return;
        }
        self.unlocked = true;
        if let Some(ctx) = &self.ctx {
            resume(ctx);
        }
        self.play_music();
        log::info!("Audio unlocked");
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_volume = settings.effective_sfx_volume();
        self.music_volume = settings.effective_music_volume();
        if let Some(music) = &self.music {
            music.set_volume(self.music_volume as f64);
        }
        log::info!("Audio {}", if settings.muted { "muted" } else { "unmuted" });
    }

    fn on_flap(&mut self) {
        if let Some(ctx) = self.ready_ctx() {
            self.play_flap(ctx);
        }
    }

    fn on_collide(&mut self) {
        self.stop_music();
        if let Some(ctx) = self.ready_ctx() {
            self.play_game_over(ctx);
        }
    }

    fn on_session_start(&mut self) {
        if let Some(ctx) = self.ready_ctx() {
            self.play_flap(ctx);
        }
        self.restart_music();
    }
}
