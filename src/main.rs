//! Flappy Bunny entry point
//!
//! Browser: wires DOM input, WebGPU and audio to the game driver and runs the
//! requestAnimationFrame loop. Native: plays headless autopilot sessions.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy_bunny::audio::AudioManager;
    use flappy_bunny::persistence::{KeyValueStore, LocalStorage, MemoryStore};
    use flappy_bunny::platform::{ActivationSource, is_jump_key};
    use flappy_bunny::renderer::{GpuPresenter, RenderState, ScoreRating, effects};
    use flappy_bunny::sim::GamePhase;
    use flappy_bunny::{GameConfig, Settings};

    type Game = flappy_bunny::Game<Box<dyn KeyValueStore>, AudioManager>;

    /// Everything the frame loop touches
    struct App {
        game: Game,
        presenter: Option<GpuPresenter>,
        settings: Settings,
        /// Phase the HUD was last drawn for
        hud_phase: Option<GamePhase>,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            match self.presenter.as_mut() {
                Some(presenter) => self.game.run_frame(time, presenter),
                None => {
                    self.game.frame(time);
                }
            }
            self.update_hud();
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let snapshot = self.game.snapshot();
            let phase = snapshot.phase;

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&snapshot.score.to_string()));
            }

            // Overlay visibility only changes with the phase
            if self.hud_phase != Some(phase) {
                set_visible(&document, "hud", phase == GamePhase::Playing);
                set_visible(&document, "start-screen", phase == GamePhase::Start);
                set_visible(&document, "game-over", phase == GamePhase::Dead);

                if let Some(el) = document.get_element_by_id("start-best") {
                    if snapshot.best_score > 0 {
                        el.set_text_content(Some(&format!("Best: {}", snapshot.best_score)));
                    } else {
                        el.set_text_content(None);
                    }
                }

                if phase == GamePhase::Dead {
                    if let Some(el) = document.get_element_by_id("final-score") {
                        el.set_text_content(Some(&snapshot.score.to_string()));
                    }
                    if let Some(el) = document.get_element_by_id("final-best") {
                        el.set_text_content(Some(&format!("Best: {}", snapshot.best_score)));
                    }
                    if let Some(el) = document.get_element_by_id("rating") {
                        let rating = ScoreRating::for_score(snapshot.score);
                        el.set_text_content(Some(rating.label()));
                        let _ = el.set_attribute("class", rating.css_class());
                    }
                }
                self.hud_phase = Some(phase);
            }

            // Pulsing prompts
            let alpha = effects::prompt_alpha(snapshot.elapsed_ms).to_string();
            for id in ["start-prompt", "retry-prompt"] {
                if let Some(el) = document
                    .get_element_by_id(id)
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                {
                    let _ = el.style().set_property("opacity", &alpha);
                }
            }
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// LocalStorage when available, otherwise scores only last for this page
    fn open_store() -> Box<dyn KeyValueStore> {
        match LocalStorage::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{} - best score will not persist", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Bunny starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let store = open_store();
        let settings = Settings::load(&*store);
        let audio = AudioManager::new(&settings);
        let config = GameConfig::default();
        let playfield = (config.playfield_width, config.playfield_height);

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(config, seed, store, audio).expect("default config is valid");

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        // Without a device the game still runs; only the canvas stays blank
        let presenter = match RenderState::new(surface, &adapter, width, height, playfield).await {
            Ok(render) => Some(GpuPresenter::new(render, settings.clone(), seed ^ 0x5eed)),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                None
            }
        };

        let app = Rc::new(RefCell::new(App {
            game,
            presenter,
            settings,
            hud_phase: None,
        }));

        setup_input_handlers(&canvas, app.clone());
        setup_resize(&canvas, app.clone());
        setup_auto_pause(app.clone());

        request_animation_frame(app);

        log::info!("Flappy Bunny running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse click
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.activate(ActivationSource::Pointer);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start; suppress the emulated mouse events that would follow
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().game.activate(ActivationSource::Touch);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                let mut a = app.borrow_mut();
                if is_jump_key(&code) {
                    // Keep Space/ArrowUp from scrolling the page
                    event.prevent_default();
                    if !event.repeat() {
                        a.game.activate(ActivationSource::Key);
                    }
                } else if code == "KeyI" {
                    let enabled = !a.game.autopilot();
                    a.game.set_autopilot(enabled);
                } else if code == "KeyM" {
                    let a = &mut *a;
                    a.settings.muted = !a.settings.muted;
                    a.game.apply_settings(&a.settings);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let width = (canvas.client_width() as f64 * dpr) as u32;
            let height = (canvas.client_height() as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(presenter) = app.borrow_mut().presenter.as_mut() {
                presenter.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Drop the time spent in a hidden tab so returning does not jump ahead
    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                app.borrow_mut().game.pause_clock();
                log::info!("Frame clock paused (tab hidden)");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use flappy_bunny::audio::LogAudio;
    use flappy_bunny::persistence::{FileStore, KeyValueStore, MemoryStore};
    use flappy_bunny::platform::ActivationSource;
    use flappy_bunny::renderer::NullPresenter;
    use flappy_bunny::sim::GamePhase;
    use flappy_bunny::{ConfigError, Game, GameConfig};

    /// Fixed refresh used for headless play
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up on a session after ten simulated minutes
    const MAX_TICKS_PER_SESSION: u64 = 60 * 60 * 10;
    const DEFAULT_SESSIONS: u32 = 5;

    /// `FLAPPY_BUNNY_CONFIG`, if set, names a JSON tuning file
    fn load_config() -> Result<GameConfig, ConfigError> {
        match std::env::var("FLAPPY_BUNNY_CONFIG") {
            Ok(path) => {
                let json = std::fs::read_to_string(&path)?;
                log::info!("Loaded config from {}", path);
                GameConfig::from_json(&json)
            }
            Err(_) => Ok(GameConfig::default()),
        }
    }

    /// `FLAPPY_BUNNY_STORE`, if set, names a JSON file that keeps the best score
    fn open_store() -> Box<dyn KeyValueStore> {
        match std::env::var("FLAPPY_BUNNY_STORE") {
            Ok(path) => match FileStore::open(&path) {
                Ok(store) => {
                    log::info!("Using store {}", store.path().display());
                    Box::new(store)
                }
                Err(e) => {
                    log::warn!("Could not open store {}: {} - using memory", path, e);
                    Box::new(MemoryStore::new())
                }
            },
            Err(_) => Box::new(MemoryStore::new()),
        }
    }

    pub fn run() -> Result<(), ConfigError> {
        let sessions = std::env::args()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SESSIONS);
        let seed = std::env::args()
            .nth(2)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0xB0_BB_1E);

        let mut game = Game::new(load_config()?, seed, open_store(), LogAudio)?;
        game.set_autopilot(true);
        let mut presenter = NullPresenter;

        let mut time = 0.0;
        for session in 1..=sessions {
            let start_tick = game.state().time_ticks;
            loop {
                time += FRAME_MS;
                game.run_frame(time, &mut presenter);
                let ticks = game.state().time_ticks - start_tick;
                if game.state().phase == GamePhase::Dead || ticks >= MAX_TICKS_PER_SESSION {
                    break;
                }
            }

            let state = game.state();
            log::info!(
                "Session {}/{}: score {} after {} ticks ({}, best {})",
                session,
                sessions,
                state.score(),
                state.session.ticks,
                if state.phase == GamePhase::Dead { "crashed" } else { "timed out" },
                state.best_score
            );

            // Dead -> start; the autopilot starts the next session itself
            if state.phase == GamePhase::Dead {
                game.activate(ActivationSource::Key);
                time += FRAME_MS;
                game.run_frame(time, &mut presenter);
            } else {
                // Timed out mid-session; the state machine has no abort
                break;
            }
        }

        log::info!("Best score: {}", game.state().best_score);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Flappy Bunny (native, headless) starting...");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
