//! WebGPU rendering module
//!
//! The scene is rebuilt as a flat triangle list every frame from a
//! [`GameSnapshot`]; text lives in the DOM HUD instead.

pub mod effects;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use effects::{Effects, ScoreRating};
pub use pipeline::{RenderState, Viewport};
pub use vertex::Vertex;

use crate::settings::Settings;
use crate::sim::GameSnapshot;

/// Anything that can show a frame. Called once per tick, after the tick.
pub trait Presenter {
    fn draw_frame(&mut self, snapshot: &GameSnapshot<'_>);
}

/// Draws nothing; for headless runs
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn draw_frame(&mut self, _snapshot: &GameSnapshot<'_>) {}
}

/// Presenter backed by a GPU surface
pub struct GpuPresenter {
    render: RenderState,
    effects: Effects,
    settings: Settings,
}

impl GpuPresenter {
    pub fn new(render: RenderState, settings: Settings, seed: u64) -> Self {
        Self {
            render,
            effects: Effects::new(seed),
            settings,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.render.resize(width, height);
    }
}

impl Presenter for GpuPresenter {
    fn draw_frame(&mut self, snapshot: &GameSnapshot<'_>) {
        self.effects.update(
            snapshot,
            self.settings.particles,
            self.settings.effective_glitch(),
        );
        let vertices = scene::build(snapshot, &mut self.effects);

        match self.render.render(&vertices) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => {
                let (w, h) = self.render.size;
                self.render.resize(w, h);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}
