//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Same color with a different alpha
pub const fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Colors for game elements
pub mod colors {
    // Sky, top to bottom
    pub const SKY_TOP: [f32; 4] = [0.102, 0.2, 0.333, 1.0];
    pub const SKY_ACCENT: [f32; 4] = [1.0, 0.412, 0.706, 1.0]; // Pink band
    pub const SKY_MID: [f32; 4] = [0.165, 0.29, 0.447, 1.0];
    pub const SKY_LOW: [f32; 4] = [0.114, 0.227, 0.376, 1.0];
    pub const SKY_BOTTOM: [f32; 4] = [0.059, 0.141, 0.251, 1.0];

    pub const CLOUD: [f32; 4] = [1.0, 1.0, 1.0, 0.06];
    pub const WAVE: [f32; 4] = [0.059, 0.157, 0.294, 0.5];
    pub const FOAM: [f32; 4] = [0.784, 0.863, 0.941, 0.08];

    // Dock pilings
    pub const PILING_EDGE: [f32; 4] = [0.102, 0.227, 0.361, 1.0];
    pub const PILING_CENTER: [f32; 4] = [0.165, 0.353, 0.541, 1.0];
    pub const PILING_SHADE: [f32; 4] = [0.078, 0.188, 0.306, 1.0];
    pub const PILING_CAP: [f32; 4] = [0.059, 0.165, 0.282, 1.0];
    pub const ROPE: [f32; 4] = [0.784, 0.659, 0.431, 1.0];
    pub const BARNACLE: [f32; 4] = [0.541, 0.604, 0.667, 1.0];
    pub const GRAIN: [f32; 4] = [1.0, 1.0, 1.0, 0.05];

    // Character
    pub const SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.1];
    pub const NAVY: [f32; 4] = [0.118, 0.227, 0.373, 1.0];
    pub const COLLAR: [f32; 4] = [0.941, 0.925, 0.894, 1.0];
    pub const BUTTON: [f32; 4] = [0.784, 0.753, 0.706, 1.0];
    pub const FUR: [f32; 4] = [0.961, 0.941, 0.918, 1.0];
    pub const INNER_EAR: [f32; 4] = [0.941, 0.863, 0.878, 1.0];
    pub const EYE_WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const IRIS: [f32; 4] = [0.533, 0.596, 0.69, 1.0];
    pub const PUPIL: [f32; 4] = [0.102, 0.102, 0.18, 1.0];
    pub const HIGHLIGHT: [f32; 4] = [1.0, 1.0, 1.0, 0.85];
    pub const NOSE: [f32; 4] = [0.91, 0.471, 0.541, 1.0];
    pub const RING_RED: [f32; 4] = [0.8, 0.2, 0.2, 1.0];

    pub const BUBBLE: [f32; 4] = [0.706, 0.824, 0.941, 0.6];
    pub const BUBBLE_SHINE: [f32; 4] = [1.0, 1.0, 1.0, 0.3];
    pub const SCANLINE: [f32; 4] = [1.0, 1.0, 1.0, 0.03];
    pub const DEAD_OVERLAY: [f32; 4] = [0.02, 0.059, 0.137, 0.65];

    pub const BACKGROUND: [f32; 4] = [0.059, 0.141, 0.251, 1.0];
}
