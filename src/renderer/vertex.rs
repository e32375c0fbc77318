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

/// Scene palette (same hues as the article's screenshots)
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const GRID: [f32; 4] = [0.31, 0.31, 0.31, 1.0];
    pub const AXES: [f32; 4] = [0.51, 0.51, 0.51, 1.0];
    pub const UNIT_CIRCLE: [f32; 4] = [0.0, 0.89, 0.19, 1.0];
    pub const PLAYER: [f32; 4] = [0.0, 0.47, 0.95, 1.0];
    pub const TARGET: [f32; 4] = [0.9, 0.16, 0.22, 1.0];
    pub const COMPONENTS: [f32; 4] = [1.0, 0.63, 0.0, 1.0];
    pub const LOOK_AT_PLAYER: [f32; 4] = [0.78, 0.48, 1.0, 1.0];
    pub const TO_TARGET: [f32; 4] = [1.0, 0.43, 0.76, 1.0];
    pub const POLAR: [f32; 4] = [0.99, 0.98, 0.0, 1.0];
    pub const ANGLE_ARC: [f32; 4] = [1.0, 1.0, 1.0, 0.85];
    pub const SHAPE_FILL: [f32; 4] = [0.0, 0.47, 0.95, 0.35];
    pub const SHAPE_OUTLINE: [f32; 4] = [0.6, 0.8, 1.0, 1.0];
    pub const LERP_PATH: [f32; 4] = [0.4, 0.9, 0.9, 0.35];
    pub const LERP_MARKER: [f32; 4] = [0.4, 0.9, 0.9, 1.0];

    /// Dot product sign encoding
    pub const DOT_AHEAD: [f32; 4] = [0.2, 0.85, 0.35, 1.0];
    pub const DOT_PERPENDICULAR: [f32; 4] = [0.95, 0.9, 0.5, 1.0];
    pub const DOT_BEHIND: [f32; 4] = [0.95, 0.25, 0.2, 1.0];
}
