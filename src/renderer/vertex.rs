//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Arena-space position plus RGBA color
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

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    /// Buffer layout matching `shader.wgsl`
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.529, 0.808, 0.922, 1.0]; // #87CEEB
    pub const GRASS: [f32; 4] = [0.565, 0.933, 0.565, 1.0]; // #90EE90
    pub const HIVE: [f32; 4] = [1.0, 0.843, 0.0, 1.0]; // #FFD700
    pub const HIVE_TRIM: [f32; 4] = [1.0, 0.647, 0.0, 1.0]; // #FFA500
    pub const ENEMY: [f32; 4] = [0.545, 0.271, 0.075, 1.0]; // #8B4513
    pub const WING: [f32; 4] = [0.784, 0.784, 1.0, 0.5];
    pub const HEALTH_BAR_BG: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const HEALTH_BAR_FG: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const PROJECTILE: [f32; 4] = HIVE;
    pub const PROJECTILE_TRIM: [f32; 4] = HIVE_TRIM;
}
