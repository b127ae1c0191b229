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

/// Colors for game elements
pub mod colors {
    pub const SKY_TOP: [f32; 4] = [0.53, 0.81, 0.92, 1.0]; // #87CEEB
    pub const SKY_BOTTOM: [f32; 4] = [0.88, 0.96, 1.0, 1.0]; // #E0F6FF
    pub const BUBBLE: [f32; 4] = [1.0, 1.0, 1.0, 0.5];
    pub const GROUND: [f32; 4] = [0.545, 0.27, 0.075, 1.0]; // #8B4513
    pub const PIPE: [f32; 4] = [0.0, 0.667, 0.0, 1.0]; // #00AA00
    pub const PIPE_CAP: [f32; 4] = [0.0, 0.533, 0.0, 1.0]; // #008800
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
    pub const BUTTON: [f32; 4] = [0.3, 0.69, 0.31, 1.0]; // #4CAF50
    pub const SHOP_SELECTED: [f32; 4] = [0.95, 0.77, 0.2, 1.0];
    pub const SHOP_LOCKED: [f32; 4] = [0.45, 0.5, 0.6, 1.0];
    pub const SHOP_UNAFFORDABLE: [f32; 4] = [0.3, 0.3, 0.33, 1.0];
    pub const EYE: [f32; 4] = [0.1, 0.1, 0.1, 1.0];

    /// Body color per skin, indexed like `shop::SKINS`
    pub const SKIN: [[f32; 4]; 5] = [
        [1.0, 0.8, 0.3, 1.0],
        [1.0, 0.65, 0.2, 1.0],
        [0.95, 0.9, 0.4, 1.0],
        [1.0, 0.55, 0.65, 1.0],
        [0.85, 0.6, 1.0, 1.0],
    ];

    /// Food color per variant, indexed like `shop::FOOD_GLYPHS`
    pub const FOOD: [[f32; 4]; 4] = [
        [0.35, 0.6, 0.95, 1.0],
        [0.8, 0.45, 0.2, 1.0],
        [1.0, 0.85, 0.25, 1.0],
        [0.97, 0.97, 0.97, 1.0],
    ];
}
