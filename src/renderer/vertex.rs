//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

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

    /// Byte stride of one vertex in an interleaved buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Opaque RGBA from an RGB triple
pub fn rgba(rgb: Vec3) -> [f32; 4] {
    [rgb.x, rgb.y, rgb.z, 1.0]
}

/// Colors for screen elements that are not tied to a sprite
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const MENU_BAR: [f32; 4] = [0.15, 0.15, 0.2, 1.0];
    pub const INDICATOR_ON: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const INDICATOR_OFF: [f32; 4] = [0.3, 0.3, 0.3, 1.0];
    pub const PAUSE_SHADE: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
}
