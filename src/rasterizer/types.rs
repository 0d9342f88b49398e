//! Core types for the rasterizer

use super::math::Vec3;
use serde::{Deserialize, Serialize};

/// RGB color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from normalized channel values (0.0-1.0), as glTF materials use
    pub fn from_f32(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: (r.clamp(0.0, 1.0) * 255.0) as u8,
            g: (g.clamp(0.0, 1.0) * 255.0) as u8,
            b: (b.clamp(0.0, 1.0) * 255.0) as u8,
        }
    }

    /// Apply shading (multiply by intensity 0.0-1.0)
    pub fn shade(self, intensity: f32) -> Self {
        let i = intensity.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * i) as u8,
            g: (self.g as f32 * i) as u8,
            b: (self.b as f32 * i) as u8,
        }
    }

    /// Interpolate between two colors
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;
        Self {
            r: (self.r as f32 * inv_t + other.r as f32 * t) as u8,
            g: (self.g as f32 * inv_t + other.g as f32 * t) as u8,
            b: (self.b as f32 * inv_t + other.b as f32 * t) as u8,
        }
    }

    /// Convert to [u8; 4] RGBA for the framebuffer
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// A vertex with position and normal
#[derive(Debug, Clone, Copy, Default)]
pub struct Vertex {
    pub pos: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(pos: Vec3, normal: Vec3) -> Self {
        Self { pos, normal }
    }
}

/// A triangle face (indices into a vertex array)
#[derive(Debug, Clone, Copy)]
pub struct Face {
    pub v0: usize,
    pub v1: usize,
    pub v2: usize,
}

impl Face {
    pub fn new(v0: usize, v1: usize, v2: usize) -> Self {
        Self { v0, v1, v2 }
    }
}

/// Shading mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingMode {
    /// No lighting, raw material color
    Unlit,
    /// One light calculation per face
    Flat,
    /// Per-vertex lighting interpolated across the face
    Gouraud,
}

/// Which faces to discard, based on screen-space winding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    /// Discard back faces (normal solid rendering)
    Back,
    /// Discard front faces, draw back faces (selection outline pass)
    Front,
    /// Draw both sides
    None,
}

/// Infinite directional light
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub direction: Vec3,
    pub intensity: f32,
}

impl Light {
    pub fn directional(direction: Vec3, intensity: f32) -> Self {
        Self {
            direction: direction.normalize(),
            intensity,
        }
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::directional(Vec3::new(-1.0, -1.0, -1.0), 0.7)
    }
}

/// Rasterizer settings
#[derive(Debug, Clone)]
pub struct RasterSettings {
    /// Test and write the z-buffer (the outline pass turns this off)
    pub depth_test: bool,
    /// Face culling mode
    pub cull: CullMode,
    /// Shading mode
    pub shading: ShadingMode,
    /// Scene light
    pub light: Light,
    /// Ambient light intensity (0.0-1.0)
    pub ambient: f32,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            depth_test: true,
            cull: CullMode::Back,
            shading: ShadingMode::Gouraud,
            light: Light::default(),
            ambient: 0.3,
        }
    }
}
