//! Software rasterizer behind the viewer viewport
//!
//! # Module Organization
//!
//! - `types` - Color, Vertex, Face, Light, RasterSettings
//! - `math` - Vec3, projection, rotation, ray-triangle intersection
//! - `camera` - Orbit camera with orthonormal basis
//! - `render` - Framebuffer and mesh rendering
//! - `ray` - Screen-to-world ray casting for picking

#![allow(dead_code)]

pub mod camera;
pub mod math;
pub mod ray;
pub mod render;
pub mod types;

// Convenience re-exports for commonly used items

pub use types::{Color, CullMode, Face, Light, RasterSettings, ShadingMode, Vertex};

pub use math::{
    mat4_identity, mat4_mul, mat4_transform_dir, mat4_transform_point, perspective_transform,
    project, ray_triangle_intersect, rotate_zyx, Mat4, Vec3,
};

pub use camera::Camera;

pub use render::{render_mesh, Framebuffer};

pub use ray::{screen_to_ray, Ray};
