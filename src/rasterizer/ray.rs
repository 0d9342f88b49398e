//! Ray casting for 3D picking
//!
//! Inverts the forward projection in math.rs so screen coordinates can be
//! converted back to world-space rays.

use super::camera::Camera;
use super::math::{Vec3, VIEW_DISTANCE, VIEW_SCALE};

/// A 3D ray with origin and normalized direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get point at distance t along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Generate a world-space ray through a screen pixel.
///
/// The projection maps camera space to screen as
/// `screen = cam_xy * (D - 1) / (cam_z + D) * vs + center`, so the set of
/// points projecting to one pixel is a line that crosses the z = 0 camera
/// plane at `ndc * D / (D - 1)`, not at the camera origin. The ray origin
/// carries that offset so the inversion is exact.
pub fn screen_to_ray(
    screen_x: f32,
    screen_y: f32,
    screen_width: usize,
    screen_height: usize,
    camera: &Camera,
) -> Ray {
    let vs = (screen_width.min(screen_height) as f32 / 2.0) * VIEW_SCALE;
    let us = VIEW_DISTANCE - 1.0;

    // Screen coords to normalized coords
    let ndc_x = (screen_x - screen_width as f32 / 2.0) / vs;
    let ndc_y = (screen_y - screen_height as f32 / 2.0) / vs;

    // Camera-space line through this pixel:
    //   at z = 0: (ndc * D / us, 0)
    //   direction per unit z: (ndc / us, 1)
    let origin_offset_x = ndc_x * VIEW_DISTANCE / us;
    let origin_offset_y = ndc_y * VIEW_DISTANCE / us;
    let cam_space_dir = Vec3::new(ndc_x / us, ndc_y / us, 1.0);

    // Transform origin offset and direction from camera space to world space
    let world_origin = camera.position
        + camera.basis_x * origin_offset_x
        + camera.basis_y * origin_offset_y;
    let world_dir = Vec3::new(
        cam_space_dir.x * camera.basis_x.x + cam_space_dir.y * camera.basis_y.x + cam_space_dir.z * camera.basis_z.x,
        cam_space_dir.x * camera.basis_x.y + cam_space_dir.y * camera.basis_y.y + cam_space_dir.z * camera.basis_z.y,
        cam_space_dir.x * camera.basis_x.z + cam_space_dir.y * camera.basis_y.z + cam_space_dir.z * camera.basis_z.z,
    );

    Ray::new(world_origin, world_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::math::{perspective_transform, project};

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let p = ray.at(5.0);
        assert!((p.x - 5.0).abs() < 0.001);
        assert!((p.y - 0.0).abs() < 0.001);
        assert!((p.z - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_screen_to_ray_center() {
        // A ray from the screen center goes straight along the view direction
        let mut camera = Camera::new();
        camera.position = Vec3::new(0.0, 5.0, -20.0);
        camera.update_basis();

        let width = 320usize;
        let height = 240usize;

        let ray = screen_to_ray(width as f32 / 2.0, height as f32 / 2.0, width, height, &camera);

        let dot = ray.direction.dot(camera.basis_z);
        assert!(dot > 0.999, "center ray should align with camera forward, got dot={}", dot);
        assert!((ray.origin - camera.position).len() < 0.001);
    }

    #[test]
    fn test_screen_to_ray_roundtrip() {
        // screen_to_ray must invert the forward projection
        let mut camera = Camera::new();
        camera.position = Vec3::new(1.0, -2.0, -10.0);
        camera.rotation_y = 0.3;
        camera.rotation_x = -0.2;
        camera.update_basis();

        let width = 320usize;
        let height = 240usize;

        let world_point = Vec3::new(2.5, 1.0, 4.0);

        // Forward: project the point to screen
        let rel = world_point - camera.position;
        let cam_space = perspective_transform(rel, camera.basis_x, camera.basis_y, camera.basis_z);
        assert!(cam_space.z > 0.0, "point must be in front of camera");
        let screen = project(cam_space, width, height);

        // Inverse: cast a ray through that pixel
        let ray = screen_to_ray(screen.x, screen.y, width, height, &camera);

        // The ray should pass through the world point
        let to_point = world_point - ray.origin;
        let t = to_point.dot(ray.direction);
        let closest_on_ray = ray.at(t);
        let distance = (closest_on_ray - world_point).len();

        assert!(distance < 0.01, "ray should pass through the point, got distance {}", distance);
    }
}
