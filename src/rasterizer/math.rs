//! Vector math and projection for the software renderer

use std::ops::{Add, Mul, Sub};

/// View distance used by the perspective projection.
pub const VIEW_DISTANCE: f32 = 5.0;

/// Screen scale factor applied after the perspective divide.
pub const VIEW_SCALE: f32 = 0.75;

/// Camera-space depth below which triangles are rejected.
pub const NEAR_PLANE: f32 = 0.1;

/// 3D vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        Vec3 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Component-wise minimum
    pub fn min(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z),
        }
    }

    /// Component-wise maximum
    pub fn max(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z),
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

/// Transform a vector by camera basis vectors (world space to camera space)
pub fn perspective_transform(v: Vec3, cam_x: Vec3, cam_y: Vec3, cam_z: Vec3) -> Vec3 {
    Vec3 {
        x: v.dot(cam_x),
        y: v.dot(cam_y),
        z: v.dot(cam_z),
    }
}

/// Project a camera-space point to screen coordinates.
/// Returns Vec3 where x,y are pixel coordinates and z is the camera-space
/// depth, kept for perspective-correct interpolation in the rasterizer.
pub fn project(v: Vec3, width: usize, height: usize) -> Vec3 {
    let ud = VIEW_DISTANCE;
    let us = ud - 1.0;
    let vs = (width.min(height) as f32 / 2.0) * VIEW_SCALE;

    let denom = v.z + ud;
    if denom.abs() < 0.001 {
        return Vec3::new(width as f32 / 2.0, height as f32 / 2.0, v.z);
    }

    Vec3 {
        x: (v.x * us / denom) * vs + (width as f32 / 2.0),
        y: (v.y * us / denom) * vs + (height as f32 / 2.0),
        z: v.z,
    }
}

/// Rotate a vector by per-axis Euler angles (radians), applied Z * Y * X.
pub fn rotate_zyx(v: Vec3, rot: Vec3) -> Vec3 {
    let (sx, cx) = rot.x.sin_cos();
    let (sy, cy) = rot.y.sin_cos();
    let (sz, cz) = rot.z.sin_cos();

    Vec3 {
        x: (cy * cz) * v.x + (sx * sy * cz - cx * sz) * v.y + (cx * sy * cz + sx * sz) * v.z,
        y: (cy * sz) * v.x + (sx * sy * sz + cx * cz) * v.y + (cx * sy * sz - sx * cz) * v.z,
        z: (-sy) * v.x + (sx * cy) * v.y + (cx * cy) * v.z,
    }
}

/// Ray-triangle intersection using the Moller-Trumbore algorithm.
/// Returns Some(t) if the ray hits, where t is the distance along the ray.
pub fn ray_triangle_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<f32> {
    const EPSILON: f32 = 0.0000001;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray_dir.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray_origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray_dir.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// 4x4 transformation matrix, row-major with translation in the last column
pub type Mat4 = [[f32; 4]; 4];

pub fn mat4_identity() -> Mat4 {
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Multiply two 4x4 matrices
pub fn mat4_mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut result = [[0.0; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

/// Transform a point by a 4x4 matrix
pub fn mat4_transform_point(m: &Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z + m[0][3],
        m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z + m[1][3],
        m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z + m[2][3],
    )
}

/// Transform a direction by the linear part of a 4x4 matrix, ignoring translation
pub fn mat4_transform_dir(m: &Mat4, d: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * d.x + m[0][1] * d.y + m[0][2] * d.z,
        m[1][0] * d.x + m[1][1] * d.y + m[1][2] * d.z,
        m[2][0] * d.x + m[2][1] * d.y + m[2][2] * d.z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mat4_mul_applies_right_to_left() {
        // Translate after scaling: T * S moves the scaled point
        let scale: Mat4 = [
            [2.0, 0.0, 0.0, 0.0],
            [0.0, 2.0, 0.0, 0.0],
            [0.0, 0.0, 2.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        let translate: Mat4 = [
            [1.0, 0.0, 0.0, 5.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        let combined = mat4_mul(&translate, &scale);
        let p = mat4_transform_point(&combined, Vec3::new(1.0, 1.0, 1.0));
        assert!((p.x - 7.0).abs() < 0.001);
        assert!((p.y - 2.0).abs() < 0.001);
        assert!((p.z - 2.0).abs() < 0.001);

        let d = mat4_transform_dir(&combined, Vec3::new(1.0, 0.0, 0.0));
        assert!((d.x - 2.0).abs() < 0.001, "directions ignore translation");
    }

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!((a.dot(b) - 32.0).abs() < 0.001);
    }

    #[test]
    fn test_vec3_cross() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let c = a.cross(b);
        assert!((c.z - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    }

    #[test]
    fn test_rotate_zyx_quarter_turn_about_z() {
        let v = Vec3::new(1.0, 0.0, 0.0);
        let r = rotate_zyx(v, Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2));
        assert!((r.x).abs() < 0.001, "x was {}", r.x);
        assert!((r.y - 1.0).abs() < 0.001, "y was {}", r.y);
        assert!((r.z).abs() < 0.001);
    }

    #[test]
    fn test_rotate_zyx_identity() {
        let v = Vec3::new(0.3, -1.2, 4.5);
        let r = rotate_zyx(v, Vec3::ZERO);
        assert!((r.x - v.x).abs() < 0.001);
        assert!((r.y - v.y).abs() < 0.001);
        assert!((r.z - v.z).abs() < 0.001);
    }

    #[test]
    fn test_project_centers_on_axis_point() {
        // A point straight ahead of the camera lands at the screen center
        let p = project(Vec3::new(0.0, 0.0, 3.0), 320, 240);
        assert!((p.x - 160.0).abs() < 0.001);
        assert!((p.y - 120.0).abs() < 0.001);
        assert!((p.z - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_ray_triangle_hit() {
        let v0 = Vec3::new(-1.0, -1.0, 5.0);
        let v1 = Vec3::new(1.0, -1.0, 5.0);
        let v2 = Vec3::new(0.0, 1.0, 5.0);
        let t = ray_triangle_intersect(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), v0, v1, v2);
        assert!(t.is_some());
        assert!((t.unwrap() - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_ray_triangle_miss() {
        let v0 = Vec3::new(-1.0, -1.0, 5.0);
        let v1 = Vec3::new(1.0, -1.0, 5.0);
        let v2 = Vec3::new(0.0, 1.0, 5.0);
        let t = ray_triangle_intersect(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0), v0, v1, v2);
        assert!(t.is_none());
    }

    #[test]
    fn test_ray_triangle_behind_origin() {
        let v0 = Vec3::new(-1.0, -1.0, -5.0);
        let v1 = Vec3::new(1.0, -1.0, -5.0);
        let v2 = Vec3::new(0.0, 1.0, -5.0);
        // Triangle sits behind the ray origin: no hit
        let t = ray_triangle_intersect(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), v0, v1, v2);
        assert!(t.is_none());
    }
}
