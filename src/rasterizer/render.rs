//! Software triangle rasterization
//!
//! Transforms world-space meshes to screen space, culls against the near
//! plane and facing direction, then rasterizes with incremental edge
//! functions into an RGBA framebuffer with a depth buffer.

use super::camera::Camera;
use super::math::{perspective_transform, project, Vec3, NEAR_PLANE};
use super::types::{Color, CullMode, Face, Light, RasterSettings, ShadingMode, Vertex};

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>,   // RGBA, 4 bytes per pixel
    pub zbuffer: Vec<f32>, // Depth buffer
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            zbuffer: vec![f32::MAX; width * height],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.pixels = vec![0; width * height * 4];
            self.zbuffer = vec![f32::MAX; width * height];
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for i in 0..(self.width * self.height) {
            self.pixels[i * 4] = bytes[0];
            self.pixels[i * 4 + 1] = bytes[1];
            self.pixels[i * 4 + 2] = bytes[2];
            self.pixels[i * 4 + 3] = bytes[3];
            self.zbuffer[i] = f32::MAX;
        }
    }

    /// Clear with a vertical gradient, top_color at y=0
    pub fn clear_gradient(&mut self, top_color: Color, bottom_color: Color) {
        let h = self.height;
        for y in 0..h {
            let t = if h > 1 { y as f32 / (h - 1) as f32 } else { 0.0 };
            let bytes = top_color.lerp(bottom_color, t).to_bytes();

            for x in 0..self.width {
                let idx = (y * self.width + x) * 4;
                self.pixels[idx] = bytes[0];
                self.pixels[idx + 1] = bytes[1];
                self.pixels[idx + 2] = bytes[2];
                self.pixels[idx + 3] = bytes[3];
                self.zbuffer[y * self.width + x] = f32::MAX;
            }
        }
    }
}

/// Screen-space triangle ready for rasterization.
/// Vertex z holds camera-space depth, normals stay in world space.
struct Surface {
    v1: Vec3,
    v2: Vec3,
    v3: Vec3,
    n1: Vec3,
    n2: Vec3,
    n3: Vec3,
}

/// Lighting intensity for one directional light plus an ambient floor
fn shade_intensity(normal: Vec3, light: &Light, ambient: f32) -> f32 {
    let diffuse = normal.dot(light.direction * -1.0).max(0.0);
    (ambient + (1.0 - ambient) * diffuse * light.intensity).clamp(0.0, 1.0)
}

/// Render a world-space mesh with a uniform color.
///
/// Pipeline: transform and project every vertex, cull triangles against the
/// near plane and the requested facing mode, then rasterize what survives.
pub fn render_mesh(
    fb: &mut Framebuffer,
    vertices: &[Vertex],
    faces: &[Face],
    color: Color,
    camera: &Camera,
    settings: &RasterSettings,
) {
    // === TRANSFORM PHASE ===
    let mut cam_depths: Vec<f32> = Vec::with_capacity(vertices.len());
    let mut projected: Vec<Vec3> = Vec::with_capacity(vertices.len());

    for v in vertices {
        let rel_pos = v.pos - camera.position;
        let cam_pos = perspective_transform(rel_pos, camera.basis_x, camera.basis_y, camera.basis_z);
        projected.push(project(cam_pos, fb.width, fb.height));
        cam_depths.push(cam_pos.z);
    }

    // === CULL PHASE ===
    let mut surfaces: Vec<Surface> = Vec::with_capacity(faces.len());

    for face in faces {
        // Reject triangles with any vertex behind the near plane instead of
        // clipping them. Geometry never sits that close to the orbit camera.
        if cam_depths[face.v0] <= NEAR_PLANE
            || cam_depths[face.v1] <= NEAR_PLANE
            || cam_depths[face.v2] <= NEAR_PLANE
        {
            continue;
        }

        let v1 = projected[face.v0];
        let v2 = projected[face.v1];
        let v3 = projected[face.v2];

        // Counter-clockwise front faces project to negative signed area
        // because screen y grows downward.
        let signed_area = (v2.x - v1.x) * (v3.y - v1.y) - (v3.x - v1.x) * (v2.y - v1.y);
        let is_backface = signed_area >= 0.0;

        let draw_front = !is_backface && settings.cull != CullMode::Front;
        let draw_back = is_backface && settings.cull != CullMode::Back;

        if draw_front {
            surfaces.push(Surface {
                v1,
                v2,
                v3,
                n1: vertices[face.v0].normal,
                n2: vertices[face.v1].normal,
                n3: vertices[face.v2].normal,
            });
        } else if draw_back {
            // Swap v2/v3 to restore front winding and flip normals so the
            // inside of the triangle lights like a front face
            surfaces.push(Surface {
                v1,
                v2: v3,
                v3: v2,
                n1: vertices[face.v0].normal * -1.0,
                n2: vertices[face.v2].normal * -1.0,
                n3: vertices[face.v1].normal * -1.0,
            });
        }
    }

    // === DRAW PHASE ===
    for surface in &surfaces {
        rasterize_triangle(fb, surface, color, settings);
    }
}

/// Rasterize a single triangle using incremental edge function stepping
fn rasterize_triangle(fb: &mut Framebuffer, surface: &Surface, color: Color, settings: &RasterSettings) {
    let v1 = surface.v1;
    let v2 = surface.v2;
    let v3 = surface.v3;

    // Clamped bounding box
    let min_x = v1.x.min(v2.x).min(v3.x).max(0.0) as usize;
    let max_x = (v1.x.max(v2.x).max(v3.x) + 1.0).min(fb.width as f32) as usize;
    let min_y = v1.y.min(v2.y).min(v3.y).max(0.0) as usize;
    let max_y = (v1.y.max(v2.y).max(v3.y) + 1.0).min(fb.height as f32) as usize;

    if min_x >= max_x || min_y >= max_y {
        return;
    }

    // Triangle area * 2, used to normalize the edge functions
    let area = (v2.y - v3.y) * (v1.x - v3.x) + (v3.x - v2.x) * (v1.y - v3.y);
    if area.abs() < 0.00001 {
        return; // Degenerate triangle
    }
    let inv_area = 1.0 / area;

    // Pre-compute per-mode shading
    let flat_intensity = if settings.shading == ShadingMode::Flat {
        let face_normal = ((surface.n1 + surface.n2 + surface.n3) * (1.0 / 3.0)).normalize();
        shade_intensity(face_normal, &settings.light, settings.ambient)
    } else {
        1.0
    };

    let gouraud = if settings.shading == ShadingMode::Gouraud {
        Some((
            shade_intensity(surface.n1, &settings.light, settings.ambient),
            shade_intensity(surface.n2, &settings.light, settings.ambient),
            shade_intensity(surface.n3, &settings.light, settings.ambient),
        ))
    } else {
        None
    };

    // Edge function coefficients: E23 weights v1, E31 weights v2,
    // and the third barycentric falls out as 1 - bc_x - bc_y
    let a0 = v2.y - v3.y;
    let b0 = v3.x - v2.x;
    let a1 = v3.y - v1.y;
    let b1 = v1.x - v3.x;

    let start_x = min_x as f32;
    let start_y = min_y as f32;

    let mut w0_row = a0 * (start_x - v3.x) + b0 * (start_y - v3.y);
    let mut w1_row = a1 * (start_x - v3.x) + b1 * (start_y - v3.y);

    // In screen space 1/z interpolates linearly, z itself does not
    let inv_z1 = 1.0 / v1.z;
    let inv_z2 = 1.0 / v2.z;
    let inv_z3 = 1.0 / v3.z;

    for y in min_y..max_y {
        let mut w0 = w0_row;
        let mut w1 = w1_row;

        for x in min_x..max_x {
            let bc_x = w0 * inv_area;
            let bc_y = w1 * inv_area;
            let bc_z = 1.0 - bc_x - bc_y;

            const ERR: f32 = -0.0001;
            if bc_x >= ERR && bc_y >= ERR && bc_z >= ERR {
                let z = 1.0 / (bc_x * inv_z1 + bc_y * inv_z2 + bc_z * inv_z3);
                let idx = y * fb.width + x;

                if settings.depth_test {
                    if z >= fb.zbuffer[idx] {
                        w0 += a0;
                        w1 += a1;
                        continue;
                    }
                    fb.zbuffer[idx] = z;
                }

                let intensity = match settings.shading {
                    ShadingMode::Unlit => 1.0,
                    ShadingMode::Flat => flat_intensity,
                    ShadingMode::Gouraud => {
                        let (i1, i2, i3) = gouraud.unwrap_or((1.0, 1.0, 1.0));
                        bc_x * i1 + bc_y * i2 + bc_z * i3
                    }
                };

                let shaded = color.shade(intensity);
                fb.pixels[idx * 4] = shaded.r;
                fb.pixels[idx * 4 + 1] = shaded.g;
                fb.pixels[idx * 4 + 2] = shaded.b;
                fb.pixels[idx * 4 + 3] = 255;
            }

            w0 += a0;
            w1 += a1;
        }

        w0_row += b0;
        w1_row += b1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        let mut camera = Camera::new();
        camera.position = Vec3::new(0.0, 0.0, -5.0);
        camera
    }

    /// Triangle in the z=0 plane facing the test camera, standard winding
    fn facing_triangle(offset_z: f32) -> (Vec<Vertex>, Vec<Face>) {
        let normal = Vec3::new(0.0, 0.0, -1.0);
        let vertices = vec![
            Vertex::new(Vec3::new(0.0, 1.0, offset_z), normal),
            Vertex::new(Vec3::new(1.0, -1.0, offset_z), normal),
            Vertex::new(Vec3::new(-1.0, -1.0, offset_z), normal),
        ];
        let faces = vec![Face::new(0, 1, 2)];
        (vertices, faces)
    }

    fn unlit_settings() -> RasterSettings {
        RasterSettings {
            shading: ShadingMode::Unlit,
            ..RasterSettings::default()
        }
    }

    fn center_pixel(fb: &Framebuffer) -> (u8, u8, u8) {
        let idx = (fb.height / 2 * fb.width + fb.width / 2) * 4;
        (fb.pixels[idx], fb.pixels[idx + 1], fb.pixels[idx + 2])
    }

    #[test]
    fn test_clear() {
        let mut fb = Framebuffer::new(4, 3);
        fb.zbuffer[5] = 1.0;
        fb.clear(Color::new(10, 20, 30));

        assert_eq!(fb.pixels[0], 10);
        assert_eq!(fb.pixels[1], 20);
        assert_eq!(fb.pixels[2], 30);
        assert_eq!(fb.pixels[3], 255);
        assert_eq!(fb.zbuffer[5], f32::MAX);
    }

    #[test]
    fn test_clear_gradient_endpoints() {
        let mut fb = Framebuffer::new(2, 4);
        fb.clear_gradient(Color::new(0, 0, 0), Color::new(200, 100, 50));

        assert_eq!(fb.pixels[0], 0);
        let last_row = (3 * 2) * 4;
        assert_eq!(fb.pixels[last_row], 200);
        assert_eq!(fb.pixels[last_row + 1], 100);
        assert_eq!(fb.pixels[last_row + 2], 50);
    }

    #[test]
    fn test_resize_reallocates() {
        let mut fb = Framebuffer::new(4, 4);
        fb.resize(8, 2);
        assert_eq!(fb.pixels.len(), 8 * 2 * 4);
        assert_eq!(fb.zbuffer.len(), 8 * 2);
    }

    #[test]
    fn test_facing_triangle_covers_center() {
        let mut fb = Framebuffer::new(80, 60);
        fb.clear(Color::BLACK);
        let (vertices, faces) = facing_triangle(0.0);

        render_mesh(&mut fb, &vertices, &faces, Color::new(200, 50, 50), &test_camera(), &unlit_settings());

        assert_eq!(center_pixel(&fb), (200, 50, 50));
        let idx = fb.height / 2 * fb.width + fb.width / 2;
        assert!(fb.zbuffer[idx] < f32::MAX);
    }

    #[test]
    fn test_reverse_winding_is_culled() {
        let mut fb = Framebuffer::new(80, 60);
        fb.clear(Color::BLACK);
        let (vertices, mut faces) = facing_triangle(0.0);
        faces[0] = Face::new(0, 2, 1);

        render_mesh(&mut fb, &vertices, &faces, Color::WHITE, &test_camera(), &unlit_settings());

        assert_eq!(center_pixel(&fb), (0, 0, 0));
    }

    #[test]
    fn test_cull_none_draws_reverse_winding() {
        let mut fb = Framebuffer::new(80, 60);
        fb.clear(Color::BLACK);
        let (vertices, mut faces) = facing_triangle(0.0);
        faces[0] = Face::new(0, 2, 1);

        let settings = RasterSettings {
            cull: CullMode::None,
            ..unlit_settings()
        };
        render_mesh(&mut fb, &vertices, &faces, Color::WHITE, &test_camera(), &settings);

        assert_eq!(center_pixel(&fb), (255, 255, 255));
    }

    #[test]
    fn test_depth_rejects_farther_triangle() {
        let mut fb = Framebuffer::new(80, 60);
        fb.clear(Color::BLACK);
        let settings = unlit_settings();
        let camera = test_camera();

        let (near_verts, near_faces) = facing_triangle(0.0);
        render_mesh(&mut fb, &near_verts, &near_faces, Color::new(255, 0, 0), &camera, &settings);

        let (far_verts, far_faces) = facing_triangle(2.0);
        render_mesh(&mut fb, &far_verts, &far_faces, Color::new(0, 255, 0), &camera, &settings);

        assert_eq!(center_pixel(&fb), (255, 0, 0));
    }

    #[test]
    fn test_depth_test_off_skips_depth_writes() {
        let mut fb = Framebuffer::new(80, 60);
        fb.clear(Color::BLACK);
        let camera = test_camera();

        // First pass without depth leaves the z-buffer untouched, so a later
        // pass with depth enabled paints straight over it
        let no_depth = RasterSettings {
            depth_test: false,
            ..unlit_settings()
        };
        let (verts, faces) = facing_triangle(0.0);
        render_mesh(&mut fb, &verts, &faces, Color::new(255, 255, 0), &camera, &no_depth);

        let idx = fb.height / 2 * fb.width + fb.width / 2;
        assert_eq!(fb.zbuffer[idx], f32::MAX);

        let (far_verts, far_faces) = facing_triangle(2.0);
        render_mesh(&mut fb, &far_verts, &far_faces, Color::new(0, 0, 255), &camera, &unlit_settings());

        assert_eq!(center_pixel(&fb), (0, 0, 255));
    }

    #[test]
    fn test_near_plane_rejects_triangle() {
        let mut fb = Framebuffer::new(80, 60);
        fb.clear(Color::BLACK);
        let camera = test_camera();

        // One vertex behind the camera drops the whole triangle
        let (mut vertices, faces) = facing_triangle(0.0);
        vertices[0].pos.z = -6.0;

        render_mesh(&mut fb, &vertices, &faces, Color::WHITE, &camera, &unlit_settings());

        assert_eq!(center_pixel(&fb), (0, 0, 0));
    }

    #[test]
    fn test_gouraud_shades_by_normal() {
        let camera = test_camera();
        let settings = RasterSettings::default();

        // Normal facing the light gets close to full intensity
        let lit_normal = settings.light.direction * -1.0;
        let mut fb = Framebuffer::new(80, 60);
        fb.clear(Color::BLACK);
        let (mut vertices, faces) = facing_triangle(0.0);
        for v in &mut vertices {
            v.normal = lit_normal;
        }
        render_mesh(&mut fb, &vertices, &faces, Color::WHITE, &camera, &settings);
        let (lit_r, _, _) = center_pixel(&fb);

        // Normal pointing away falls back to the ambient floor
        let mut fb2 = Framebuffer::new(80, 60);
        fb2.clear(Color::BLACK);
        let (verts_away, faces_away) = facing_triangle(0.0);
        render_mesh(&mut fb2, &verts_away, &faces_away, Color::WHITE, &camera, &settings);
        let (ambient_r, _, _) = center_pixel(&fb2);

        assert!(lit_r > ambient_r, "lit {} should exceed ambient {}", lit_r, ambient_r);
        assert!(ambient_r > 0);
    }
}
