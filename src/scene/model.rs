//! Scene data model: a flat arena of selectable parts

use crate::rasterizer::{ray_triangle_intersect, rotate_zyx, Color, Face, Ray, Vec3, Vertex};

/// Index into the model's part arena. Stable for the lifetime of a loaded
/// model; a new model gets fresh ids.
pub type PartId = usize;

/// One selectable mesh of a model.
///
/// Vertices are local to the part's origin with any imported scale and
/// rotation already baked in, so the viewer-driven `rotation` spins the part
/// about its own origin.
#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
    /// World-space position of the part's origin
    pub translation: Vec3,
    /// Viewer-driven spin in radians
    pub rotation: Vec3,
    pub color: Color,
}

impl Part {
    pub fn new(name: impl Into<String>, vertices: Vec<Vertex>, faces: Vec<Face>, translation: Vec3) -> Self {
        Self {
            name: name.into(),
            vertices,
            faces,
            translation,
            rotation: Vec3::ZERO,
            color: Color::WHITE,
        }
    }

    /// Transform local vertices to world space through the current rotation,
    /// the part translation, and the model-wide centering offset
    pub fn world_vertices(&self, model_offset: Vec3) -> Vec<Vertex> {
        self.world_vertices_scaled(model_offset, 1.0)
    }

    /// World-space vertices with the geometry scaled about the part origin.
    /// The selection outline renders through this as a slightly larger shell.
    pub fn world_vertices_scaled(&self, model_offset: Vec3, scale: f32) -> Vec<Vertex> {
        self.vertices
            .iter()
            .map(|v| Vertex {
                pos: rotate_zyx(v.pos * scale, self.rotation) + self.translation + model_offset,
                normal: rotate_zyx(v.normal, self.rotation),
            })
            .collect()
    }
}

/// A loaded model: parts addressed by arena index plus a centering offset
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub parts: Vec<Part>,
    /// Shift applied to every part so the model sits at the origin
    pub offset: Vec3,
}

impl Model {
    pub fn new(parts: Vec<Part>) -> Self {
        Self {
            parts,
            offset: Vec3::ZERO,
        }
    }

    /// Axis-aligned bounds over all parts at their current transforms.
    /// None for a model with no geometry.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut result: Option<(Vec3, Vec3)> = None;
        for part in &self.parts {
            for v in part.world_vertices(self.offset) {
                result = Some(match result {
                    Some((min, max)) => (min.min(v.pos), max.max(v.pos)),
                    None => (v.pos, v.pos),
                });
            }
        }
        result
    }

    /// Shift the model so its bounding-box center lands on the world origin.
    /// Returns the diagonal size of the bounds for camera framing.
    pub fn recenter(&mut self) -> Option<f32> {
        self.offset = Vec3::ZERO;
        let (min, max) = self.bounds()?;
        let center = (min + max) * 0.5;
        self.offset = center * -1.0;
        Some((max - min).len())
    }

    /// Closest part hit by a world-space ray
    pub fn pick(&self, ray: &Ray) -> Option<PartId> {
        let mut best: Option<(f32, PartId)> = None;

        for (id, part) in self.parts.iter().enumerate() {
            let world = part.world_vertices(self.offset);
            for face in &part.faces {
                let hit = ray_triangle_intersect(
                    ray.origin,
                    ray.direction,
                    world[face.v0].pos,
                    world[face.v1].pos,
                    world[face.v2].pos,
                );
                if let Some(t) = hit {
                    if best.map_or(true, |(best_t, _)| t < best_t) {
                        best = Some((t, id));
                    }
                }
            }
        }

        best.map(|(_, id)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_part(name: &str, translation: Vec3) -> Part {
        // Unit quad in the local xy plane facing -z
        let normal = Vec3::new(0.0, 0.0, -1.0);
        let vertices = vec![
            Vertex::new(Vec3::new(-1.0, -1.0, 0.0), normal),
            Vertex::new(Vec3::new(1.0, -1.0, 0.0), normal),
            Vertex::new(Vec3::new(1.0, 1.0, 0.0), normal),
            Vertex::new(Vec3::new(-1.0, 1.0, 0.0), normal),
        ];
        let faces = vec![Face::new(0, 2, 1), Face::new(0, 3, 2)];
        Part::new(name, vertices, faces, translation)
    }

    #[test]
    fn test_bounds_and_recenter() {
        let mut model = Model::new(vec![quad_part("a", Vec3::new(4.0, 0.0, 0.0))]);

        let (min, max) = model.bounds().unwrap();
        assert!((min.x - 3.0).abs() < 0.001);
        assert!((max.x - 5.0).abs() < 0.001);

        let size = model.recenter().unwrap();
        assert!((size - (2.0f32 * 2.0 + 2.0 * 2.0).sqrt()).abs() < 0.001);

        let (min, max) = model.bounds().unwrap();
        let center = (min + max) * 0.5;
        assert!(center.len() < 0.001, "center should sit at origin after recenter");
    }

    #[test]
    fn test_empty_model_has_no_bounds() {
        let mut model = Model::default();
        assert!(model.bounds().is_none());
        assert!(model.recenter().is_none());
    }

    #[test]
    fn test_rotation_spins_about_part_origin() {
        let mut part = quad_part("a", Vec3::new(10.0, 0.0, 0.0));
        part.rotation.z = std::f32::consts::FRAC_PI_2;

        let world = part.world_vertices(Vec3::ZERO);
        // Local (1, -1, 0) rotates to (1, 1, 0) before translating
        assert!((world[1].pos.x - 11.0).abs() < 0.001);
        assert!((world[1].pos.y - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_pick_returns_nearest_part() {
        let near = quad_part("near", Vec3::new(0.0, 0.0, 2.0));
        let far = quad_part("far", Vec3::new(0.0, 0.0, 6.0));
        let model = Model::new(vec![far, near]);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(model.pick(&ray), Some(1));
    }

    #[test]
    fn test_pick_misses_off_geometry() {
        let model = Model::new(vec![quad_part("a", Vec3::new(0.0, 0.0, 2.0))]);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(model.pick(&ray), None);
    }
}
