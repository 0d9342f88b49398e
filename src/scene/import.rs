//! glTF import: one part per mesh-bearing node
//!
//! Parent rotations and scales are baked into vertex positions while the
//! world translation stays on the part, so viewer-driven rotation spins each
//! part about its own origin.

use super::model::{Model, Part};
use crate::rasterizer::math::{mat4_identity, mat4_mul, mat4_transform_dir, Mat4};
use crate::rasterizer::{Color, Face, Vec3, Vertex};
use gltf::mesh::util::ReadIndices;
use std::path::Path;

/// glTF file importer (.gltf with external or embedded buffers, .glb)
pub struct GltfImporter;

impl GltfImporter {
    pub fn load_from_file(path: &Path) -> Result<Model, ImportError> {
        let (doc, buffers, _images) = gltf::import(path).map_err(|e| match e {
            gltf::Error::Io(err) => ImportError::Io(format!("Failed to read file: {}", err)),
            other => ImportError::Parse(other.to_string()),
        })?;

        let scene = doc
            .default_scene()
            .or_else(|| doc.scenes().next())
            .ok_or_else(|| ImportError::Parse("glTF contains no scene".to_string()))?;

        let mut parts: Vec<Part> = Vec::new();
        for node in scene.nodes() {
            Self::collect_parts(&node, &mat4_identity(), &buffers, &mut parts)?;
        }

        if parts.is_empty() {
            return Err(ImportError::Parse("No triangle meshes found in glTF scene".to_string()));
        }

        Ok(Model::new(parts))
    }

    fn collect_parts(
        node: &gltf::Node,
        parent: &Mat4,
        buffers: &[gltf::buffer::Data],
        parts: &mut Vec<Part>,
    ) -> Result<(), ImportError> {
        let world = mat4_mul(parent, &convert_matrix(node.transform().matrix()));

        if let Some(mesh) = node.mesh() {
            let part = Self::build_part(node, &mesh, &world, buffers, parts.len())?;
            if !part.vertices.is_empty() {
                parts.push(part);
            }
        }

        for child in node.children() {
            Self::collect_parts(&child, &world, buffers, parts)?;
        }

        Ok(())
    }

    /// Merge all triangle primitives of one mesh into a single part
    fn build_part(
        node: &gltf::Node,
        mesh: &gltf::Mesh,
        world: &Mat4,
        buffers: &[gltf::buffer::Data],
        index: usize,
    ) -> Result<Part, ImportError> {
        let translation = Vec3::new(world[0][3], world[1][3], world[2][3]);

        let mut vertices: Vec<Vertex> = Vec::new();
        let mut faces: Vec<Face> = Vec::new();
        let mut color = Color::WHITE;
        let mut color_set = false;

        for prim in mesh.primitives() {
            if prim.mode() != gltf::mesh::Mode::Triangles {
                continue;
            }

            if !color_set {
                let factor = prim.material().pbr_metallic_roughness().base_color_factor();
                color = Color::from_f32(factor[0], factor[1], factor[2]);
                color_set = true;
            }

            let reader = prim.reader(|b| buffers.get(b.index()).map(|bb| bb.0.as_slice()));
            let positions: Vec<[f32; 3]> = match reader.read_positions() {
                Some(it) => it.collect(),
                None => continue,
            };
            let normals: Vec<[f32; 3]> = reader.read_normals().map(|it| it.collect()).unwrap_or_default();

            let start = vertices.len();
            for (i, p) in positions.iter().enumerate() {
                let n = normals.get(i).copied().unwrap_or([0.0, 0.0, 0.0]);
                // Normals share the linear transform; non-uniform scale would
                // need the inverse transpose
                vertices.push(Vertex {
                    pos: mat4_transform_dir(world, Vec3::new(p[0], p[1], p[2])),
                    normal: mat4_transform_dir(world, Vec3::new(n[0], n[1], n[2])).normalize(),
                });
            }

            let indices: Vec<u32> = match reader.read_indices() {
                Some(ReadIndices::U8(it)) => it.map(|v| v as u32).collect(),
                Some(ReadIndices::U16(it)) => it.map(|v| v as u32).collect(),
                Some(ReadIndices::U32(it)) => it.collect(),
                None => (0..positions.len() as u32).collect(),
            };

            for tri in indices.chunks_exact(3) {
                let face = Face::new(
                    start + tri[0] as usize,
                    start + tri[1] as usize,
                    start + tri[2] as usize,
                );
                if face.v0 >= vertices.len() || face.v1 >= vertices.len() || face.v2 >= vertices.len() {
                    return Err(ImportError::Parse(format!(
                        "Face index out of range in mesh '{}'",
                        mesh.name().unwrap_or("unnamed")
                    )));
                }
                faces.push(face);
            }
        }

        let name = mesh
            .name()
            .or_else(|| node.name())
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("part-{}", index + 1));

        let mut part = Part::new(name, vertices, faces, translation);
        part.color = color;
        Self::fill_missing_normals(&mut part);
        Ok(part)
    }

    /// Assign geometric face normals to vertices the file left without one
    fn fill_missing_normals(part: &mut Part) {
        for face in &part.faces {
            let v0 = part.vertices[face.v0].pos;
            let v1 = part.vertices[face.v1].pos;
            let v2 = part.vertices[face.v2].pos;
            let normal = (v1 - v0).cross(v2 - v0).normalize();

            for idx in [face.v0, face.v1, face.v2] {
                let vertex = &mut part.vertices[idx];
                if vertex.normal.x == 0.0 && vertex.normal.y == 0.0 && vertex.normal.z == 0.0 {
                    vertex.normal = normal;
                }
            }
        }
    }
}

/// Convert a column-major glTF matrix to our row-major layout
fn convert_matrix(m: [[f32; 4]; 4]) -> Mat4 {
    let mut out = [[0.0; 4]; 4];
    for (col, column) in m.iter().enumerate() {
        for (row, value) in column.iter().enumerate() {
            out[row][col] = *value;
        }
    }
    out
}

/// Error types for model import
#[derive(Debug)]
pub enum ImportError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ImportError::Io(e) => write!(f, "IO error: {}", e),
            ImportError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ImportError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // One triangle at positions (0,0,0) (1,0,0) (0,1,0) with u16 indices 0 1 2,
    // nested under a parent node so translations have to compose
    const TRIANGLE_GLTF: &str = r#"{
  "asset": {"version": "2.0"},
  "scene": 0,
  "scenes": [{"nodes": [0]}],
  "nodes": [
    {"name": "rig", "translation": [0.0, 3.0, 0.0], "children": [1]},
    {"name": "blade", "translation": [2.0, 0.0, 0.0], "mesh": 0}
  ],
  "meshes": [{"name": "blade", "primitives": [{"attributes": {"POSITION": 0}, "indices": 1, "material": 0}]}],
  "materials": [{"pbrMetallicRoughness": {"baseColorFactor": [1.0, 0.0, 0.0, 1.0]}}],
  "buffers": [{"uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAABAAIA", "byteLength": 42}],
  "bufferViews": [
    {"buffer": 0, "byteOffset": 0, "byteLength": 36, "target": 34962},
    {"buffer": 0, "byteOffset": 36, "byteLength": 6, "target": 34963}
  ],
  "accessors": [
    {"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]},
    {"bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR"}
  ]
}"#;

    fn write_fixture(contents: &str) -> tempfile::TempPath {
        let mut file = tempfile::Builder::new()
            .suffix(".gltf")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.into_temp_path()
    }

    #[test]
    fn test_load_triangle_gltf() {
        let path = write_fixture(TRIANGLE_GLTF);
        let model = GltfImporter::load_from_file(&path).unwrap();

        assert_eq!(model.parts.len(), 1);
        let part = &model.parts[0];
        assert_eq!(part.name, "blade");
        assert_eq!(part.vertices.len(), 3);
        assert_eq!(part.faces.len(), 1);
        assert_eq!(part.color, Color::RED);

        // Parent and node translations compose into the part origin
        assert!((part.translation.x - 2.0).abs() < 0.001);
        assert!((part.translation.y - 3.0).abs() < 0.001);

        // No normals in the file, so the geometric normal fills in
        assert!((part.vertices[0].normal.z - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GltfImporter::load_from_file(Path::new("/nonexistent/model.gltf")).unwrap_err();
        assert!(matches!(err, ImportError::Io(_)), "got {:?}", err);
    }

    #[test]
    fn test_garbage_file_is_parse_error() {
        let path = write_fixture("not a gltf file");
        let err = GltfImporter::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ImportError::Parse(_)), "got {:?}", err);
    }

    #[test]
    fn test_error_messages_name_the_failure() {
        let err = ImportError::Parse("no scene".to_string());
        assert_eq!(err.to_string(), "Parse error: no scene");
    }
}
