//! Built-in robot scene shown before any model is uploaded

use super::animation::{ChannelTarget, Clip, Keyframe, Track};
use super::model::{Model, Part, PartId};
use crate::rasterizer::{Color, Face, Vec3, Vertex};

// Arena indices matching the build() part order
const TORSO: PartId = 0;
const HEAD: PartId = 1;
const ARM_RIGHT: PartId = 3;
const ANTENNA: PartId = 6;

/// Nominal vertical center of the robot (feet rest at y = 0). The built-in
/// scene shifts down by only half of this, so it rides a little high
/// instead of sitting exactly at the origin. Uploaded models get the exact
/// bounding-box recenter; this scene keeps its cheaper shift.
const NOMINAL_CENTER_Y: f32 = 1.4;

/// Build the robot model, pre-shifted by the halved-center shortcut
pub fn build() -> Model {
    let parts = vec![
        cuboid_part("torso", 0.5, 0.7, 0.3, Vec3::new(0.0, 1.5, 0.0), Color::new(96, 125, 139)),
        cuboid_part("head", 0.3, 0.3, 0.3, Vec3::new(0.0, 2.55, 0.0), Color::new(176, 190, 197)),
        cuboid_part("arm-left", 0.15, 0.5, 0.15, Vec3::new(-0.75, 1.6, 0.0), Color::new(120, 144, 156)),
        cuboid_part("arm-right", 0.15, 0.5, 0.15, Vec3::new(0.75, 1.6, 0.0), Color::new(120, 144, 156)),
        cuboid_part("leg-left", 0.18, 0.55, 0.18, Vec3::new(-0.28, 0.55, 0.0), Color::new(69, 90, 100)),
        cuboid_part("leg-right", 0.18, 0.55, 0.18, Vec3::new(0.28, 0.55, 0.0), Color::new(69, 90, 100)),
        cuboid_part("antenna", 0.03, 0.12, 0.03, Vec3::new(0.0, 2.97, 0.0), Color::new(84, 110, 122)),
    ];

    let mut model = Model::new(parts);
    model.offset = Vec3::new(0.0, -NOMINAL_CENTER_Y / 2.0, 0.0);
    model
}

/// The robot's idle clips. All of them loop and play together.
pub fn clips() -> Vec<Clip> {
    vec![
        Clip {
            name: "bob".to_string(),
            duration: 2.4,
            tracks: vec![
                Track {
                    part: TORSO,
                    target: ChannelTarget::Translation,
                    keyframes: vec![
                        Keyframe::new(0.0, Vec3::new(0.0, 1.5, 0.0)),
                        Keyframe::new(1.2, Vec3::new(0.0, 1.58, 0.0)),
                        Keyframe::new(2.4, Vec3::new(0.0, 1.5, 0.0)),
                    ],
                },
                Track {
                    part: HEAD,
                    target: ChannelTarget::Translation,
                    keyframes: vec![
                        Keyframe::new(0.0, Vec3::new(0.0, 2.55, 0.0)),
                        Keyframe::new(1.2, Vec3::new(0.0, 2.66, 0.0)),
                        Keyframe::new(2.4, Vec3::new(0.0, 2.55, 0.0)),
                    ],
                },
                // The antenna has no parent link to the head, so it bobs on
                // its own track with the same phase and amplitude
                Track {
                    part: ANTENNA,
                    target: ChannelTarget::Translation,
                    keyframes: vec![
                        Keyframe::new(0.0, Vec3::new(0.0, 2.97, 0.0)),
                        Keyframe::new(1.2, Vec3::new(0.0, 3.08, 0.0)),
                        Keyframe::new(2.4, Vec3::new(0.0, 2.97, 0.0)),
                    ],
                },
            ],
        },
        Clip {
            name: "wave".to_string(),
            duration: 1.6,
            tracks: vec![Track {
                part: ARM_RIGHT,
                target: ChannelTarget::Rotation,
                keyframes: vec![
                    Keyframe::new(0.0, Vec3::ZERO),
                    Keyframe::new(0.8, Vec3::new(0.9, 0.0, 0.0)),
                    Keyframe::new(1.6, Vec3::ZERO),
                ],
            }],
        },
        Clip {
            name: "scan".to_string(),
            duration: 3.2,
            tracks: vec![Track {
                part: HEAD,
                target: ChannelTarget::Rotation,
                keyframes: vec![
                    Keyframe::new(0.0, Vec3::new(0.0, -0.6, 0.0)),
                    Keyframe::new(1.6, Vec3::new(0.0, 0.6, 0.0)),
                    Keyframe::new(3.2, Vec3::new(0.0, -0.6, 0.0)),
                ],
            }],
        },
    ]
}

fn cuboid_part(name: &str, hx: f32, hy: f32, hz: f32, translation: Vec3, color: Color) -> Part {
    let (vertices, faces) = cuboid(hx, hy, hz);
    let mut part = Part::new(name, vertices, faces, translation);
    part.color = color;
    part
}

/// Axis-aligned cuboid around the local origin, four vertices per side so
/// every side shades flat
fn cuboid(hx: f32, hy: f32, hz: f32) -> (Vec<Vertex>, Vec<Face>) {
    // Corners listed counter-clockwise as seen from outside each side
    let sides: [(Vec3, [Vec3; 4]); 6] = [
        (
            Vec3::new(0.0, 0.0, 1.0),
            [
                Vec3::new(-hx, -hy, hz),
                Vec3::new(hx, -hy, hz),
                Vec3::new(hx, hy, hz),
                Vec3::new(-hx, hy, hz),
            ],
        ),
        (
            Vec3::new(0.0, 0.0, -1.0),
            [
                Vec3::new(hx, -hy, -hz),
                Vec3::new(-hx, -hy, -hz),
                Vec3::new(-hx, hy, -hz),
                Vec3::new(hx, hy, -hz),
            ],
        ),
        (
            Vec3::new(1.0, 0.0, 0.0),
            [
                Vec3::new(hx, -hy, hz),
                Vec3::new(hx, -hy, -hz),
                Vec3::new(hx, hy, -hz),
                Vec3::new(hx, hy, hz),
            ],
        ),
        (
            Vec3::new(-1.0, 0.0, 0.0),
            [
                Vec3::new(-hx, -hy, -hz),
                Vec3::new(-hx, -hy, hz),
                Vec3::new(-hx, hy, hz),
                Vec3::new(-hx, hy, -hz),
            ],
        ),
        (
            Vec3::new(0.0, 1.0, 0.0),
            [
                Vec3::new(-hx, hy, hz),
                Vec3::new(hx, hy, hz),
                Vec3::new(hx, hy, -hz),
                Vec3::new(-hx, hy, -hz),
            ],
        ),
        (
            Vec3::new(0.0, -1.0, 0.0),
            [
                Vec3::new(-hx, -hy, -hz),
                Vec3::new(hx, -hy, -hz),
                Vec3::new(hx, -hy, hz),
                Vec3::new(-hx, -hy, hz),
            ],
        ),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut faces = Vec::with_capacity(12);

    for (normal, corners) in sides {
        let base = vertices.len();
        for corner in corners {
            vertices.push(Vertex::new(corner, normal));
        }
        faces.push(Face::new(base, base + 1, base + 2));
        faces.push(Face::new(base, base + 2, base + 3));
    }

    (vertices, faces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robot_shape() {
        let model = build();
        assert_eq!(model.parts.len(), 7);
        for part in &model.parts {
            assert_eq!(part.vertices.len(), 24);
            assert_eq!(part.faces.len(), 12);
        }
        assert!(model.offset.y < 0.0, "robot shifts down toward the origin");

        // The shift is half the nominal center, so the robot sits above
        // true center rather than exactly on it
        let (min, max) = model.bounds().unwrap();
        let center_y = (min.y + max.y) * 0.5;
        assert!(center_y > 0.1, "built-in scene rides high, center was {}", center_y);
    }

    #[test]
    fn test_cuboid_normals_point_outward() {
        let (vertices, _) = cuboid(1.0, 2.0, 3.0);
        for v in &vertices {
            assert!(v.pos.dot(v.normal) > 0.0, "normal should leave the cuboid at {:?}", v.pos);
        }
    }

    #[test]
    fn test_cuboid_winding_matches_normals() {
        let (vertices, faces) = cuboid(1.0, 1.0, 1.0);
        for face in &faces {
            let v0 = vertices[face.v0].pos;
            let v1 = vertices[face.v1].pos;
            let v2 = vertices[face.v2].pos;
            let geometric = (v1 - v0).cross(v2 - v0).normalize();
            assert!(
                geometric.dot(vertices[face.v0].normal) > 0.9,
                "face winding should agree with the side normal"
            );
        }
    }

    #[test]
    fn test_clips_target_existing_parts() {
        let model = build();
        for clip in clips() {
            assert!(clip.duration > 0.0);
            assert!(!clip.tracks.is_empty());
            for track in &clip.tracks {
                assert!(track.part < model.parts.len());
                assert!(track.keyframes.len() >= 2);
            }
        }
    }

    #[test]
    fn test_translation_tracks_start_at_rest_pose() {
        let model = build();
        for clip in clips() {
            for track in &clip.tracks {
                if track.target == ChannelTarget::Translation {
                    let first = track.keyframes[0].value;
                    let rest = model.parts[track.part].translation;
                    assert!((first - rest).len() < 0.001, "clip should begin where the part rests");
                }
            }
        }
    }
}
