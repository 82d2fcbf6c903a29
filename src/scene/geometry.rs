use glam::Vec3;
use std::f32::consts::PI;

use crate::types::Vertex;

/// Geometry descriptor: shape plus tessellation resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Cuboid {
        width: f32,
        height: f32,
        depth: f32,
    },
}

/// CPU-side triangle list ready for upload
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl Geometry {
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Geometry::Sphere {
            radius,
            width_segments: width_segments.max(3),
            height_segments: height_segments.max(2),
        }
    }

    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Geometry::Cuboid { width, height, depth }
    }

    pub fn tessellate(&self) -> MeshData {
        match *self {
            Geometry::Sphere {
                radius,
                width_segments,
                height_segments,
            } => tessellate_sphere(radius, width_segments.max(3), height_segments.max(2)),
            Geometry::Cuboid { width, height, depth } => {
                tessellate_cuboid(Vec3::new(width, height, depth) * 0.5)
            }
        }
    }
}

/// UV sphere, v = 0 at the north pole. Degenerate pole triangles are skipped.
fn tessellate_sphere(radius: f32, w: u32, h: u32) -> MeshData {
    let row = (w + 1) as usize;
    let mut vertices = Vec::with_capacity(row * (h + 1) as usize);

    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        let theta = v * PI;

        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let phi = u * 2.0 * PI;

            let normal = Vec3::new(
                -phi.cos() * theta.sin(),
                theta.cos(),
                phi.sin() * theta.sin(),
            );
            let tangent = Vec3::new(phi.sin(), 0.0, phi.cos());

            vertices.push(Vertex {
                position: (normal * radius).to_array(),
                normal: normal.to_array(),
                uv: [u, v],
                tangent: [tangent.x, tangent.y, tangent.z, 1.0],
            });
        }
    }

    let mut indices = Vec::with_capacity((w * (h - 1) * 6) as usize);
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * (w + 1) + ix + 1;
            let b = iy * (w + 1) + ix;
            let c = (iy + 1) * (w + 1) + ix;
            let d = (iy + 1) * (w + 1) + ix + 1;

            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshData { vertices, indices }
}

/// (normal, right, up) per face with right x up = normal
const CUBOID_FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
];

fn tessellate_cuboid(half: Vec3) -> MeshData {
    let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, right, up) in CUBOID_FACES {
        let base = vertices.len() as u32;
        for (sx, sy) in corners {
            let position = (normal + right * sx + up * sy) * half;
            vertices.push(Vertex {
                position: position.to_array(),
                normal: normal.to_array(),
                uv: [(sx + 1.0) * 0.5, (1.0 - sy) * 0.5],
                tangent: [right.x, right.y, right.z, 1.0],
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_segments_have_a_floor() {
        match Geometry::sphere(1.0, 1, 1) {
            Geometry::Sphere {
                width_segments,
                height_segments,
                ..
            } => {
                assert_eq!(width_segments, 3);
                assert_eq!(height_segments, 2);
            }
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn cuboid_faces_are_right_handed() {
        for (normal, right, up) in CUBOID_FACES {
            assert_eq!(right.cross(up), normal);
        }
    }
}
