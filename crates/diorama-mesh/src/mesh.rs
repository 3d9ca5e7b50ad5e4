//! Indexed triangle mesh.

use diorama_math::Color;
use glam::{Mat4, Vec3};

use crate::ray::{Aabb, Ray, intersect_triangle};

/// An indexed triangle mesh.
///
/// `normals` and `colors` are either empty or parallel to `positions`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions in mesh-local space.
    pub positions: Vec<Vec3>,
    /// Per-vertex normals.
    pub normals: Vec<Vec3>,
    /// Per-vertex colours (the baked terrain texture for heightfields).
    pub colors: Vec<Color>,
    /// Index buffer (triangles, 3 indices per triangle).
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over triangles as vertex position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            ]
        })
    }

    /// Appends a quad `a, b, c, d` (counter-clockwise when viewed from the front).
    pub fn push_quad(&mut self, corners: [Vec3; 4]) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&corners);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Recompute smooth per-vertex normals by accumulating area-weighted face
    /// normals over every triangle sharing a vertex.
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let (a, b, c) = (self.positions[ia], self.positions[ib], self.positions[ic]);
            let face = (b - a).cross(c - a);
            normals[ia] += face;
            normals[ib] += face;
            normals[ic] += face;
        }
        for n in &mut normals {
            *n = n.normalize_or_zero();
        }
        self.normals = normals;
    }

    /// Moves every vertex by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Returns a copy with positions (and normals) transformed by `matrix`.
    pub fn transformed(&self, matrix: &Mat4) -> Mesh {
        Mesh {
            positions: self
                .positions
                .iter()
                .map(|p| matrix.transform_point3(*p))
                .collect(),
            normals: self
                .normals
                .iter()
                .map(|n| matrix.transform_vector3(*n).normalize_or_zero())
                .collect(),
            colors: self.colors.clone(),
            indices: self.indices.clone(),
        }
    }

    /// Axis-aligned bounding box of all positions, or `None` for an empty mesh.
    pub fn aabb(&self) -> Option<Aabb> {
        Aabb::from_points(self.positions.iter().copied())
    }

    /// Distances to every triangle the ray crosses, in ascending order.
    pub fn raycast_all(&self, ray: &Ray) -> Vec<f32> {
        let mut hits: Vec<f32> = self
            .triangles()
            .filter_map(|[a, b, c]| intersect_triangle(ray, a, b, c))
            .collect();
        hits.sort_by(f32::total_cmp);
        hits
    }

    /// Distance to the nearest triangle the ray crosses.
    pub fn raycast(&self, ray: &Ray) -> Option<f32> {
        self.triangles()
            .filter_map(|[a, b, c]| intersect_triangle(ray, a, b, c))
            .min_by(f32::total_cmp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> Mesh {
        let mut m = Mesh::new();
        m.push_quad([
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
        ]);
        m
    }

    #[test]
    fn test_push_quad_two_triangles() {
        let m = unit_quad();
        assert_eq!(m.vertex_count(), 4);
        assert_eq!(m.triangle_count(), 2);
    }

    #[test]
    fn test_normals_point_up_for_ccw_quad() {
        let mut m = unit_quad();
        m.compute_vertex_normals();
        for n in &m.normals {
            assert!((n.y - 1.0).abs() < 1e-6, "expected +Y normal, got {n:?}");
        }
    }

    #[test]
    fn test_raycast_hits_quad_from_above() {
        let m = unit_quad();
        let ray = Ray::new(Vec3::new(0.3, 10.0, 0.6), Vec3::NEG_Y);
        let d = m.raycast(&ray).expect("ray should hit the quad");
        assert!((d - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_raycast_misses_outside() {
        let m = unit_quad();
        let ray = Ray::new(Vec3::new(2.5, 10.0, 0.5), Vec3::NEG_Y);
        assert!(m.raycast(&ray).is_none());
    }

    #[test]
    fn test_transformed_translates_positions() {
        let m = unit_quad().transformed(&Mat4::from_translation(Vec3::new(0.0, 3.0, 0.0)));
        assert!(m.positions.iter().all(|p| (p.y - 3.0).abs() < 1e-6));
        let aabb = m.aabb().unwrap();
        assert_eq!(aabb.min, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 3.0, 1.0));
    }
}
