//! Regular XZ grid meshes used for heightfield terrain and water planes.

use diorama_math::lerp;
use glam::{Vec2, Vec3};

use crate::Mesh;

/// Vertex layout of a regular grid centred on the origin in the XZ plane.
///
/// Vertices are stored row-major: row `iz` runs from `-depth/2` to
/// `+depth/2`, column `ix` from `-width/2` to `+width/2`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    /// Number of vertices along X (at least 2).
    pub x_vertices: usize,
    /// Number of vertices along Z (at least 2).
    pub z_vertices: usize,
    /// Extent along X in world units.
    pub width: f32,
    /// Extent along Z in world units.
    pub depth: f32,
}

impl GridLayout {
    pub fn new(x_vertices: usize, z_vertices: usize, width: f32, depth: f32) -> Self {
        Self {
            x_vertices: x_vertices.max(2),
            z_vertices: z_vertices.max(2),
            width,
            depth,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.x_vertices * self.z_vertices
    }

    /// Flat index of grid vertex `(ix, iz)`.
    #[inline]
    pub fn index(&self, ix: usize, iz: usize) -> usize {
        iz * self.x_vertices + ix
    }

    /// Grid coordinate of flat vertex index `i`.
    #[inline]
    pub fn coord(&self, i: usize) -> (usize, usize) {
        (i % self.x_vertices, i / self.x_vertices)
    }

    /// Spacing between adjacent vertices along X and Z.
    pub fn spacing(&self) -> Vec2 {
        Vec2::new(
            self.width / (self.x_vertices - 1) as f32,
            self.depth / (self.z_vertices - 1) as f32,
        )
    }

    /// XZ position of grid vertex `(ix, iz)`.
    /// Edge vertices land exactly on `±width/2` and `±depth/2`.
    pub fn position(&self, ix: usize, iz: usize) -> Vec2 {
        let tx = ix as f32 / (self.x_vertices - 1) as f32;
        let tz = iz as f32 / (self.z_vertices - 1) as f32;
        Vec2::new(
            lerp(-self.width * 0.5, self.width * 0.5, tx),
            lerp(-self.depth * 0.5, self.depth * 0.5, tz),
        )
    }
}

/// Build a flat grid at `y = 0` with upward-facing triangles.
pub fn grid_plane(layout: &GridLayout) -> Mesh {
    let mut mesh = Mesh::new();
    mesh.positions.reserve(layout.vertex_count());
    for iz in 0..layout.z_vertices {
        for ix in 0..layout.x_vertices {
            let p = layout.position(ix, iz);
            mesh.positions.push(Vec3::new(p.x, 0.0, p.y));
        }
    }

    let cells = (layout.x_vertices - 1) * (layout.z_vertices - 1);
    mesh.indices.reserve(cells * 6);
    for iz in 0..layout.z_vertices - 1 {
        for ix in 0..layout.x_vertices - 1 {
            let a = layout.index(ix, iz) as u32;
            let b = layout.index(ix, iz + 1) as u32;
            let c = layout.index(ix + 1, iz + 1) as u32;
            let d = layout.index(ix + 1, iz) as u32;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh.normals = vec![Vec3::Y; mesh.positions.len()];
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_counts() {
        let layout = GridLayout::new(48, 32, 48.0, 32.0);
        let mesh = grid_plane(&layout);
        assert_eq!(mesh.vertex_count(), 48 * 32);
        assert_eq!(mesh.triangle_count(), 47 * 31 * 2);
    }

    #[test]
    fn test_grid_spans_extents() {
        let layout = GridLayout::new(5, 3, 8.0, 4.0);
        assert_eq!(layout.position(0, 0), Vec2::new(-4.0, -2.0));
        assert_eq!(layout.position(4, 2), Vec2::new(4.0, 2.0));
        assert_eq!(layout.coord(layout.index(3, 1)), (3, 1));
    }

    #[test]
    fn test_grid_faces_up() {
        let layout = GridLayout::new(4, 4, 3.0, 3.0);
        let mut mesh = grid_plane(&layout);
        mesh.compute_vertex_normals();
        assert!(mesh.normals.iter().all(|n| (n.y - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_degenerate_layout_is_clamped() {
        let layout = GridLayout::new(0, 1, 1.0, 1.0);
        assert_eq!(layout.x_vertices, 2);
        assert_eq!(layout.z_vertices, 2);
    }
}
