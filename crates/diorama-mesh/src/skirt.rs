//! Side "skirt" meshes that close a heightfield down to the diorama floor.

use glam::Vec3;

use crate::{GridLayout, Mesh};

/// Which edge of the grid a skirt closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkirtSide {
    NegZ,
    PosZ,
    NegX,
    PosX,
}

impl SkirtSide {
    pub const ALL: [SkirtSide; 4] = [
        SkirtSide::PosX,
        SkirtSide::PosZ,
        SkirtSide::NegX,
        SkirtSide::NegZ,
    ];

    /// Outward-facing normal of this side.
    pub fn outward(self) -> Vec3 {
        match self {
            SkirtSide::NegZ => Vec3::NEG_Z,
            SkirtSide::PosZ => Vec3::Z,
            SkirtSide::NegX => Vec3::NEG_X,
            SkirtSide::PosX => Vec3::X,
        }
    }

    fn edge_indices(self, layout: &GridLayout) -> Vec<usize> {
        match self {
            SkirtSide::NegZ => (0..layout.x_vertices).map(|ix| layout.index(ix, 0)).collect(),
            SkirtSide::PosZ => (0..layout.x_vertices)
                .map(|ix| layout.index(ix, layout.z_vertices - 1))
                .collect(),
            SkirtSide::NegX => (0..layout.z_vertices).map(|iz| layout.index(0, iz)).collect(),
            SkirtSide::PosX => (0..layout.z_vertices)
                .map(|iz| layout.index(layout.x_vertices - 1, iz))
                .collect(),
        }
    }
}

/// Build one outward-facing strip per grid edge, joining the edge vertices of
/// `top` straight down to `floor`.
pub fn skirt_meshes(top: &Mesh, layout: &GridLayout, floor: f32) -> Vec<(SkirtSide, Mesh)> {
    SkirtSide::ALL
        .iter()
        .map(|&side| {
            let edge: Vec<Vec3> = side
                .edge_indices(layout)
                .into_iter()
                .map(|i| top.positions[i])
                .collect();
            (side, strip(&edge, floor, side.outward()))
        })
        .collect()
}

fn strip(edge: &[Vec3], floor: f32, outward: Vec3) -> Mesh {
    let mut mesh = Mesh::new();
    let Some(first_segment) = edge.windows(2).next() else {
        return mesh;
    };
    let along = first_segment[1] - first_segment[0];
    let downward_first = Vec3::NEG_Y.cross(along).dot(outward) > 0.0;

    for pair in edge.windows(2) {
        let (t0, t1) = (pair[0], pair[1]);
        let b0 = Vec3::new(t0.x, floor, t0.z);
        let b1 = Vec3::new(t1.x, floor, t1.z);
        if downward_first {
            mesh.push_quad([t0, b0, b1, t1]);
        } else {
            mesh.push_quad([t0, t1, b1, b0]);
        }
    }
    mesh.normals = vec![outward; mesh.positions.len()];
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid_plane;

    #[test]
    fn test_four_sides_with_expected_quads() {
        let layout = GridLayout::new(5, 3, 4.0, 2.0);
        let top = grid_plane(&layout);
        let skirts = skirt_meshes(&top, &layout, -3.0);
        assert_eq!(skirts.len(), 4);
        for (side, mesh) in &skirts {
            let expected = match side {
                SkirtSide::NegZ | SkirtSide::PosZ => 4,
                SkirtSide::NegX | SkirtSide::PosX => 2,
            };
            assert_eq!(mesh.triangle_count(), expected * 2, "side {side:?}");
        }
    }

    #[test]
    fn test_skirts_face_outward() {
        let layout = GridLayout::new(4, 4, 3.0, 3.0);
        let mut top = grid_plane(&layout);
        for p in &mut top.positions {
            p.y = 1.0;
        }
        for (side, mesh) in skirt_meshes(&top, &layout, -2.0) {
            for [a, b, c] in mesh.triangles() {
                let n = (b - a).cross(c - a);
                assert!(
                    n.dot(side.outward()) > 0.0,
                    "triangle on {side:?} faces inward"
                );
            }
        }
    }

    #[test]
    fn test_skirt_reaches_floor() {
        let layout = GridLayout::new(3, 3, 2.0, 2.0);
        let top = grid_plane(&layout);
        for (_, mesh) in skirt_meshes(&top, &layout, -5.0) {
            let aabb = mesh.aabb().unwrap();
            assert_eq!(aabb.min.y, -5.0);
            assert_eq!(aabb.max.y, 0.0);
        }
    }
}
