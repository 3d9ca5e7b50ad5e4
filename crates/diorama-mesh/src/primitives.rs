//! Procedural primitive meshes for props: boxes, cylinders/cones and
//! low-poly spheres. All primitives are centred on the origin.

use std::f32::consts::{PI, TAU};

use diorama_math::{det_cos, det_sin};
use glam::Vec3;

use crate::Mesh;

/// Axis-aligned box with full extents `size`.
pub fn box_mesh(size: Vec3) -> Mesh {
    let h = size * 0.5;
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let mut mesh = Mesh::new();
    for (n, u, v) in faces {
        let c = n * h;
        let u = u * h;
        let v = v * h;
        mesh.push_quad([c - u - v, c + u - v, c + u + v, c - u + v]);
        mesh.normals.extend_from_slice(&[n; 4]);
    }
    mesh
}

/// Cylinder (or cone when one radius is zero) along Y, spanning
/// `[-height/2, height/2]`. Caps are emitted for non-zero radii.
pub fn cylinder_mesh(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
    height_segments: u32,
) -> Mesh {
    let radial = radial_segments.max(3) as usize;
    let rows = height_segments.max(1) as usize;
    let half = height * 0.5;
    let mut mesh = Mesh::new();

    // Torso: rows from top to bottom, one seam vertex duplicated per row.
    for iy in 0..=rows {
        let v = iy as f32 / rows as f32;
        let radius = radius_top + (radius_bottom - radius_top) * v;
        let y = half - v * height;
        for ix in 0..=radial {
            let theta = ix as f32 / radial as f32 * TAU;
            mesh.positions
                .push(Vec3::new(radius * det_sin(theta), y, radius * det_cos(theta)));
        }
    }
    let row_len = radial + 1;
    for iy in 0..rows {
        for ix in 0..radial {
            let a = (iy * row_len + ix) as u32;
            let b = ((iy + 1) * row_len + ix) as u32;
            let c = ((iy + 1) * row_len + ix + 1) as u32;
            let d = (iy * row_len + ix + 1) as u32;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    if radius_top > 0.0 {
        push_cap(&mut mesh, radius_top, half, radial, true);
    }
    if radius_bottom > 0.0 {
        push_cap(&mut mesh, radius_bottom, -half, radial, false);
    }

    mesh.compute_vertex_normals();
    mesh
}

fn push_cap(mesh: &mut Mesh, radius: f32, y: f32, radial: usize, top: bool) {
    let center = mesh.positions.len() as u32;
    mesh.positions.push(Vec3::new(0.0, y, 0.0));
    for ix in 0..=radial {
        let theta = ix as f32 / radial as f32 * TAU;
        mesh.positions
            .push(Vec3::new(radius * det_sin(theta), y, radius * det_cos(theta)));
    }
    for ix in 0..radial as u32 {
        let j = center + 1 + ix;
        if top {
            mesh.indices.extend_from_slice(&[center, j, j + 1]);
        } else {
            mesh.indices.extend_from_slice(&[center, j + 1, j]);
        }
    }
}

/// UV sphere. Low segment counts give faceted rock-like shapes.
pub fn sphere_mesh(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let ws = width_segments.max(3) as usize;
    let hs = height_segments.max(2) as usize;
    let mut mesh = Mesh::new();

    for iy in 0..=hs {
        let phi = iy as f32 / hs as f32 * PI;
        for ix in 0..=ws {
            let theta = ix as f32 / ws as f32 * TAU;
            let p = Vec3::new(
                -radius * det_cos(theta) * det_sin(phi),
                radius * det_cos(phi),
                radius * det_sin(theta) * det_sin(phi),
            );
            mesh.positions.push(p);
            mesh.normals.push(p.normalize_or_zero());
        }
    }

    let row_len = ws + 1;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = (iy * row_len + ix + 1) as u32;
            let b = (iy * row_len + ix) as u32;
            let c = ((iy + 1) * row_len + ix) as u32;
            let d = ((iy + 1) * row_len + ix + 1) as u32;
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ray;

    fn assert_outward(mesh: &Mesh) {
        for [a, b, c] in mesh.triangles() {
            let n = (b - a).cross(c - a);
            if n.length_squared() < 1e-10 {
                continue;
            }
            let centroid = (a + b + c) / 3.0;
            assert!(
                n.dot(centroid) > 0.0,
                "triangle {a:?} {b:?} {c:?} faces inward"
            );
        }
    }

    #[test]
    fn test_box_faces_outward() {
        let m = box_mesh(Vec3::new(2.0, 1.0, 3.0));
        assert_eq!(m.triangle_count(), 12);
        assert_outward(&m);
        let aabb = m.aabb().unwrap();
        assert_eq!(aabb.max, Vec3::new(1.0, 0.5, 1.5));
    }

    #[test]
    fn test_cylinder_faces_outward() {
        let m = cylinder_mesh(0.5, 1.0, 2.0, 8, 2);
        assert_outward(&m);
        assert_eq!(m.normals.len(), m.positions.len());
    }

    #[test]
    fn test_cone_has_no_top_cap() {
        let cone = cylinder_mesh(0.0, 1.0, 2.0, 8, 1);
        let cyl = cylinder_mesh(1.0, 1.0, 2.0, 8, 1);
        assert_eq!(cyl.triangle_count() - cone.triangle_count(), 8);
    }

    #[test]
    fn test_sphere_faces_outward_and_is_hit() {
        let m = sphere_mesh(2.0, 6, 4);
        assert_outward(&m);
        let d = m
            .raycast(&Ray::new(Vec3::new(0.1, 10.0, 0.1), Vec3::NEG_Y))
            .expect("ray through the sphere centre must hit");
        assert!(d > 7.5 && d < 8.5, "unexpected distance {d}");
    }
}
