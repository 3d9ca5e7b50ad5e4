//! Triangle mesh data, heightfield grids, primitive builders and ray/mesh
//! intersection for diorama geometry.

mod grid;
mod mesh;
mod primitives;
mod ray;
mod skirt;

pub use grid::{GridLayout, grid_plane};
pub use mesh::Mesh;
pub use primitives::{box_mesh, cylinder_mesh, sphere_mesh};
pub use ray::{Aabb, Ray, intersect_triangle};
pub use skirt::{SkirtSide, skirt_meshes};
