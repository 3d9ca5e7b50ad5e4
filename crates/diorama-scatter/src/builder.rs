//! The object builder seam.

use diorama_math::{Bounds, Color};
use diorama_mesh::Mesh;
use diorama_scene::AssetCache;
use diorama_terrain::SeedRng;

use crate::class::ObjectClassConfig;

/// Everything a builder may read while generating one instance.
pub struct BuildContext<'a> {
    /// The instance's own stream, seeded from the placement seed.
    pub rng: &'a mut SeedRng,
    pub bounds: Bounds,
    /// Averaged terrain colour around the placement point.
    pub terrain_color: Option<Color>,
    pub underwater: bool,
    pub assets: &'a AssetCache,
}

/// One mesh of an instance with its untinted base material values.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectPart {
    pub mesh: Mesh,
    pub color: Color,
    /// Overrides the class roughness when set.
    pub roughness: Option<f32>,
}

impl ObjectPart {
    pub fn new(mesh: Mesh, color: Color) -> Self {
        Self {
            mesh,
            color,
            roughness: None,
        }
    }
}

/// Procedural geometry for one object class.
pub trait ObjectBuilder {
    fn config(&self) -> &ObjectClassConfig;

    /// Generate the meshes of one instance in object space, base at `y = 0`.
    fn build(&self, ctx: &mut BuildContext<'_>) -> Vec<ObjectPart>;
}
