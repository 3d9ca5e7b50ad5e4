//! Terrain generation for dioramas.
//!
//! Seeded random streams, the layered-noise height field, biome palettes,
//! the water curve and water surface, and the terrain builder that shades
//! the mesh and fills the context quadtree with surface labels.

pub mod biome;
pub mod heightfield;
pub mod seed;
pub mod shading;
pub mod terrain;
pub mod water;

pub use biome::{Biome, BiomeId, BiomeRegistry, BiomeRegistryError, TerrainPalette, WaterStyle};
pub use heightfield::{HeightField, HeightFieldParams};
pub use seed::{Seed, SeedRng};
pub use shading::{SurfaceSample, shade_vertex};
pub use terrain::{Terrain, TerrainBuilder};
pub use water::{ShorelineParams, WaterCurve, WaterParams, WaterSurface, build_water};
