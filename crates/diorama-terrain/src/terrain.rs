//! Terrain builder: height field to shaded, labelled mesh with sides.

use diorama_context::{ContextQuadtree, LabelThresholds};
use diorama_math::Bounds;
use diorama_mesh::{GridLayout, Mesh, Ray, SkirtSide, grid_plane, skirt_meshes};
use glam::{Vec3, Vec3Swizzles};

use crate::biome::TerrainPalette;
use crate::heightfield::{HeightField, HeightFieldParams};
use crate::seed::{Seed, SeedRng};
use crate::shading::{jitter_brightness, shade_vertex};
use crate::water::{WaterCurve, WaterParams};

/// Upper bound of the per-channel jitter added to ground and shoreline colours.
const PALETTE_JITTER: f32 = 0.05;

/// Generated terrain patch.
#[derive(Clone, Debug)]
pub struct Terrain {
    pub bounds: Bounds,
    pub layout: GridLayout,
    /// Elevations before water carving.
    pub heights: HeightField,
    /// Top surface with per-vertex colours and normals.
    pub mesh: Mesh,
    pub sides: Vec<(SkirtSide, Mesh)>,
    pub water_curve: Option<WaterCurve>,
    /// Palette after the per-generation jitter.
    pub palette: TerrainPalette,
}

impl Terrain {
    /// Drop a ray from the ceiling at a random footprint position onto the
    /// terrain surface.
    pub fn random_point(&self, rng: &mut SeedRng) -> Option<Vec3> {
        let x = (rng.next_f32() - 0.5) * self.bounds.x;
        let z = (rng.next_f32() - 0.5) * self.bounds.z;
        let ray = Ray::new(Vec3::new(x, self.bounds.y, z), Vec3::NEG_Y);
        self.mesh.raycast(&ray).map(|t| ray.at(t))
    }

    pub fn footprint_area(&self) -> f32 {
        self.bounds.footprint_area()
    }
}

pub struct TerrainBuilder<'a> {
    bounds: Bounds,
    seed: &'a Seed,
    water: &'a WaterParams,
    palette: TerrainPalette,
    height_params: HeightFieldParams,
    thresholds: LabelThresholds,
}

impl<'a> TerrainBuilder<'a> {
    pub fn new(bounds: Bounds, seed: &'a Seed, water: &'a WaterParams, palette: TerrainPalette) -> Self {
        Self {
            bounds,
            seed,
            water,
            palette,
            height_params: HeightFieldParams::default(),
            thresholds: LabelThresholds::DEFAULT,
        }
    }

    pub fn with_height_params(mut self, params: HeightFieldParams) -> Self {
        self.height_params = params;
        self
    }

    pub fn with_thresholds(mut self, thresholds: LabelThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// One grid vertex per world unit along each axis.
    pub fn layout(&self) -> GridLayout {
        GridLayout::new(
            self.bounds.x.round() as usize,
            self.bounds.z.round() as usize,
            self.bounds.x,
            self.bounds.z,
        )
    }

    /// Build the terrain, writing surface labels and colours into `context`.
    pub fn build(self, context: &mut ContextQuadtree) -> Terrain {
        let layout = self.layout();
        let heights = HeightField::generate(
            layout.x_vertices,
            layout.z_vertices,
            self.bounds,
            self.seed,
            &self.height_params,
        );

        let mut mesh = grid_plane(&layout);
        for (p, h) in mesh.positions.iter_mut().zip(heights.values()) {
            p.y = *h;
        }

        let water_curve = if self.water.enabled {
            WaterCurve::from_terrain(&mesh.positions, self.bounds)
        } else {
            None
        };
        match &water_curve {
            Some(curve) => self.carve(&mut mesh, curve),
            None if self.water.enabled => {
                tracing::warn!("no water curve found, terrain left uncarved");
            }
            None => {}
        }
        mesh.compute_vertex_normals();

        let palette = self.shade(&mut mesh, context);
        let sides = skirt_meshes(&mesh, &layout, self.bounds.floor());

        Terrain {
            bounds: self.bounds,
            layout,
            heights,
            mesh,
            sides,
            water_curve,
            palette,
        }
    }

    /// Pull vertices near the water curve down into a trough.
    fn carve(&self, mesh: &mut Mesh, curve: &WaterCurve) {
        let reach = self.water.reach();
        let lowest = self.bounds.floor() + 1.0;
        for p in &mut mesh.positions {
            let Some((distance, target)) = curve.closest_xz(p.xz()) else {
                return;
            };
            if distance < reach {
                p.y = self.water.trough_height(distance, target.y, p.y, lowest);
            }
        }
    }

    /// Bake vertex colours and feed labels and colours to the quadtree.
    /// Returns the jittered palette.
    fn shade(&self, mesh: &mut Mesh, context: &mut ContextQuadtree) -> TerrainPalette {
        let mut rng = self.seed.derive("terrain-texture").rng();
        let mut palette = self.palette;
        for color in [&mut palette.ground, &mut palette.shoreline] {
            *color = color.offset(
                rng.next_f32() * PALETTE_JITTER,
                rng.next_f32() * PALETTE_JITTER,
                rng.next_f32() * PALETTE_JITTER,
            );
        }

        let water_level = self.water.level_height(self.bounds);
        let colors = mesh
            .positions
            .iter()
            .zip(&mesh.normals)
            .map(|(p, n)| {
                let sample = shade_vertex(p.y, *n, self.water, water_level, &palette, self.thresholds);
                let color = jitter_brightness(sample.color, rng.next_f32());
                context.add_labels(sample.labels.labels(), p.xz());
                context.set_color(color, p.xz());
                color
            })
            .collect();
        mesh.colors = colors;
        palette
    }
}
