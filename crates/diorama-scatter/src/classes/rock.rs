use diorama_context::labels::{CLIFF, GROUND, ROCK, SHORELINE, WATER};
use diorama_math::Color;
use diorama_mesh::sphere_mesh;
use glam::Vec3;

use crate::builder::{BuildContext, ObjectBuilder, ObjectPart};
use crate::class::{DistributionRule, ObjectClassConfig};

/// Faceted boulder. Rocks also settle on the bed under water.
pub struct Rock {
    config: ObjectClassConfig,
    /// Mean radius before jitter.
    pub size: f32,
}

impl Rock {
    pub fn new() -> Self {
        let mut config = ObjectClassConfig::new(ROCK);
        config.labels = vec![ROCK.into()];
        config.base_density = Some(0.05);
        config.rule = DistributionRule::new([
            (SHORELINE, 1.0),
            (CLIFF, 0.5),
            (WATER, 0.5),
            (GROUND, 0.1),
        ]);
        config.allow_underwater = true;
        config.random_angle = Vec3::splat(180.0);
        config.terrain_tint = 0.3;
        Self { config, size: 0.6 }
    }
}

impl Default for Rock {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectBuilder for Rock {
    fn config(&self) -> &ObjectClassConfig {
        &self.config
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Vec<ObjectPart> {
        let size = self.size + ctx.rng.jitter(self.size * 0.5);
        let mut sphere = sphere_mesh(size, 4, 4);
        // Partly buried.
        sphere.translate(Vec3::new(0.0, size * 0.5, 0.0));
        let color = Color::new(
            0.5 + ctx.rng.next_f32() * 0.05,
            0.4 + ctx.rng.next_f32() * 0.05,
            0.25 + ctx.rng.next_f32() * 0.05,
        );
        let mut part = ObjectPart::new(sphere, color);
        part.roughness = Some(0.9);
        vec![part]
    }
}
