use diorama_context::labels::{GROUND, SHORELINE, TREE, VEGETATION};
use diorama_math::Color;
use diorama_mesh::cylinder_mesh;
use glam::Vec3;

use crate::builder::{BuildContext, ObjectBuilder, ObjectPart};
use crate::class::{DistributionRule, ObjectClassConfig};

/// Conifer: a single tall cone.
pub struct Tree {
    config: ObjectClassConfig,
    /// Mean height before jitter.
    pub height: f32,
}

impl Tree {
    pub fn new() -> Self {
        let mut config = ObjectClassConfig::new(TREE);
        config.labels = vec![VEGETATION.into(), TREE.into()];
        config.base_density = Some(0.1);
        config.rule = DistributionRule::new([(GROUND, 1.0), (SHORELINE, 0.1)]);
        config.random_angle = Vec3::new(3.0, 180.0, 3.0);
        config.size_variation = 0.3;
        config.terrain_tint = 0.15;
        Self { config, height: 3.0 }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectBuilder for Tree {
    fn config(&self) -> &ObjectClassConfig {
        &self.config
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Vec<ObjectPart> {
        let height = self.height + ctx.rng.jitter(self.height * 0.5);
        let mut cone = cylinder_mesh(0.01, height * 0.25, height, 32, 4);
        cone.translate(Vec3::new(0.0, height * 0.5, 0.0));
        let color = Color::new(
            0.1 + ctx.rng.next_f32() * 0.1,
            0.4 + ctx.rng.next_f32() * 0.1,
            0.2 + ctx.rng.next_f32() * 0.1,
        );
        vec![ObjectPart::new(cone, color)]
    }
}
