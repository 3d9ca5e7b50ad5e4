use diorama_context::labels::{BUILDING, GROUND};
use diorama_math::Color;
use diorama_mesh::box_mesh;
use glam::Vec3;

use crate::builder::{BuildContext, ObjectBuilder, ObjectPart};
use crate::class::{DistributionRule, ObjectClassConfig};

/// Block building sized as a fraction of the diorama volume.
pub struct Building {
    config: ObjectClassConfig,
    pub scale: f32,
}

impl Building {
    pub fn new() -> Self {
        let mut config = ObjectClassConfig::new(BUILDING);
        config.labels = vec![BUILDING.into()];
        config.base_density = Some(0.01);
        config.rule = DistributionRule::new([(GROUND, 1.0)]);
        config.size_variation = 0.0;
        Self { config, scale: 0.25 }
    }
}

impl Default for Building {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectBuilder for Building {
    fn config(&self) -> &ObjectClassConfig {
        &self.config
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Vec<ObjectPart> {
        let size = ctx.bounds.size() * self.scale;
        let mut block = box_mesh(size);
        block.translate(Vec3::new(0.0, size.y * 0.5, 0.0));
        let color = Color::new(
            0.5 + ctx.rng.next_f32() * 0.1,
            0.4 + ctx.rng.next_f32() * 0.1,
            0.3 + ctx.rng.next_f32() * 0.1,
        );
        vec![ObjectPart::new(block, color)]
    }
}
