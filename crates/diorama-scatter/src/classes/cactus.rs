use diorama_context::labels::{CACTUS, GROUND, VEGETATION};
use diorama_math::Color;
use diorama_mesh::{Mesh, cylinder_mesh};
use glam::Vec3;

use crate::builder::{BuildContext, ObjectBuilder, ObjectPart};
use crate::class::{DistributionRule, ObjectClassConfig};

pub const CACTUS_MODEL_KEY: &str = "models/cactus_01.glb";

const CACTUS_GREEN: Color = Color::new(0.25, 0.45, 0.2);

/// Saguaro-style cactus. Uses the cactus model from the asset cache when
/// it was prepared and falls back to cylinders otherwise.
pub struct Cactus {
    config: ObjectClassConfig,
    /// Trunk height of the procedural fallback.
    pub base_height: f32,
}

impl Cactus {
    pub fn new() -> Self {
        let mut config = ObjectClassConfig::new(CACTUS);
        config.labels = vec![VEGETATION.into(), CACTUS.into()];
        config.base_density = Some(0.015);
        config.rule = DistributionRule::new([(GROUND, 1.0)]);
        config.random_angle = Vec3::new(4.0, 180.0, 4.0);
        config.asset = Some(CACTUS_MODEL_KEY.to_owned());
        config.terrain_tint = 0.1;
        Self {
            config,
            base_height: 2.5,
        }
    }

    fn procedural(&self, ctx: &mut BuildContext<'_>) -> Vec<ObjectPart> {
        let height = self.base_height + ctx.rng.jitter(self.base_height * 0.4);
        let radius = height * 0.1;
        let mut parts = vec![ObjectPart::new(upright(radius, height, Vec3::ZERO), CACTUS_GREEN)];

        for side in [-1.0f32, 1.0] {
            if ctx.rng.next_f32() < 0.35 {
                continue;
            }
            let elbow = height * ctx.rng.range(0.3, 0.6);
            let reach = radius * 3.0;
            let arm_height = height * ctx.rng.range(0.2, 0.4);
            let mut bridge = lay_along_x(cylinder_mesh(radius * 0.7, radius * 0.7, reach, 8, 1));
            bridge.translate(Vec3::new(side * reach * 0.5, elbow, 0.0));
            parts.push(ObjectPart::new(bridge, CACTUS_GREEN));
            parts.push(ObjectPart::new(
                upright(radius * 0.7, arm_height, Vec3::new(side * reach, elbow, 0.0)),
                CACTUS_GREEN,
            ));
        }
        parts
    }
}

/// Vertical cylinder standing on `base`.
fn upright(radius: f32, height: f32, base: Vec3) -> Mesh {
    let mut mesh = cylinder_mesh(radius, radius, height, 10, 2);
    mesh.translate(base + Vec3::new(0.0, height * 0.5, 0.0));
    mesh
}

/// Rotate a Y-aligned mesh a quarter turn about Z so it runs along X.
fn lay_along_x(mut mesh: Mesh) -> Mesh {
    let turn = |v: Vec3| Vec3::new(-v.y, v.x, v.z);
    for p in &mut mesh.positions {
        *p = turn(*p);
    }
    for n in &mut mesh.normals {
        *n = turn(*n);
    }
    mesh
}

impl Default for Cactus {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectBuilder for Cactus {
    fn config(&self) -> &ObjectClassConfig {
        &self.config
    }

    fn build(&self, ctx: &mut BuildContext<'_>) -> Vec<ObjectPart> {
        match ctx.assets.get(CACTUS_MODEL_KEY) {
            Some(model) => model
                .meshes
                .iter()
                .map(|instance| ObjectPart {
                    mesh: instance.mesh.clone(),
                    color: instance.material.color,
                    roughness: Some(instance.material.roughness),
                })
                .collect(),
            None => self.procedural(ctx),
        }
    }
}
