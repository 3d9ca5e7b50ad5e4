//! Placed contextual objects.

use diorama_math::{Bounds, Color, deg_to_rad, det_cos, det_sin};
use diorama_scene::{AssetCache, Material, MeshInstance, NodeKind, SceneNode, Transform};
use diorama_terrain::Seed;
use glam::{Quat, Vec3};

use crate::builder::{BuildContext, ObjectBuilder, ObjectPart};

/// Colour multiplier for instances sitting below the water surface.
const UNDERWATER_SHADE: f32 = 0.7;

/// A placed instance: transform, labels and finished meshes.
#[derive(Clone, Debug)]
pub struct ContextualObject {
    pub class: String,
    pub seed: Seed,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
    pub underwater: bool,
    pub labels: Vec<String>,
    pub meshes: Vec<MeshInstance>,
}

impl ContextualObject {
    /// Build one instance of `builder`'s class at `position`.
    ///
    /// Every random draw comes from `seed`: rotation, scale, the builder's
    /// own geometry and then per-mesh material jitter, in that order.
    pub fn build(
        builder: &dyn ObjectBuilder,
        seed: Seed,
        position: Vec3,
        bounds: Bounds,
        terrain_color: Option<Color>,
        underwater: bool,
        assets: &AssetCache,
    ) -> Self {
        let config = builder.config();
        let mut rng = seed.rng();

        let angle = config.random_angle;
        let rotation = euler_xyz(
            rng.jitter(2.0) * deg_to_rad(angle.x),
            rng.jitter(2.0) * deg_to_rad(angle.y),
            rng.jitter(2.0) * deg_to_rad(angle.z),
        );
        let scale = 1.0 + rng.jitter(config.size_variation);

        let parts = builder.build(&mut BuildContext {
            rng: &mut rng,
            bounds,
            terrain_color,
            underwater,
            assets,
        });

        let variation = config.color_variation;
        let meshes = parts
            .into_iter()
            .map(|ObjectPart { mesh, color, roughness }| {
                let mut color = match terrain_color {
                    Some(tc) if config.terrain_tint > 0.0 => color.lerp(tc, config.terrain_tint),
                    _ => color,
                };
                if underwater {
                    color = color.scale(UNDERWATER_SHADE);
                }
                let color = color
                    .offset(rng.jitter(variation), rng.jitter(variation), rng.jitter(variation))
                    .saturate();
                let roughness =
                    (roughness.unwrap_or(config.roughness) + rng.jitter(variation)).clamp(0.0, 1.0);
                MeshInstance::new(mesh, Material::new(color).with_roughness(roughness))
            })
            .collect();

        Self {
            class: config.name.clone(),
            seed,
            position,
            rotation,
            scale,
            underwater,
            labels: config.labels.clone(),
            meshes,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.position,
            rotation: self.rotation,
            scale: Vec3::splat(self.scale),
        }
    }

    pub fn to_scene_node(&self, name: impl Into<String>) -> SceneNode {
        let mut node =
            SceneNode::new(name, NodeKind::Object(self.class.clone())).with_transform(self.transform());
        node.meshes = self.meshes.clone();
        node
    }
}

/// Intrinsic X, then Y, then Z rotation, built with libm trig.
fn euler_xyz(x: f32, y: f32, z: f32) -> Quat {
    let axis = |v: Vec3, a: f32| {
        let s = det_sin(a * 0.5);
        Quat::from_xyzw(v.x * s, v.y * s, v.z * s, det_cos(a * 0.5))
    };
    axis(Vec3::X, x) * axis(Vec3::Y, y) * axis(Vec3::Z, z)
}
