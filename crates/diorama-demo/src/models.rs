//! Models served from memory in place of a file or network loader.

use diorama_math::Color;
use diorama_mesh::cylinder_mesh;
use diorama_scene::{AssetError, AssetSource, Material, MeshInstance, Model};
use glam::Vec3;

pub struct BuiltinModels;

impl AssetSource for BuiltinModels {
    async fn load(&self, key: &str) -> Result<Model, AssetError> {
        match key {
            "models/cactus_01.glb" => Ok(cactus()),
            _ => Err(AssetError::Missing(key.to_string())),
        }
    }
}

/// Saguaro-style trunk with one raised arm.
fn cactus() -> Model {
    let material = Material::new(Color::new(0.25, 0.45, 0.2)).with_roughness(0.8);
    let mut trunk = cylinder_mesh(0.35, 0.4, 3.0, 8, 1);
    trunk.translate(Vec3::new(0.0, 1.5, 0.0));
    let mut arm = cylinder_mesh(0.22, 0.25, 1.2, 8, 1);
    arm.translate(Vec3::new(0.7, 2.0, 0.0));
    Model {
        meshes: vec![
            MeshInstance::new(trunk, material.clone()),
            MeshInstance::new(arm, material),
        ],
    }
}
