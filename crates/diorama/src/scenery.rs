//! Non-terrain scenery: the plinth the diorama stands on, the shadow floor
//! and the lights.

use diorama_math::{Bounds, Color};
use diorama_mesh::{GridLayout, box_mesh, grid_plane};
use diorama_scene::{DebugContext, Light, Material, MeshInstance, NodeKind, SceneNode, ShadowCamera, Transform};
use glam::Vec3;

/// Extra width and depth of the base beyond the diorama footprint.
pub const BASE_PADDING: f32 = 4.0;
pub const BASE_HEIGHT: f32 = 2.0;

const BASE_COLOR: Color = Color::new(0.4, 0.4, 0.4);
const FLOOR_SHADOW_OPACITY: f32 = 0.25;
const SHADOW_MAP_SIZE: u32 = 2048;

/// Grey box directly under the terrain volume.
pub(crate) fn base_node(bounds: Bounds) -> SceneNode {
    let mesh = box_mesh(Vec3::new(
        bounds.x + BASE_PADDING,
        BASE_HEIGHT,
        bounds.z + BASE_PADDING,
    ));
    SceneNode::new("base", NodeKind::Base)
        .with_mesh(MeshInstance::new(mesh, Material::new(BASE_COLOR)))
        .with_transform(Transform::from_translation(Vec3::new(
            0.0,
            bounds.floor() - BASE_HEIGHT * 0.5,
            0.0,
        )))
}

/// Transparent plane under the base that only catches shadows.
pub(crate) fn floor_node(bounds: Bounds) -> SceneNode {
    let size = bounds.x.max(bounds.z) * 2.0;
    let mut mesh = grid_plane(&GridLayout::new(2, 2, size, size));
    mesh.translate(Vec3::new(0.0, bounds.floor() - BASE_HEIGHT, 0.0));
    let mut instance = MeshInstance::new(mesh, Material::new(Color::BLACK).with_opacity(FLOOR_SHADOW_OPACITY));
    instance.cast_shadow = false;
    SceneNode::new("floor", NodeKind::Floor).with_mesh(instance)
}

/// Half of the largest extent; lights and the shadow frustum scale with it.
fn light_scale(bounds: Bounds) -> f32 {
    bounds.x.max(bounds.y).max(bounds.z) * 0.5
}

/// Sky fill plus a shadow-casting sun sized to the diorama.
pub fn lights(bounds: Bounds) -> Vec<Light> {
    let size = light_scale(bounds);
    vec![
        Light::Hemisphere {
            sky: Color::from_hsl(0.6, 1.0, 0.6),
            ground: Color::from_hsl(0.095, 1.0, 0.75),
            intensity: 0.6,
            position: Vec3::new(0.0, 50.0, 0.0),
        },
        Light::Directional {
            color: Color::from_hsl(0.1, 1.0, 0.95),
            intensity: 1.0,
            position: Vec3::new(0.7, 1.0, 0.6) * size,
            shadow: Some(ShadowCamera::symmetric(size * 1.5, 0.1, size * 3.0, SHADOW_MAP_SIZE)),
        },
    ]
}

/// Outline of a directional light's orthographic shadow volume.
pub(crate) fn debug_shadow_frustum(debug: &mut DebugContext, position: Vec3, shadow: &ShadowCamera) {
    let forward = (-position).normalize_or_zero();
    if forward == Vec3::ZERO {
        return;
    }
    let side = forward.cross(Vec3::Y);
    let right = if side.length_squared() > 1e-6 { side.normalize() } else { Vec3::X };
    let up = right.cross(forward);
    let corner = |x: f32, y: f32, d: f32| position + right * x + up * y + forward * d;
    let rect = |d: f32| {
        vec![
            corner(shadow.left, shadow.bottom, d),
            corner(shadow.right, shadow.bottom, d),
            corner(shadow.right, shadow.top, d),
            corner(shadow.left, shadow.top, d),
            corner(shadow.left, shadow.bottom, d),
        ]
    };
    let color = Color::from_hex(0xffaa00);
    let near = rect(shadow.near);
    let far = rect(shadow.far);
    for (i, (a, b)) in near.iter().zip(&far).take(4).enumerate() {
        debug.add_line(format!("sun-frustum-edge-{i}"), vec![*a, *b], color);
    }
    debug.add_line("sun-frustum-near", near, color);
    debug.add_line("sun-frustum-far", far, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds::new(48.0, 16.0, 32.0);

    #[test]
    fn test_base_sits_under_volume() {
        let base = base_node(BOUNDS);
        let aabb = base.world_aabb().unwrap();
        assert!((aabb.max.y - BOUNDS.floor()).abs() < 1e-4, "base top meets the floor");
        assert!((aabb.min.y - (BOUNDS.floor() - BASE_HEIGHT)).abs() < 1e-4);
        assert!((aabb.max.x - 26.0).abs() < 1e-4);
        assert!((aabb.max.z - 18.0).abs() < 1e-4);
    }

    #[test]
    fn test_floor_catches_shadows_only() {
        let floor = floor_node(BOUNDS);
        let instance = &floor.meshes[0];
        assert!(!instance.cast_shadow);
        assert_eq!(instance.material.opacity, 0.25);
        let aabb = floor.world_aabb().unwrap();
        assert!((aabb.max.x - 48.0).abs() < 1e-4, "floor spans twice the largest extent");
        assert!((aabb.min.y - (BOUNDS.floor() - BASE_HEIGHT)).abs() < 1e-4);
    }

    #[test]
    fn test_sun_shadow_scales_with_bounds() {
        let lights = lights(BOUNDS);
        assert_eq!(lights.len(), 2);
        let Light::Directional { position, shadow: Some(shadow), .. } = &lights[1] else {
            panic!("second light should be the shadow-casting sun");
        };
        assert_eq!(*position, Vec3::new(0.7, 1.0, 0.6) * 24.0);
        assert_eq!(shadow.right, 36.0);
        assert_eq!(shadow.far, 72.0);
        assert_eq!(shadow.map_size, 2048);
        assert!(!lights[0].casts_shadow());
    }

    #[test]
    fn test_debug_frustum_lines() {
        let mut debug = DebugContext::new();
        debug_shadow_frustum(&mut debug, Vec3::new(10.0, 10.0, 0.0), &ShadowCamera::symmetric(5.0, 0.1, 20.0, 512));
        assert_eq!(debug.lines.len(), 6);
    }
}
