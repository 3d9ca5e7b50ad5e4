//! Light descriptions for the renderer.

use diorama_math::Color;
use glam::Vec3;

/// Orthographic shadow frustum of a directional light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowCamera {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
    /// Shadow map resolution (square).
    pub map_size: u32,
}

impl ShadowCamera {
    /// Symmetric frustum of half-extent `extent`.
    pub fn symmetric(extent: f32, near: f32, far: f32, map_size: u32) -> Self {
        Self {
            left: -extent,
            right: extent,
            top: extent,
            bottom: -extent,
            near,
            far,
            map_size,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Light {
    /// Sky/ground gradient ambient light.
    Hemisphere {
        sky: Color,
        ground: Color,
        intensity: f32,
        position: Vec3,
    },
    /// Sun-like light shining from `position` toward the origin.
    Directional {
        color: Color,
        intensity: f32,
        position: Vec3,
        shadow: Option<ShadowCamera>,
    },
}

impl Light {
    pub fn casts_shadow(&self) -> bool {
        matches!(self, Light::Directional { shadow: Some(_), .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_shadow_camera() {
        let cam = ShadowCamera::symmetric(36.0, 0.1, 72.0, 2048);
        assert_eq!(cam.left, -36.0);
        assert_eq!(cam.top, 36.0);
        assert_eq!(cam.map_size, 2048);
    }

    #[test]
    fn test_only_shadowed_directional_casts() {
        let sky = Light::Hemisphere {
            sky: Color::WHITE,
            ground: Color::BLACK,
            intensity: 0.6,
            position: Vec3::Y,
        };
        assert!(!sky.casts_shadow());
        let sun = Light::Directional {
            color: Color::WHITE,
            intensity: 1.0,
            position: Vec3::ONE,
            shadow: Some(ShadowCamera::symmetric(1.0, 0.1, 2.0, 512)),
        };
        assert!(sun.casts_shadow());
    }
}
