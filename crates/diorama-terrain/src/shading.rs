//! Per-vertex terrain colour and surface labels.
//!
//! Height relative to the water line picks an underwater, shoreline or
//! ground band (with linear fades between them); steep slopes above the
//! water line then blend toward the cliff colour.

use diorama_context::labels::{CLIFF, GROUND, SHORELINE, WATER};
use diorama_context::{LabelSet, LabelThresholds};
use diorama_math::{Color, clamp01};
use glam::Vec3;

use crate::biome::TerrainPalette;
use crate::water::{ShorelineParams, WaterParams};

/// Slope (`1 - |n.y|`) where cliff blending starts.
pub const CLIFF_SLOPE_START: f32 = 0.15;
/// Slope at which a vertex is fully cliff.
pub const CLIFF_SLOPE_FULL: f32 = 0.2;
/// Maximum fraction of brightness removed by per-vertex jitter.
pub const BRIGHTNESS_JITTER: f32 = 0.1;

#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceSample {
    pub color: Color,
    pub labels: LabelSet,
}

/// Colour and labels of a terrain vertex at `height` with unit `normal`.
pub fn shade_vertex(
    height: f32,
    normal: Vec3,
    water: &WaterParams,
    water_level: f32,
    palette: &TerrainPalette,
    thresholds: LabelThresholds,
) -> SurfaceSample {
    let mut sample = if water.enabled {
        water_band(height - water_level, &water.shoreline, palette, thresholds)
    } else {
        SurfaceSample {
            color: palette.ground,
            labels: LabelSet::single(GROUND),
        }
    };

    if !water.enabled || height >= water_level {
        let slope = 1.0 - normal.normalize_or_zero().dot(Vec3::Y).abs();
        let cliff = clamp01((slope - CLIFF_SLOPE_START) / (CLIFF_SLOPE_FULL - CLIFF_SLOPE_START));
        if cliff > 0.0 {
            sample.color = sample.color.lerp(palette.cliff, cliff);
            sample.labels = sample.labels.blend(CLIFF, cliff, thresholds);
        }
    }
    sample
}

/// Band selection for a vertex `d` units above (negative: below) the water line.
fn water_band(
    d: f32,
    shoreline: &ShorelineParams,
    palette: &TerrainPalette,
    thresholds: LabelThresholds,
) -> SurfaceSample {
    if !shoreline.enabled {
        return if d < 0.0 {
            SurfaceSample {
                color: palette.underwater,
                labels: LabelSet::single(WATER),
            }
        } else {
            SurfaceSample {
                color: palette.ground,
                labels: LabelSet::single(GROUND),
            }
        };
    }

    let width = shoreline.width.max(0.0);
    let falloff = shoreline.falloff;
    if d < -width {
        let t = if falloff > f32::EPSILON {
            clamp01((d + width + falloff) / falloff)
        } else {
            0.0
        };
        SurfaceSample {
            color: palette.underwater.lerp(palette.shoreline, t),
            labels: LabelSet::single(WATER).blend(SHORELINE, t, thresholds),
        }
    } else if d <= width {
        SurfaceSample {
            color: palette.shoreline,
            labels: LabelSet::single(SHORELINE),
        }
    } else {
        let t = if falloff > f32::EPSILON {
            clamp01((d - width) / falloff)
        } else {
            1.0
        };
        SurfaceSample {
            color: palette.shoreline.lerp(palette.ground, t),
            labels: LabelSet::single(SHORELINE).blend(GROUND, t, thresholds),
        }
    }
}

/// Darken `color` by a jitter draw `r` in `[0, 1)`.
pub fn jitter_brightness(color: Color, r: f32) -> Color {
    color.scale(1.0 - r * BRIGHTNESS_JITTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::Biome;

    fn palette() -> TerrainPalette {
        Biome::temperate().palette
    }

    fn shade(height: f32, normal: Vec3, water: &WaterParams) -> SurfaceSample {
        shade_vertex(height, normal, water, 0.0, &palette(), LabelThresholds::DEFAULT)
    }

    fn labels(sample: &SurfaceSample) -> Vec<&str> {
        sample.labels.labels().collect()
    }

    #[test]
    fn test_bands_on_flat_ground() {
        let water = WaterParams::default();
        let deep = shade(-5.0, Vec3::Y, &water);
        assert_eq!(deep.color, palette().underwater);
        assert_eq!(labels(&deep), vec![WATER]);

        let shore = shade(0.2, Vec3::Y, &water);
        assert_eq!(shore.color, palette().shoreline);
        assert_eq!(labels(&shore), vec![SHORELINE]);

        let high = shade(5.0, Vec3::Y, &water);
        assert_eq!(high.color, palette().ground);
        assert_eq!(labels(&high), vec![GROUND]);
    }

    #[test]
    fn test_shoreline_fade_labels() {
        let water = WaterParams::default();
        // width 0.5, falloff 1.5: d = 0.5 + 0.75 is halfway through the fade.
        let mid = shade(1.25, Vec3::Y, &water);
        assert_eq!(labels(&mid), vec![SHORELINE, GROUND]);
        let near = shade(0.7, Vec3::Y, &water);
        assert_eq!(labels(&near), vec![SHORELINE]);
    }

    #[test]
    fn test_steep_slope_becomes_cliff() {
        let water = WaterParams::default();
        let steep = Vec3::new(1.0, 0.5, 0.0).normalize();
        let sample = shade(5.0, steep, &water);
        assert_eq!(sample.color, palette().cliff);
        assert_eq!(labels(&sample), vec![CLIFF]);
    }

    #[test]
    fn test_cliff_ignored_underwater() {
        let water = WaterParams::default();
        let steep = Vec3::new(1.0, 0.5, 0.0).normalize();
        let sample = shade(-5.0, steep, &water);
        assert!(!sample.labels.contains(CLIFF));
    }

    #[test]
    fn test_no_water_is_ground_everywhere() {
        let water = WaterParams {
            enabled: false,
            ..Default::default()
        };
        let sample = shade(-5.0, Vec3::Y, &water);
        assert_eq!(labels(&sample), vec![GROUND]);
    }

    #[test]
    fn test_shoreline_disabled_splits_at_level() {
        let water = WaterParams {
            shoreline: ShorelineParams {
                enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(labels(&shade(-0.1, Vec3::Y, &water)), vec![WATER]);
        assert_eq!(labels(&shade(0.1, Vec3::Y, &water)), vec![GROUND]);
    }

    #[test]
    fn test_jitter_brightness_range() {
        let c = Color::new(0.5, 0.5, 0.5);
        assert_eq!(jitter_brightness(c, 0.0), c);
        let dark = jitter_brightness(c, 0.999);
        assert!(dark.r < 0.5 && dark.r > 0.5 * (1.0 - BRIGHTNESS_JITTER) - 1e-6);
    }
}
