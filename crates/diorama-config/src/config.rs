//! Configuration structs with defaults, shallow JSON merge and clamping.

use std::collections::BTreeMap;

use diorama_math::Bounds;
use diorama_terrain::{Seed, WaterParams};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings for one diorama generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DioramaConfig {
    /// Number or string; every random stream derives from it.
    pub seed: Seed,
    pub bounds: BoundsConfig,
    pub biome: BiomeConfig,
    pub water: WaterParams,
    /// Emit debug helpers (bounds wireframe, placement rays, water curve).
    pub debug: bool,
}

/// Diorama volume extents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoundsConfig {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Biome selection plus per-class weight overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BiomeConfig {
    pub name: String,
    /// Replaces the biome's own weight for each named class.
    pub weights: BTreeMap<String, f32>,
}

impl Default for DioramaConfig {
    fn default() -> Self {
        Self {
            seed: Seed::Number(5000),
            bounds: BoundsConfig::default(),
            biome: BiomeConfig::default(),
            water: WaterParams::default(),
            debug: false,
        }
    }
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            x: 48.0,
            y: 16.0,
            z: 32.0,
        }
    }
}

impl Default for BiomeConfig {
    fn default() -> Self {
        Self {
            name: "temperate".to_string(),
            weights: BTreeMap::new(),
        }
    }
}

impl From<BoundsConfig> for Bounds {
    fn from(b: BoundsConfig) -> Self {
        Bounds::new(b.x, b.y, b.z)
    }
}

const XZ_RANGE: (f32, f32) = (5.0, 100.0);
const Y_RANGE: (f32, f32) = (5.0, 50.0);
/// Density sliders run from none to the full class density.
const WEIGHT_RANGE: (f32, f32) = (0.0, 1.0);

impl DioramaConfig {
    pub fn bounds(&self) -> Bounds {
        self.bounds.into()
    }

    /// Parse `text` over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if `text` is not a JSON object or a
    /// present key has the wrong shape.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let parsed: serde_json::Value = serde_json::from_str(text).map_err(ConfigError::Parse)?;
        let serde_json::Value::Object(overrides) = parsed else {
            return Err(ConfigError::Parse(serde::de::Error::custom(
                "expected a JSON object",
            )));
        };
        let mut merged = serde_json::to_value(Self::default()).map_err(ConfigError::Serialize)?;
        if let serde_json::Value::Object(defaults) = &mut merged {
            for (key, value) in overrides {
                defaults.insert(key, value);
            }
        }
        serde_json::from_value(merged).map_err(ConfigError::Parse)
    }

    /// Top-level keys of `text` replace the defaults. Anything unparseable
    /// yields the defaults and a warning.
    pub fn from_json_or_default(text: &str) -> Self {
        Self::from_json(text).unwrap_or_else(|err| {
            tracing::warn!(%err, "malformed diorama config, using defaults");
            Self::default()
        })
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(ConfigError::Serialize)
    }

    /// Copy with every value clamped into the range the settings UI exposes.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();
        config.bounds.x = clamp_finite(config.bounds.x, XZ_RANGE, BoundsConfig::default().x);
        config.bounds.y = clamp_finite(config.bounds.y, Y_RANGE, BoundsConfig::default().y);
        config.bounds.z = clamp_finite(config.bounds.z, XZ_RANGE, BoundsConfig::default().z);

        let water = &mut config.water;
        water.level = clamp_finite(water.level, (0.0, 1.0), 0.0);
        water.depth = non_negative(water.depth);
        water.width = non_negative(water.width);
        water.falloff = non_negative(water.falloff);
        water.shoreline.width = non_negative(water.shoreline.width);
        water.shoreline.falloff = non_negative(water.shoreline.falloff);

        for weight in config.biome.weights.values_mut() {
            *weight = clamp_finite(*weight, WEIGHT_RANGE, 0.0);
        }
        config
    }
}

fn clamp_finite(value: f32, (lo, hi): (f32, f32), fallback: f32) -> f32 {
    if value.is_finite() { value.clamp(lo, hi) } else { fallback }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
