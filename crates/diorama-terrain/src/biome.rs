//! Biome definitions: terrain palette, water style and object weights.

mod registry;

use std::collections::BTreeMap;

use diorama_math::Color;

pub use registry::{BiomeId, BiomeRegistry, BiomeRegistryError};

/// Terrain colours for one biome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainPalette {
    pub ground: Color,
    pub shoreline: Color,
    pub cliff: Color,
    pub underwater: Color,
    pub side: Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaterStyle {
    pub color: Color,
    pub opacity: f32,
}

/// Named bundle of palette, water style and distributable object classes.
#[derive(Clone, Debug, PartialEq)]
pub struct Biome {
    pub name: String,
    pub palette: TerrainPalette,
    pub water: WaterStyle,
    /// Object classes distributed in this biome, in distribution order.
    pub classes: Vec<String>,
    /// Per-class weight multipliers. Classes without an entry weigh `1.0`.
    pub weights: BTreeMap<String, f32>,
}

impl Biome {
    /// Weight multiplier of `class`, or `0.0` if the class does not appear in
    /// this biome.
    pub fn weight(&self, class: &str) -> f32 {
        if !self.classes.iter().any(|c| c == class) {
            return 0.0;
        }
        self.weights.get(class).copied().unwrap_or(1.0).max(0.0)
    }

    /// Copy of this biome with `overrides` replacing the matching weights.
    pub fn with_weight_overrides(&self, overrides: &BTreeMap<String, f32>) -> Biome {
        let mut biome = self.clone();
        for (class, weight) in overrides {
            biome.weights.insert(class.clone(), *weight);
        }
        biome
    }

    fn new(
        name: &str,
        palette: TerrainPalette,
        water: WaterStyle,
        weights: &[(&str, f32)],
    ) -> Self {
        Self {
            name: name.to_owned(),
            palette,
            water,
            classes: weights.iter().map(|(c, _)| (*c).to_owned()).collect(),
            weights: weights.iter().map(|(c, w)| ((*c).to_owned(), *w)).collect(),
        }
    }

    pub fn temperate() -> Self {
        Self::new(
            "temperate",
            TerrainPalette {
                ground: Color::new(0.19, 0.35, 0.11),
                shoreline: Color::new(0.41, 0.31, 0.15),
                cliff: Color::new(0.28, 0.31, 0.29),
                underwater: Color::new(0.05, 0.08, 0.08),
                side: Color::new(0.42, 0.37, 0.26),
            },
            WaterStyle {
                color: Color::new(0.05, 0.06, 0.04),
                opacity: 0.83,
            },
            &[("building", 0.1), ("tree", 0.4), ("rock", 0.1)],
        )
    }

    pub fn desert() -> Self {
        Self::new(
            "desert",
            TerrainPalette {
                ground: Color::new(0.44, 0.24, 0.14),
                shoreline: Color::new(0.56, 0.37, 0.24),
                cliff: Color::new(0.34, 0.19, 0.12),
                underwater: Color::new(0.05, 0.08, 0.08),
                side: Color::new(0.41, 0.28, 0.21),
            },
            WaterStyle {
                color: Color::new(0.08, 0.15, 0.11),
                opacity: 0.75,
            },
            &[("cactus", 1.0), ("rock", 0.15)],
        )
    }

    pub fn arctic() -> Self {
        Self::new(
            "arctic",
            TerrainPalette {
                ground: Color::new(0.82, 0.84, 0.88),
                shoreline: Color::new(0.55, 0.51, 0.47),
                cliff: Color::new(0.24, 0.26, 0.26),
                underwater: Color::new(0.05, 0.08, 0.08),
                side: Color::new(0.31, 0.24, 0.18),
            },
            WaterStyle {
                color: Color::new(0.04, 0.05, 0.03),
                opacity: 0.81,
            },
            &[("tree", 0.2), ("rock", 0.2)],
        )
    }
}
