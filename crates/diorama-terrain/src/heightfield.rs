//! Layered Perlin height field.
//!
//! Each octave samples Perlin noise at a coarser scale (`quality`, growing
//! geometrically) and adds its absolute value weighted by that same scale,
//! so broad features dominate while fine octaves add ridged detail. The
//! sum is then rescaled into the diorama volume.

use diorama_math::Bounds;
use noise::{NoiseFn, Perlin};

use crate::seed::Seed;

/// Permutation seed of the Perlin table. Per-generation variation comes from
/// the seeded z-offset alone.
const PERMUTATION_SEED: u32 = 0;

#[derive(Clone, Debug)]
pub struct HeightFieldParams {
    /// Number of noise passes.
    pub octaves: u32,
    /// Scale multiplier between successive octaves.
    pub quality_step: f64,
    /// Constant gain applied to every octave.
    pub gain: f64,
    /// Margin between the lowest terrain point and the diorama floor.
    pub bottom_padding: f32,
    /// Margin between the highest terrain point and the diorama ceiling.
    pub top_padding: f32,
}

impl Default for HeightFieldParams {
    fn default() -> Self {
        Self {
            octaves: 4,
            quality_step: 5.0,
            gain: 1.75,
            bottom_padding: 2.0,
            top_padding: 2.0,
        }
    }
}

/// Dense grid of elevations, row-major over `(x, z)`.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    width: usize,
    depth: usize,
    values: Vec<f32>,
}

impl HeightField {
    /// Generate a `width x depth` field for `bounds`, rescaled so the lowest
    /// sample sits `bottom_padding` above the floor and the highest sits
    /// `top_padding` below the ceiling.
    pub fn generate(
        width: usize,
        depth: usize,
        bounds: Bounds,
        seed: &Seed,
        params: &HeightFieldParams,
    ) -> Self {
        let perlin = Perlin::new(PERMUTATION_SEED);
        let z = seed.derive("heightfield").rng().next_f64();

        let mut raw = vec![0.0f64; width * depth];
        let mut quality = 1.0f64;
        for _ in 0..params.octaves {
            for (i, h) in raw.iter_mut().enumerate() {
                let x = (i % width) as f64;
                let y = (i / width) as f64;
                *h += (perlin.get([x / quality, y / quality, z]) * quality * params.gain).abs();
            }
            quality *= params.quality_step;
        }

        let low = bounds.floor() + params.bottom_padding;
        let high = (bounds.ceiling() - params.top_padding).max(low);
        let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
        let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;

        let values = raw
            .iter()
            .map(|&h| {
                if span <= f64::EPSILON {
                    low
                } else {
                    low + ((h - min) / span) as f32 * (high - low)
                }
            })
            .collect();

        Self {
            width,
            depth,
            values,
        }
    }

    /// Wrap existing samples. `values.len()` must equal `width * depth`.
    pub fn from_values(width: usize, depth: usize, values: Vec<f32>) -> Option<Self> {
        (values.len() == width * depth).then_some(Self {
            width,
            depth,
            values,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, x: usize, z: usize) -> f32 {
        self.values[z * self.width + x]
    }

    pub fn min(&self) -> f32 {
        self.values.iter().copied().fold(f32::INFINITY, f32::min)
    }

    pub fn max(&self) -> f32 {
        self.values.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }
}
