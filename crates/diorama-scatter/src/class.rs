//! Static per-class configuration.

use diorama_context::LabelCounts;
use diorama_terrain::SeedRng;
use glam::Vec3;

/// Ordered mapping from a surface label to the probability of accepting a
/// placement on it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DistributionRule {
    entries: Vec<(String, f32)>,
}

impl DistributionRule {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, f32)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(label, p)| (label.to_owned(), p))
                .collect(),
        }
    }

    pub fn entries(&self) -> &[(String, f32)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Walks the rule in order and draws once for every label present in
    /// `labels`; the first draw at or below its probability wins. Labels
    /// absent at the position consume no draw.
    pub fn evaluate(&self, labels: &LabelCounts, rng: &mut SeedRng) -> Option<&str> {
        for (label, probability) in &self.entries {
            if labels.get(label.as_str()).copied().unwrap_or(0) == 0 {
                continue;
            }
            if rng.next_f32() <= *probability {
                return Some(label);
            }
        }
        None
    }
}

/// Class-level metadata of a contextual object.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectClassConfig {
    /// Registry key, also used to name the class's random stream.
    pub name: String,
    /// Labels written into the context quadtree where an instance is placed.
    pub labels: Vec<String>,
    /// Objects per unit of footprint area before the biome weight. A class
    /// without a density is never distributed.
    pub base_density: Option<f32>,
    pub rule: DistributionRule,
    /// May be placed on the bed below a water surface.
    pub allow_underwater: bool,
    /// Maximum rotation per axis, in degrees, either side of zero.
    pub random_angle: Vec3,
    /// Full range of the uniform scale jitter around `1.0`.
    pub size_variation: f32,
    /// Full range of the per-mesh colour and roughness jitter.
    pub color_variation: f32,
    /// Base roughness of every mesh before jitter.
    pub roughness: f32,
    /// How far base colours are pulled toward the sampled terrain colour.
    pub terrain_tint: f32,
    /// Model requested from the asset cache, if any.
    pub asset: Option<String>,
}

impl ObjectClassConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            labels: Vec::new(),
            base_density: None,
            rule: DistributionRule::default(),
            allow_underwater: false,
            random_angle: Vec3::ZERO,
            size_variation: 0.5,
            color_variation: 0.1,
            roughness: 0.6,
            terrain_tint: 0.0,
            asset: None,
        }
    }

    /// Number of instances to attempt over `area` at biome `weight`.
    pub fn target_count(&self, area: f32, weight: f32) -> usize {
        let density = self.base_density.unwrap_or(0.0);
        (area * density * weight).max(0.0).floor() as usize
    }

    /// Reason this class cannot be distributed, if any.
    pub fn missing_metadata(&self) -> Option<&'static str> {
        if self.base_density.is_none() {
            Some("base density")
        } else if self.labels.is_empty() {
            Some("labels")
        } else if self.rule.is_empty() {
            Some("distribution rule")
        } else {
            None
        }
    }
}
