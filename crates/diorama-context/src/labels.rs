//! Label vocabulary and the blend-threshold policy used when one surface
//! fades into another.

use std::borrow::Cow;

pub const GROUND: &str = "ground";
pub const SHORELINE: &str = "shoreline";
pub const CLIFF: &str = "cliff";
pub const WATER: &str = "water";
pub const VEGETATION: &str = "vegetation";
pub const TREE: &str = "tree";
pub const ROCK: &str = "rock";
pub const CACTUS: &str = "cactus";
pub const BUILDING: &str = "building";

/// Blend fractions at which a fading-in label is first added alongside the
/// existing labels (`secondary`) and then replaces them (`dominant`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelThresholds {
    pub secondary: f32,
    pub dominant: f32,
}

impl LabelThresholds {
    pub const DEFAULT: Self = Self {
        secondary: 1.0 / 3.0,
        dominant: 2.0 / 3.0,
    };
}

impl Default for LabelThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Small ordered set of `(label, strength)` pairs, strongest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelSet {
    entries: Vec<(Cow<'static, str>, f32)>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding one label at full strength.
    pub fn single(label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            entries: vec![(label.into(), 1.0)],
        }
    }

    /// Fade `target` in over `self` by blend fraction `t`:
    ///
    /// * `t <= secondary`: labels unchanged.
    /// * `t <= dominant`: `target` appended with strength `t`.
    /// * otherwise: `target` alone.
    pub fn blend(
        mut self,
        target: impl Into<Cow<'static, str>>,
        t: f32,
        thresholds: LabelThresholds,
    ) -> Self {
        if t <= thresholds.secondary {
            self
        } else if t <= thresholds.dominant {
            let target = target.into();
            for entry in &mut self.entries {
                entry.1 *= 1.0 - t;
            }
            match self.entries.iter_mut().find(|(l, _)| *l == target) {
                Some(entry) => entry.1 = entry.1.max(t),
                None => self.entries.push((target, t)),
            }
            self
        } else {
            Self {
                entries: vec![(target.into(), t)],
            }
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_ref())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|(l, _)| l == label)
    }

    /// Strength of `label`, or `0.0` when absent.
    pub fn strength(&self, label: &str) -> f32 {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map_or(0.0, |(_, s)| *s)
    }

    /// The first (strongest-at-insertion) label.
    pub fn primary(&self) -> Option<&str> {
        self.entries.first().map(|(l, _)| l.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_blend_keeps_base() {
        let set = LabelSet::single(SHORELINE).blend(GROUND, 0.2, LabelThresholds::DEFAULT);
        assert_eq!(set.labels().collect::<Vec<_>>(), vec![SHORELINE]);
    }

    #[test]
    fn test_mid_blend_appends_secondary() {
        let set = LabelSet::single(SHORELINE).blend(GROUND, 0.5, LabelThresholds::DEFAULT);
        assert_eq!(set.labels().collect::<Vec<_>>(), vec![SHORELINE, GROUND]);
        assert!((set.strength(GROUND) - 0.5).abs() < 1e-6);
        assert!((set.strength(SHORELINE) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_high_blend_replaces() {
        let set = LabelSet::single(GROUND).blend(CLIFF, 0.9, LabelThresholds::DEFAULT);
        assert_eq!(set.primary(), Some(CLIFF));
        assert_eq!(set.len(), 1);
        assert!(!set.contains(GROUND));
    }

    #[test]
    fn test_threshold_boundaries_inclusive() {
        let t = LabelThresholds::DEFAULT;
        let at_secondary = LabelSet::single(GROUND).blend(CLIFF, t.secondary, t);
        assert!(!at_secondary.contains(CLIFF));
        let at_dominant = LabelSet::single(GROUND).blend(CLIFF, t.dominant, t);
        assert!(at_dominant.contains(GROUND) && at_dominant.contains(CLIFF));
    }

    #[test]
    fn test_blend_existing_label_not_duplicated() {
        let set = LabelSet::single(GROUND).blend(GROUND, 0.5, LabelThresholds::DEFAULT);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_custom_thresholds() {
        let t = LabelThresholds {
            secondary: 0.1,
            dominant: 0.2,
        };
        let set = LabelSet::single(GROUND).blend(CLIFF, 0.15, t);
        assert!(set.contains(CLIFF));
    }
}
