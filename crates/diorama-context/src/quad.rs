//! A single quadtree node and the quadrant addressing scheme.

use diorama_math::{Color, Rect};
use glam::Vec2;
use hashbrown::HashMap;

/// Label name to insertion count.
pub type LabelCounts = HashMap<String, u32>;

/// Index of a node in the [`ContextQuadtree`](crate::ContextQuadtree) arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QuadId(pub(crate) u32);

impl QuadId {
    pub const ROOT: Self = Self(0);

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Child slot of a node. "Top" is the low-y half, "left" the low-x half.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quadrant {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Quadrant of `bounds` that owns `p`. Points on a split line go to the
    /// top/left side so every point belongs to exactly one child.
    #[must_use]
    pub fn containing(bounds: &Rect, p: Vec2) -> Self {
        let mid = bounds.center();
        match (p.x <= mid.x, p.y <= mid.y) {
            (true, true) => Quadrant::TopLeft,
            (false, true) => Quadrant::TopRight,
            (true, false) => Quadrant::BottomLeft,
            (false, false) => Quadrant::BottomRight,
        }
    }
}

/// Node of the context quadtree.
///
/// Interior nodes aggregate the label counts of everything inserted beneath
/// them. Only finest-level nodes carry a colour.
#[derive(Clone, Debug)]
pub struct Quad {
    pub(crate) bounds: Rect,
    pub(crate) depth: u32,
    pub(crate) labels: LabelCounts,
    pub(crate) color: Option<Color>,
    pub(crate) children: [Option<QuadId>; 4],
}

impl Quad {
    pub(crate) fn new(bounds: Rect, depth: u32) -> Self {
        Self {
            bounds,
            depth,
            labels: LabelCounts::new(),
            color: None,
            children: [None; 4],
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[must_use]
    pub fn labels(&self) -> &LabelCounts {
        &self.labels
    }

    #[must_use]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    #[must_use]
    pub fn child(&self, quadrant: Quadrant) -> Option<QuadId> {
        self.children[quadrant as usize]
    }

    /// Children that have been materialised, in quadrant order.
    pub fn children(&self) -> impl Iterator<Item = QuadId> + '_ {
        self.children.iter().flatten().copied()
    }

    #[must_use]
    pub fn label_count(&self, label: &str) -> u32 {
        self.labels.get(label).copied().unwrap_or(0)
    }

    /// Insertions of `label` per unit area.
    #[must_use]
    pub fn label_density(&self, label: &str) -> f32 {
        let area = self.bounds.area();
        if area <= 0.0 {
            return 0.0;
        }
        self.label_count(label) as f32 / area
    }

    /// True if every one of `labels` has a nonzero count here.
    pub fn has_labels<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> bool {
        labels.into_iter().all(|l| self.label_count(l) > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Rect {
        Rect::new(Vec2::ZERO, Vec2::splat(2.0))
    }

    #[test]
    fn test_quadrant_matches_rect_quadrant() {
        let r = unit();
        for q in Quadrant::ALL {
            let sub = r.quadrant(q as usize);
            assert_eq!(
                Quadrant::containing(&r, sub.center()),
                q,
                "centre of quadrant {q:?} should map back to it"
            );
        }
    }

    #[test]
    fn test_split_line_goes_top_left() {
        let r = unit();
        assert_eq!(Quadrant::containing(&r, Vec2::new(1.0, 1.0)), Quadrant::TopLeft);
        assert_eq!(Quadrant::containing(&r, Vec2::new(1.0, 1.5)), Quadrant::BottomLeft);
        assert_eq!(Quadrant::containing(&r, Vec2::new(1.5, 1.0)), Quadrant::TopRight);
    }

    #[test]
    fn test_density_and_has_labels() {
        let mut q = Quad::new(unit(), 0);
        q.labels.insert("tree".into(), 2);
        assert!((q.label_density("tree") - 0.5).abs() < 1e-6);
        assert_eq!(q.label_density("rock"), 0.0);
        assert!(q.has_labels(["tree"]));
        assert!(!q.has_labels(["rock", "tree"]), "every label must be present");
        assert!(!q.has_labels(["rock"]));
        q.labels.insert("rock".into(), 1);
        assert!(q.has_labels(["rock", "tree"]));
    }
}
