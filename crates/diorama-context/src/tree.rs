//! Arena-backed quadtree over the diorama footprint.

use diorama_math::{Color, Rect};
use glam::Vec2;

use crate::quad::{LabelCounts, Quad, QuadId, Quadrant};

/// Nodes whose extents are both at or below this size are not subdivided.
pub const DEFAULT_MIN_CELL_SIZE: f32 = 1.0;

/// Weight of the centre cell in [`ContextQuadtree::average_color`]. Each
/// coloured neighbour counts once.
const CENTER_WEIGHT: f32 = 2.0;

/// Spatial index of semantic labels and sampled colours.
///
/// Nodes are created lazily on the insertion path and never removed. Every
/// node holds the label counts of all insertions inside its bounds, so the
/// root count of a label equals the total number of times it was added.
#[derive(Clone, Debug)]
pub struct ContextQuadtree {
    nodes: Vec<Quad>,
    min_cell_size: f32,
}

impl ContextQuadtree {
    pub fn new(bounds: Rect) -> Self {
        Self::with_min_cell_size(bounds, DEFAULT_MIN_CELL_SIZE)
    }

    pub fn with_min_cell_size(bounds: Rect, min_cell_size: f32) -> Self {
        Self {
            nodes: vec![Quad::new(bounds, 0)],
            min_cell_size: min_cell_size.max(f32::EPSILON),
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.root().bounds
    }

    #[must_use]
    pub fn min_cell_size(&self) -> f32 {
        self.min_cell_size
    }

    #[must_use]
    pub fn root(&self) -> &Quad {
        &self.nodes[0]
    }

    #[must_use]
    pub fn quad(&self, id: QuadId) -> &Quad {
        &self.nodes[id.index()]
    }

    /// Number of materialised nodes, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn contains(&self, position: Vec2) -> bool {
        self.bounds().contains_point(position)
    }

    fn is_finest(&self, id: QuadId) -> bool {
        let size = self.quad(id).bounds.size();
        size.x <= self.min_cell_size && size.y <= self.min_cell_size
    }

    fn child_or_insert(&mut self, parent: QuadId, position: Vec2) -> QuadId {
        let quad = &self.nodes[parent.index()];
        let slot = Quadrant::containing(&quad.bounds, position) as usize;
        if let Some(child) = quad.children[slot] {
            return child;
        }
        let child = Quad::new(quad.bounds.quadrant(slot), quad.depth + 1);
        let id = QuadId(self.nodes.len() as u32);
        self.nodes.push(child);
        self.nodes[parent.index()].children[slot] = Some(id);
        id
    }

    /// Node ids from the root down to the deepest existing node covering
    /// `position`. Empty if the position is outside the tree.
    #[must_use]
    pub fn path_to(&self, position: Vec2) -> Vec<QuadId> {
        if !self.contains(position) {
            return Vec::new();
        }
        let mut path = vec![QuadId::ROOT];
        let mut id = QuadId::ROOT;
        loop {
            let quad = self.quad(id);
            match quad.child(Quadrant::containing(&quad.bounds, position)) {
                Some(child) => {
                    path.push(child);
                    id = child;
                }
                None => return path,
            }
        }
    }

    fn deepest(&self, position: Vec2) -> Option<QuadId> {
        self.path_to(position).last().copied()
    }

    /// Count each of `labels` once at every node from the root down to the
    /// finest cell containing `position`. Returns false, leaving the tree
    /// untouched, when the position lies outside the bounds.
    pub fn add_labels<'a>(
        &mut self,
        labels: impl IntoIterator<Item = &'a str>,
        position: Vec2,
    ) -> bool {
        if !self.contains(position) {
            tracing::warn!(x = position.x, z = position.y, "label position outside quadtree");
            return false;
        }
        let mut unique: Vec<&str> = Vec::new();
        for label in labels {
            if !unique.contains(&label) {
                unique.push(label);
            }
        }

        let mut id = QuadId::ROOT;
        loop {
            let quad = &mut self.nodes[id.index()];
            for label in &unique {
                match quad.labels.get_mut(*label) {
                    Some(count) => *count += 1,
                    None => {
                        quad.labels.insert((*label).to_string(), 1);
                    }
                }
            }
            if self.is_finest(id) {
                return true;
            }
            id = self.child_or_insert(id, position);
        }
    }

    /// Store `color` on the finest cell containing `position`.
    pub fn set_color(&mut self, color: Color, position: Vec2) -> bool {
        if !self.contains(position) {
            tracing::warn!(x = position.x, z = position.y, "colour position outside quadtree");
            return false;
        }
        let mut id = QuadId::ROOT;
        while !self.is_finest(id) {
            id = self.child_or_insert(id, position);
        }
        self.nodes[id.index()].color = Some(color);
        true
    }

    fn color_at(&self, position: Vec2) -> Option<(Color, Rect)> {
        let quad = self.quad(self.deepest(position)?);
        quad.color.map(|c| (c, quad.bounds))
    }

    /// Colour of the finest cell containing `position`, if one was set.
    #[must_use]
    pub fn color(&self, position: Vec2) -> Option<Color> {
        if !self.contains(position) {
            tracing::warn!(x = position.x, z = position.y, "colour lookup outside quadtree");
            return None;
        }
        self.color_at(position).map(|(c, _)| c)
    }

    /// Blend of the cell colour at `position` with its coloured neighbours in
    /// the surrounding 3x3 block of finest cells. `None` if the centre cell
    /// has no colour.
    #[must_use]
    pub fn average_color(&self, position: Vec2) -> Option<Color> {
        if !self.contains(position) {
            tracing::warn!(x = position.x, z = position.y, "colour lookup outside quadtree");
            return None;
        }
        let (center, cell) = self.color_at(position)?;
        let step = cell.size();
        let mut samples = vec![(center, CENTER_WEIGHT)];
        for dz in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dz == 0 {
                    continue;
                }
                let p = position + Vec2::new(dx as f32 * step.x, dz as f32 * step.y);
                if !self.contains(p) {
                    continue;
                }
                if let Some((c, _)) = self.color_at(p) {
                    samples.push((c, 1.0));
                }
            }
        }
        Color::weighted_average(samples)
    }

    /// Label counts of the finest existing node covering `position`.
    #[must_use]
    pub fn labels(&self, position: Vec2) -> Option<&LabelCounts> {
        if !self.contains(position) {
            tracing::warn!(x = position.x, z = position.y, "label lookup outside quadtree");
            return None;
        }
        self.deepest(position).map(|id| &self.quad(id).labels)
    }

    /// Density of `label` over the whole footprint.
    #[must_use]
    pub fn label_density(&self, label: &str) -> f32 {
        self.root().label_density(label)
    }

    /// True if every one of `labels` is present on the path to the finest
    /// existing node covering `position`. Descends from the root and stops
    /// at the first node missing one of them; an unvisited cell answers for
    /// its nearest existing ancestor, as [`Self::labels`] does.
    #[must_use]
    pub fn position_has_labels(&self, position: Vec2, labels: &[&str]) -> bool {
        if !self.contains(position) {
            return false;
        }
        let mut id = QuadId::ROOT;
        loop {
            let quad = self.quad(id);
            if !quad.has_labels(labels.iter().copied()) {
                return false;
            }
            match quad.child(Quadrant::containing(&quad.bounds, position)) {
                Some(child) => id = child,
                None => return true,
            }
        }
    }

    /// Walk from the root towards the densest child until reaching a node
    /// whose `label` density is at least `min_density`.
    #[must_use]
    pub fn find_quad_with_min_label_density(&self, label: &str, min_density: f32) -> Option<QuadId> {
        let mut id = QuadId::ROOT;
        loop {
            let quad = self.quad(id);
            let density = quad.label_density(label);
            if density <= 0.0 {
                return None;
            }
            if density >= min_density {
                return Some(id);
            }
            id = quad.children().max_by(|a, b| {
                self.quad(*a)
                    .label_density(label)
                    .total_cmp(&self.quad(*b).label_density(label))
            })?;
        }
    }

    /// Walk from the root towards the sparsest child until reaching a node
    /// whose `label` density is at most `max_density`.
    #[must_use]
    pub fn find_quad_with_max_label_density(&self, label: &str, max_density: f32) -> Option<QuadId> {
        let mut id = QuadId::ROOT;
        loop {
            let quad = self.quad(id);
            if quad.label_density(label) <= max_density {
                return Some(id);
            }
            id = quad.children().min_by(|a, b| {
                self.quad(*a)
                    .label_density(label)
                    .total_cmp(&self.quad(*b).label_density(label))
            })?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(w: f32, h: f32) -> ContextQuadtree {
        ContextQuadtree::new(Rect::from_center_size(Vec2::ZERO, Vec2::new(w, h)))
    }

    #[test]
    fn test_root_density_counts_every_insertion() {
        let mut t = tree(48.0, 32.0);
        let points = [
            Vec2::new(-20.0, -10.0),
            Vec2::new(3.3, 4.1),
            Vec2::new(23.9, 15.9),
            Vec2::new(3.3, 4.1),
        ];
        for p in points {
            assert!(t.add_labels(["tree"], p));
        }
        let expected = points.len() as f32 / (48.0 * 32.0);
        assert!(
            (t.label_density("tree") - expected).abs() < 1e-9,
            "root density should be inserts / area"
        );
    }

    #[test]
    fn test_density_grows_towards_leaf() {
        let mut t = tree(48.0, 32.0);
        let p = Vec2::new(7.2, -3.4);
        t.add_labels(["rock"], p);
        let path = t.path_to(p);
        assert!(path.len() > 1, "insertion should create a path below the root");
        for pair in path.windows(2) {
            let parent = t.quad(pair[0]);
            let child = t.quad(pair[1]);
            assert_eq!(child.label_count("rock"), parent.label_count("rock"));
            assert!(
                child.label_density("rock") >= parent.label_density("rock"),
                "density must not increase going from leaf back up to root"
            );
        }
    }

    #[test]
    fn test_finest_cell_respects_min_size() {
        let mut t = tree(48.0, 32.0);
        let p = Vec2::new(1.0, 1.0);
        t.add_labels(["ground"], p);
        let leaf = t.quad(*t.path_to(p).last().expect("path"));
        assert!(leaf.bounds().size().x <= DEFAULT_MIN_CELL_SIZE);
        assert!(leaf.bounds().size().y <= DEFAULT_MIN_CELL_SIZE);
        assert!(leaf.bounds().contains_point(p));
    }

    #[test]
    fn test_boundary_points_counted_once() {
        let mut t = tree(8.0, 8.0);
        let points = [
            Vec2::new(4.0, 4.0),
            Vec2::new(-4.0, -4.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 4.0),
            Vec2::new(4.0, 0.0),
        ];
        for p in points {
            t.add_labels(["ground"], p);
        }
        let root = t.root();
        let child_sum: u32 = root
            .children()
            .map(|c| t.quad(c).label_count("ground"))
            .sum();
        assert_eq!(root.label_count("ground"), points.len() as u32);
        assert_eq!(child_sum, root.label_count("ground"), "each point belongs to one child");
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut t = tree(10.0, 10.0);
        assert!(!t.add_labels(["tree"], Vec2::new(20.0, 0.0)));
        assert!(!t.set_color(Color::WHITE, Vec2::new(0.0, -6.0)));
        assert_eq!(t.node_count(), 1);
        assert!(t.color(Vec2::new(20.0, 0.0)).is_none());
        assert!(t.labels(Vec2::new(20.0, 0.0)).is_none());
    }

    #[test]
    fn test_color_round_trip() {
        let mut t = tree(16.0, 16.0);
        let c = Color::new(0.2, 0.4, 0.6);
        let p = Vec2::new(-3.7, 2.2);
        t.set_color(c, p);
        assert_eq!(t.color(p), Some(c));
        assert_eq!(t.color(Vec2::new(5.0, 5.0)), None, "unset cells have no colour");
    }

    #[test]
    fn test_average_color_weights_center_twice() {
        let mut t = ContextQuadtree::new(Rect::new(Vec2::ZERO, Vec2::splat(4.0)));
        t.set_color(Color::WHITE, Vec2::new(1.5, 1.5));
        t.set_color(Color::BLACK, Vec2::new(2.5, 1.5));
        let avg = t.average_color(Vec2::new(1.5, 1.5)).expect("centre is coloured");
        assert!((avg.r - 2.0 / 3.0).abs() < 1e-5, "got {avg:?}");
        assert!(t.average_color(Vec2::new(3.5, 3.5)).is_none());
    }

    #[test]
    fn test_labels_returns_deepest_node() {
        let mut t = tree(16.0, 16.0);
        t.add_labels(["ground", "cliff"], Vec2::new(2.2, 2.2));
        let here = t.labels(Vec2::new(2.2, 2.2)).expect("inside");
        assert_eq!(here.get("cliff"), Some(&1));
        // The far corner only has the root on its path.
        let far = t.labels(Vec2::new(-7.0, -7.0)).expect("inside");
        assert_eq!(far.get("ground"), Some(&1));
    }

    #[test]
    fn test_position_has_labels() {
        let mut t = tree(16.0, 16.0);
        let p = Vec2::new(-5.5, 6.5);
        t.add_labels(["water"], p);
        assert!(t.position_has_labels(p, &["water"]));
        assert!(!t.position_has_labels(p, &["tree", "water"]), "every label must be present");
        assert!(!t.position_has_labels(p, &["tree"]));
        t.add_labels(["tree"], p);
        assert!(t.position_has_labels(p, &["tree", "water"]));
        assert!(!t.position_has_labels(Vec2::new(9.0, 0.0), &["water"]), "outside the root");
    }

    #[test]
    fn test_unvisited_cell_answers_for_nearest_ancestor() {
        let mut t = tree(16.0, 16.0);
        t.add_labels(["sand"], Vec2::new(-5.5, 6.5));
        let q = Vec2::new(5.5, -6.5);
        let labels_say = t.labels(q).is_some_and(|l| l.contains_key("sand"));
        assert!(labels_say, "root is the deepest node on this path");
        assert_eq!(t.position_has_labels(q, &["sand"]), labels_say);
        assert!(!t.position_has_labels(q, &["sand", "cliff"]));

        t.add_labels(["tree"], q);
        assert!(
            !t.position_has_labels(q, &["sand"]),
            "a visited cell without the label answers for itself"
        );
        assert!(t.position_has_labels(q, &["tree"]));
    }

    #[test]
    fn test_duplicate_labels_in_one_call() {
        let mut t = tree(4.0, 4.0);
        t.add_labels(["tree", "tree"], Vec2::ZERO);
        assert_eq!(t.root().label_count("tree"), 1);
    }

    #[test]
    fn test_find_quad_by_density() {
        let mut t = tree(16.0, 16.0);
        for _ in 0..4 {
            t.add_labels(["tree"], Vec2::new(6.5, 6.5));
        }
        t.add_labels(["tree"], Vec2::new(-6.5, -6.5));
        let root_density = t.label_density("tree");

        let dense = t
            .find_quad_with_min_label_density("tree", root_density * 2.0)
            .expect("a denser quad exists");
        assert!(t.quad(dense).label_density("tree") >= root_density * 2.0);
        assert!(t.quad(dense).bounds().contains_point(Vec2::new(6.5, 6.5)));

        assert_eq!(
            t.find_quad_with_max_label_density("tree", root_density),
            Some(QuadId::ROOT)
        );
        assert!(t.find_quad_with_min_label_density("rock", 0.1).is_none());
    }

    #[test]
    fn test_path_to_and_node_count() {
        let mut t = tree(8.0, 8.0);
        assert_eq!(t.path_to(Vec2::ZERO), vec![QuadId::ROOT]);
        t.add_labels(["a"], Vec2::new(1.5, 1.5));
        let depth = t.path_to(Vec2::new(1.5, 1.5)).len();
        assert_eq!(t.node_count(), depth);
        assert!(t.path_to(Vec2::new(9.0, 0.0)).is_empty());
    }
}
