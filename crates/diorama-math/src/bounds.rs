//! Axis-aligned 2D rectangles and the 3D diorama volume.

use glam::{Vec2, Vec3};

/// Axis-aligned rectangle in the XZ footprint plane.
///
/// Invariant: `min.x <= max.x` and `min.y <= max.y`. The constructor enforces
/// this by swapping components if needed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Create a rectangle from two corners.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create a rectangle centred on `center` with full extents `size`.
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn area(&self) -> f32 {
        let s = self.size();
        s.x * s.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Returns true if the point lies inside or on the boundary.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// One of the four quadrants, ordered
    /// \[top-left, top-right, bottom-left, bottom-right\] where "top" is the
    /// low-y half and "left" the low-x half.
    pub fn quadrant(&self, index: usize) -> Rect {
        let c = self.center();
        match index {
            0 => Rect::new(self.min, c),
            1 => Rect::new(Vec2::new(c.x, self.min.y), Vec2::new(self.max.x, c.y)),
            2 => Rect::new(Vec2::new(self.min.x, c.y), Vec2::new(c.x, self.max.y)),
            _ => Rect::new(c, self.max),
        }
    }
}

/// Extents of the diorama volume, centred on the origin.
///
/// `x` is the width, `y` the height and `z` the depth. Immutable for the
/// duration of a generation run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn size(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn half(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Lowest y of the volume (`-y/2`).
    pub fn floor(&self) -> f32 {
        -self.y * 0.5
    }

    /// Highest y of the volume (`y/2`).
    pub fn ceiling(&self) -> f32 {
        self.y * 0.5
    }

    /// The XZ footprint as a rectangle centred on the origin.
    pub fn footprint(&self) -> Rect {
        Rect::from_center_size(Vec2::ZERO, Vec2::new(self.x, self.z))
    }

    pub fn footprint_area(&self) -> f32 {
        self.x * self.z
    }

    /// Height at fraction `t` of the vertical range (`0` is the floor, `1` the ceiling).
    pub fn height_at_fraction(&self, t: f32) -> f32 {
        crate::lerp(self.floor(), self.ceiling(), t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_new_sorts_corners() {
        let r = Rect::new(Vec2::new(4.0, -1.0), Vec2::new(-2.0, 3.0));
        assert_eq!(r.min, Vec2::new(-2.0, -1.0));
        assert_eq!(r.max, Vec2::new(4.0, 3.0));
    }

    #[test]
    fn test_contains_point_inclusive() {
        let r = Rect::new(Vec2::ZERO, Vec2::ONE);
        assert!(r.contains_point(Vec2::ZERO));
        assert!(r.contains_point(Vec2::ONE));
        assert!(!r.contains_point(Vec2::new(1.0001, 0.5)));
    }

    #[test]
    fn test_quadrants_tile_parent() {
        let r = Rect::new(Vec2::new(-4.0, -2.0), Vec2::new(4.0, 2.0));
        let total: f32 = (0..4).map(|i| r.quadrant(i).area()).sum();
        assert!((total - r.area()).abs() < 1e-6);
        assert_eq!(r.quadrant(0).max, r.center());
        assert_eq!(r.quadrant(3).min, r.center());
    }

    #[test]
    fn test_bounds_footprint_centered() {
        let b = Bounds::new(48.0, 16.0, 32.0);
        let f = b.footprint();
        assert_eq!(f.min, Vec2::new(-24.0, -16.0));
        assert_eq!(f.max, Vec2::new(24.0, 16.0));
        assert_eq!(b.footprint_area(), 1536.0);
        assert_eq!(b.height_at_fraction(0.25), -4.0);
    }
}
