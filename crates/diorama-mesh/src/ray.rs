//! Rays, bounding boxes and the Möller–Trumbore ray/triangle test.

use glam::Vec3;

const EPSILON: f32 = 1e-7;

/// A half-line with a normalized direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray. `direction` is normalized here.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Smallest box enclosing all `points`, or `None` if there are none.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    /// Smallest box enclosing both boxes.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Slab test. Returns the entry distance (0 when the origin is inside) or
    /// `None` if the ray misses the box.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;
        for axis in 0..3 {
            let o = ray.origin[axis];
            let d = ray.direction[axis];
            if d.abs() < EPSILON {
                if o < self.min[axis] || o > self.max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (self.min[axis] - o) * inv;
            let mut t1 = (self.max[axis] - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
        Some(t_min)
    }
}

/// Two-sided Möller–Trumbore intersection. Returns the distance along the ray
/// to the hit point, or `None` if the ray misses or runs parallel to the triangle.
pub fn intersect_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = edge2.dot(q) * inv_det;
    (t > EPSILON).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_hit_distance() {
        let ray = Ray::new(Vec3::new(0.2, 5.0, 0.2), Vec3::NEG_Y);
        let t = intersect_triangle(
            &ray,
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 0.0),
        );
        assert!((t.unwrap() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_triangle_behind_origin_is_missed() {
        let ray = Ray::new(Vec3::new(0.2, 0.0, 0.2), Vec3::NEG_Y);
        let t = intersect_triangle(
            &ray,
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 0.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, -1.0), Vec3::Z);
        let t = intersect_triangle(
            &ray,
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 0.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_aabb_slab_test() {
        let aabb = Aabb {
            min: Vec3::splat(-1.0),
            max: Vec3::splat(1.0),
        };
        let hit = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);
        assert!((aabb.intersect_ray(&hit).unwrap() - 9.0).abs() < 1e-5);
        let miss = Ray::new(Vec3::new(3.0, 10.0, 0.0), Vec3::NEG_Y);
        assert!(aabb.intersect_ray(&miss).is_none());
    }

    #[test]
    fn test_aabb_from_points_empty() {
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }
}
