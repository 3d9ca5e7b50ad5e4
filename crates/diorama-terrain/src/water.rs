//! Water settings, the water curve and the water surface mesh.

use diorama_math::{Bounds, clamp01, lerp};
use diorama_mesh::{GridLayout, Mesh, SkirtSide, grid_plane, skirt_meshes};
use glam::{Vec2, Vec3, Vec3Swizzles};
use serde::{Deserialize, Serialize};

/// Levels at or below this fraction produce no water surface.
pub const MIN_WATER_LEVEL: f32 = 0.001;

/// Number of segments the water curve is sampled into.
pub const CURVE_DIVISIONS: usize = 10;

/// Water surface inset so its edges do not z-fight with the terrain sides.
const SURFACE_INSET: f32 = 0.999;

/// Share of the height difference removed from the higher curve endpoint.
const FLATTEN: f32 = 0.75;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShorelineParams {
    pub enabled: bool,
    /// Half-height of the solid shoreline band around the water level.
    pub width: f32,
    /// Height over which the shoreline fades into ground or underwater.
    pub falloff: f32,
}

impl Default for ShorelineParams {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 0.5,
            falloff: 1.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterParams {
    pub enabled: bool,
    /// Water height as a fraction of the diorama height, `0..=1`.
    pub level: f32,
    /// Depth of the trough carved under the water curve.
    pub depth: f32,
    /// Full width of the trough floor.
    pub width: f32,
    /// Horizontal distance over which the trough blends back into terrain.
    pub falloff: f32,
    pub shoreline: ShorelineParams,
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            enabled: true,
            level: 0.25,
            depth: 1.0,
            width: 2.0,
            falloff: 6.0,
            shoreline: ShorelineParams::default(),
        }
    }
}

impl WaterParams {
    /// World height of the water line.
    pub fn level_height(&self, bounds: Bounds) -> f32 {
        bounds.height_at_fraction(self.level)
    }

    /// True when a water surface should be built.
    pub fn has_surface(&self) -> bool {
        self.enabled && self.level > MIN_WATER_LEVEL
    }

    /// Height of a trough vertex `distance` away from a curve point at height
    /// `curve_height`, given its undisturbed height `current`. Never below
    /// `lowest`.
    pub fn trough_height(&self, distance: f32, curve_height: f32, current: f32, lowest: f32) -> f32 {
        let half = self.width * 0.5;
        let t = if self.falloff > f32::EPSILON {
            clamp01((distance - half) / self.falloff)
        } else if distance > half {
            1.0
        } else {
            0.0
        };
        lerp(curve_height - self.depth, current, t).max(lowest)
    }

    /// Horizontal reach of the trough around the curve.
    pub fn reach(&self) -> f32 {
        self.width * 0.5 + self.falloff
    }
}

/// Smooth curve (uniform Catmull-Rom) through the lowest-lying axis of the
/// terrain.
#[derive(Clone, Debug, PartialEq)]
pub struct WaterCurve {
    control: Vec<Vec3>,
}

impl WaterCurve {
    pub fn new(control: Vec<Vec3>) -> Self {
        Self { control }
    }

    /// Derive the curve from terrain vertices.
    ///
    /// Takes the lowest vertex and the lowest vertex at least a quarter of
    /// the shorter footprint side away from it, extends the line through
    /// them to the footprint edges, pulls the higher end most of the way down
    /// to the lower one and keeps both ends at least one unit above the floor.
    /// `None` if no second point is far enough away.
    pub fn from_terrain(positions: &[Vec3], bounds: Bounds) -> Option<Self> {
        let min_dist = bounds.x.min(bounds.z) / 4.0;
        let first = lowest(positions.iter().copied())?;
        let second = lowest(
            positions
                .iter()
                .copied()
                .filter(|p| p.xz().distance(first.xz()) > min_dist),
        )?;

        let dir = second - first;
        let (t_min, t_max) = clip_to_footprint(first.xz(), dir.xz(), bounds.half().x, bounds.half().z)?;
        let mut start = first + dir * t_min;
        let mut end = first + dir * t_max;

        if start.y > end.y {
            start.y = lerp(start.y, end.y, FLATTEN);
        } else {
            end.y = lerp(end.y, start.y, FLATTEN);
        }
        let lowest = bounds.floor() + 1.0;
        start.y = start.y.max(lowest);
        end.y = end.y.max(lowest);

        Some(Self::new(vec![start, end]))
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.control
    }

    /// Point at parameter `t` in `[0, 1]` along the whole curve.
    pub fn point_at(&self, t: f32) -> Vec3 {
        let n = self.control.len();
        match n {
            0 => return Vec3::ZERO,
            1 => return self.control[0],
            _ => {}
        }
        let segments = n - 1;
        let scaled = t.clamp(0.0, 1.0) * segments as f32;
        let i = (scaled.floor() as usize).min(segments - 1);
        let local = scaled - i as f32;

        let p1 = self.control[i];
        let p2 = self.control[i + 1];
        let p0 = if i > 0 { self.control[i - 1] } else { 2.0 * p1 - p2 };
        let p3 = if i + 2 < n { self.control[i + 2] } else { 2.0 * p2 - p1 };

        let t2 = local * local;
        let t3 = t2 * local;
        0.5 * (2.0 * p1
            + (p2 - p0) * local
            + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
            + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
    }

    /// `divisions + 1` evenly spaced samples from start to end.
    pub fn points(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|d| self.point_at(d as f32 / divisions as f32))
            .collect()
    }

    /// Horizontal distance from `p` to the sampled curve and the closest
    /// curve point (with its interpolated height).
    pub fn closest_xz(&self, p: Vec2) -> Option<(f32, Vec3)> {
        let points = self.points(CURVE_DIVISIONS);
        points
            .windows(2)
            .map(|seg| {
                let q = closest_on_segment_xz(seg[0], seg[1], p);
                (p.distance(q.xz()), q)
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
    }
}

fn lowest(points: impl Iterator<Item = Vec3>) -> Option<Vec3> {
    points.fold(None, |best: Option<Vec3>, p| match best {
        Some(b) if b.y <= p.y => Some(b),
        _ => Some(p),
    })
}

/// Parameter interval of the line `origin + t * dir` inside the centred
/// rectangle with half extents `(hx, hz)`.
fn clip_to_footprint(origin: Vec2, dir: Vec2, hx: f32, hz: f32) -> Option<(f32, f32)> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for (o, d, h) in [(origin.x, dir.x, hx), (origin.y, dir.y, hz)] {
        if d.abs() <= f32::EPSILON {
            continue;
        }
        let t1 = (-h - o) / d;
        let t2 = (h - o) / d;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
    }
    (t_min.is_finite() && t_max.is_finite() && t_min <= t_max).then_some((t_min, t_max))
}

fn closest_on_segment_xz(a: Vec3, b: Vec3, p: Vec2) -> Vec3 {
    let ab = b.xz() - a.xz();
    let len2 = ab.length_squared();
    if len2 <= f32::EPSILON {
        return a;
    }
    let t = ((p - a.xz()).dot(ab) / len2).clamp(0.0, 1.0);
    a.lerp(b, t)
}

/// Flat water plane with skirts down to the floor.
#[derive(Clone, Debug)]
pub struct WaterSurface {
    pub height: f32,
    pub surface: Mesh,
    pub sides: Vec<(SkirtSide, Mesh)>,
}

/// Build the water plane at the configured level, or `None` when water is
/// disabled or the level is negligible.
pub fn build_water(bounds: Bounds, params: &WaterParams) -> Option<WaterSurface> {
    if !params.has_surface() {
        return None;
    }
    let height = params.level_height(bounds);
    let layout = GridLayout::new(2, 2, bounds.x * SURFACE_INSET, bounds.z * SURFACE_INSET);
    let mut surface = grid_plane(&layout);
    for p in &mut surface.positions {
        p.y = height;
    }
    let sides = skirt_meshes(&surface, &layout, bounds.floor());
    Some(WaterSurface {
        height,
        surface,
        sides,
    })
}
