//! Optional visual debugging helpers collected during generation.
//!
//! A `DebugContext` is threaded explicitly through generation as
//! `Option<&mut DebugContext>`; when absent nothing is recorded.

use diorama_math::Color;
use glam::Vec3;

/// Outcome of a placement ray, used to colour its helper arrow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RayOutcome {
    /// The ray hit nothing.
    Miss,
    /// The first hit was not a surface the object may stand on.
    Blocked,
    /// An object was placed at the hit point.
    Placed,
}

impl RayOutcome {
    pub fn color(self) -> Color {
        match self {
            RayOutcome::Miss => Color::from_hex(0xff0000),
            RayOutcome::Blocked => Color::from_hex(0x0000ff),
            RayOutcome::Placed => Color::from_hex(0x00ff00),
        }
    }
}

/// A polyline helper.
#[derive(Clone, Debug, PartialEq)]
pub struct DebugLine {
    pub label: String,
    pub points: Vec<Vec3>,
    pub color: Color,
}

/// An arrow helper for one cast ray.
#[derive(Clone, Debug, PartialEq)]
pub struct DebugRay {
    pub label: String,
    pub origin: Vec3,
    pub direction: Vec3,
    pub length: f32,
    pub outcome: RayOutcome,
}

#[derive(Clone, Debug, Default)]
pub struct DebugContext {
    pub lines: Vec<DebugLine>,
    pub rays: Vec<DebugRay>,
}

impl DebugContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_line(&mut self, label: impl Into<String>, points: Vec<Vec3>, color: Color) {
        self.lines.push(DebugLine {
            label: label.into(),
            points,
            color,
        });
    }

    /// Adds the twelve edges of an axis-aligned box as one line list.
    pub fn add_box(&mut self, label: impl Into<String>, min: Vec3, max: Vec3, color: Color) {
        let c = |x: bool, y: bool, z: bool| {
            Vec3::new(
                if x { max.x } else { min.x },
                if y { max.y } else { min.y },
                if z { max.z } else { min.z },
            )
        };
        let mut points = Vec::with_capacity(24);
        for (a, b) in [
            ((false, false, false), (true, false, false)),
            ((false, true, false), (true, true, false)),
            ((false, false, true), (true, false, true)),
            ((false, true, true), (true, true, true)),
            ((false, false, false), (false, true, false)),
            ((true, false, false), (true, true, false)),
            ((false, false, true), (false, true, true)),
            ((true, false, true), (true, true, true)),
            ((false, false, false), (false, false, true)),
            ((true, false, false), (true, false, true)),
            ((false, true, false), (false, true, true)),
            ((true, true, false), (true, true, true)),
        ] {
            points.push(c(a.0, a.1, a.2));
            points.push(c(b.0, b.1, b.2));
        }
        self.add_line(label, points, color);
    }

    pub fn add_ray(
        &mut self,
        label: impl Into<String>,
        origin: Vec3,
        direction: Vec3,
        length: f32,
        outcome: RayOutcome,
    ) {
        self.rays.push(DebugRay {
            label: label.into(),
            origin,
            direction,
            length,
            outcome,
        });
    }

    /// Number of recorded rays with the given outcome.
    pub fn count_rays(&self, outcome: RayOutcome) -> usize {
        self.rays.iter().filter(|r| r.outcome == outcome).count()
    }
}
