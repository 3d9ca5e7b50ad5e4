//! Shared math vocabulary for the diorama crates: colours, 2D/3D bounds and
//! deterministic scalar helpers.

mod bounds;
mod color;
mod scalar;

pub use bounds::{Bounds, Rect};
pub use color::Color;
pub use scalar::{clamp01, deg_to_rad, det_cos, det_sin, lerp};
