//! Spatial context for object placement.
//!
//! The [`ContextQuadtree`] accumulates semantic labels ("ground", "cliff",
//! "tree", ...) and sampled terrain colours over the diorama footprint.
//! Terrain shading writes into it; object distribution reads from it and
//! feeds each placed object's labels back in.

pub mod labels;
mod quad;
mod tree;

pub use labels::{LabelSet, LabelThresholds};
pub use quad::{LabelCounts, Quad, QuadId, Quadrant};
pub use tree::{ContextQuadtree, DEFAULT_MIN_CELL_SIZE};
