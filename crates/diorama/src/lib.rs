//! Procedural diorama generation.
//!
//! [`build_diorama`] turns a [`DioramaConfig`] into a self-contained scene:
//! labelled terrain, optional water, scattered props, a base and lights.
//! [`DioramaHost`] owns the diorama currently on display and swaps in a fresh
//! one on every settings change.

mod assets;
mod generate;
mod host;
mod scenery;

pub use assets::{prepare, required_asset_keys};
pub use generate::{Diorama, build_diorama};
pub use host::DioramaHost;
pub use scenery::{BASE_HEIGHT, BASE_PADDING, lights};

pub use diorama_config::DioramaConfig;
