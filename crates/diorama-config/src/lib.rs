//! Diorama settings: the JSON configuration blob, its defaults and
//! clamping, command-line overrides and the session store it persists to.

mod cli;
mod config;
mod error;
mod session;

pub use cli::CliArgs;
pub use config::{BiomeConfig, BoundsConfig, DioramaConfig};
pub use diorama_terrain::{ShorelineParams as ShorelineConfig, WaterParams as WaterConfig};
pub use error::ConfigError;
pub use session::{SESSION_KEY, SessionStore};
