//! Built-in object classes.

mod building;
mod cactus;
mod rock;
mod tree;

pub use building::Building;
pub use cactus::{CACTUS_MODEL_KEY, Cactus};
pub use rock::Rock;
pub use tree::Tree;
