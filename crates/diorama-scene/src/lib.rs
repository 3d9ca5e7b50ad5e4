//! Scene graph handed to the renderer: nodes with transformed meshes and
//! materials, lights, raycasting over placed geometry, the asset cache
//! collaborator and optional debug helpers.

mod assets;
mod debug;
mod graph;
mod light;
mod material;

pub use assets::{AssetCache, AssetError, AssetSource, Model, prepare_assets};
pub use debug::{DebugContext, DebugLine, DebugRay, RayOutcome};
pub use graph::{NodeId, NodeKind, Scene, SceneHit, SceneNode, Transform};
pub use light::{Light, ShadowCamera};
pub use material::{Material, MeshInstance};
