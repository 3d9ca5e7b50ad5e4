//! Context-aware object scattering.
//!
//! Object classes are plain configuration records plus a builder that
//! turns a seeded [`BuildContext`] into meshes. The [`Distributor`] places
//! every class the biome allows, consulting the context quadtree before each
//! placement and writing the placed object's labels back into it.

mod builder;
mod class;
pub mod classes;
mod distributor;
mod object;
mod registry;

pub use builder::{BuildContext, ObjectBuilder, ObjectPart};
pub use class::{DistributionRule, ObjectClassConfig};
pub use distributor::{ClassSummary, Distributor, PlacementOutcome};
pub use object::ContextualObject;
pub use registry::{ObjectClassId, ObjectRegistry, RegistryError};
