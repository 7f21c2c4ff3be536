//! Block storage, block lifecycle state, and procedural world population.
#![forbid(unsafe_code)]

pub mod store;
pub mod types;
pub mod worldgen;

pub use store::World;
pub use types::{Animation, ArtifactId, Block, GridPos, FLOOR_Y};
pub use worldgen::{WorldGenParams, generate, generate_seeded, generate_unseeded};
