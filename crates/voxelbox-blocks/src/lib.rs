//! Block kinds and the fixed registry.
#![forbid(unsafe_code)]

pub mod registry;
pub mod types;

pub use registry::{BlockKind, BlockRegistry, REGISTRY};
pub use types::BlockKindId;
