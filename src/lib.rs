//! First-person voxel sandbox core: physics, targeting, block lifecycle and the session.
#![forbid(unsafe_code)]

pub mod animation;
pub mod config;
pub mod event;
pub mod hud;
pub mod input;
pub mod player;
pub mod raycast;
pub mod session;

mod physics_tests;

pub use config::SessionConfig;
pub use event::{Event, EventEnvelope, EventQueue};
pub use input::{InputState, Key, PointerButton};
pub use player::{MoveMode, PhysicsParams, Player};
pub use session::{Session, SessionError};

pub use voxelbox_blocks as blocks;
pub use voxelbox_edit as edit;
pub use voxelbox_geom as geom;
pub use voxelbox_world as world;
