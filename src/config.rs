use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use voxelbox_world::WorldGenParams;

use crate::player::PhysicsParams;
use crate::raycast::DEFAULT_REACH;
use crate::session::SessionError;

/// World sizes the menu offers.
pub const WORLD_SIZES: [u32; 5] = [10, 20, 30, 40, 50];

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SessionConfig {
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub physics: PhysicsParams,
    #[serde(default)]
    pub interaction: InteractionSection,
    #[serde(default)]
    pub worldgen: WorldGenParams,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WorldSection {
    #[serde(default = "default_size")]
    pub size: u32,
    /// Fixed generator seed; fresh entropy on every (re)generation when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_size() -> u32 {
    30
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            size: default_size(),
            seed: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct InteractionSection {
    #[serde(default = "default_reach")]
    pub reach: f32,
    /// Longest frame step fed to physics, in seconds.
    #[serde(default = "default_max_tick_delta")]
    pub max_tick_delta: f32,
    /// Longest slice of a frame handed to one physics update, in seconds.
    #[serde(default = "default_max_physics_step")]
    pub max_physics_step: f32,
    #[serde(default)]
    pub touch_device: bool,
}

fn default_reach() -> f32 {
    DEFAULT_REACH
}
fn default_max_tick_delta() -> f32 {
    0.1
}
fn default_max_physics_step() -> f32 {
    1.0 / 60.0
}

impl Default for InteractionSection {
    fn default() -> Self {
        Self {
            reach: default_reach(),
            max_tick_delta: default_max_tick_delta(),
            max_physics_step: default_max_physics_step(),
            touch_device: false,
        }
    }
}

#[inline]
pub fn is_supported_size(size: u32) -> bool {
    WORLD_SIZES.contains(&size)
}

impl SessionConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: SessionConfig = toml::from_str(s)?;
        if !is_supported_size(cfg.world.size) {
            return Err(Box::new(SessionError::UnsupportedWorldSize(cfg.world.size)));
        }
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}
