use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::error::Error;

use voxelbox_blocks::BlockKindId;

use crate::store::World;
use crate::types::{FLOOR_Y, GridPos};

/// Reference width the feature and tree densities are expressed against.
const DENSITY_REFERENCE: u32 = 30;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WorldGenParams {
    /// Terrain feature columns per 30-wide world.
    #[serde(default = "default_features_per_30")]
    pub features_per_30: u32,
    /// Trees per 30-wide world.
    #[serde(default = "default_trees_per_30")]
    pub trees_per_30: u32,
    #[serde(default = "default_dirt_chance")]
    pub dirt_chance: f64,
    /// Highest layer index a feature column reaches (inclusive).
    #[serde(default = "default_max_feature_height")]
    pub max_feature_height: i32,
    #[serde(default = "default_trunk_height")]
    pub trunk_height: i32,
    /// Distance kept between trunks and the world border.
    #[serde(default = "default_tree_margin")]
    pub tree_margin: i32,
}

fn default_features_per_30() -> u32 {
    70
}
fn default_trees_per_30() -> u32 {
    5
}
fn default_dirt_chance() -> f64 {
    0.6
}
fn default_max_feature_height() -> i32 {
    2
}
fn default_trunk_height() -> i32 {
    4
}
fn default_tree_margin() -> i32 {
    2
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self {
            features_per_30: default_features_per_30(),
            trees_per_30: default_trees_per_30(),
            dirt_chance: default_dirt_chance(),
            max_feature_height: default_max_feature_height(),
            trunk_height: default_trunk_height(),
            tree_margin: default_tree_margin(),
        }
    }
}

impl WorldGenParams {
    #[inline]
    pub fn feature_iterations(&self, size: u32) -> u32 {
        self.features_per_30.saturating_mul(size) / DENSITY_REFERENCE
    }

    #[inline]
    pub fn tree_iterations(&self, size: u32) -> u32 {
        self.trees_per_30.saturating_mul(size) / DENSITY_REFERENCE
    }

    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(s)?)
    }
}

/// Populate a fresh world: grass floor, random terrain columns, then trees.
///
/// `size` must be positive; callers validate it before getting here.
pub fn generate<R: Rng + ?Sized>(size: u32, params: &WorldGenParams, rng: &mut R) -> World {
    let mut world = World::new(size);
    let s = size as i32;

    for x in 0..s {
        for z in 0..s {
            world.insert(GridPos::new(x, FLOOR_Y, z), BlockKindId::GRASS);
        }
    }

    let features = if s > 0 { params.feature_iterations(size) } else { 0 };
    let dirt_chance = if params.dirt_chance.is_finite() {
        params.dirt_chance.clamp(0.0, 1.0)
    } else {
        default_dirt_chance()
    };
    let mut feature_blocks = 0usize;
    for _ in 0..features {
        let kind = if rng.gen_bool(dirt_chance) {
            BlockKindId::DIRT
        } else if rng.gen_bool(0.5) {
            BlockKindId::STONE
        } else {
            BlockKindId::WOOD
        };
        let height = rng.gen_range(0..=params.max_feature_height.max(0));
        let x = rng.gen_range(0..s);
        let z = rng.gen_range(0..s);
        for y in 0..=height {
            if world.insert(GridPos::new(x, y, z), kind).is_some() {
                feature_blocks += 1;
            }
        }
    }

    let trees = params.tree_iterations(size);
    let lo = params.tree_margin;
    let hi = s - params.tree_margin;
    let mut planted = 0u32;
    if lo < hi {
        for _ in 0..trees {
            let tx = rng.gen_range(lo..hi);
            let tz = rng.gen_range(lo..hi);
            plant_tree(&mut world, tx, tz, params.trunk_height);
            planted += 1;
        }
    }

    log::info!(
        target: "worldgen",
        "generated {}x{} world: {} floor, {} feature iterations ({} blocks), {} trees, {} total",
        size,
        size,
        world.floor_count(),
        features,
        feature_blocks,
        planted,
        world.len()
    );
    world
}

/// Trunk of `trunk_height` wood blocks from y=0, then a 3x2x3 leaf canopy on top
/// with the cell right above the trunk left open.
fn plant_tree(world: &mut World, tx: i32, tz: i32, trunk_height: i32) {
    for y in 0..trunk_height {
        world.insert(GridPos::new(tx, y, tz), BlockKindId::WOOD);
    }
    for lx in -1..=1 {
        for ly in 0..=1 {
            for lz in -1..=1 {
                if lx == 0 && ly == 0 && lz == 0 {
                    continue;
                }
                let p = GridPos::new(tx + lx, trunk_height + ly, tz + lz);
                world.insert(p, BlockKindId::LEAVES);
            }
        }
    }
}

pub fn generate_seeded(size: u32, params: &WorldGenParams, seed: u64) -> World {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(size, params, &mut rng)
}

pub fn generate_unseeded(size: u32, params: &WorldGenParams) -> World {
    let mut rng = StdRng::from_entropy();
    generate(size, params, &mut rng)
}
