//! Validation of block placement and removal against world invariants.
#![forbid(unsafe_code)]

use thiserror::Error;

use voxelbox_blocks::BlockKindId;
use voxelbox_geom::{Aabb, Vec3};
use voxelbox_world::{Animation, ArtifactId, FLOOR_Y, GridPos, World};

/// The floor may never be dug below this many blocks.
pub const MIN_FLOOR_BLOCKS: usize = 20;
/// Width and depth of the box kept clear around the player when placing.
pub const PLACEMENT_CLEARANCE: f32 = 0.8;
/// Starting scale of a freshly placed block.
pub const PLACE_START_SCALE: f32 = 0.1;

/// Block face the player is looking at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub block: GridPos,
    /// Outward unit normal of the face that was hit.
    pub normal: Vec3,
    pub distance: f32,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Rejected {
    #[error("nothing targeted")]
    NoTarget,
    #[error("target cell is already occupied")]
    Occupied,
    #[error("block would intersect the player")]
    PlayerCollision,
    #[error("block lies below the world floor")]
    BelowWorld,
    #[error("floor must keep at least 20 blocks")]
    FloorProtected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Removal {
    pub pos: GridPos,
    pub kind: BlockKindId,
    /// Outline artifact to release right away; the block body goes when its shrink finishes.
    pub released_outline: Option<ArtifactId>,
}

/// Cell a placement on `hit` would fill.
#[inline]
pub fn placement_cell(hit: &Hit) -> GridPos {
    GridPos::from_vec3(hit.block.center() + hit.normal * 1.0)
}

/// Box the player must keep clear of new blocks.
#[inline]
pub fn placement_clearance_box(player_pos: Vec3, player_height: f32) -> Aabb {
    Aabb::from_center_size(
        player_pos,
        Vec3::new(PLACEMENT_CLEARANCE, player_height, PLACEMENT_CLEARANCE),
    )
}

/// Place `kind` against the targeted face. On success the block is in the store
/// with a grow animation pending and its cell is returned.
pub fn try_place(
    world: &mut World,
    hit: &Hit,
    kind: BlockKindId,
    player_pos: Vec3,
    player_height: f32,
) -> Result<GridPos, Rejected> {
    let cell = placement_cell(hit);
    if world.contains(cell) {
        log::debug!(target: "edit", "place at {} rejected: occupied", cell);
        return Err(Rejected::Occupied);
    }
    let clearance = placement_clearance_box(player_pos, player_height);
    if clearance.intersects(&cell.cell_aabb()) {
        log::debug!(target: "edit", "place at {} rejected: player in the way", cell);
        return Err(Rejected::PlayerCollision);
    }
    world
        .insert_with(
            cell,
            kind,
            PLACE_START_SCALE,
            Animation::Growing { elapsed: 0.0 },
        )
        .ok_or(Rejected::Occupied)?;
    log::debug!(target: "edit", "placed {:?} at {}", kind, cell);
    Ok(cell)
}

/// Start removing the targeted block. The block stays in the store, shrinking,
/// until the animation manager finalizes it.
pub fn try_remove(world: &mut World, hit: &Hit) -> Result<Removal, Rejected> {
    let pos = hit.block;
    if pos.y < FLOOR_Y {
        log::debug!(target: "edit", "remove at {} rejected: below world", pos);
        return Err(Rejected::BelowWorld);
    }
    if pos.y == FLOOR_Y && world.floor_count() <= MIN_FLOOR_BLOCKS {
        log::debug!(
            target: "edit",
            "remove at {} rejected: floor down to {}",
            pos,
            world.floor_count()
        );
        return Err(Rejected::FloorProtected);
    }
    let kind = match world.get(pos) {
        Some(b) if b.is_targetable() => b.kind,
        _ => return Err(Rejected::NoTarget),
    };
    let released_outline = world.begin_shrink(pos).ok_or(Rejected::NoTarget)?;
    log::debug!(target: "edit", "removing {:?} at {}", kind, pos);
    Ok(Removal {
        pos,
        kind,
        released_outline,
    })
}
