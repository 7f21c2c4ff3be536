use voxelbox_blocks::BlockKindId;
use voxelbox_edit::{Hit, MIN_FLOOR_BLOCKS, Rejected, try_place, try_remove};
use voxelbox_geom::Vec3;
use voxelbox_world::{Animation, FLOOR_Y, GridPos, World};

fn floor(size: i32) -> World {
    let mut w = World::new(size as u32);
    for x in 0..size {
        for z in 0..size {
            w.insert(GridPos::new(x, FLOOR_Y, z), BlockKindId::GRASS);
        }
    }
    w
}

fn hit(block: GridPos, normal: Vec3) -> Hit {
    Hit {
        block,
        normal,
        distance: 2.0,
    }
}

const FAR: Vec3 = Vec3::new(100.0, 100.0, 100.0);

#[test]
fn place_on_top_face_fills_cell_above() {
    let mut w = floor(10);
    let h = hit(GridPos::new(5, -1, 5), Vec3::UP);
    let cell = try_place(&mut w, &h, BlockKindId::STONE, FAR, 2.8).unwrap();
    assert_eq!(cell, GridPos::new(5, 0, 5));
    assert_eq!(w.len(), 101);
    assert_eq!(w.floor_count(), 100);
}

#[test]
fn place_into_occupied_cell_is_rejected() {
    let mut w = floor(10);
    w.insert(GridPos::new(5, 0, 5), BlockKindId::DIRT);
    let h = hit(GridPos::new(5, -1, 5), Vec3::UP);
    assert_eq!(
        try_place(&mut w, &h, BlockKindId::STONE, FAR, 2.8),
        Err(Rejected::Occupied)
    );
    assert_eq!(w.get(GridPos::new(5, 0, 5)).unwrap().kind, BlockKindId::DIRT);
}

#[test]
fn place_into_shrinking_cell_is_rejected() {
    let mut w = floor(10);
    w.insert(GridPos::new(5, 0, 5), BlockKindId::DIRT);
    w.begin_shrink(GridPos::new(5, 0, 5));
    let h = hit(GridPos::new(5, -1, 5), Vec3::UP);
    assert_eq!(
        try_place(&mut w, &h, BlockKindId::STONE, FAR, 2.8),
        Err(Rejected::Occupied)
    );
}

#[test]
fn place_inside_player_is_rejected() {
    let mut w = floor(10);
    // box spans y 0.0..2.8, so the cell above the floor overlaps it
    let player = Vec3::new(5.0, 1.4, 5.0);
    let h = hit(GridPos::new(5, -1, 5), Vec3::UP);
    assert_eq!(
        try_place(&mut w, &h, BlockKindId::STONE, player, 2.8),
        Err(Rejected::PlayerCollision)
    );
    assert!(!w.contains(GridPos::new(5, 0, 5)));

    // one cell over the clearance box (0.8 wide) does not reach
    let beside = hit(GridPos::new(7, -1, 5), Vec3::UP);
    assert!(try_place(&mut w, &beside, BlockKindId::STONE, player, 2.8).is_ok());
}

#[test]
fn remove_starts_shrink_and_releases_outline() {
    let mut w = floor(10);
    w.insert(GridPos::new(2, 0, 2), BlockKindId::WOOD);
    let outline = w.get(GridPos::new(2, 0, 2)).unwrap().outline;
    let r = try_remove(&mut w, &hit(GridPos::new(2, 0, 2), Vec3::UP)).unwrap();
    assert_eq!(r.pos, GridPos::new(2, 0, 2));
    assert_eq!(r.kind, BlockKindId::WOOD);
    assert_eq!(r.released_outline, outline);
    let b = w.get(GridPos::new(2, 0, 2)).unwrap();
    assert!(matches!(b.anim, Animation::Shrinking { .. }));
    assert!(b.outline.is_none());
}

#[test]
fn removing_a_shrinking_block_again_finds_no_target() {
    let mut w = floor(10);
    w.insert(GridPos::new(2, 0, 2), BlockKindId::WOOD);
    let h = hit(GridPos::new(2, 0, 2), Vec3::UP);
    assert!(try_remove(&mut w, &h).is_ok());
    assert_eq!(try_remove(&mut w, &h), Err(Rejected::NoTarget));
}

#[test]
fn remove_on_empty_cell_finds_no_target() {
    let mut w = floor(10);
    let h = hit(GridPos::new(3, 4, 3), Vec3::UP);
    assert_eq!(try_remove(&mut w, &h), Err(Rejected::NoTarget));
}

#[test]
fn floor_stops_at_minimum() {
    let mut w = floor(5);
    assert_eq!(w.floor_count(), 25);
    let mut removed = 0;
    for x in 0..5 {
        for z in 0..5 {
            let h = hit(GridPos::new(x, FLOOR_Y, z), Vec3::UP);
            match try_remove(&mut w, &h) {
                Ok(_) => removed += 1,
                Err(e) => assert_eq!(e, Rejected::FloorProtected),
            }
        }
    }
    // 25 -> 20: the removal that would take the count to 19 is refused
    assert_eq!(removed, 5);
    assert_eq!(w.floor_count(), MIN_FLOOR_BLOCKS);
}

#[test]
fn floor_protected_leaves_store_unchanged() {
    let mut w = World::new(5);
    for i in 0..MIN_FLOOR_BLOCKS as i32 {
        w.insert(GridPos::new(i % 5, FLOOR_Y, i / 5), BlockKindId::GRASS);
    }
    let before = w.len();
    let h = hit(GridPos::new(0, FLOOR_Y, 0), Vec3::UP);
    assert_eq!(try_remove(&mut w, &h), Err(Rejected::FloorProtected));
    assert_eq!(w.len(), before);
    assert!(w.get(GridPos::new(0, FLOOR_Y, 0)).unwrap().is_targetable());
}

#[test]
fn blocks_under_the_floor_are_permanent() {
    let mut w = floor(5);
    w.insert(GridPos::new(1, -2, 1), BlockKindId::STONE);
    let h = hit(GridPos::new(1, -2, 1), Vec3::UP);
    assert_eq!(try_remove(&mut w, &h), Err(Rejected::BelowWorld));
}
