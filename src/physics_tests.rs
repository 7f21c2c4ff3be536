#![cfg(test)]

use proptest::prelude::*;

use crate::input::InputState;
use crate::player::{MoveMode, PhysicsParams, Player};
use voxelbox_blocks::BlockKindId;
use voxelbox_geom::Vec3;
use voxelbox_world::{FLOOR_Y, GridPos, World, WorldGenParams, generate_seeded};

const DT: f32 = 1.0 / 60.0;

fn floor(size: i32) -> World {
    let mut w = World::new(size as u32);
    for x in 0..size {
        for z in 0..size {
            w.insert(GridPos::new(x, FLOOR_Y, z), BlockKindId::GRASS);
        }
    }
    w
}

#[test]
fn falling_player_lands_on_floor() {
    let params = PhysicsParams::default();
    let w = floor(10);
    let mut p = Player::new(Vec3::new(5.0, 6.0, 5.0));
    let input = InputState::default();

    p.update(DT, &input, &w, &params);
    assert!((p.vel.y + params.gravity * DT).abs() < 1e-5);
    assert!(!p.grounded);

    let mut prev = p.vel.y;
    let mut ticks = 0;
    while !p.grounded && ticks < 600 {
        p.update(DT, &input, &w, &params);
        if !p.grounded {
            // still accelerating downward
            assert!(p.vel.y < prev);
            prev = p.vel.y;
        }
        ticks += 1;
    }
    assert!(p.grounded, "never landed");
    assert_eq!(p.vel.y, 0.0);
    let feet = p.pos.y - params.height / 2.0;
    assert!((feet - (-0.5)).abs() < 1e-4, "feet at {}", feet);
}

#[test]
fn jump_rises_then_lands_again() {
    let params = PhysicsParams::default();
    let w = floor(10);
    let rest = -0.5 + params.height / 2.0;
    let mut p = Player::new(Vec3::new(5.0, rest, 5.0));
    let mut input = InputState::default();
    p.update(DT, &input, &w, &params);
    assert!(p.grounded);

    assert!(p.jump_pressed(&mut input, &params));
    let mut peak = p.pos.y;
    for _ in 0..120 {
        p.update(DT, &input, &w, &params);
        peak = peak.max(p.pos.y);
    }
    // v^2 / 2g
    assert!(peak > rest + 1.0);
    assert!(p.grounded);
    assert!((p.pos.y - rest).abs() < 1e-4);
}

#[test]
fn fly_toggle_round_trip_restores_gravity() {
    let params = PhysicsParams::default();
    let w = World::new(10);
    let mut p = Player::new(Vec3::new(5.0, 20.0, 5.0));
    let input = InputState::default();

    assert!(p.toggle_flying());
    for _ in 0..10 {
        p.update(DT, &input, &w, &params);
    }
    assert_eq!(p.pos.y, 20.0);
    assert!(!p.grounded);

    assert!(!p.toggle_flying());
    assert_eq!(p.mode, MoveMode::Walking);
    p.update(DT, &input, &w, &params);
    assert!((p.vel.y + params.gravity * DT).abs() < 1e-5);
}

#[test]
fn flying_ascends_and_descends_at_fixed_speed() {
    let params = PhysicsParams::default();
    let w = World::new(10);
    let mut p = Player::new(Vec3::new(5.0, 20.0, 5.0));
    p.toggle_flying();
    let up = InputState {
        up: true,
        ..Default::default()
    };
    for _ in 0..60 {
        p.update(DT, &up, &w, &params);
    }
    assert!((p.pos.y - (20.0 + params.fly_speed)).abs() < 1e-3);
    let down = InputState {
        down: true,
        ..Default::default()
    };
    for _ in 0..60 {
        p.update(DT, &down, &w, &params);
    }
    assert!((p.pos.y - 20.0).abs() < 1e-3);
}

#[test]
fn crouching_halves_walking_speed() {
    let params = PhysicsParams::default();
    let w = World::new(10);
    let fast = InputState {
        forward: true,
        ..Default::default()
    };
    let slow = InputState {
        forward: true,
        down: true,
        ..Default::default()
    };
    let mut a = Player::new(Vec3::new(0.0, 100.0, 0.0));
    let mut b = a.clone();
    a.update(DT, &fast, &w, &params);
    b.update(DT, &slow, &w, &params);
    assert!((a.vel.z - 2.0 * b.vel.z).abs() < 1e-5);
    // yaw 0 walks toward -Z
    assert!(a.vel.z > 0.0);
    assert!(a.pos.z < 0.0);
}

#[test]
fn falling_into_the_abyss_respawns_above_center() {
    let params = PhysicsParams::default();
    let w = World::new(20);
    let mut p = Player::new(Vec3::new(5.0, -49.9, 5.0));
    p.vel.y = -10.0;
    p.update(DT, &InputState::default(), &w, &params);
    assert_eq!(p.pos, Vec3::new(10.0, params.height + 10.0, 10.0));
    assert_eq!(p.vel.y, 0.0);
    assert!(p.grounded);
}

#[test]
fn blocks_overhead_stop_a_jump() {
    let params = PhysicsParams::default();
    let mut w = floor(10);
    w.insert(GridPos::new(5, 3, 5), BlockKindId::STONE);
    let rest = -0.5 + params.height / 2.0;
    let mut p = Player::new(Vec3::new(5.0, rest, 5.0));
    let mut input = InputState::default();
    p.update(DT, &input, &w, &params);
    p.jump_pressed(&mut input, &params);
    let mut top = p.pos.y;
    for _ in 0..120 {
        p.update(DT, &input, &w, &params);
        top = top.max(p.pos.y);
    }
    // ceiling bottom at 2.5
    assert!(top + params.height / 2.0 <= 2.5 + 1e-3, "head reached {}", top + params.height / 2.0);
}

/// Deepest interpenetration between the player box and any block, measured
/// along each block's shallowest axis.
fn worst_penetration(p: &Player, w: &World, params: &PhysicsParams) -> f32 {
    let pbox = p.aabb(params);
    w.iter()
        .filter_map(|b| pbox.overlap(&b.aabb()))
        .map(|d| d.x.min(d.y).min(d.z))
        .fold(0.0, f32::max)
}

#[derive(Clone, Debug)]
struct Stroll {
    turn: f32,
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    jump: bool,
}

fn stroll_strategy() -> impl Strategy<Value = Stroll> {
    (
        -1.5f32..1.5,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(turn, forward, backward, left, right, jump)| Stroll {
            turn,
            forward,
            backward,
            left,
            right,
            jump,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn wandering_generated_terrain_never_embeds_the_player(
        seed in any::<u64>(),
        strolls in proptest::collection::vec(stroll_strategy(), 1..20),
    ) {
        let params = PhysicsParams::default();
        let w = generate_seeded(20, &WorldGenParams::default(), seed);
        let mut p = Player::new(Player::spawn_point(20, &params));
        for s in strolls {
            p.yaw += s.turn;
            let mut input = InputState {
                forward: s.forward,
                backward: s.backward,
                left: s.left,
                right: s.right,
                ..Default::default()
            };
            for _ in 0..30 {
                if s.jump {
                    p.jump_pressed(&mut input, &params);
                }
                p.update(DT, &input, &w, &params);
                let depth = worst_penetration(&p, &w, &params);
                prop_assert!(depth <= 1e-3, "embedded {} at {:?}", depth, p.pos);
            }
        }
    }
}

proptest! {
    #[test]
    fn walking_on_flat_ground_never_sinks(
        x in 15.0f32..25.0,
        z in 15.0f32..25.0,
        yaw in -3.0f32..3.0,
        forward in any::<bool>(),
        left in any::<bool>(),
        ticks in 1usize..120,
    ) {
        let params = PhysicsParams::default();
        // wide enough that two seconds of walking stays on the floor
        let w = floor(40);
        let mut p = Player::new(Vec3::new(x, 3.0, z));
        p.yaw = yaw;
        let input = InputState { forward, left, ..Default::default() };
        for _ in 0..ticks {
            p.update(DT, &input, &w, &params);
            let feet = p.pos.y - params.height / 2.0;
            prop_assert!(feet >= -0.5 - 1e-3, "feet sank to {}", feet);
        }
    }
}
