use voxelbox_edit::Hit;
use voxelbox_geom::Vec3;
use voxelbox_world::GridPos;

/// How far the player can reach by default, in grid units.
pub const DEFAULT_REACH: f32 = 64.0;

#[inline]
fn inv_or_max(v: f32) -> f32 {
    if v.abs() < 1e-8 { f32::MAX } else { 1.0 / v.abs() }
}

#[inline]
fn step_of(v: f32) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Walk grid cells along the ray and return the first one `is_solid` accepts,
/// together with the face the ray entered through.
///
/// A block at integer `p` spans `p - 0.5 ..= p + 0.5`. The cell containing the
/// origin is never reported.
pub fn raycast_first_hit<F>(origin: Vec3, dir: Vec3, max_dist: f32, mut is_solid: F) -> Option<Hit>
where
    F: FnMut(GridPos) -> bool,
{
    let len = dir.length();
    if !(len >= 1e-6) || !len.is_finite() {
        return None;
    }
    let d = dir / len;
    // shift so cell boundaries land on integers
    let o = origin + Vec3::splat(0.5);

    let mut vx = o.x.floor() as i32;
    let mut vy = o.y.floor() as i32;
    let mut vz = o.z.floor() as i32;

    let stepx = step_of(d.x);
    let stepy = step_of(d.y);
    let stepz = step_of(d.z);

    let invx = inv_or_max(d.x);
    let invy = inv_or_max(d.y);
    let invz = inv_or_max(d.z);
    let tdx = if stepx == 0 { f32::MAX } else { invx };
    let tdy = if stepy == 0 { f32::MAX } else { invy };
    let tdz = if stepz == 0 { f32::MAX } else { invz };

    let fx = o.x - o.x.floor();
    let fy = o.y - o.y.floor();
    let fz = o.z - o.z.floor();
    let mut tmx = match stepx {
        1 => (1.0 - fx) * invx,
        -1 => fx * invx,
        _ => f32::MAX,
    };
    let mut tmy = match stepy {
        1 => (1.0 - fy) * invy,
        -1 => fy * invy,
        _ => f32::MAX,
    };
    let mut tmz = match stepz {
        1 => (1.0 - fz) * invz,
        -1 => fz * invz,
        _ => f32::MAX,
    };

    for _ in 0..512 {
        // Step through smallest tMax; the face entered is opposite the step.
        let (t, normal) = if tmx < tmy {
            if tmx < tmz {
                vx += stepx;
                let t = tmx;
                tmx += tdx;
                (t, Vec3::new(-stepx as f32, 0.0, 0.0))
            } else {
                vz += stepz;
                let t = tmz;
                tmz += tdz;
                (t, Vec3::new(0.0, 0.0, -stepz as f32))
            }
        } else if tmy < tmz {
            vy += stepy;
            let t = tmy;
            tmy += tdy;
            (t, Vec3::new(0.0, -stepy as f32, 0.0))
        } else {
            vz += stepz;
            let t = tmz;
            tmz += tdz;
            (t, Vec3::new(0.0, 0.0, -stepz as f32))
        };
        if t > max_dist {
            break;
        }
        let cell = GridPos::new(vx, vy, vz);
        if is_solid(cell) {
            return Some(Hit {
                block: cell,
                normal,
                distance: t,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looking_down_hits_floor_top_face() {
        let floor = |p: GridPos| p.y == -1;
        let hit = raycast_first_hit(
            Vec3::new(5.0, 3.0, 5.0),
            Vec3::new(0.0, -1.0, 0.0),
            DEFAULT_REACH,
            floor,
        )
        .expect("floor below");
        assert_eq!(hit.block, GridPos::new(5, -1, 5));
        assert_eq!(hit.normal, Vec3::UP);
        assert!((hit.distance - 3.5).abs() < 1e-5);
    }

    #[test]
    fn side_face_normal_points_back_at_viewer() {
        let wall = |p: GridPos| p.x == 4;
        let hit = raycast_first_hit(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            DEFAULT_REACH,
            wall,
        )
        .unwrap();
        assert_eq!(hit.block, GridPos::new(4, 0, 0));
        assert_eq!(hit.normal, Vec3::new(-1.0, 0.0, 0.0));
        assert!((hit.distance - 3.5).abs() < 1e-5);
    }

    #[test]
    fn origin_cell_is_skipped_and_reach_is_respected() {
        let everything = |_p: GridPos| true;
        let hit =
            raycast_first_hit(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 10.0, everything).unwrap();
        assert_eq!(hit.block, GridPos::new(0, 0, -1));

        let far = |p: GridPos| p.z == -20;
        assert!(raycast_first_hit(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 10.0, far).is_none());
    }

    #[test]
    fn degenerate_direction_hits_nothing() {
        assert!(raycast_first_hit(Vec3::ZERO, Vec3::ZERO, 10.0, |_| true).is_none());
    }
}
