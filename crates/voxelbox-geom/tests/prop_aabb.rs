use proptest::prelude::*;
use voxelbox_geom::{Aabb, Vec3};

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn coord() -> impl Strategy<Value = f32> {
    -1_000.0f32..1_000.0
}

fn extent() -> impl Strategy<Value = f32> {
    0.01f32..50.0
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn arb_box() -> impl Strategy<Value = Aabb> {
    (arb_vec3(), extent(), extent(), extent())
        .prop_map(|(c, sx, sy, sz)| Aabb::from_center_size(c, Vec3::new(sx, sy, sz)))
}

proptest! {
    // Intersection is symmetric and overlap agrees with it
    #[test]
    fn overlap_symmetric(a in arb_box(), b in arb_box()) {
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        prop_assert_eq!(a.overlap(&b), b.overlap(&a));
        prop_assert_eq!(a.overlap(&b).is_some(), a.intersects(&b));
    }

    // Overlap depth never exceeds either box's extent and is never negative
    #[test]
    fn overlap_bounded_by_extents(a in arb_box(), b in arb_box()) {
        if let Some(d) = a.overlap(&b) {
            let ea = a.size();
            let eb = b.size();
            prop_assert!(d.x >= 0.0 && d.y >= 0.0 && d.z >= 0.0);
            prop_assert!(d.x <= ea.x.min(eb.x) + 1e-3);
            prop_assert!(d.y <= ea.y.min(eb.y) + 1e-3);
            prop_assert!(d.z <= ea.z.min(eb.z) + 1e-3);
        }
    }

    // Center translates with the box
    #[test]
    fn center_translation(a in arb_box(), t in arb_vec3()) {
        let m = a.translated(t).center();
        let e = a.center() + t;
        prop_assert!(approx(m.x, e.x, 1e-2) && approx(m.y, e.y, 1e-2) && approx(m.z, e.z, 1e-2));
    }
}
