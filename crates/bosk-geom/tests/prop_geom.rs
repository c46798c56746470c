use bosk_geom::{Bounds, Pos3};
use proptest::prelude::*;

fn arb_coord() -> impl Strategy<Value = i32> {
    -1_000_000..1_000_000i32
}

fn arb_pos() -> impl Strategy<Value = Pos3> {
    (arb_coord(), arb_coord(), arb_coord()).prop_map(|(x, y, z)| Pos3::new(x, y, z))
}

fn arb_small_bounds() -> impl Strategy<Value = Bounds> {
    (arb_pos(), 0..6i32, 0..6i32, 0..6i32).prop_map(|(min, dx, dy, dz)| {
        Bounds::new(min, Pos3::new(min.x + dx, min.y + dy, min.z + dz))
    })
}

proptest! {
    #[test]
    fn add_sub_roundtrip(a in arb_pos(), b in arb_pos()) {
        prop_assert_eq!((a + b) - b, a);
        prop_assert_eq!((a - b) + b, a);
    }

    #[test]
    fn offset_matches_add(p in arb_pos(), d in arb_pos()) {
        prop_assert_eq!(p.offset(d.x, d.y, d.z), p + d);
    }

    #[test]
    fn spanning_contains_both_corners(a in arb_pos(), b in arb_pos()) {
        let bounds = Bounds::spanning(a, b);
        prop_assert!(bounds.contains(a));
        prop_assert!(bounds.contains(b));
    }

    #[test]
    fn translated_preserves_containment(b in arb_small_bounds(), p in arb_pos(), d in arb_pos()) {
        prop_assert_eq!(b.contains(p), b.translated(d).contains(p + d));
    }

    #[test]
    fn cells_match_cell_count(b in arb_small_bounds()) {
        prop_assert_eq!(b.cells().count(), b.cell_count());
    }

    #[test]
    fn cells_all_contained(b in arb_small_bounds()) {
        prop_assert!(b.cells().all(|p| b.contains(p)));
    }
}
