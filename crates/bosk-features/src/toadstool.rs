use bosk_blocks::BlockRegistry;
use bosk_geom::{Bounds, Pos3};
use bosk_world::VoxelGrid;
use rand::Rng;

use crate::config::ToadstoolConfig;
use crate::stamp::{Template, has_clearance, stamp};

/// Huge-toadstool driver: descend from the seed to ground contact, validate
/// the anchor and headroom, then stamp stem and cap as one template.
pub fn place<G: VoxelGrid, R: Rng + ?Sized>(
    grid: &mut G,
    reg: &BlockRegistry,
    origin: Pos3,
    rng: &mut R,
    cfg: &ToadstoolConfig,
) -> bool {
    let replace = |g: &G, p: Pos3| reg.is_replaceable(g.get(p));

    // The seed may float; walk down through replaceable cells until we hit
    // something solid or the grid floor.
    let mut pos = origin;
    while pos.y > 1 && grid.contains(pos) && replace(grid, pos) {
        pos = pos.below();
    }
    if !grid.contains(pos) || !cfg.place_on.contains(&grid.get(pos).id) {
        return false;
    }
    let base = pos.above();

    let headroom = Bounds::footprint(cfg.clearance_radius, 0, cfg.clearance_height);
    if !has_clearance(grid, base, headroom, &replace) {
        return false;
    }

    let span = (cfg.max_height - cfg.min_height).max(0);
    let height = cfg.min_height + rng.gen_range(0..span + 1);

    let mut tmpl = Template::new();
    for y in 0..height {
        tmpl.push(Pos3::new(0, y, 0), cfg.stem);
    }
    let r = cfg.cap_radius;
    for x in -(r - 1)..=(r - 1) {
        for z in -(r - 1)..=(r - 1) {
            tmpl.push(Pos3::new(x, height, z), cfg.cap);
            tmpl.push(Pos3::new(x, height + 1, z), cfg.cap);
            tmpl.push(Pos3::new(x, height + 2, z), cfg.cap);
        }
    }
    // Plus-shaped rim crowning the cap.
    for (x, z) in [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)] {
        tmpl.push(Pos3::new(x, height + 3, z), cfg.cap);
    }

    stamp(grid, base, &tmpl, &replace, cfg.policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stamp::StampPolicy;
    use bosk_blocks::{Block, BlockRegistry};
    use bosk_world::GridBuf;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn registry() -> BlockRegistry {
        BlockRegistry::from_toml_str(
            r#"
            [[blocks]]
            name = "air"
            solid = false
            replaceable = true

            [[blocks]]
            name = "grass"

            [[blocks]]
            name = "stone"

            [[blocks]]
            name = "mushroom_stem"

            [[blocks]]
            name = "toadstool_cap"
            "#,
        )
        .unwrap()
    }

    fn config(reg: &BlockRegistry) -> ToadstoolConfig {
        ToadstoolConfig::builder(
            reg.make_block_by_name("mushroom_stem", None).unwrap(),
            reg.make_block_by_name("toadstool_cap", None).unwrap(),
        )
        .place_on(reg.id_by_name("grass").unwrap())
        .build()
    }

    fn lawn() -> (BlockRegistry, GridBuf) {
        let reg = registry();
        let mut g = GridBuf::filled(16, 24, 16, Block::AIR);
        let grass = Block::new(reg.id_by_name("grass").unwrap());
        for z in 0..16 {
            for x in 0..16 {
                g.set(Pos3::new(x, 2, z), grass);
            }
        }
        (reg, g)
    }

    #[test]
    fn places_on_grass_with_clear_sky() {
        let (reg, mut g) = lawn();
        let cfg = config(&reg);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        // Seed floats above the surface; the driver descends to it.
        assert!(place(&mut g, &reg, Pos3::new(8, 10, 8), &mut rng, &cfg));
        let stem = reg.id_by_name("mushroom_stem").unwrap();
        let cap = reg.id_by_name("toadstool_cap").unwrap();
        assert_eq!(g.get(Pos3::new(8, 3, 8)).id, stem);
        assert_eq!(g.get(Pos3::new(8, 4, 8)).id, stem);
        // Stem height is drawn from [2, 4]; the cell above the tallest
        // possible stem belongs to the cap.
        let mut y = 3;
        while g.get(Pos3::new(8, y, 8)).id == stem {
            y += 1;
        }
        let stem_h = y - 3;
        assert!((2..=4).contains(&stem_h), "stem height {stem_h}");
        assert_eq!(g.get(Pos3::new(8, y, 8)).id, cap);
        assert_eq!(g.get(Pos3::new(7, y, 7)).id, cap);
        // Rim sits three above the stem top, only in the plus shape.
        assert_eq!(g.get(Pos3::new(8, y + 3, 8)).id, cap);
        assert_eq!(g.get(Pos3::new(7, y + 3, 7)), Block::AIR);
    }

    #[test]
    fn no_anchor_in_descent_range_fails_clean() {
        let reg = registry();
        let mut g = GridBuf::filled(8, 16, 8, Block::AIR);
        let before = g.clone();
        let cfg = config(&reg);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(!place(&mut g, &reg, Pos3::new(4, 12, 4), &mut rng, &cfg));
        assert_eq!(g, before);
    }

    #[test]
    fn blocked_headroom_fails_clean() {
        let (reg, mut g) = lawn();
        let stone = Block::new(reg.id_by_name("stone").unwrap());
        g.set(Pos3::new(9, 7, 9), stone);
        let before = g.clone();
        let cfg = config(&reg);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(!place(&mut g, &reg, Pos3::new(8, 10, 8), &mut rng, &cfg));
        assert_eq!(g, before);
    }

    #[test]
    fn wrong_ground_fails_clean() {
        let reg = registry();
        let mut g = GridBuf::filled(8, 16, 8, Block::AIR);
        let stone = Block::new(reg.id_by_name("stone").unwrap());
        for z in 0..8 {
            for x in 0..8 {
                g.set(Pos3::new(x, 2, z), stone);
            }
        }
        let before = g.clone();
        let cfg = config(&reg);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(!place(&mut g, &reg, Pos3::new(4, 6, 4), &mut rng, &cfg));
        assert_eq!(g, before);
    }

    #[test]
    fn placement_is_deterministic() {
        let run = |seed| {
            let (reg, mut g) = lawn();
            let cfg = config(&reg);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let ok = place(&mut g, &reg, Pos3::new(8, 10, 8), &mut rng, &cfg);
            (ok, g)
        };
        assert_eq!(run(17), run(17));
    }

    #[test]
    fn abort_policy_keeps_partial_stem() {
        let (reg, mut g) = lawn();
        // Shrink the scanned headroom below the stamped shape so a conflict
        // surfaces mid-template.
        let cfg = ToadstoolConfig {
            policy: StampPolicy::AbortOnConflict,
            clearance_height: 2,
            ..config(&reg)
        };
        let stone = Block::new(reg.id_by_name("stone").unwrap());
        g.set(Pos3::new(8, 8, 8), stone);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let ok = place(&mut g, &reg, Pos3::new(8, 10, 8), &mut rng, &cfg);
        // The stem below the obstruction was committed before the abort.
        assert!(ok);
        let stem = reg.id_by_name("mushroom_stem").unwrap();
        assert_eq!(g.get(Pos3::new(8, 3, 8)).id, stem);
        assert_eq!(g.get(Pos3::new(8, 8, 8)), stone);
    }
}
