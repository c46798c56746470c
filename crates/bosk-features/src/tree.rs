use bosk_blocks::BlockRegistry;
use bosk_geom::{Bounds, Pos3};
use bosk_world::VoxelGrid;
use rand::Rng;

use crate::config::TreeConfig;
use crate::stamp::{Template, has_clearance, stamp, write_if};

/// Basic-tree driver: a stamped trunk column with a layered canopy around
/// its top. Canopy and vine cells are individually skippable; leaves never
/// displace occupied cells.
pub fn place<G: VoxelGrid, R: Rng + ?Sized>(
    grid: &mut G,
    reg: &BlockRegistry,
    origin: Pos3,
    rng: &mut R,
    cfg: &TreeConfig,
) -> bool {
    let replace = |g: &G, p: Pos3| reg.is_replaceable(g.get(p));

    let mut pos = origin;
    while pos.y > 1 && grid.contains(pos) && replace(grid, pos) {
        pos = pos.below();
    }
    if !grid.contains(pos) || !cfg.place_on.contains(&grid.get(pos).id) {
        return false;
    }
    let base = pos.above();

    let span = (cfg.max_height - cfg.min_height).max(0);
    let trunk_h = cfg.min_height + rng.gen_range(0..span + 1);

    // The trunk column plus one cell of headroom must be free before
    // anything is written.
    if !has_clearance(grid, base, Bounds::footprint(0, 0, trunk_h), &replace) {
        return false;
    }

    let mut trunk = Template::new();
    for y in 0..trunk_h {
        trunk.push(Pos3::new(0, y, 0), cfg.log);
    }
    if !stamp(grid, base, &trunk, &replace, cfg.policy) {
        return false;
    }

    // Canopy: diamond-ish layers around the trunk top, radius pulled in at
    // the extremes. The trunk column itself is solid now, so leaves skip it.
    let top = base.up(trunk_h - 1);
    let r = cfg.max_leaves_radius;
    for dy in -2..=2i32 {
        let rad = if dy.abs() >= 2 { r - 1 } else { r };
        if rad < 0 {
            continue;
        }
        let extra = if dy >= 1 { 0 } else { 1 };
        for dx in -r..=r {
            for dz in -r..=r {
                if dx == 0 && dz == 0 && dy <= 0 {
                    continue;
                }
                if dx.abs() + dz.abs() > rad + extra {
                    continue;
                }
                write_if(grid, top.offset(dx, dy, dz), cfg.leaves, &replace);
            }
        }
    }

    if let Some(vine) = cfg.vine {
        // Vine curtains hang under the outermost leaf ring, which sits at
        // manhattan radius r+1 on the dy = -1 layer.
        for dx in -r..=r {
            for dz in -r..=r {
                if dx.abs() + dz.abs() != r + 1 {
                    continue;
                }
                if rng.gen_range(0..4) != 0 {
                    continue;
                }
                let mut at = top.offset(dx, -2, dz);
                for _ in 0..cfg.vine_length {
                    if !write_if(grid, at, vine, &replace) {
                        break;
                    }
                    at = at.below();
                }
            }
        }
    }

    true
}
