use bosk_blocks::{Block, BlockRegistry};
use bosk_geom::Pos3;
use bosk_world::VoxelGrid;
use rand::Rng;

use crate::config::DripleafConfig;
use crate::scatter::Scatter;

const FACINGS: [&str; 4] = ["north", "south", "west", "east"];

/// Dripleaf-colony driver: scatter candidates around the seed, grow a stem
/// column with a head on top over tagged ground, waterlogging cells written
/// into fluid.
///
/// Columns grow per level and stop at the first non-growable cell, so they
/// fill whatever vertical space a site has. A candidate only counts as
/// placed if at least one cell was written.
pub fn place<G: VoxelGrid, R: Rng + ?Sized>(
    grid: &mut G,
    reg: &BlockRegistry,
    origin: Pos3,
    rng: &mut R,
    cfg: &DripleafConfig,
) -> bool {
    let mut placed = 0u32;
    let mut sites = Scatter::new(origin, cfg.tries, cfg.spread_xz, cfg.spread_y);
    while let Some(cand) = sites.next_site(rng) {
        let below = cand.below();
        if !grid.contains(below) || !reg.has_tag(grid.get(below), &cfg.anchor_tag) {
            continue;
        }

        let height = 1 + rng.gen_range(0..cfg.max_height.max(1));
        let facing = FACINGS[rng.gen_range(0..FACINGS.len())];
        let head = faced(reg, cfg.head, facing);
        let stem = faced(reg, cfg.stem, facing);

        let mut wrote = false;
        for k in 0..height {
            let at = cand.up(k);
            if !grid.contains(at) || !growable(grid, reg, cfg, at) {
                break;
            }
            // The previous level's head is growable, so the column rewrites
            // it to a stem as it climbs; stems below, head on top.
            let under = at.below();
            if grid.contains(under) && growable(grid, reg, cfg, under) {
                write_plant(grid, reg, under, stem);
                wrote = true;
            }
            write_plant(grid, reg, at, head);
            wrote = true;
        }
        if wrote {
            placed += 1;
        }
    }
    placed > 0
}

fn growable<G: VoxelGrid>(grid: &G, reg: &BlockRegistry, cfg: &DripleafConfig, p: Pos3) -> bool {
    let b = grid.get(p);
    b.is_air()
        || reg.is_fluid(b)
        || b.id == cfg.head.id
        || reg.has_tag(b, &cfg.grow_through_tag)
}

fn faced(reg: &BlockRegistry, block: Block, facing: &str) -> Block {
    if let Some(ty) = reg.get(block.id) {
        if let Some(state) = ty.set_state_prop(block.state, "facing", facing) {
            return Block {
                id: block.id,
                state,
            };
        }
    }
    block
}

/// True for fluid cells and for waterlogged cells, which still hold water.
fn water_at<G: VoxelGrid>(grid: &G, reg: &BlockRegistry, pos: Pos3) -> bool {
    let b = grid.get(pos);
    if reg.is_fluid(b) {
        return true;
    }
    reg.get(b.id)
        .is_some_and(|ty| ty.state_prop_is_value(b.state, "waterlogged", "true"))
}

/// Write a plant cell, copying waterlogged state from whatever water it
/// displaces.
fn write_plant<G: VoxelGrid>(grid: &mut G, reg: &BlockRegistry, pos: Pos3, block: Block) {
    let mut b = block;
    if water_at(grid, reg, pos) {
        if let Some(ty) = reg.get(b.id) {
            if let Some(state) = ty.set_state_prop(b.state, "waterlogged", "true") {
                b.state = state;
            }
        }
    }
    grid.set(pos, b);
}

#[cfg(test)]
mod tests {
    use super::*;
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
            name = "dirt"
            tags = ["dirt"]

            [[blocks]]
            name = "stone"

            [[blocks]]
            name = "water"
            solid = false
            replaceable = true
            fluid = true

            [[blocks]]
            name = "dripleaf_stem"
            solid = false
            [blocks.state_schema]
            facing = ["north", "south", "west", "east"]
            waterlogged = ["false", "true"]

            [[blocks]]
            name = "dripleaf_head"
            solid = false
            [blocks.state_schema]
            facing = ["north", "south", "west", "east"]
            waterlogged = ["false", "true"]
            "#,
        )
        .unwrap()
    }

    fn config(reg: &BlockRegistry) -> DripleafConfig {
        DripleafConfig::builder(
            reg.make_block_by_name("dripleaf_stem", None).unwrap(),
            reg.make_block_by_name("dripleaf_head", None).unwrap(),
        )
        .build()
    }

    fn mudflat() -> (BlockRegistry, GridBuf) {
        let reg = registry();
        let mut g = GridBuf::filled(24, 16, 24, Block::AIR);
        let dirt = Block::new(reg.id_by_name("dirt").unwrap());
        for z in 0..24 {
            for x in 0..24 {
                for y in 0..4 {
                    g.set(Pos3::new(x, y, z), dirt);
                }
            }
        }
        (reg, g)
    }

    #[test]
    fn colonizes_dirt_and_tops_columns_with_heads() {
        let (reg, mut g) = mudflat();
        let cfg = config(&reg);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert!(place(&mut g, &reg, Pos3::new(12, 4, 12), &mut rng, &cfg));
        let stem = reg.id_by_name("dripleaf_stem").unwrap();
        let head = reg.id_by_name("dripleaf_head").unwrap();
        let mut heads = 0;
        for z in 0..24 {
            for x in 0..24 {
                for y in 4..15 {
                    let b = g.get(Pos3::new(x, y, z));
                    let above = g.get(Pos3::new(x, y + 1, z)).id;
                    if b.id == stem {
                        // A stem always carries more plant above it.
                        assert!(above == stem || above == head);
                    } else if b.id == head {
                        heads += 1;
                        assert!(above != stem && above != head);
                    }
                }
            }
        }
        assert!(heads > 0);
    }

    #[test]
    fn needs_tagged_ground() {
        let reg = registry();
        let mut g = GridBuf::filled(24, 16, 24, Block::AIR);
        let stone = Block::new(reg.id_by_name("stone").unwrap());
        for z in 0..24 {
            for x in 0..24 {
                g.set(Pos3::new(x, 3, z), stone);
            }
        }
        let before = g.clone();
        let cfg = config(&reg);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert!(!place(&mut g, &reg, Pos3::new(12, 4, 12), &mut rng, &cfg));
        assert_eq!(g, before);
    }

    #[test]
    fn waterlogs_cells_written_into_fluid() {
        let (reg, mut g) = mudflat();
        let water = reg.make_block_by_name("water", None).unwrap();
        // Shallow pond over the whole flat.
        for z in 0..24 {
            for x in 0..24 {
                g.set(Pos3::new(x, 4, z), water);
            }
        }
        let cfg = config(&reg);
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        assert!(place(&mut g, &reg, Pos3::new(12, 4, 12), &mut rng, &cfg));
        let stem_ty = reg.get(reg.id_by_name("dripleaf_stem").unwrap()).unwrap();
        let head_ty = reg.get(reg.id_by_name("dripleaf_head").unwrap()).unwrap();
        let mut wet = 0;
        for (i, b) in g.blocks.iter().enumerate() {
            let y = i / (g.sz * g.sx);
            let ty = if b.id == stem_ty.id {
                stem_ty
            } else if b.id == head_ty.id {
                head_ty
            } else {
                continue;
            };
            if y == 4 {
                // Pond level: the plant displaced water.
                assert!(ty.state_prop_is_value(b.state, "waterlogged", "true"));
                wet += 1;
            } else {
                assert!(ty.state_prop_is_value(b.state, "waterlogged", "false"));
            }
        }
        assert!(wet > 0);
    }

    #[test]
    fn columns_share_one_facing() {
        let (reg, mut g) = mudflat();
        let cfg = config(&reg);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert!(place(&mut g, &reg, Pos3::new(12, 4, 12), &mut rng, &cfg));
        let stem_id = reg.id_by_name("dripleaf_stem").unwrap();
        let head_id = reg.id_by_name("dripleaf_head").unwrap();
        let head_ty = reg.get(head_id).unwrap();
        let stem_ty = reg.get(stem_id).unwrap();
        for z in 0..24 {
            for x in 0..24 {
                // Every stem shares the facing of the head above it.
                for y in 4..15 {
                    let b = g.get(Pos3::new(x, y, z));
                    let above = g.get(Pos3::new(x, y + 1, z));
                    if b.id == stem_id && above.id == head_id {
                        assert_eq!(
                            stem_ty.state_prop_value(b.state, "facing"),
                            head_ty.state_prop_value(above.state, "facing")
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn placement_is_deterministic() {
        let run = |seed| {
            let (reg, mut g) = mudflat();
            let cfg = config(&reg);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let ok = place(&mut g, &reg, Pos3::new(12, 4, 12), &mut rng, &cfg);
            (ok, g)
        };
        assert_eq!(run(33), run(33));
    }
}
