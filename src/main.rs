use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bosk_blocks::BlockRegistry;
use bosk_features::{FeatureCatalog, decorate};
use bosk_geom::Pos3;
use bosk_world::worldgen::Mode;
use bosk_world::{GridBuf, VoxelGrid, World, WorldGenMode, WorldGenParams, load_config_from_path};

#[derive(Parser, Debug)]
#[command(name = "bosk", about = "Generate a voxel world and run the decoration pass over it")]
struct Args {
    /// Block table
    #[arg(long, default_value = "data/blocks.toml")]
    blocks: PathBuf,
    /// Worldgen + decoration config
    #[arg(long, default_value = "data/worldgen.toml")]
    worldgen: PathBuf,
    #[arg(long, default_value_t = 1337)]
    seed: u64,
    #[arg(long, default_value_t = 96)]
    size_x: usize,
    #[arg(long, default_value_t = 48)]
    size_y: usize,
    #[arg(long, default_value_t = 96)]
    size_z: usize,
    /// Force a flat world regardless of the config's mode
    #[arg(long)]
    flat: bool,
    /// Print an ASCII cross-section at this z plane
    #[arg(long)]
    section: Option<i32>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let reg = BlockRegistry::load_from_path(&args.blocks)?;
    let cfg = load_config_from_path(&args.worldgen)?;
    let params = WorldGenParams::from_config(&cfg);
    let mode = if args.flat || cfg.mode == Mode::Flat {
        WorldGenMode::Flat {
            thickness: params.flat_thickness,
        }
    } else {
        WorldGenMode::Normal
    };

    let world = World::new(
        args.size_x,
        args.size_y,
        args.size_z,
        args.seed as i32,
        mode,
        params,
    );
    log::info!(
        "generating {}x{}x{} world, seed {}",
        args.size_x,
        args.size_y,
        args.size_z,
        args.seed
    );
    let mut grid = world.generate(&reg);

    let catalog = FeatureCatalog::standard(&reg)?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let stats = decorate(&mut grid, &reg, &catalog, &world.params.decorations, &mut rng);

    println!("decoration pass ({} attempts, {} placed)", stats.attempts, stats.placed);
    let mut names: Vec<&String> = stats.by_feature.keys().collect();
    names.sort();
    for name in names {
        let c = stats.by_feature[name];
        println!("  {:<14} {:>3} / {:<3}", name, c.placed, c.attempts);
    }

    if let Some(z) = args.section {
        print_section(&grid, &reg, z);
    }
    Ok(())
}

/// Dump one x/y plane of the grid, top row first. Cells show the first
/// letter of the block name; air is '.'.
fn print_section(grid: &GridBuf, reg: &BlockRegistry, z: i32) {
    if z < 0 || z as usize >= grid.sz {
        log::warn!("section z={} outside grid, skipping", z);
        return;
    }
    let top = (0..grid.sx as i32)
        .filter_map(|x| grid.top_non_air(x, z))
        .max()
        .unwrap_or(0);
    for y in (0..=top).rev() {
        let mut row = String::with_capacity(grid.sx);
        for x in 0..grid.sx as i32 {
            let b = grid.get(Pos3::new(x, y, z));
            let ch = if b.is_air() {
                '.'
            } else {
                reg.get(b.id)
                    .and_then(|t| t.name.chars().next())
                    .unwrap_or('?')
            };
            row.push(ch);
        }
        println!("{row}");
    }
}
