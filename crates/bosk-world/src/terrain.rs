use fastnoise_lite::{FastNoiseLite, NoiseType};

use bosk_blocks::{Block, BlockId, BlockRegistry};
use bosk_geom::Pos3;

use crate::grid::{GridBuf, VoxelGrid};
use crate::worldgen::WorldGenParams;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WorldGenMode {
    Normal,
    Flat { thickness: i32 },
}

/// World sizing plus the parameters needed to fill a grid the decoration
/// pass can run over.
pub struct World {
    pub size_x: usize,
    pub size_y: usize,
    pub size_z: usize,
    pub seed: i32,
    pub mode: WorldGenMode,
    pub params: WorldGenParams,
}

impl World {
    pub fn new(
        size_x: usize,
        size_y: usize,
        size_z: usize,
        seed: i32,
        mode: WorldGenMode,
        params: WorldGenParams,
    ) -> Self {
        Self {
            size_x,
            size_y,
            size_z,
            seed,
            mode,
            params,
        }
    }

    #[inline]
    pub fn is_flat(&self) -> bool {
        matches!(self.mode, WorldGenMode::Flat { .. })
    }

    pub fn make_sampler(&self) -> TerrainSampler {
        let mut terrain = FastNoiseLite::with_seed(self.seed);
        terrain.set_noise_type(Some(NoiseType::OpenSimplex2));
        terrain.set_frequency(Some(self.params.height_frequency));
        let world_height = self.size_y as i32;
        let world_height_f = world_height as f32;
        TerrainSampler {
            terrain,
            min_h: (world_height_f * self.params.min_y_ratio) as i32,
            max_h: (world_height_f * self.params.max_y_ratio) as i32,
            world_height,
        }
    }

    fn resolve_block_id(&self, reg: &BlockRegistry, name: &str) -> BlockId {
        match reg.id_by_name(name) {
            Some(id) => id,
            None => {
                log::warn!(target: "terrain", "block '{}' not in registry, using fallback", name);
                reg.unknown_block_id.unwrap_or(Block::AIR.id)
            }
        }
    }

    /// Fill a fresh grid: heightmap terrain in `Normal` mode, a uniform
    /// slab in `Flat` mode, both layered top / topsoil / deep from the
    /// surface config.
    pub fn generate(&self, reg: &BlockRegistry) -> GridBuf {
        let top = Block::new(self.resolve_block_id(reg, &self.params.top));
        let near = Block::new(self.resolve_block_id(reg, &self.params.sub_near));
        let deep = Block::new(self.resolve_block_id(reg, &self.params.sub_deep));
        let sampler = self.make_sampler();
        let mut grid = GridBuf::filled(self.size_x, self.size_y, self.size_z, Block::AIR);
        for z in 0..self.size_z as i32 {
            for x in 0..self.size_x as i32 {
                let height = match self.mode {
                    WorldGenMode::Flat { thickness } => thickness.clamp(1, self.size_y as i32),
                    WorldGenMode::Normal => sampler.height_for(x, z),
                };
                for y in 0..height {
                    let b = if y == height - 1 {
                        top
                    } else if y + self.params.topsoil_thickness >= height {
                        near
                    } else {
                        deep
                    };
                    grid.set(Pos3::new(x, y, z), b);
                }
            }
        }
        grid
    }
}

pub struct TerrainSampler {
    terrain: FastNoiseLite,
    min_h: i32,
    max_h: i32,
    world_height: i32,
}

impl TerrainSampler {
    /// Column surface height (cells below it are terrain).
    pub fn height_for(&self, wx: i32, wz: i32) -> i32 {
        let noise = self.terrain.get_noise_2d(wx as f32, wz as f32);
        let span = (self.max_h - self.min_h) as f32;
        let hh = ((noise + 1.0) * 0.5 * span) as i32 + self.min_h;
        hh.clamp(1, self.world_height - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worldgen::WorldGenParams;

    fn test_registry() -> BlockRegistry {
        BlockRegistry::from_toml_str(
            r#"
            [[blocks]]
            name = "air"
            solid = false
            replaceable = true

            [[blocks]]
            name = "grass"

            [[blocks]]
            name = "dirt"

            [[blocks]]
            name = "stone"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn flat_world_layers_surface_blocks() {
        let reg = test_registry();
        let world = World::new(
            8,
            16,
            8,
            1,
            WorldGenMode::Flat { thickness: 4 },
            WorldGenParams::default(),
        );
        let grid = world.generate(&reg);
        let grass = reg.id_by_name("grass").unwrap();
        let dirt = reg.id_by_name("dirt").unwrap();
        assert_eq!(grid.get(Pos3::new(3, 3, 3)).id, grass);
        assert_eq!(grid.get(Pos3::new(3, 2, 3)).id, dirt);
        assert_eq!(grid.get(Pos3::new(3, 4, 3)), Block::AIR);
        assert_eq!(grid.top_non_air(3, 3), Some(3));
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let reg = test_registry();
        let mk = |seed| {
            World::new(
                16,
                32,
                16,
                seed,
                WorldGenMode::Normal,
                WorldGenParams::default(),
            )
            .generate(&reg)
        };
        assert_eq!(mk(42), mk(42));
        assert!(mk(42) != mk(43));
    }

    #[test]
    fn sampler_heights_stay_in_range() {
        let world = World::new(
            32,
            64,
            32,
            7,
            WorldGenMode::Normal,
            WorldGenParams::default(),
        );
        let sampler = world.make_sampler();
        for z in 0..32 {
            for x in 0..32 {
                let h = sampler.height_for(x, z);
                assert!(h >= 1 && h < 64);
            }
        }
    }
}
