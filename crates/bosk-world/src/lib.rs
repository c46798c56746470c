//! Grid storage, world sizing, and terrain generation.
#![forbid(unsafe_code)]

pub mod grid;
pub mod terrain;
pub mod worldgen;

pub use grid::{GridBuf, VoxelGrid};
pub use terrain::{TerrainSampler, World, WorldGenMode};
pub use worldgen::{
    DecorationRule, WorldGenConfig, WorldGenParams, load_config_from_path, load_params_from_path,
};
