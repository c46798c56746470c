use std::collections::HashMap;
use std::error::Error;

use bosk_blocks::{Block, BlockId, BlockRegistry};
use bosk_geom::Pos3;
use bosk_world::VoxelGrid;
use rand::Rng;

use crate::config::{DripleafConfig, ToadstoolConfig, TreeConfig};
use crate::{dripleaf, toadstool, tree};

#[derive(Clone, Debug)]
pub enum FeatureConfig {
    Toadstool(ToadstoolConfig),
    Dripleaf(DripleafConfig),
    Tree(TreeConfig),
}

impl FeatureConfig {
    /// Run the matching driver once at `origin`. True iff anything was
    /// placed.
    pub fn place<G: VoxelGrid, R: Rng + ?Sized>(
        &self,
        grid: &mut G,
        reg: &BlockRegistry,
        origin: Pos3,
        rng: &mut R,
    ) -> bool {
        match self {
            FeatureConfig::Toadstool(cfg) => toadstool::place(grid, reg, origin, rng, cfg),
            FeatureConfig::Dripleaf(cfg) => dripleaf::place(grid, reg, origin, rng, cfg),
            FeatureConfig::Tree(cfg) => tree::place(grid, reg, origin, rng, cfg),
        }
    }
}

/// Immutable name -> feature table, built once at startup and passed by
/// reference to the decoration pass. There is no ambient global registry.
#[derive(Default, Clone, Debug)]
pub struct FeatureCatalog {
    by_name: HashMap<String, FeatureConfig>,
}

impl FeatureCatalog {
    pub fn new() -> Self {
        Self {
            by_name: HashMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, cfg: FeatureConfig) {
        self.by_name.insert(name.into(), cfg);
    }

    pub fn get(&self, name: &str) -> Option<&FeatureConfig> {
        self.by_name.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// The stock feature table, with every block name resolved against the
    /// registry up front. Unknown names are a build error, not a runtime
    /// fallback.
    pub fn standard(reg: &BlockRegistry) -> Result<Self, Box<dyn Error>> {
        let block = |name: &str| -> Result<Block, Box<dyn Error>> {
            reg.make_block_by_name(name, None)
                .ok_or_else(|| format!("feature catalog: block '{name}' not in registry").into())
        };
        let id = |name: &str| -> Result<BlockId, Box<dyn Error>> { Ok(block(name)?.id) };

        let mut cat = Self::new();
        cat.insert(
            "toadstool",
            FeatureConfig::Toadstool(
                ToadstoolConfig::builder(block("mushroom_stem")?, block("toadstool_cap")?)
                    .place_on(id("grass")?)
                    .place_on(id("mycelium")?)
                    .build(),
            ),
        );
        cat.insert(
            "big_dripleaf",
            FeatureConfig::Dripleaf(
                DripleafConfig::builder(block("dripleaf_stem")?, block("dripleaf_head")?).build(),
            ),
        );
        cat.insert(
            "oak_tree",
            FeatureConfig::Tree(
                TreeConfig::builder(block("oak_log")?, block("oak_leaves")?)
                    .place_on(id("grass")?)
                    .place_on(id("dirt")?)
                    .build(),
            ),
        );
        cat.insert(
            "willow_tree",
            FeatureConfig::Tree(
                TreeConfig::builder(block("willow_log")?, block("willow_leaves")?)
                    .vine(block("willow_vine")?)
                    .place_on(id("grass")?)
                    .place_on(id("dirt")?)
                    .min_height(6)
                    .max_height(10)
                    .build(),
            ),
        );
        Ok(cat)
    }
}
