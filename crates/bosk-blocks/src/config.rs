use std::collections::HashMap;

use serde::Deserialize;

/// On-disk block table (`blocks.toml`).
#[derive(Clone, Debug, Deserialize)]
pub struct VoxelsConfig {
    /// Name of the block substituted for unresolvable lookups.
    #[serde(default)]
    pub unknown_block: Option<String>,
    pub blocks: Vec<BlockDef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BlockDef {
    pub name: String,
    /// Explicit id; defaults to the next free slot in declaration order.
    #[serde(default)]
    pub id: Option<u16>,
    #[serde(default)]
    pub solid: Option<bool>,
    /// Whether generation may overwrite this block (air, foliage, fluids).
    #[serde(default)]
    pub replaceable: Option<bool>,
    #[serde(default)]
    pub fluid: Option<bool>,
    /// Free-form grouping tags ("dirt", "bush", ...) queried by anchor
    /// predicates.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Property name -> allowed values; packed into `Block::state` bits.
    #[serde(default)]
    pub state_schema: Option<HashMap<String, Vec<String>>>,
}
