use bosk_blocks::{Block, BlockId};

use crate::stamp::StampPolicy;

/// Huge-toadstool shape: a stem column capped by three stacked slabs and a
/// plus-shaped rim.
#[derive(Clone, Debug)]
pub struct ToadstoolConfig {
    pub stem: Block,
    pub cap: Block,
    pub min_height: i32,
    pub max_height: i32,
    pub cap_radius: i32,
    pub clearance_radius: i32,
    pub clearance_height: i32,
    /// Ground blocks the stem may anchor on.
    pub place_on: Vec<BlockId>,
    pub policy: StampPolicy,
}

impl ToadstoolConfig {
    pub fn builder(stem: Block, cap: Block) -> ToadstoolBuilder {
        ToadstoolBuilder {
            cfg: ToadstoolConfig {
                stem,
                cap,
                min_height: 2,
                max_height: 4,
                cap_radius: 2,
                clearance_radius: 2,
                clearance_height: 8,
                place_on: Vec::new(),
                policy: StampPolicy::AllOrNothing,
            },
        }
    }
}

pub struct ToadstoolBuilder {
    cfg: ToadstoolConfig,
}

impl ToadstoolBuilder {
    pub fn min_height(mut self, h: i32) -> Self {
        self.cfg.min_height = h;
        self
    }

    pub fn max_height(mut self, h: i32) -> Self {
        self.cfg.max_height = h;
        self
    }

    pub fn cap_radius(mut self, r: i32) -> Self {
        self.cfg.cap_radius = r;
        self
    }

    pub fn clearance(mut self, radius: i32, height: i32) -> Self {
        self.cfg.clearance_radius = radius;
        self.cfg.clearance_height = height;
        self
    }

    /// Add an anchor block; may be called once per acceptable ground type.
    pub fn place_on(mut self, id: BlockId) -> Self {
        self.cfg.place_on.push(id);
        self
    }

    pub fn policy(mut self, policy: StampPolicy) -> Self {
        self.cfg.policy = policy;
        self
    }

    pub fn build(self) -> ToadstoolConfig {
        self.cfg
    }
}

/// Dripleaf colony: scattered columns of stem cells with a head on top,
/// grown over tagged ground.
#[derive(Clone, Debug)]
pub struct DripleafConfig {
    pub stem: Block,
    pub head: Block,
    pub tries: u32,
    pub spread_xz: i32,
    pub spread_y: i32,
    /// Column heights are drawn from `[1, max_height]`.
    pub max_height: i32,
    /// Ground tag a column anchors over.
    pub anchor_tag: String,
    /// Cells carrying this tag count as growable, like air and fluids.
    pub grow_through_tag: String,
}

impl DripleafConfig {
    pub fn builder(stem: Block, head: Block) -> DripleafBuilder {
        DripleafBuilder {
            cfg: DripleafConfig {
                stem,
                head,
                tries: 32,
                spread_xz: 4,
                spread_y: 2,
                max_height: 3,
                anchor_tag: "dirt".into(),
                grow_through_tag: "bush".into(),
            },
        }
    }
}

pub struct DripleafBuilder {
    cfg: DripleafConfig,
}

impl DripleafBuilder {
    pub fn tries(mut self, tries: u32) -> Self {
        self.cfg.tries = tries;
        self
    }

    pub fn spread(mut self, xz: i32, y: i32) -> Self {
        self.cfg.spread_xz = xz;
        self.cfg.spread_y = y;
        self
    }

    pub fn max_height(mut self, h: i32) -> Self {
        self.cfg.max_height = h;
        self
    }

    pub fn anchor_tag(mut self, tag: impl Into<String>) -> Self {
        self.cfg.anchor_tag = tag.into();
        self
    }

    pub fn build(self) -> DripleafConfig {
        self.cfg
    }
}

/// Single-trunk tree with a layered canopy and optional hanging vines.
#[derive(Clone, Debug)]
pub struct TreeConfig {
    pub log: Block,
    pub leaves: Block,
    pub vine: Option<Block>,
    pub min_height: i32,
    pub max_height: i32,
    pub max_leaves_radius: i32,
    /// How far vine curtains may hang below their anchor leaf.
    pub vine_length: i32,
    pub place_on: Vec<BlockId>,
    pub policy: StampPolicy,
}

impl TreeConfig {
    pub fn builder(log: Block, leaves: Block) -> TreeBuilder {
        TreeBuilder {
            cfg: TreeConfig {
                log,
                leaves,
                vine: None,
                min_height: 4,
                max_height: 7,
                max_leaves_radius: 2,
                vine_length: 3,
                place_on: Vec::new(),
                policy: StampPolicy::AllOrNothing,
            },
        }
    }
}

pub struct TreeBuilder {
    cfg: TreeConfig,
}

impl TreeBuilder {
    pub fn vine(mut self, vine: Block) -> Self {
        self.cfg.vine = Some(vine);
        self
    }

    pub fn min_height(mut self, h: i32) -> Self {
        self.cfg.min_height = h;
        self
    }

    pub fn max_height(mut self, h: i32) -> Self {
        self.cfg.max_height = h;
        self
    }

    pub fn max_leaves_radius(mut self, r: i32) -> Self {
        self.cfg.max_leaves_radius = r;
        self
    }

    pub fn vine_length(mut self, len: i32) -> Self {
        self.cfg.vine_length = len;
        self
    }

    pub fn place_on(mut self, id: BlockId) -> Self {
        self.cfg.place_on.push(id);
        self
    }

    pub fn policy(mut self, policy: StampPolicy) -> Self {
        self.cfg.policy = policy;
        self
    }

    pub fn build(self) -> TreeConfig {
        self.cfg
    }
}
