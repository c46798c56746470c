use bosk_blocks::Block;
use bosk_geom::{Bounds, Pos3};

/// The narrow interface placement algorithms consume. The host owns the
/// storage; placement only queries and writes cells through it.
///
/// `get` and `set` require an in-bounds coordinate. Passing one outside
/// `bounds()` is a caller bug and panics; ordinary placement failure is a
/// `false` return from the drivers, never a panic. Callers gate writes with
/// `contains` or a clearance scan first.
pub trait VoxelGrid {
    fn get(&self, p: Pos3) -> Block;
    fn set(&mut self, p: Pos3, b: Block);
    fn bounds(&self) -> Bounds;

    #[inline]
    fn contains(&self, p: Pos3) -> bool {
        self.bounds().contains(p)
    }
}

/// Dense in-memory grid over `[0, sx) x [0, sy) x [0, sz)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridBuf {
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
    pub blocks: Vec<Block>,
}

impl GridBuf {
    pub fn filled(sx: usize, sy: usize, sz: usize, b: Block) -> Self {
        Self {
            sx,
            sy,
            sz,
            blocks: vec![b; sx * sy * sz],
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.sz + z) * self.sx + x
    }

    #[inline]
    pub fn try_get(&self, p: Pos3) -> Option<Block> {
        if !self.contains(p) {
            return None;
        }
        Some(self.blocks[self.idx(p.x as usize, p.y as usize, p.z as usize)])
    }

    /// Highest y in the column whose cell is not air, if any.
    pub fn top_non_air(&self, x: i32, z: i32) -> Option<i32> {
        if x < 0 || z < 0 || x as usize >= self.sx || z as usize >= self.sz {
            return None;
        }
        (0..self.sy as i32)
            .rev()
            .find(|&y| !self.blocks[self.idx(x as usize, y as usize, z as usize)].is_air())
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.blocks.iter().any(|b| !b.is_air())
    }
}

impl VoxelGrid for GridBuf {
    #[inline]
    fn get(&self, p: Pos3) -> Block {
        match self.try_get(p) {
            Some(b) => b,
            None => panic!(
                "grid read out of bounds: ({}, {}, {})",
                p.x, p.y, p.z
            ),
        }
    }

    #[inline]
    fn set(&mut self, p: Pos3, b: Block) {
        assert!(
            self.contains(p),
            "grid write out of bounds: ({}, {}, {})",
            p.x,
            p.y,
            p.z
        );
        let i = self.idx(p.x as usize, p.y as usize, p.z as usize);
        self.blocks[i] = b;
    }

    #[inline]
    fn bounds(&self) -> Bounds {
        Bounds::new(
            Pos3::ZERO,
            Pos3::new(self.sx as i32 - 1, self.sy as i32 - 1, self.sz as i32 - 1),
        )
    }
}
