use bosk_blocks::Block;
use bosk_geom::{Bounds, Pos3};
use bosk_world::VoxelGrid;

/// An ordered multi-cell shape: relative offsets and the block written at
/// each. Declared order is placement order (columns are declared
/// bottom-to-top).
#[derive(Clone, Debug, Default)]
pub struct Template {
    cells: Vec<(Pos3, Block)>,
}

impl Template {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    pub fn push(&mut self, offset: Pos3, block: Block) {
        self.cells.push((offset, block));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[(Pos3, Block)] {
        &self.cells
    }
}

/// What the stamper does when a target cell refuses the write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StampPolicy {
    /// Write in declared order and stop at the first conflicting cell,
    /// leaving earlier writes in place.
    AbortOnConflict,
    /// Validate every target before writing anything; on any conflict the
    /// grid is untouched.
    AllOrNothing,
}

/// Stamp `template` at `origin`. Returns `true` iff at least one cell was
/// written; an empty template is a no-op returning `false`.
pub fn stamp<G: VoxelGrid>(
    grid: &mut G,
    origin: Pos3,
    template: &Template,
    replaceable: &impl Fn(&G, Pos3) -> bool,
    policy: StampPolicy,
) -> bool {
    if template.is_empty() {
        return false;
    }
    match policy {
        StampPolicy::AllOrNothing => {
            for (off, _) in template.cells() {
                let target = origin + *off;
                if !grid.contains(target) || !replaceable(grid, target) {
                    return false;
                }
            }
            for (off, block) in template.cells() {
                grid.set(origin + *off, *block);
            }
            true
        }
        StampPolicy::AbortOnConflict => {
            let mut wrote = false;
            for (off, block) in template.cells() {
                let target = origin + *off;
                if !grid.contains(target) || !replaceable(grid, target) {
                    return wrote;
                }
                grid.set(target, *block);
                wrote = true;
            }
            wrote
        }
    }
}

/// Single conditional write, for cells that are individually skippable
/// (canopy leaves, vines). Returns whether the cell was written.
pub fn write_if<G: VoxelGrid>(
    grid: &mut G,
    pos: Pos3,
    block: Block,
    replaceable: &impl Fn(&G, Pos3) -> bool,
) -> bool {
    if grid.contains(pos) && replaceable(grid, pos) {
        grid.set(pos, block);
        return true;
    }
    false
}

/// Headroom pre-check: every cell of `bounds` relative to `origin` must be
/// inside the grid and replaceable. Runs before stamping fixed-footprint
/// templates.
pub fn has_clearance<G: VoxelGrid>(
    grid: &G,
    origin: Pos3,
    bounds: Bounds,
    replaceable: &impl Fn(&G, Pos3) -> bool,
) -> bool {
    bounds
        .translated(origin)
        .cells()
        .all(|p| grid.contains(p) && replaceable(grid, p))
}
