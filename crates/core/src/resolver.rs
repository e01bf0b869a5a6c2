//! Table-vs-block overlap resolution.
//!
//! Tables take precedence over blocks they cover: a block
//! sufficiently overlapped by any detected table region is excluded
//! from the unified item list so its text is not emitted twice.

use rustc_hash::FxHashSet;

use crate::model::{Block, TableRegion};

/// Minimum fraction of a block's own area that must lie under a table
/// for the block to be excluded. Strictly greater-than.
pub const TABLE_OVERLAP_THRESHOLD: f64 = 0.3;

/// Indices of blocks whose overlap fraction with some table region
/// strictly exceeds `threshold`.
///
/// One qualifying table is enough; fractions are never combined
/// across tables. O(tables x blocks), fine for typical page content.
pub fn excluded_blocks(
    blocks: &[Block],
    tables: &[TableRegion],
    threshold: f64,
) -> FxHashSet<usize> {
    let mut excluded = FxHashSet::default();
    for table in tables {
        for (bi, block) in blocks.iter().enumerate() {
            if block.rect.overlap_fraction(&table.rect) > threshold {
                excluded.insert(bi);
            }
        }
    }
    excluded
}
