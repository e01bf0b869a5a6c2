//! Item unification and reading-order sequencing.
//!
//! Builds one typed item list per page from the surviving blocks plus
//! all detected tables, then imposes the reading order: top-most
//! first, then left-most, with coordinates rounded to one decimal so
//! sub-pixel jitter from the content model cannot reorder
//! near-identical rows.

use ordered_float::OrderedFloat;
use rustc_hash::FxHashSet;

use crate::model::{Block, BlockContent, Item, ItemContent, TableRegion};

/// Resolve a text block's payload: spans concatenated within each
/// line-group, groups joined by newline, groups whose trimmed text is
/// empty dropped.
pub fn resolve_text(line_groups: &[Vec<String>]) -> String {
    let mut lines = Vec::with_capacity(line_groups.len());
    for group in line_groups {
        let line = group.concat();
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    lines.join("\n")
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Merge tables and surviving blocks into one list of items sorted by
/// reading order.
///
/// Every table region becomes an item unconditionally; blocks whose
/// index appears in `excluded` are dropped. The sort is stable, so
/// items with identical rounded keys keep insertion order: tables
/// first, then blocks in content-model order. Rectangles are carried
/// over from the sources unchanged.
pub fn unify_and_order(
    blocks: Vec<Block>,
    tables: Vec<TableRegion>,
    excluded: &FxHashSet<usize>,
) -> Vec<Item> {
    let mut items = Vec::with_capacity(tables.len() + blocks.len());

    for table in tables {
        items.push(Item {
            rect: table.rect,
            content: ItemContent::Table(table.rows),
        });
    }

    for (bi, block) in blocks.into_iter().enumerate() {
        if excluded.contains(&bi) {
            continue;
        }
        let content = match block.content {
            BlockContent::Text(groups) => ItemContent::Text(resolve_text(&groups)),
            BlockContent::Image(payload) => ItemContent::Image(payload),
            BlockContent::Drawing => ItemContent::Drawing,
        };
        items.push(Item {
            rect: block.rect,
            content,
        });
    }

    items.sort_by_key(|item| {
        (
            OrderedFloat(round1(item.rect.y0)),
            OrderedFloat(round1(item.rect.x0)),
        )
    });
    items
}
