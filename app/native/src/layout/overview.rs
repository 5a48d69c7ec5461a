//! Textual overviews of a tile tree.

use std::fmt::Write;

use serde::Serialize;

use super::size::Size;
use super::tile::TileId;
use super::tree::TileTree;

/// One line of constraints and resolved extents.
///
/// `actual[w:80,h:23,W:1.00] min[w:0,h:0] max[w:0,h:0] fixed[w:0,h:0]`
#[must_use]
pub fn describe_size(size: &Size) -> String {
    format!(
        "actual[w:{},h:{},W:{:.2}] min[w:{},h:{}] max[w:{},h:{}] fixed[w:{},h:{}]",
        size.width,
        size.height,
        size.weight,
        size.min_width,
        size.min_height,
        size.max_width,
        size.max_height,
        size.fixed_width,
        size.fixed_height,
    )
}

/// Indented tree of names. Containers carry their direction.
#[must_use]
pub fn outline(tree: &TileTree) -> String {
    let mut out = String::new();
    for (id, depth) in tree.walk() {
        let Some(tile) = tree.get(id) else {
            continue;
        };
        let indent = "  ".repeat(depth);
        match tile.direction() {
            Some(direction) => {
                let _ = writeln!(out, "{indent}{}({direction})", tile.name());
            }
            None => {
                let _ = writeln!(out, "{indent}{}", tile.name());
            }
        }
    }
    out
}

/// Resolved size of every container, innermost first.
#[must_use]
pub fn size_listing(tree: &TileTree) -> String {
    let mut out = String::new();
    list_sizes(tree, TileId::ROOT, &mut out);
    out
}

fn list_sizes(tree: &TileTree, id: TileId, out: &mut String) {
    let Some(tile) = tree.get(id) else {
        return;
    };
    let Some(direction) = tile.direction() else {
        return;
    };
    for &child in tile.children() {
        list_sizes(tree, child, out);
    }
    let size = tree.resolved(id).unwrap_or_default();
    let _ = writeln!(out, "{}({direction})\n{}", tile.name(), describe_size(&size));
}

// ============================================================================
// Rows
// ============================================================================

/// Flattened view of one tile after layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileRow {
    pub id: TileId,
    pub name: String,
    pub depth: usize,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    pub parent: Option<String>,
    pub size: Size,
}

/// One row per tile reachable from the root, in pre-order.
#[must_use]
pub fn rows(tree: &TileTree) -> Vec<TileRow> {
    tree.walk()
        .filter_map(|(id, depth)| {
            let tile = tree.get(id)?;
            Some(TileRow {
                id,
                name: tile.name().to_string(),
                depth,
                kind: tile.kind_label(),
                direction: tile.direction().map(|direction| direction.to_string()),
                parent: tile.parent().and_then(|parent| tree.name(parent)).map(str::to_string),
                size: tree.resolved(id).unwrap_or_default(),
            })
        })
        .collect()
}
