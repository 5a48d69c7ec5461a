//! Composes a resolved tree into a character frame.
//!
//! Containers place their children one after the other along the main axis,
//! starting at the container's own origin. Leaves draw a rounded box with
//! their name in the top border and their content inside. Anything that
//! falls outside the frame is clipped.

use std::fmt;

use serde::Serialize;

use super::content::wrap_text;
use super::size::Axis;
use super::tile::{TileId, TileKind};
use super::tree::TileTree;
use crate::constants::render::{
    BLANK, BOTTOM_LEFT, BOTTOM_RIGHT, HORIZONTAL, TOP_LEFT, TOP_RIGHT, VERTICAL,
};

// ============================================================================
// Placement
// ============================================================================

/// Absolute position and resolved extent of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub id: TileId,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Computes the absolute position of every tile reachable from the root.
///
/// The result is in pre-order, matching [`TileTree::walk`].
#[must_use]
pub fn placements(tree: &TileTree) -> Vec<Placement> {
    let mut out = Vec::with_capacity(tree.len());
    let mut stack = vec![(TileId::ROOT, 0u32, 0u32)];

    while let Some((id, x, y)) = stack.pop() {
        let size = tree.resolved(id).unwrap_or_default();
        out.push(Placement {
            id,
            x,
            y,
            width: size.width,
            height: size.height,
        });

        let Some(direction) = tree.get(id).and_then(|tile| tile.direction()) else {
            continue;
        };
        let main_axis = direction.main_axis();
        let mut offset = 0u32;
        let mut queued = Vec::with_capacity(tree.children(id).len());
        for &child in tree.children(id) {
            let extent = tree.resolved(child).unwrap_or_default().extent(main_axis);
            let origin = match main_axis {
                Axis::Horizontal => (x.saturating_add(offset), y),
                Axis::Vertical => (x, y.saturating_add(offset)),
            };
            queued.push((child, origin.0, origin.1));
            offset = offset.saturating_add(extent);
        }
        stack.extend(queued.into_iter().rev());
    }

    out
}

// ============================================================================
// Canvas
// ============================================================================

/// A fixed-size grid of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    cells: Vec<char>,
}

impl Canvas {
    /// Creates a blank canvas.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            cells: vec![BLANK; len],
        }
    }

    #[must_use]
    pub const fn width(&self) -> u32 { self.width }

    #[must_use]
    pub const fn height(&self) -> u32 { self.height }

    /// Writes `ch` at `(x, y)`. Out-of-bounds writes are dropped.
    pub fn put(&mut self, x: u32, y: u32, ch: char) {
        if x < self.width && y < self.height {
            let index = y as usize * self.width as usize + x as usize;
            self.cells[index] = ch;
        }
    }

    /// Writes at most `max` characters of `text` starting at `(x, y)`.
    pub fn put_str(&mut self, x: u32, y: u32, text: &str, max: u32) {
        for (offset, ch) in (0..max).zip(text.chars()) {
            self.put(x.saturating_add(offset), y, ch);
        }
    }

    /// Character at `(x, y)`, if inside the canvas.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<char> {
        (x < self.width && y < self.height)
            .then(|| self.cells[y as usize * self.width as usize + x as usize])
    }

    /// Rows with trailing blanks removed.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        if self.width == 0 {
            return vec![String::new(); self.height as usize];
        }
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect()
    }

    /// Draws a rounded box with `label` embedded in the top border.
    pub fn draw_box(&mut self, placement: &Placement, label: &str) {
        let Placement {
            x, y, width, height, ..
        } = *placement;
        if width < 2 || height < 2 {
            return;
        }
        let right = x + width - 1;
        let bottom = y + height - 1;

        for column in x + 1..right {
            self.put(column, y, HORIZONTAL);
            self.put(column, bottom, HORIZONTAL);
        }
        for row in y + 1..bottom {
            self.put(x, row, VERTICAL);
            self.put(right, row, VERTICAL);
        }
        self.put(x, y, TOP_LEFT);
        self.put(right, y, TOP_RIGHT);
        self.put(x, bottom, BOTTOM_LEFT);
        self.put(right, bottom, BOTTOM_RIGHT);

        // " label " between the corners
        let room = width - 2;
        if room >= 3 && !label.is_empty() {
            let padded = format!(" {label} ");
            self.put_str(x + 1, y, &padded, room);
        }
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

// ============================================================================
// Frame
// ============================================================================

/// Renders the last resolved layout of `tree` into a canvas sized like the root.
#[must_use]
pub fn render(tree: &TileTree) -> Canvas {
    let root = tree.resolved(TileId::ROOT).unwrap_or_default();
    let mut canvas = Canvas::new(root.width, root.height);

    for placement in placements(tree) {
        let Some(tile) = tree.get(placement.id) else {
            continue;
        };
        let TileKind::Leaf(leaf) = tile.kind() else {
            continue;
        };
        if placement.width == 0 || placement.height == 0 {
            continue;
        }

        let boxed = placement.width >= 2 && placement.height >= 2;
        let (inner_x, inner_y, inner_w, inner_h) = if boxed {
            canvas.draw_box(&placement, tile.name());
            (
                placement.x + 1,
                placement.y + 1,
                placement.width - 2,
                placement.height - 2,
            )
        } else {
            (placement.x, placement.y, placement.width, placement.height)
        };

        let lines = match leaf.content() {
            Some(content) => content.draw(inner_w, inner_h),
            None if boxed => wrap_text(
                &format!("{}x{}", placement.width, placement.height),
                inner_w,
                inner_h,
            ),
            None => wrap_text(tile.name(), inner_w, inner_h),
        };
        for (row, line) in (0..inner_h).zip(lines.iter()) {
            canvas.put_str(inner_x, inner_y + row, line, inner_w);
        }
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::content::TextContent;
    use crate::layout::size::{Direction, Size};

    fn split_tree() -> TileTree {
        let mut tree = TileTree::new(Direction::Column);
        let main = tree
            .add_container(TileId::ROOT, "Main", Direction::Row, Size::weighted(1.0))
            .unwrap();
        tree.add_leaf(main, "Left", Size::weighted(0.5)).unwrap();
        tree.add_leaf(main, "Right", Size::weighted(0.5)).unwrap();
        tree.add_leaf(TileId::ROOT, "Status", Size::new().with_fixed_height(1))
            .unwrap();
        tree
    }

    // ========================================================================
    // Placement
    // ========================================================================

    #[test]
    fn test_placements_follow_main_axis() {
        let mut tree = split_tree();
        tree.resize(20, 6).unwrap();
        let placed = placements(&tree);

        let find = |name: &str| {
            let id = tree.find(name).unwrap();
            *placed.iter().find(|placement| placement.id == id).unwrap()
        };
        let left = find("Left");
        let right = find("Right");
        let status = find("Status");

        assert_eq!((left.x, left.y, left.width, left.height), (0, 0, 10, 5));
        assert_eq!((right.x, right.y), (10, 0));
        assert_eq!((status.x, status.y, status.width, status.height), (0, 5, 20, 1));
    }

    // ========================================================================
    // Canvas
    // ========================================================================

    #[test]
    fn test_canvas_clips_writes() {
        let mut canvas = Canvas::new(3, 1);
        canvas.put_str(1, 0, "abcdef", 10);
        canvas.put(5, 5, 'x');
        assert_eq!(canvas.to_string(), " ab");
        assert_eq!(canvas.get(9, 0), None);
    }

    #[test]
    fn test_draw_box_with_label() {
        let mut canvas = Canvas::new(10, 3);
        let placement = Placement {
            id: TileId::new(1),
            x: 0,
            y: 0,
            width: 10,
            height: 3,
        };
        canvas.draw_box(&placement, "Box");
        assert_eq!(canvas.lines(), vec!["╭ Box ───╮", "│        │", "╰────────╯"]);
    }

    #[test]
    fn test_draw_box_truncates_long_label() {
        let mut canvas = Canvas::new(6, 2);
        let placement = Placement {
            id: TileId::new(1),
            x: 0,
            y: 0,
            width: 6,
            height: 2,
        };
        canvas.draw_box(&placement, "Sidebar");
        assert_eq!(canvas.lines(), vec!["╭ Sid╮", "╰────╯"]);
    }

    // ========================================================================
    // Frame
    // ========================================================================

    #[test]
    fn test_render_frame() {
        let mut tree = split_tree();
        tree.resize(20, 6).unwrap();
        let frame = render(&tree);

        assert_eq!(frame.width(), 20);
        assert_eq!(frame.height(), 6);
        let lines = frame.lines();
        assert_eq!(lines[0], "╭ Left ──╮╭ Right ─╮");
        assert_eq!(lines[1], "│10x5    ││10x5    │");
        assert_eq!(lines[4], "╰────────╯╰────────╯");
        assert_eq!(lines[5], "Status");
    }

    #[test]
    fn test_render_draws_content() {
        let mut tree = TileTree::new(Direction::Row);
        let note = tree.leaf_with_content("Note", Size::weighted(1.0), Box::new(TextContent::new("hello")));
        tree.add(TileId::ROOT, note).unwrap();
        tree.resize(9, 3).unwrap();

        assert_eq!(render(&tree).lines()[1], "│hello  │");
    }

    #[test]
    fn test_render_before_layout_is_empty() {
        let tree = split_tree();
        let frame = render(&tree);
        assert_eq!(frame.width(), 0);
        assert!(frame.lines().is_empty());
    }
}
