//! Tile nodes stored in a [`TileTree`](super::TileTree) arena.
//!
//! A tile is either a [`Leaf`] holding optional injected content, or a
//! [`Container`] that partitions its main axis among ordered children.

use serde::Serialize;
use smallvec::SmallVec;

use super::content::TileContent;
use super::metrics::LayoutMetrics;
use super::size::{Axis, Direction, Size};
use crate::constants::tree::CHILDREN_INLINE_CAP;

/// Ordered child list of a container.
pub type Children = SmallVec<[TileId; CHILDREN_INLINE_CAP]>;

// ============================================================================
// TileId
// ============================================================================

/// Index of a tile inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TileId(usize);

impl TileId {
    /// The root container of every tree.
    pub const ROOT: Self = Self(0);

    /// Creates an id from a raw arena index.
    #[must_use]
    pub const fn new(index: usize) -> Self { Self(index) }

    /// Raw arena index.
    #[must_use]
    pub const fn index(self) -> usize { self.0 }

    /// Whether this id addresses the root.
    #[must_use]
    pub const fn is_root(self) -> bool { self.0 == 0 }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// Leaf
// ============================================================================

/// A tile without children.
#[derive(Default)]
pub struct Leaf {
    content: Option<Box<dyn TileContent>>,
}

impl Leaf {
    /// Creates a leaf with no content.
    #[must_use]
    pub const fn new() -> Self { Self { content: None } }

    /// Creates a leaf that hosts `content`.
    #[must_use]
    pub fn with_content(content: Box<dyn TileContent>) -> Self {
        Self { content: Some(content) }
    }

    /// Injected content, if any.
    #[must_use]
    pub fn content(&self) -> Option<&dyn TileContent> { self.content.as_deref() }

    /// Mutable access to the injected content.
    pub fn content_mut(&mut self) -> Option<&mut (dyn TileContent + 'static)> {
        self.content.as_deref_mut()
    }

    /// Replaces the content, returning the previous one.
    pub fn set_content(
        &mut self,
        content: Box<dyn TileContent>,
    ) -> Option<Box<dyn TileContent>> {
        self.content.replace(content)
    }
}

impl std::fmt::Debug for Leaf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Leaf")
            .field("content", &self.content.as_ref().map(|content| content.kind()))
            .finish()
    }
}

// ============================================================================
// Container
// ============================================================================

/// A tile that lays out ordered children along its main axis.
#[derive(Debug, Clone, Default)]
pub struct Container {
    direction: Direction,
    children: Children,
    total_fixed_width: u32,
    total_fixed_height: u32,
    metrics: LayoutMetrics,
}

impl Container {
    /// Creates an empty container.
    #[must_use]
    pub const fn new(direction: Direction) -> Self {
        Self {
            direction,
            children: SmallVec::new_const(),
            total_fixed_width: 0,
            total_fixed_height: 0,
            metrics: LayoutMetrics::new(),
        }
    }

    #[must_use]
    pub const fn direction(&self) -> Direction { self.direction }

    /// Children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[TileId] { &self.children }

    /// Sum of the children's fixed values on `axis`.
    #[must_use]
    pub const fn total_fixed(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.total_fixed_width,
            Axis::Vertical => self.total_fixed_height,
        }
    }

    #[must_use]
    pub const fn total_fixed_width(&self) -> u32 { self.total_fixed_width }

    #[must_use]
    pub const fn total_fixed_height(&self) -> u32 { self.total_fixed_height }

    #[must_use]
    pub const fn metrics(&self) -> &LayoutMetrics { &self.metrics }

    pub(crate) const fn metrics_mut(&mut self) -> &mut LayoutMetrics { &mut self.metrics }

    /// Appends a child and folds its fixed values into the totals.
    pub(crate) fn push_child(&mut self, id: TileId, size: &Size) {
        self.children.push(id);
        self.total_fixed_width = self.total_fixed_width.saturating_add(size.fixed_width);
        self.total_fixed_height = self.total_fixed_height.saturating_add(size.fixed_height);
    }

    /// Recomputes the fixed totals from the children's current constraints.
    pub(crate) fn refresh_totals<'a, I>(&mut self, sizes: I)
    where
        I: IntoIterator<Item = &'a Size>,
    {
        let (width, height) = sizes.into_iter().fold((0u32, 0u32), |(w, h), size| {
            (w.saturating_add(size.fixed_width), h.saturating_add(size.fixed_height))
        });
        self.total_fixed_width = width;
        self.total_fixed_height = height;
    }
}

// ============================================================================
// Tile
// ============================================================================

/// Leaf or container payload of a tile.
#[derive(Debug)]
pub enum TileKind {
    Leaf(Leaf),
    Container(Container),
}

/// A node of the layout tree.
#[derive(Debug)]
pub struct Tile {
    name: String,
    size: Size,
    parent: Option<TileId>,
    kind: TileKind,
}

impl Tile {
    /// Creates a detached leaf tile.
    #[must_use]
    pub fn leaf(name: impl Into<String>, size: Size) -> Self {
        Self::with_kind(name, size, TileKind::Leaf(Leaf::new()))
    }

    /// Creates a detached container tile.
    #[must_use]
    pub fn container(name: impl Into<String>, direction: Direction, size: Size) -> Self {
        Self::with_kind(name, size, TileKind::Container(Container::new(direction)))
    }

    #[must_use]
    pub fn with_kind(name: impl Into<String>, size: Size, kind: TileKind) -> Self {
        Self {
            name: name.into(),
            size: size.unresolved(),
            parent: None,
            kind,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    /// Declared constraints. Resolved extents live in the tree's size table.
    #[must_use]
    pub const fn size(&self) -> &Size { &self.size }

    pub(crate) const fn set_size(&mut self, size: Size) { self.size = size.unresolved(); }

    #[must_use]
    pub const fn parent(&self) -> Option<TileId> { self.parent }

    pub(crate) const fn set_parent(&mut self, parent: TileId) { self.parent = Some(parent); }

    #[must_use]
    pub const fn kind(&self) -> &TileKind { &self.kind }

    pub(crate) const fn kind_mut(&mut self) -> &mut TileKind { &mut self.kind }

    #[must_use]
    pub const fn is_container(&self) -> bool { matches!(self.kind, TileKind::Container(_)) }

    #[must_use]
    pub const fn as_container(&self) -> Option<&Container> {
        match &self.kind {
            TileKind::Container(container) => Some(container),
            TileKind::Leaf(_) => None,
        }
    }

    #[must_use]
    pub const fn as_leaf(&self) -> Option<&Leaf> {
        match &self.kind {
            TileKind::Leaf(leaf) => Some(leaf),
            TileKind::Container(_) => None,
        }
    }

    /// Direction of a container, `None` for leaves.
    #[must_use]
    pub const fn direction(&self) -> Option<Direction> {
        match &self.kind {
            TileKind::Container(container) => Some(container.direction()),
            TileKind::Leaf(_) => None,
        }
    }

    /// Children of a container, empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[TileId] {
        match &self.kind {
            TileKind::Container(container) => container.children(),
            TileKind::Leaf(_) => &[],
        }
    }

    /// Short label for the tile kind.
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        match self.kind {
            TileKind::Leaf(_) => "leaf",
            TileKind::Container(_) => "container",
        }
    }
}
