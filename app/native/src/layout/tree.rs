//! Arena-backed tile tree.
//!
//! Tiles live in a flat arena and refer to each other by [`TileId`]. The
//! parent link is a plain id used for lookups only; a container's child list
//! is the single source of ownership. Resolved sizes are kept in a separate
//! [`SizeTable`] that is replaced wholesale after every successful pass.

use std::time::Instant;

use tracing::{debug, warn};

use super::content::TileContent;
use super::engine::{self, EngineOptions};
use super::event::{LayoutEvent, LayoutNotice};
use super::size::{Axis, Direction, Size, SizeTable};
use super::tile::{Leaf, Tile, TileId, TileKind};
use crate::constants::engine::ROOT_WEIGHT;
use crate::constants::tree::ROOT_NAME;
use crate::error::{TesselError, TesselResult};

/// A tree of tiles rooted at [`TileId::ROOT`].
#[derive(Debug)]
pub struct TileTree {
    tiles: Vec<Tile>,
    resolved: SizeTable,
    options: EngineOptions,
}

impl TileTree {
    /// Creates a tree whose root container is named `Root`.
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self::with_root(ROOT_NAME, direction, Size::weighted(ROOT_WEIGHT))
    }

    /// Creates a tree with a custom root container.
    #[must_use]
    pub fn with_root(name: impl Into<String>, direction: Direction, size: Size) -> Self {
        let root = Tile::container(name, direction, size);
        let resolved = SizeTable::seeded([*root.size()]);
        Self {
            tiles: vec![root],
            resolved,
            options: EngineOptions::default(),
        }
    }

    /// Replaces the engine options.
    #[must_use]
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub const fn options(&self) -> &EngineOptions { &self.options }

    pub fn set_options(&mut self, options: EngineOptions) { self.options = options; }

    /// Number of tiles, attached or not.
    #[must_use]
    pub fn len(&self) -> usize { self.tiles.len() }

    /// Always `false`: a tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.tiles.is_empty() }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Allocates a detached leaf.
    pub fn leaf(&mut self, name: impl Into<String>, size: Size) -> TileId {
        self.insert(Tile::leaf(name, size))
    }

    /// Allocates a detached leaf hosting `content`.
    pub fn leaf_with_content(
        &mut self,
        name: impl Into<String>,
        size: Size,
        content: Box<dyn TileContent>,
    ) -> TileId {
        self.insert(Tile::with_kind(name, size, TileKind::Leaf(Leaf::with_content(content))))
    }

    /// Allocates a detached container.
    pub fn container(&mut self, name: impl Into<String>, direction: Direction, size: Size) -> TileId {
        self.insert(Tile::container(name, direction, size))
    }

    fn insert(&mut self, tile: Tile) -> TileId {
        let id = TileId::new(self.tiles.len());
        self.resolved.ensure(id, *tile.size());
        self.tiles.push(tile);
        id
    }

    /// Appends `child` to the children of `parent`.
    ///
    /// # Errors
    ///
    /// Fails when either id is unknown, `parent` is a leaf, `child` is the root
    /// or already has a parent, or the wiring would create a cycle.
    pub fn add(&mut self, parent: TileId, child: TileId) -> TesselResult<()> {
        let parent_tile = self.tile(parent)?;
        let child_tile = self.tile(child)?;

        if child.is_root() {
            return Err(TesselError::RootCannotBeChild);
        }
        if let Some(current) = child_tile.parent() {
            return Err(TesselError::AlreadyParented {
                child: child_tile.name().to_string(),
                parent: self.tiles[current.index()].name().to_string(),
            });
        }
        if !parent_tile.is_container() {
            return Err(TesselError::NotAContainer(parent_tile.name().to_string()));
        }

        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(TesselError::CycleDetected {
                    parent: parent_tile.name().to_string(),
                    child: child_tile.name().to_string(),
                });
            }
            cursor = self.tiles[id.index()].parent();
        }

        if parent_tile
            .children()
            .iter()
            .any(|&sibling| self.tiles[sibling.index()].name() == child_tile.name())
        {
            warn!(
                parent = parent_tile.name(),
                child = child_tile.name(),
                "duplicate sibling name"
            );
        }
        warn_on_conflicts(child_tile.name(), child_tile.size());

        let size = *child_tile.size();
        self.tiles[child.index()].set_parent(parent);
        if let TileKind::Container(container) = self.tiles[parent.index()].kind_mut() {
            container.push_child(child, &size);
        }
        Ok(())
    }

    /// Allocates a leaf and adds it to `parent`.
    ///
    /// # Errors
    ///
    /// See [`TileTree::add`].
    pub fn add_leaf(&mut self, parent: TileId, name: impl Into<String>, size: Size) -> TesselResult<TileId> {
        let id = self.leaf(name, size);
        self.add(parent, id)?;
        Ok(id)
    }

    /// Allocates a container and adds it to `parent`.
    ///
    /// # Errors
    ///
    /// See [`TileTree::add`].
    pub fn add_container(
        &mut self,
        parent: TileId,
        name: impl Into<String>,
        direction: Direction,
        size: Size,
    ) -> TesselResult<TileId> {
        let id = self.container(name, direction, size);
        self.add(parent, id)?;
        Ok(id)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&Tile> { self.tiles.get(id.index()) }

    fn tile(&self, id: TileId) -> TesselResult<&Tile> {
        self.get(id).ok_or(TesselError::UnknownTile(id.index()))
    }

    #[must_use]
    pub fn root(&self) -> &Tile { &self.tiles[TileId::ROOT.index()] }

    #[must_use]
    pub fn name(&self, id: TileId) -> Option<&str> { self.get(id).map(Tile::name) }

    /// Declared constraints of a tile.
    #[must_use]
    pub fn size(&self, id: TileId) -> Option<Size> { self.get(id).map(|tile| *tile.size()) }

    /// Replaces the declared constraints of a tile.
    ///
    /// The parent's fixed totals are re-derived. Resolved sizes only change on
    /// the next pass.
    ///
    /// # Errors
    ///
    /// Fails when `id` is unknown.
    pub fn set_size(&mut self, id: TileId, size: Size) -> TesselResult<()> {
        let parent = self.tile(id)?.parent();
        warn_on_conflicts(self.tiles[id.index()].name(), &size);
        self.tiles[id.index()].set_size(size);

        if let Some(parent) = parent {
            let sizes: Vec<Size> = self.tiles[parent.index()]
                .children()
                .iter()
                .map(|&child| *self.tiles[child.index()].size())
                .collect();
            if let TileKind::Container(container) = self.tiles[parent.index()].kind_mut() {
                container.refresh_totals(&sizes);
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn parent(&self, id: TileId) -> Option<TileId> { self.get(id).and_then(Tile::parent) }

    /// Children in insertion order, empty for leaves and unknown ids.
    #[must_use]
    pub fn children(&self, id: TileId) -> &[TileId] {
        self.get(id).map(Tile::children).unwrap_or_default()
    }

    /// First tile named `name` in pre-order, starting at the root.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<TileId> {
        self.walk().map(|(id, _)| id).find(|&id| self.tiles[id.index()].name() == name)
    }

    /// Resolved size of a tile after the last successful pass.
    #[must_use]
    pub fn resolved(&self, id: TileId) -> Option<Size> {
        self.get(id).map(|_| self.resolved.get(id))
    }

    #[must_use]
    pub const fn resolved_table(&self) -> &SizeTable { &self.resolved }

    /// Content of a leaf, if it has any.
    #[must_use]
    pub fn content(&self, id: TileId) -> Option<&dyn TileContent> {
        self.get(id).and_then(Tile::as_leaf).and_then(Leaf::content)
    }

    pub fn content_mut(&mut self, id: TileId) -> Option<&mut (dyn TileContent + 'static)> {
        match self.tiles.get_mut(id.index()).map(Tile::kind_mut) {
            Some(TileKind::Leaf(leaf)) => leaf.content_mut(),
            _ => None,
        }
    }

    /// Pre-order traversal from the root, yielding `(id, depth)`.
    #[must_use]
    pub fn walk(&self) -> PreOrder<'_> { self.walk_from(TileId::ROOT) }

    /// Pre-order traversal of the subtree at `start`.
    #[must_use]
    pub fn walk_from(&self, start: TileId) -> PreOrder<'_> {
        let stack = if self.get(start).is_some() { vec![(start, 0)] } else { Vec::new() };
        PreOrder { tree: self, stack }
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Resizes the viewport and lays out the whole tree.
    ///
    /// # Errors
    ///
    /// See [`TileTree::dispatch`].
    pub fn resize(&mut self, width: u32, height: u32) -> TesselResult<Vec<LayoutNotice>> {
        self.dispatch(LayoutEvent::resize(width, height))
    }

    /// Delivers `event` to the root and propagates it down the tree.
    ///
    /// The root takes the viewport size with weight 1. Each container then lays
    /// out its children from the size its own parent just assigned, in
    /// pre-order. Notices are returned in the same order and offered to every
    /// leaf content.
    ///
    /// # Errors
    ///
    /// Returns [`TesselError::NonConvergence`] when any container fails to
    /// settle. The previous resolved sizes are kept and no notices are sent.
    pub fn dispatch(&mut self, event: LayoutEvent) -> TesselResult<Vec<LayoutNotice>> {
        let LayoutEvent::Resize { width, height } = event;

        let mut table = SizeTable::seeded(self.tiles.iter().map(|tile| *tile.size()));
        let mut root = table.get(TileId::ROOT);
        root.width = width;
        root.height = height;
        root.weight = ROOT_WEIGHT;
        table.set(TileId::ROOT, root);

        let mut order = Vec::with_capacity(self.tiles.len());
        let mut samples = Vec::new();
        let mut stack = vec![TileId::ROOT];

        while let Some(id) = stack.pop() {
            let tile = &self.tiles[id.index()];
            order.push(id);

            if let TileKind::Container(container) = tile.kind() {
                let start = Instant::now();
                let summary =
                    engine::layout_container(tile.name(), id, container, &mut table, &self.options)?;
                samples.push((id, start.elapsed()));
                debug!(
                    layout = tile.name(),
                    rounds = summary.rounds,
                    unassigned = summary.unassigned,
                    "layout pass complete"
                );
                stack.extend(container.children().iter().rev().copied());
            }
        }

        for (id, elapsed) in samples {
            if let TileKind::Container(container) = self.tiles[id.index()].kind_mut() {
                container.metrics_mut().record(elapsed);
            }
        }
        self.resolved = table;

        let mut notices = Vec::with_capacity(order.len());
        for &id in &order {
            let size = self.resolved.get(id);
            let tile = &mut self.tiles[id.index()];
            let name = tile.name().to_string();
            match tile.kind_mut() {
                TileKind::Container(container) => {
                    notices.push(LayoutNotice::LayoutUpdated {
                        name,
                        metrics: *container.metrics(),
                    });
                }
                TileKind::Leaf(leaf) => {
                    if let Some(content) = leaf.content_mut() {
                        content.on_resize(size.width, size.height);
                    }
                    notices.push(LayoutNotice::TileUpdated { name, size });
                }
            }
        }

        for &id in &order {
            if let Some(content) = self.content_mut(id) {
                for notice in &notices {
                    content.on_notice(notice);
                }
            }
        }

        Ok(notices)
    }
}

fn warn_on_conflicts(name: &str, size: &Size) {
    for (axis, label) in [(Axis::Horizontal, "width"), (Axis::Vertical, "height")] {
        if size.has_conflict(axis) {
            warn!(
                tile = name,
                axis = label,
                min = size.min(axis),
                max = size.max(axis),
                "min is greater than max, max takes precedence when exceeded"
            );
        }
    }
}

// ============================================================================
// Traversal
// ============================================================================

/// Depth-first pre-order iterator over a [`TileTree`].
pub struct PreOrder<'a> {
    tree: &'a TileTree,
    stack: Vec<(TileId, usize)>,
}

impl Iterator for PreOrder<'_> {
    type Item = (TileId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().map(|&child| (child, depth + 1)));
        Some((id, depth))
    }
}
