//! Size constraints and resolved dimensions.
//!
//! A [`Size`] carries both what the user asked for (weight, min, max, fixed)
//! and what the engine resolved (width, height). Zero means "unset" for every
//! bound. A nonzero fixed value on an axis overrides weight, min and max on
//! that axis.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::tile::TileId;

// ============================================================================
// Axis & Direction
// ============================================================================

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The width axis.
    Horizontal,
    /// The height axis.
    Vertical,
}

impl Axis {
    /// Returns the perpendicular axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Layout direction of a container.
///
/// - `Row`: children side by side, the width is partitioned
/// - `Column`: children stacked, the height is partitioned
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Children placed left to right.
    #[default]
    Row,
    /// Children placed top to bottom.
    Column,
}

impl Direction {
    /// The axis partitioned among siblings.
    #[must_use]
    pub const fn main_axis(self) -> Axis {
        match self {
            Self::Row => Axis::Horizontal,
            Self::Column => Axis::Vertical,
        }
    }

    /// The axis each sibling fills independently.
    #[must_use]
    pub const fn cross_axis(self) -> Axis { self.main_axis().cross() }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Row => "Row",
            Self::Column => "Column",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Size
// ============================================================================

/// Sizing constraints plus the resolved dimensions of a tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Size {
    /// Resolved width. Written by the layout engine.
    #[serde(skip_deserializing)]
    pub width: u32,
    /// Resolved height. Written by the layout engine.
    #[serde(skip_deserializing)]
    pub height: u32,
    /// Proportional share of the container's main axis (0.0-1.0).
    pub weight: f64,
    /// Minimum width (0 = unset).
    pub min_width: u32,
    /// Minimum height (0 = unset).
    pub min_height: u32,
    /// Maximum width (0 = unset).
    pub max_width: u32,
    /// Maximum height (0 = unset).
    pub max_height: u32,
    /// Fixed width (0 = unset).
    pub fixed_width: u32,
    /// Fixed height (0 = unset).
    pub fixed_height: u32,
}

impl Size {
    /// Creates an unconstrained size with zero weight.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            weight: 0.0,
            min_width: 0,
            min_height: 0,
            max_width: 0,
            max_height: 0,
            fixed_width: 0,
            fixed_height: 0,
        }
    }

    /// Creates a size that takes `weight` of its container's main axis.
    #[must_use]
    pub const fn weighted(weight: f64) -> Self {
        let mut size = Self::new();
        size.weight = weight;
        size
    }

    /// Sets the weight.
    #[must_use]
    pub const fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the minimum width.
    #[must_use]
    pub const fn with_min_width(mut self, value: u32) -> Self {
        self.min_width = value;
        self
    }

    /// Sets the minimum height.
    #[must_use]
    pub const fn with_min_height(mut self, value: u32) -> Self {
        self.min_height = value;
        self
    }

    /// Sets the maximum width.
    #[must_use]
    pub const fn with_max_width(mut self, value: u32) -> Self {
        self.max_width = value;
        self
    }

    /// Sets the maximum height.
    #[must_use]
    pub const fn with_max_height(mut self, value: u32) -> Self {
        self.max_height = value;
        self
    }

    /// Sets the fixed width.
    #[must_use]
    pub const fn with_fixed_width(mut self, value: u32) -> Self {
        self.fixed_width = value;
        self
    }

    /// Sets the fixed height.
    #[must_use]
    pub const fn with_fixed_height(mut self, value: u32) -> Self {
        self.fixed_height = value;
        self
    }

    /// Resolved dimension on `axis`.
    #[must_use]
    pub const fn extent(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Overwrites the resolved dimension on `axis`.
    pub const fn set_extent(&mut self, axis: Axis, value: u32) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }

    /// Fixed bound on `axis` (0 = unset).
    #[must_use]
    pub const fn fixed(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.fixed_width,
            Axis::Vertical => self.fixed_height,
        }
    }

    /// Minimum bound on `axis` (0 = unset).
    #[must_use]
    pub const fn min(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.min_width,
            Axis::Vertical => self.min_height,
        }
    }

    /// Maximum bound on `axis` (0 = unset).
    #[must_use]
    pub const fn max(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.max_width,
            Axis::Vertical => self.max_height,
        }
    }

    /// Weight used by the engine.
    ///
    /// Negative, NaN and infinite weights count as zero.
    #[must_use]
    pub fn effective_weight(&self) -> f64 {
        if self.weight.is_finite() && self.weight > 0.0 {
            self.weight
        } else {
            0.0
        }
    }

    /// Whether the tile may receive leftover space on `axis`.
    ///
    /// A tile can grow when no fixed value is set and either no max is set,
    /// or its current extent is still below the max.
    #[must_use]
    pub const fn can_grow(&self, axis: Axis) -> bool {
        let max = self.max(axis);
        self.fixed(axis) == 0 && (max == 0 || self.extent(axis) < max)
    }

    /// Whether min and max on `axis` contradict each other.
    #[must_use]
    pub const fn has_conflict(&self, axis: Axis) -> bool {
        let (min, max) = (self.min(axis), self.max(axis));
        self.fixed(axis) == 0 && min > 0 && max > 0 && min > max
    }

    /// Copy of the constraints with the resolved dimensions cleared.
    #[must_use]
    pub const fn unresolved(mut self) -> Self {
        self.width = 0;
        self.height = 0;
        self
    }
}

// ============================================================================
// Size Table
// ============================================================================

/// Resolved sizes for every tile of a tree, indexed by [`TileId`].
///
/// A layout pass builds a fresh table instead of mutating tiles in place;
/// the tree swaps it in only after the whole pass succeeded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizeTable {
    sizes: Vec<Size>,
}

impl SizeTable {
    /// Builds a table from declared constraints with every extent cleared.
    pub fn seeded<I>(declared: I) -> Self
    where
        I: IntoIterator<Item = Size>,
    {
        Self {
            sizes: declared.into_iter().map(Size::unresolved).collect(),
        }
    }

    /// Size recorded for `id`, or an empty size for ids outside the table.
    #[must_use]
    pub fn get(&self, id: TileId) -> Size {
        self.sizes.get(id.index()).copied().unwrap_or_default()
    }

    /// Records a size for `id`. Ids outside the table are ignored.
    pub fn set(&mut self, id: TileId, size: Size) {
        if let Some(slot) = self.sizes.get_mut(id.index()) {
            *slot = size;
        }
    }

    /// Grows the table so that `id` has a slot.
    pub fn ensure(&mut self, id: TileId, declared: Size) {
        if id.index() >= self.sizes.len() {
            self.sizes.resize(id.index(), Size::new());
            self.sizes.push(declared.unresolved());
        }
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize { self.sizes.len() }

    /// Whether the table has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.sizes.is_empty() }

    /// Iterates over `(id, size)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TileId, Size)> + '_ {
        self.sizes.iter().enumerate().map(|(index, size)| (TileId::new(index), *size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Axis & Direction
    // ========================================================================

    #[test]
    fn test_direction_axes() {
        assert_eq!(Direction::Row.main_axis(), Axis::Horizontal);
        assert_eq!(Direction::Row.cross_axis(), Axis::Vertical);
        assert_eq!(Direction::Column.main_axis(), Axis::Vertical);
        assert_eq!(Direction::Column.cross_axis(), Axis::Horizontal);
    }

    #[test]
    fn test_direction_deserializes_lowercase() {
        let dir: Direction = serde_json::from_str("\"column\"").unwrap();
        assert_eq!(dir, Direction::Column);
        assert_eq!(Direction::Row.to_string(), "Row");
    }

    // ========================================================================
    // Size accessors
    // ========================================================================

    #[test]
    fn test_axis_accessors() {
        let mut size = Size::weighted(0.5)
            .with_min_width(3)
            .with_max_height(9)
            .with_fixed_height(4);
        size.set_extent(Axis::Horizontal, 12);

        assert_eq!(size.extent(Axis::Horizontal), 12);
        assert_eq!(size.extent(Axis::Vertical), 0);
        assert_eq!(size.min(Axis::Horizontal), 3);
        assert_eq!(size.max(Axis::Vertical), 9);
        assert_eq!(size.fixed(Axis::Vertical), 4);
        assert_eq!(size.fixed(Axis::Horizontal), 0);
    }

    #[test]
    fn test_effective_weight_sanitizes() {
        assert!((Size::weighted(0.4).effective_weight() - 0.4).abs() < f64::EPSILON);
        assert!(Size::weighted(-1.0).effective_weight().abs() < f64::EPSILON);
        assert!(Size::weighted(f64::NAN).effective_weight().abs() < f64::EPSILON);
        assert!(Size::weighted(f64::INFINITY).effective_weight().abs() < f64::EPSILON);
    }

    #[test]
    fn test_can_grow() {
        let mut size = Size::weighted(1.0).with_max_width(10);
        size.width = 9;
        assert!(size.can_grow(Axis::Horizontal));
        size.width = 10;
        assert!(!size.can_grow(Axis::Horizontal));

        let fixed = Size::new().with_fixed_width(5);
        assert!(!fixed.can_grow(Axis::Horizontal));
        assert!(fixed.can_grow(Axis::Vertical));
    }

    #[test]
    fn test_conflict_detection() {
        let size = Size::new().with_min_width(30).with_max_width(20);
        assert!(size.has_conflict(Axis::Horizontal));
        assert!(!size.has_conflict(Axis::Vertical));

        // A fixed value makes min/max irrelevant
        let fixed = size.with_fixed_width(10);
        assert!(!fixed.has_conflict(Axis::Horizontal));
    }

    #[test]
    fn test_size_deserializes_camel_case_and_ignores_extents() {
        let json = r#"{"weight": 0.3, "minHeight": 6, "maxWidth": 90, "width": 500}"#;
        let size: Size = serde_json::from_str(json).unwrap();
        assert!((size.weight - 0.3).abs() < f64::EPSILON);
        assert_eq!(size.min_height, 6);
        assert_eq!(size.max_width, 90);
        assert_eq!(size.width, 0);
    }

    // ========================================================================
    // Size Table
    // ========================================================================

    #[test]
    fn test_table_seeded_clears_extents() {
        let mut declared = Size::weighted(1.0);
        declared.width = 40;
        declared.height = 10;
        let table = SizeTable::seeded([declared, Size::new()]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(TileId::new(0)).width, 0);
        assert!((table.get(TileId::new(0)).weight - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_table_out_of_range() {
        let mut table = SizeTable::seeded([Size::new()]);
        table.set(TileId::new(5), Size::weighted(1.0));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(TileId::new(5)), Size::new());

        table.ensure(TileId::new(3), Size::weighted(0.5));
        assert_eq!(table.len(), 4);
        assert!((table.get(TileId::new(3)).weight - 0.5).abs() < f64::EPSILON);
    }
}
