//! The sizing pass of a single container.
//!
//! A pass runs in two phases over the container's children, in order:
//!
//! 1. **Initial allocation**: each child's extents are resolved against the
//!    container. The main extent is clamped to what earlier siblings left over,
//!    so sibling order decides who starves under space pressure.
//! 2. **Redistribution**: main-axis space left over by rounding or clamping is
//!    shared among growable children in proportion to their weights, round
//!    after round, until nothing is left, nobody can grow, or the round cap is
//!    exceeded.
//!
//! The pass reads the container's own size and the children's constraints from
//! a [`SizeTable`] and writes the children's resolved extents back into it.

use smallvec::SmallVec;

use super::resolve::{resolve_extent, weighted_extent};
use super::size::{Axis, SizeTable};
use super::tile::{Container, TileId};
use crate::constants::engine::MAX_REDISTRIBUTION_ROUNDS;
use crate::constants::tree::CHILDREN_INLINE_CAP;
use crate::error::{TesselError, TesselResult};

// ============================================================================
// Options
// ============================================================================

/// Tuning knobs for the sizing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Maximum number of redistribution rounds before the pass fails.
    pub max_rounds: u32,
}

impl EngineOptions {
    #[must_use]
    pub const fn new(max_rounds: u32) -> Self { Self { max_rounds } }
}

impl Default for EngineOptions {
    fn default() -> Self { Self::new(MAX_REDISTRIBUTION_ROUNDS) }
}

/// What a successful pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Redistribution rounds that handed out space.
    pub rounds: u32,
    /// Main-axis space nobody could take (zero or negative when fully used).
    pub unassigned: i64,
}

// ============================================================================
// Pass
// ============================================================================

/// Lays out the children of `container`, whose own size is `table[id]`.
///
/// # Errors
///
/// Returns [`TesselError::NonConvergence`] when redistribution needs more than
/// `options.max_rounds` rounds. The table is left partially written; callers
/// must discard it.
pub fn layout_container(
    name: &str,
    id: TileId,
    container: &Container,
    table: &mut SizeTable,
    options: &EngineOptions,
) -> TesselResult<PassSummary> {
    let children = container.children();
    if children.is_empty() {
        return Ok(PassSummary::default());
    }

    let own = table.get(id);
    let main_axis = container.direction().main_axis();
    let cross_axis = main_axis.cross();
    let main_size = own.extent(main_axis);

    // ------------------------------------------------------------------------
    // Initial allocation
    // ------------------------------------------------------------------------

    let mut used: u32 = 0;
    let mut pending_cross: SmallVec<[u32; CHILDREN_INLINE_CAP]> = SmallVec::new();

    for &child in children {
        let mut size = table.get(child);
        let cross = resolve_extent(&size, cross_axis, container, &own);
        let main = resolve_extent(&size, main_axis, container, &own)
            .min(main_size.saturating_sub(used));

        if main > 0 {
            size.set_extent(main_axis, main);
            size.set_extent(cross_axis, cross);
            table.set(child, size);
        }
        used = used.saturating_add(main);
        pending_cross.push(cross);
    }

    // ------------------------------------------------------------------------
    // Redistribution
    // ------------------------------------------------------------------------

    let mut rounds: u32 = 0;
    loop {
        let leftover = unassigned_space(main_size, children, table, main_axis);
        if leftover <= 0 {
            return Ok(PassSummary {
                rounds,
                unassigned: leftover,
            });
        }

        let growable_weight: f64 = children
            .iter()
            .map(|&child| table.get(child))
            .filter(|size| size.can_grow(main_axis))
            .map(|size| size.effective_weight())
            .sum();
        if growable_weight <= 0.0 {
            tracing::trace!(
                layout = name,
                leftover,
                "no growable children, leaving space unassigned"
            );
            return Ok(PassSummary {
                rounds,
                unassigned: leftover,
            });
        }

        rounds += 1;
        if rounds > options.max_rounds {
            tracing::error!(
                layout = name,
                rounds = options.max_rounds,
                leftover,
                "leftover redistribution did not converge"
            );
            return Err(TesselError::non_convergence(name, options.max_rounds, leftover));
        }

        let resized = distribute_round(
            children,
            table,
            main_axis,
            &pending_cross,
            u32::try_from(leftover).unwrap_or(u32::MAX),
            growable_weight,
        );
        tracing::trace!(layout = name, round = rounds, leftover, resized, "redistribution round");

        if !resized {
            return Ok(PassSummary {
                rounds,
                unassigned: leftover,
            });
        }
    }
}

/// Main-axis space not yet assigned to any child.
fn unassigned_space(main_size: u32, children: &[TileId], table: &SizeTable, axis: Axis) -> i64 {
    let used: i64 = children.iter().map(|&child| i64::from(table.get(child).extent(axis))).sum();
    i64::from(main_size) - used
}

/// Hands out up to `leftover` cells to growable children, in order.
///
/// Every growable child gets at least one cell while space remains, never
/// more than its max, and never more than what is still unassigned.
fn distribute_round(
    children: &[TileId],
    table: &mut SizeTable,
    axis: Axis,
    pending_cross: &[u32],
    leftover: u32,
    growable_weight: f64,
) -> bool {
    let mut remaining = leftover;
    let mut resized = false;

    for (index, &child) in children.iter().enumerate() {
        if remaining == 0 {
            break;
        }
        let mut size = table.get(child);
        if !size.can_grow(axis) {
            continue;
        }

        let current = size.extent(axis);
        let share = weighted_extent(remaining, size.effective_weight() / growable_weight);
        let mut to_add = share.max(1).min(remaining);
        let max = size.max(axis);
        if max > 0 {
            to_add = to_add.min(max.saturating_sub(current));
        }
        if to_add == 0 {
            continue;
        }

        // A child starved during the initial pass receives its cross extent now
        if current == 0 {
            let cross = pending_cross.get(index).copied().unwrap_or_default();
            size.set_extent(axis.cross(), cross);
        }
        size.set_extent(axis, current + to_add);
        table.set(child, size);
        remaining -= to_add;
        resized = true;
    }

    resized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::size::{Direction, Size};

    /// Builds a container at id 0 with `children` at ids 1.. and a seeded table.
    fn setup(direction: Direction, width: u32, height: u32, children: &[Size]) -> (Container, SizeTable) {
        let mut container = Container::new(direction);
        let mut declared = vec![Size::weighted(1.0)];
        for (index, size) in children.iter().enumerate() {
            container.push_child(TileId::new(index + 1), size);
            declared.push(*size);
        }
        let mut table = SizeTable::seeded(declared);
        let mut own = table.get(TileId::ROOT);
        own.width = width;
        own.height = height;
        table.set(TileId::ROOT, own);
        (container, table)
    }

    fn run(container: &Container, table: &mut SizeTable) -> TesselResult<PassSummary> {
        layout_container("Test", TileId::ROOT, container, table, &EngineOptions::default())
    }

    fn width(table: &SizeTable, index: usize) -> u32 { table.get(TileId::new(index)).width }

    fn height(table: &SizeTable, index: usize) -> u32 { table.get(TileId::new(index)).height }

    // ========================================================================
    // Initial allocation
    // ========================================================================

    #[test]
    fn test_equal_weights_split_evenly() {
        let (container, mut table) =
            setup(Direction::Row, 100, 10, &[Size::weighted(0.5), Size::weighted(0.5)]);
        let summary = run(&container, &mut table).unwrap();

        assert_eq!(width(&table, 1), 50);
        assert_eq!(width(&table, 2), 50);
        assert_eq!(height(&table, 1), 10);
        assert_eq!(summary.rounds, 0);
        assert_eq!(summary.unassigned, 0);
    }

    #[test]
    fn test_fixed_child_and_weighted_child() {
        let (container, mut table) = setup(
            Direction::Row,
            100,
            10,
            &[Size::new().with_fixed_width(30), Size::weighted(1.0)],
        );
        run(&container, &mut table).unwrap();

        assert_eq!(width(&table, 1), 30);
        assert_eq!(width(&table, 2), 70);
    }

    #[test]
    fn test_column_partitions_height() {
        let (container, mut table) = setup(
            Direction::Column,
            80,
            24,
            &[Size::weighted(1.0), Size::new().with_fixed_height(1)],
        );
        run(&container, &mut table).unwrap();

        assert_eq!(height(&table, 1), 23);
        assert_eq!(height(&table, 2), 1);
        assert_eq!(width(&table, 1), 80);
        assert_eq!(width(&table, 2), 80);
    }

    #[test]
    fn test_earlier_siblings_starve_later_ones() {
        let (container, mut table) =
            setup(Direction::Row, 100, 10, &[Size::weighted(0.8), Size::weighted(0.8)]);
        run(&container, &mut table).unwrap();

        assert_eq!(width(&table, 1), 80);
        assert_eq!(width(&table, 2), 20);
    }

    #[test]
    fn test_starved_child_stays_zero() {
        let (container, mut table) = setup(
            Direction::Row,
            100,
            10,
            &[Size::weighted(1.0), Size::new().with_fixed_width(10)],
        );
        run(&container, &mut table).unwrap();

        // Weighted child takes 90 (100 - 10 fixed total), fixed gets its 10
        assert_eq!(width(&table, 1), 90);
        assert_eq!(width(&table, 2), 10);

        let (container, mut table) = setup(
            Direction::Row,
            100,
            10,
            &[Size::weighted(1.0).with_min_width(100), Size::new().with_fixed_width(10)],
        );
        run(&container, &mut table).unwrap();
        assert_eq!(width(&table, 1), 100);
        assert_eq!(width(&table, 2), 0);
        assert_eq!(height(&table, 2), 0);
    }

    #[test]
    fn test_min_overflow_is_clamped_to_remaining() {
        let (container, mut table) = setup(
            Direction::Row,
            50,
            10,
            &[Size::weighted(0.1).with_min_width(40), Size::weighted(0.1).with_min_width(40)],
        );
        let summary = run(&container, &mut table).unwrap();

        assert_eq!(width(&table, 1), 40);
        assert_eq!(width(&table, 2), 10);
        assert_eq!(summary.unassigned, 0);
    }

    #[test]
    fn test_empty_container_is_noop() {
        let (container, mut table) = setup(Direction::Row, 100, 10, &[]);
        let before = table.clone();
        let summary = run(&container, &mut table).unwrap();
        assert_eq!(summary, PassSummary::default());
        assert_eq!(table, before);
    }

    // ========================================================================
    // Redistribution
    // ========================================================================

    #[test]
    fn test_leftover_goes_to_unclamped_sibling() {
        let (container, mut table) = setup(
            Direction::Row,
            100,
            10,
            &[Size::weighted(0.5).with_max_width(20), Size::weighted(0.5)],
        );
        let summary = run(&container, &mut table).unwrap();

        assert_eq!(width(&table, 1), 20);
        assert_eq!(width(&table, 2), 80);
        assert_eq!(summary.rounds, 1);
    }

    #[test]
    fn test_rounding_leftover_is_distributed() {
        let (container, mut table) = setup(
            Direction::Row,
            97,
            10,
            &[Size::weighted(0.25), Size::weighted(0.25), Size::weighted(0.5)],
        );
        run(&container, &mut table).unwrap();

        assert_eq!(width(&table, 1), 25);
        assert_eq!(width(&table, 2), 24);
        assert_eq!(width(&table, 3), 48);
    }

    #[test]
    fn test_redistribution_respects_max_across_rounds() {
        let (container, mut table) = setup(
            Direction::Row,
            100,
            10,
            &[Size::weighted(0.4).with_max_width(45), Size::weighted(0.4)],
        );
        let summary = run(&container, &mut table).unwrap();

        assert_eq!(width(&table, 1), 45);
        assert_eq!(width(&table, 2), 55);
        assert_eq!(summary.rounds, 2);
    }

    #[test]
    fn test_no_growable_children_leaves_space() {
        let (container, mut table) = setup(
            Direction::Row,
            100,
            10,
            &[Size::weighted(0.5).with_max_width(20), Size::new().with_fixed_width(30)],
        );
        let summary = run(&container, &mut table).unwrap();

        assert_eq!(width(&table, 1), 20);
        assert_eq!(width(&table, 2), 30);
        assert_eq!(summary.unassigned, 50);
        assert_eq!(summary.rounds, 0);
    }

    #[test]
    fn test_zero_weight_children_are_not_grown() {
        let (container, mut table) =
            setup(Direction::Row, 100, 10, &[Size::new(), Size::weighted(-2.0)]);
        let summary = run(&container, &mut table).unwrap();

        assert_eq!(width(&table, 1), 0);
        assert_eq!(width(&table, 2), 0);
        assert_eq!(summary.unassigned, 100);
    }

    #[test]
    fn test_starved_child_gets_cross_extent_when_grown() {
        // floor(10 * 0.05) = 0, so the first child is only sized by redistribution
        let (container, mut table) =
            setup(Direction::Row, 10, 6, &[Size::weighted(0.05), Size::weighted(0.9)]);
        let summary = run(&container, &mut table).unwrap();

        assert_eq!(width(&table, 1), 1);
        assert_eq!(height(&table, 1), 6);
        assert_eq!(width(&table, 2), 9);
        assert_eq!(summary.rounds, 1);
    }

    // ========================================================================
    // Convergence
    // ========================================================================

    #[test]
    fn test_round_cap_reports_non_convergence() {
        let (container, mut table) = setup(
            Direction::Row,
            100,
            10,
            &[Size::weighted(0.4).with_max_width(45), Size::weighted(0.4)],
        );
        let err = layout_container(
            "Capped",
            TileId::ROOT,
            &container,
            &mut table,
            &EngineOptions::new(1),
        )
        .unwrap_err();

        assert_eq!(err, TesselError::non_convergence("Capped", 1, 8));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_default_options_use_cap() {
        assert_eq!(EngineOptions::default().max_rounds, MAX_REDISTRIBUTION_ROUNDS);
    }

    #[test]
    fn test_pass_is_idempotent_on_fresh_tables() {
        let children = [
            Size::weighted(0.3).with_min_width(12),
            Size::weighted(0.3).with_max_width(10),
            Size::weighted(0.4),
        ];
        let (container, mut first) = setup(Direction::Row, 73, 9, &children);
        let (_, mut second) = setup(Direction::Row, 73, 9, &children);
        run(&container, &mut first).unwrap();
        run(&container, &mut second).unwrap();
        assert_eq!(first, second);

        let total: u32 = (1..=3).map(|index| width(&first, index)).sum();
        assert!(total <= 73);
    }
}
