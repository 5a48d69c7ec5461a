//! Constraint resolution for a single axis.
//!
//! Resolution order, given the container's extent on the axis:
//!
//! 1. A fixed value wins: `min(extent, fixed)`.
//! 2. On the main axis the container's fixed total is subtracted from the
//!    extent to get the available space. The cross axis keeps the full extent.
//! 3. `computed = floor(available * weight)`.
//! 4. `computed` above a set max resolves to the max.
//! 5. `computed` below a set min resolves to the min.
//! 6. On the cross axis the tile fills the container, bounded by min or max.
//! 7. Otherwise `computed`.

use super::size::{Axis, Size};
use super::tile::Container;

/// Resolves the extent of `size` on `axis` inside `container`.
///
/// `container_size` holds the container's own resolved dimensions.
#[must_use]
pub fn resolve_extent(size: &Size, axis: Axis, container: &Container, container_size: &Size) -> u32 {
    let full = container_size.extent(axis);
    let fixed = size.fixed(axis);
    if fixed > 0 {
        return full.min(fixed);
    }

    let is_main = axis == container.direction().main_axis();
    let available = if is_main {
        full.saturating_sub(container.total_fixed(axis))
    } else {
        full
    };

    let computed = weighted_extent(available, size.effective_weight());
    let (min, max) = (size.min(axis), size.max(axis));

    if max > 0 && computed > max {
        max
    } else if min > 0 && computed < min {
        min
    } else if !is_main {
        if min > 0 {
            available.max(min)
        } else if max > 0 {
            available.min(max)
        } else {
            available
        }
    } else {
        computed
    }
}

/// `floor(available * weight)`, saturating at `u32::MAX`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn weighted_extent(available: u32, weight: f64) -> u32 {
    (f64::from(available) * weight).floor() as u32
}
