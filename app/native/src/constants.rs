//! Constants for layout engine tuning and CLI defaults.
//!
//! # Organization
//!
//! Constants are grouped by functionality:
//! - `engine` - Sizing algorithm limits
//! - `tree` - Tree naming defaults
//! - `viewport` - Default viewport used when no dimensions are given
//! - `render` - Frame drawing characters

/// Sizing algorithm limits.
pub mod engine {
    /// Maximum number of leftover redistribution rounds per container pass.
    ///
    /// Realistic layouts converge in a handful of rounds. Needing more than
    /// this means the constraint set cannot settle and the pass is aborted.
    pub const MAX_REDISTRIBUTION_ROUNDS: u32 = 100;

    /// Weight forced onto the root container on every resize.
    pub const ROOT_WEIGHT: f64 = 1.0;
}

/// Tree naming defaults.
pub mod tree {
    /// Name given to the root container created by `TileTree::new`.
    pub const ROOT_NAME: &str = "Root";

    /// Inline capacity for a container's child list.
    pub const CHILDREN_INLINE_CAP: usize = 8;
}

/// Default viewport dimensions (a classic 80x24 terminal).
pub mod viewport {
    /// Default viewport width in cells.
    pub const DEFAULT_WIDTH: u32 = 80;

    /// Default viewport height in cells.
    pub const DEFAULT_HEIGHT: u32 = 24;

    /// Upper bound for `simulate --steps`; every step is a full layout pass.
    pub const MAX_SIMULATION_STEPS: u32 = 10_000;
}

/// Characters used when composing a frame.
pub mod render {
    pub const TOP_LEFT: char = '╭';
    pub const TOP_RIGHT: char = '╮';
    pub const BOTTOM_LEFT: char = '╰';
    pub const BOTTOM_RIGHT: char = '╯';
    pub const HORIZONTAL: char = '─';
    pub const VERTICAL: char = '│';
    pub const BLANK: char = ' ';
}
