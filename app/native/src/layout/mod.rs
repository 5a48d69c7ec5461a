//! Constraint-based box partitioning.
//!
//! A [`TileTree`] holds named tiles. Containers partition their main axis
//! among ordered children according to each child's [`Size`] constraints:
//! weight, min, max and fixed values per axis. Resizing the root lays out the
//! whole tree top-down, each container working only from the size its parent
//! assigned it.
//!
//! # Example
//!
//! ```
//! use tessel_lib::layout::{Direction, Size, TileId, TileTree};
//!
//! let mut tree = TileTree::new(Direction::Row);
//! let sidebar = tree.add_leaf(TileId::ROOT, "Sidebar", Size::new().with_fixed_width(30)).unwrap();
//! let body = tree.add_leaf(TileId::ROOT, "Body", Size::weighted(1.0)).unwrap();
//! tree.resize(100, 40).unwrap();
//!
//! assert_eq!(tree.resolved(sidebar).unwrap().width, 30);
//! assert_eq!(tree.resolved(body).unwrap().width, 70);
//! ```

pub mod content;
pub mod engine;
pub mod event;
pub mod metrics;
pub mod overview;
pub mod render;
pub mod resolve;
pub mod size;
pub mod tile;
pub mod tree;

pub use content::{MetricsLog, TextContent, TileContent};
pub use engine::{EngineOptions, PassSummary};
pub use event::{LayoutEvent, LayoutNotice};
pub use metrics::LayoutMetrics;
pub use render::{Canvas, Placement};
pub use size::{Axis, Direction, Size, SizeTable};
pub use tile::{Container, Leaf, Tile, TileId, TileKind};
pub use tree::TileTree;
