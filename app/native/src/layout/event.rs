//! Events delivered to a tile tree and notices it emits in return.

use serde::Serialize;

use super::metrics::LayoutMetrics;
use super::size::Size;

/// Input delivered to the root of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LayoutEvent {
    /// The viewport changed to `width` x `height` cells.
    Resize { width: u32, height: u32 },
}

impl LayoutEvent {
    #[must_use]
    pub const fn resize(width: u32, height: u32) -> Self { Self::Resize { width, height } }
}

/// Output of a successful layout pass, in traversal order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LayoutNotice {
    /// A container finished laying out its children.
    LayoutUpdated {
        name: String,
        metrics: LayoutMetrics,
    },
    /// A leaf received its resolved size.
    TileUpdated { name: String, size: Size },
}

impl LayoutNotice {
    /// Name of the tile the notice is about.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::LayoutUpdated { name, .. } | Self::TileUpdated { name, .. } => name,
        }
    }

    /// Metrics report line for layout notices.
    #[must_use]
    pub fn report(&self) -> Option<String> {
        match self {
            Self::LayoutUpdated { name, metrics } => Some(metrics.report(name)),
            Self::TileUpdated { .. } => None,
        }
    }
}
