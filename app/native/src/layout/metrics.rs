//! Per-container layout pass metrics.
//!
//! Purely observational: nothing in here feeds back into sizing.

use std::time::Duration;

use serde::Serialize;

/// Timing statistics for the layout passes of one container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutMetrics {
    /// Number of completed passes.
    pub render_count: u64,
    /// Duration of the most recent pass.
    pub last: Duration,
    /// Cumulative duration of all passes.
    pub total: Duration,
}

impl LayoutMetrics {
    /// Creates empty metrics.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            render_count: 0,
            last: Duration::ZERO,
            total: Duration::ZERO,
        }
    }

    /// Records one completed pass.
    pub fn record(&mut self, elapsed: Duration) {
        self.render_count = self.render_count.saturating_add(1);
        self.last = elapsed;
        self.total = self.total.saturating_add(elapsed);
    }

    /// Mean pass duration, zero before the first pass.
    #[must_use]
    pub fn average(&self) -> Duration {
        if self.render_count == 0 {
            return Duration::ZERO;
        }
        let nanos = self.total.as_nanos() / u128::from(self.render_count);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// One-line summary for the container named `name`.
    #[must_use]
    pub fn report(&self, name: &str) -> String {
        format!(
            "LayoutName: {name}; LayoutedCount: {}; LastLayoutDuration: {:?}; AverageDuration: {:?}; TotalTime: {:?}",
            self.render_count,
            self.last,
            self.average(),
            self.total,
        )
    }
}
