//! Content injected into leaf tiles.
//!
//! The sizing core never looks at content. After a pass commits, the tree
//! hands each leaf's content its resolved size and then every notice the
//! pass produced. Renderers ask the content to draw itself into the inner
//! area of the leaf.

use std::collections::BTreeMap;
use std::fmt::Write;

use super::event::LayoutNotice;

/// Capability implemented by leaf payloads.
pub trait TileContent {
    /// Short identifier used in debug output.
    fn kind(&self) -> &'static str;

    /// Called with the leaf's resolved size after a successful pass.
    fn on_resize(&mut self, _width: u32, _height: u32) {}

    /// Called once per notice emitted by a successful pass.
    fn on_notice(&mut self, _notice: &LayoutNotice) {}

    /// Renders at most `height` lines of at most `width` characters.
    fn draw(&self, width: u32, height: u32) -> Vec<String>;
}

/// Word-wraps `text` to `width` characters and keeps the first `height` lines.
///
/// Words longer than `width` are split. Explicit newlines start a new line.
#[must_use]
pub fn wrap_text(text: &str, width: u32, height: u32) -> Vec<String> {
    let width = width as usize;
    let height = height as usize;
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in paragraph.split_whitespace() {
            let mut rest: Vec<char> = word.chars().collect();
            loop {
                let gap = usize::from(current_len > 0);
                if current_len + gap + rest.len() <= width {
                    if gap == 1 {
                        current.push(' ');
                    }
                    current_len += gap + rest.len();
                    current.extend(rest.drain(..));
                    break;
                }
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                } else {
                    lines.push(rest.drain(..width).collect());
                }
            }
        }
        lines.push(current);
    }

    lines.truncate(height);
    lines
}

// ============================================================================
// Text
// ============================================================================

/// Static text, wrapped to the leaf's width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextContent {
    text: String,
}

impl TextContent {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self { Self { text: text.into() } }

    #[must_use]
    pub fn text(&self) -> &str { &self.text }
}

impl TileContent for TextContent {
    fn kind(&self) -> &'static str { "text" }

    fn draw(&self, width: u32, height: u32) -> Vec<String> { wrap_text(&self.text, width, height) }
}

// ============================================================================
// Metrics Log
// ============================================================================

/// Collects the latest metrics report of every container in the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsLog {
    reports: BTreeMap<String, String>,
}

impl MetricsLog {
    #[must_use]
    pub const fn new() -> Self { Self { reports: BTreeMap::new() } }

    /// Latest report per container, sorted by container name.
    #[must_use]
    pub const fn reports(&self) -> &BTreeMap<String, String> { &self.reports }

    /// The whole log as a single line.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut line = String::from("Layout times:");
        for (name, report) in &self.reports {
            let _ = write!(line, " {name}[{report}]");
        }
        line
    }
}

impl TileContent for MetricsLog {
    fn kind(&self) -> &'static str { "metrics" }

    fn on_notice(&mut self, notice: &LayoutNotice) {
        if let Some(report) = notice.report() {
            self.reports.insert(notice.name().to_string(), report);
        }
    }

    fn draw(&self, width: u32, height: u32) -> Vec<String> {
        wrap_text(&self.summary(), width, height)
    }
}
