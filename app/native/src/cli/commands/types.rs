//! Shared types for CLI commands.

use std::str::FromStr;

use clap::Args;

use crate::config::EngineConfig;

/// A terminal viewport given as `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self { Self { width, height } }

    /// Evenly spaced viewports from `from` to `to`, both included.
    ///
    /// `steps` is the number of intervals; zero yields only `to`.
    #[must_use]
    pub fn interpolate(from: Self, to: Self, steps: u32) -> Vec<Self> {
        if steps == 0 {
            return vec![to];
        }
        (0..=steps)
            .map(|step| {
                Self::new(
                    lerp(from.width, to.width, step, steps),
                    lerp(from.height, to.height, step, steps),
                )
            })
            .collect()
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp(from: u32, to: u32, step: u32, steps: u32) -> u32 {
    let delta = i64::from(to) - i64::from(from);
    let value = i64::from(from) + delta * i64::from(step) / i64::from(steps);
    value.clamp(0, i64::from(u32::MAX)) as u32
}

impl FromStr for Viewport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid viewport '{s}'. Expected WIDTHxHEIGHT, e.g. 80x24.");
        let lower = s.to_ascii_lowercase();
        let (width, height) = lower.split_once('x').ok_or_else(invalid)?;
        let width = width.trim().parse::<u32>().map_err(|_| invalid())?;
        let height = height.trim().parse::<u32>().map_err(|_| invalid())?;
        Ok(Self::new(width, height))
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Layout selection and viewport arguments shared by the layout commands.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LayoutArgs {
    /// Layout to use: a built-in preset or a layout from the configuration file.
    #[arg(long, short, default_value = "minimal", value_name = "NAME")]
    pub layout: String,

    /// Viewport width. Defaults to `engine.defaultWidth` (80).
    #[arg(long, short = 'W', value_name = "COLUMNS")]
    pub width: Option<u32>,

    /// Viewport height. Defaults to `engine.defaultHeight` (24).
    #[arg(long, short = 'H', value_name = "ROWS")]
    pub height: Option<u32>,
}

impl LayoutArgs {
    /// The requested viewport, falling back to the configured defaults.
    #[must_use]
    pub fn viewport(&self, engine: &EngineConfig) -> Viewport {
        Viewport::new(
            self.width.unwrap_or(engine.default_width),
            self.height.unwrap_or(engine.default_height),
        )
    }
}
