//! Layout CLI commands.
//!
//! Resolve a preset or configured layout at a viewport and show the result as
//! a table, a drawn frame, a tree outline or a resize simulation.

use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::types::{LayoutArgs, Viewport};
use crate::cli::output;
use crate::config::{self, TesselConfig};
use crate::constants::viewport::MAX_SIMULATION_STEPS;
use crate::error::TesselError;
use crate::layout::overview::{self, TileRow};
use crate::layout::{LayoutNotice, TileKind, TileTree, render};

/// Arguments of `tessel layout`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
#[command(after_long_help = r#"Examples:
  tessel layout                          # Minimal preset at 80x24
  tessel layout -l constraints -W 200 -H 50
  tessel layout -l overview --json       # Output as JSON
  tessel layout --detailed               # Include constraint columns"#)]
pub struct LayoutCommand {
    #[command(flatten)]
    pub target: LayoutArgs,

    /// Output in JSON format instead of table format.
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Show declared constraints next to the resolved sizes.
    #[arg(long, short = 'd')]
    pub detailed: bool,
}

/// Arguments of `tessel simulate`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
#[command(after_long_help = r#"Examples:
  tessel simulate --from 40x12 --to 160x48
  tessel simulate -l overview --from 200x60 --to 80x24 --steps 20 --json"#)]
pub struct SimulateCommand {
    /// Layout to use: a built-in preset or a layout from the configuration file.
    #[arg(long, short, default_value = "minimal", value_name = "NAME")]
    pub layout: String,

    /// First viewport, as WIDTHxHEIGHT.
    #[arg(long, value_name = "WxH")]
    pub from: Viewport,

    /// Last viewport, as WIDTHxHEIGHT.
    #[arg(long, value_name = "WxH")]
    pub to: Viewport,

    /// Number of intervals between the two viewports (at most 10000).
    #[arg(
        long,
        short,
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_SIMULATION_STEPS))
    )]
    pub steps: u32,

    /// Output every notice in JSON format.
    #[arg(long, short = 'j')]
    pub json: bool,
}

// ============================================================================
// Shared
// ============================================================================

/// Builds the named layout and resolves it at the requested viewport.
fn resolve(config: &TesselConfig, args: &LayoutArgs) -> Result<(TileTree, Viewport), TesselError> {
    let viewport = args.viewport(&config.engine);
    let mut tree = config.build_layout(&args.layout)?;
    tree.resize(viewport.width, viewport.height)?;
    Ok((tree, viewport))
}

fn indented(row: &TileRow) -> String { format!("{}{}", "  ".repeat(row.depth), row.name) }

fn pair(first: u32, second: u32) -> String {
    if first == 0 && second == 0 {
        "-".to_string()
    } else {
        format!("{first}x{second}")
    }
}

// ============================================================================
// tessel layout
// ============================================================================

#[derive(Tabled)]
struct LayoutRow {
    #[tabled(rename = "Tile")]
    tile: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Direction")]
    direction: String,
    #[tabled(rename = "Width")]
    width: u32,
    #[tabled(rename = "Height")]
    height: u32,
}

#[derive(Tabled)]
struct DetailedLayoutRow {
    #[tabled(rename = "Tile")]
    tile: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Direction")]
    direction: String,
    #[tabled(rename = "Width")]
    width: u32,
    #[tabled(rename = "Height")]
    height: u32,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Max")]
    max: String,
    #[tabled(rename = "Fixed")]
    fixed: String,
}

impl From<&TileRow> for LayoutRow {
    fn from(row: &TileRow) -> Self {
        Self {
            tile: indented(row),
            kind: row.kind,
            direction: row.direction.clone().unwrap_or_default(),
            width: row.size.width,
            height: row.size.height,
        }
    }
}

impl DetailedLayoutRow {
    fn new(row: &TileRow, declared: &crate::layout::Size) -> Self {
        Self {
            tile: indented(row),
            kind: row.kind,
            direction: row.direction.clone().unwrap_or_default(),
            width: row.size.width,
            height: row.size.height,
            weight: format!("{:.2}", declared.weight),
            min: pair(declared.min_width, declared.min_height),
            max: pair(declared.max_width, declared.max_height),
            fixed: pair(declared.fixed_width, declared.fixed_height),
        }
    }
}

/// Execute `tessel layout`.
///
/// # Errors
///
/// Returns an error if the layout is unknown, cannot be built, or fails to
/// converge.
pub fn execute_layout(cmd: &LayoutCommand) -> Result<(), TesselError> {
    let config = config::get_config();
    let (tree, viewport) = resolve(config, &cmd.target)?;
    let rows = overview::rows(&tree);

    if cmd.json {
        output::print_highlighted_json(&serde_json::to_value(&rows)?);
        return Ok(());
    }

    let table = if cmd.detailed {
        let detailed: Vec<DetailedLayoutRow> = rows
            .iter()
            .map(|row| DetailedLayoutRow::new(row, &tree.size(row.id).unwrap_or_default()))
            .collect();
        Table::new(detailed)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(3..6)).with(Alignment::right()))
            .to_string()
    } else {
        Table::new(rows.iter().map(LayoutRow::from))
            .with(Style::rounded())
            .with(Modify::new(Columns::new(3..5)).with(Alignment::right()))
            .to_string()
    };

    output::print_heading(&format!("Layout '{}' at {viewport}", cmd.target.layout), rows.len());
    println!("{table}");
    Ok(())
}

// ============================================================================
// tessel render / tree
// ============================================================================

/// Execute `tessel render`.
///
/// # Errors
///
/// Returns an error if the layout cannot be resolved.
pub fn execute_render(args: &LayoutArgs) -> Result<(), TesselError> {
    let (tree, _) = resolve(config::get_config(), args)?;
    println!("{}", render::render(&tree));
    Ok(())
}

/// Execute `tessel tree`.
///
/// # Errors
///
/// Returns an error if the layout cannot be resolved.
pub fn execute_tree(args: &LayoutArgs) -> Result<(), TesselError> {
    let (tree, viewport) = resolve(config::get_config(), args)?;

    println!("{}", format!("Layout '{}' at {viewport}", args.layout).bold());
    print!("{}", overview::outline(&tree));
    println!();
    println!("{}", "Container sizes".bold());
    print!("{}", overview::size_listing(&tree));
    Ok(())
}

// ============================================================================
// tessel simulate
// ============================================================================

/// One resize of a simulation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationStep {
    pub viewport: Viewport,
    pub notices: Vec<LayoutNotice>,
}

/// Dispatches one resize per viewport, stopping at the first failure.
///
/// # Errors
///
/// Returns the error of the first pass that fails.
pub fn simulate(tree: &mut TileTree, viewports: &[Viewport]) -> Result<Vec<SimulationStep>, TesselError> {
    viewports
        .iter()
        .map(|&viewport| {
            let notices = tree.resize(viewport.width, viewport.height)?;
            Ok(SimulationStep { viewport, notices })
        })
        .collect()
}

/// Metrics report of every container reachable from the root, in pre-order.
#[must_use]
pub fn metrics_reports(tree: &TileTree) -> Vec<String> {
    tree.walk()
        .filter_map(|(id, _)| {
            let tile = tree.get(id)?;
            match tile.kind() {
                TileKind::Container(container) => Some(container.metrics().report(tile.name())),
                TileKind::Leaf(_) => None,
            }
        })
        .collect()
}

/// Execute `tessel simulate`.
///
/// # Errors
///
/// Returns an error if the layout is unknown or any resize fails.
pub fn execute_simulate(cmd: &SimulateCommand) -> Result<(), TesselError> {
    let config = config::get_config();
    let mut tree = config.build_layout(&cmd.layout)?;
    let viewports = Viewport::interpolate(cmd.from, cmd.to, cmd.steps);
    let steps = simulate(&mut tree, &viewports)?;

    if cmd.json {
        output::print_highlighted_json(&serde_json::to_value(&steps)?);
        return Ok(());
    }

    output::print_heading(&format!("Simulated '{}' from {} to {}", cmd.layout, cmd.from, cmd.to), steps.len());
    for (index, step) in steps.iter().enumerate() {
        let layouts = step
            .notices
            .iter()
            .filter(|notice| matches!(notice, LayoutNotice::LayoutUpdated { .. }))
            .count();
        println!("  {:>3}. {} {}", index + 1, step.viewport, format!("({layouts} layouts)").dimmed());
    }

    println!();
    println!("{}", "Layout times".bold());
    for report in metrics_reports(&tree) {
        println!("  {report}");
    }
    Ok(())
}

// ============================================================================
// tessel presets
// ============================================================================

#[derive(Tabled)]
struct PresetRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Tiles")]
    tiles: usize,
}

/// Execute `tessel presets`.
///
/// # Errors
///
/// Returns an error if a listed layout cannot be looked up.
pub fn execute_presets(json: bool) -> Result<(), TesselError> {
    let config = config::get_config();
    let names = config.layout_names();

    if json {
        let entries = names
            .iter()
            .map(|(name, source)| serde_json::json!({ "name": name, "source": source }))
            .collect::<Vec<_>>();
        output::print_highlighted_json(&serde_json::Value::Array(entries));
        return Ok(());
    }

    let mut rows = Vec::with_capacity(names.len());
    for (name, source) in &names {
        rows.push(PresetRow {
            name: name.clone(),
            source: source.to_string(),
            tiles: config.layout(name)?.count(),
        });
    }

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::last()).with(Alignment::right()))
        .to_string();
    output::print_heading("Layouts", names.len());
    println!("{table}");
    Ok(())
}
