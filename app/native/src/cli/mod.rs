//! CLI module for Tessel.
//!
//! Resolves preset or configured layouts at a viewport and prints them as
//! tables, frames, outlines or resize simulations.

mod commands;
mod output;

use clap::Parser;
pub use commands::{Cli, Viewport};

use crate::error::TesselError;

/// Runs the CLI with an already parsed command line.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run(cli: &Cli) -> Result<(), TesselError> { cli.execute() }

/// Parses the process arguments.
#[must_use]
pub fn parse() -> Cli { Cli::parse() }
