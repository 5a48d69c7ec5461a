//! Config CLI commands.
//!
//! Commands for managing the Tessel configuration file.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use colored::Colorize;

use crate::config::template::{create_config_file, generate_config_template};
use crate::config::{config_paths, custom_config_path};
use crate::error::TesselError;

/// Config management commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Initialize a new configuration file with all options documented.
    ///
    /// Creates a new configuration file at the default location with the
    /// engine options commented out and one example layout.
    #[command(
        name = "init",
        after_long_help = r#"Examples:
  tessel config init              # Create config at default location
  tessel config init --force      # Overwrite existing config
  tessel config init --path ~/my-layouts.jsonc  # Create at custom path
  tessel config init --stdout     # Print template to stdout"#
    )]
    Init {
        /// Overwrite existing configuration file if it exists.
        #[arg(long, short)]
        force: bool,

        /// Custom path for the configuration file.
        /// If not specified, uses the first search path (see `tessel config path`).
        #[arg(long, short, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Print the configuration template to stdout instead of writing to a file.
        #[arg(long)]
        stdout: bool,
    },

    /// Show the path to the configuration file.
    ///
    /// Lists the paths where Tessel looks for configuration files and marks
    /// the one in use, if any.
    Path,
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cmd: &ConfigCommands) -> Result<(), TesselError> {
    match cmd {
        ConfigCommands::Init { stdout: true, .. } => {
            println!("{}", generate_config_template());
            Ok(())
        }
        ConfigCommands::Init { force, path, .. } => {
            let target = path.clone().or_else(|| config_paths().into_iter().next());
            let target = target.unwrap_or_else(|| PathBuf::from("config.jsonc"));
            init_config(&target, *force)?;

            println!("Configuration file created at: {}", target.display());
            println!("\nEngine options are commented out and show their defaults.");
            println!("Try the example layout with: tessel render --layout editor");
            Ok(())
        }
        ConfigCommands::Path => {
            show_config_path();
            Ok(())
        }
    }
}

/// Writes the template to `path`, refusing to overwrite unless `force` is set.
fn init_config(path: &Path, force: bool) -> Result<(), TesselError> {
    if path.exists() && !force {
        return Err(TesselError::ConfigError(format!(
            "Configuration file already exists at: {}\nUse --force to overwrite.",
            path.display()
        )));
    }

    create_config_file(path).map_err(|e| {
        TesselError::ConfigError(format!("Failed to create config file {}: {e}", path.display()))
    })
}

/// State of one search path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathState {
    /// The file that gets loaded.
    Active,
    /// Exists but is shadowed by an earlier path.
    Shadowed,
    Missing,
}

/// Marks each search path. The first existing one is active unless an
/// override is given.
fn classify(paths: &[PathBuf], has_override: bool) -> Vec<PathState> {
    let mut found = has_override;
    paths
        .iter()
        .map(|path| match (path.exists(), found) {
            (false, _) => PathState::Missing,
            (true, true) => PathState::Shadowed,
            (true, false) => {
                found = true;
                PathState::Active
            }
        })
        .collect()
}

fn show_config_path() {
    if let Some(path) = custom_config_path() {
        println!("Using --config override: {}\n", path.display().to_string().bold());
    }

    println!("Configuration file search paths (in priority order):\n");
    let paths = config_paths();
    let states = classify(&paths, custom_config_path().is_some());

    for (i, (path, state)) in paths.iter().zip(&states).enumerate() {
        let marker = match state {
            PathState::Active => " (active)".green().to_string(),
            PathState::Shadowed => " (exists)".dimmed().to_string(),
            PathState::Missing => String::new(),
        };
        println!("  {}. {}{marker}", i + 1, path.display());
    }

    if custom_config_path().is_none() && !states.contains(&PathState::Active) {
        println!("\nNo configuration file found. Built-in presets are available.");
        println!("Run 'tessel config init' to create one.");
    }
}
