//! CLI command definitions using Clap.
//!
//! Commands are organized into domain-specific submodules:
//!
//! - `config_cmd` - Configuration file management commands
//! - `layout` - Layout resolution, rendering and simulation commands
//! - `types` - Shared types used across commands

use std::io;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::error::TesselError;
use crate::{config, schema};

pub mod config_cmd;
pub mod layout;
pub mod types;

pub use config_cmd::ConfigCommands;
pub use layout::{LayoutCommand, SimulateCommand};
pub use types::{LayoutArgs, Viewport};

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tessel CLI - constraint-based box partitioning for terminal layouts.
#[derive(Parser, Debug)]
#[command(name = "tessel")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Log layout passes to stderr (same as RUST_LOG=debug).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Resolve a layout and list every tile with its size.
    Layout(LayoutCommand),

    /// Draw a resolved layout as labelled boxes.
    Render(LayoutArgs),

    /// Print the tile tree and the resolved size of every container.
    Tree(LayoutArgs),

    /// Resize a layout step by step and report layout times.
    Simulate(SimulateCommand),

    /// List built-in presets and configured layouts.
    Presets {
        /// Output in JSON format instead of table format.
        #[arg(long, short = 'j')]
        json: bool,
    },

    /// Configuration file management commands.
    ///
    /// Initialize and locate the configuration file.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Output Tessel configuration JSON Schema.
    ///
    /// Outputs a JSON Schema to stdout that describes the structure of the
    /// Tessel configuration file. Can be redirected to a file for use with
    /// editors that support JSON Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    ///
    /// Usage:
    ///   eval "$(tessel completions --shell zsh)"
    ///   tessel completions --shell fish > ~/.config/fish/completions/tessel.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Returns the custom config path if specified via --config flag.
    #[must_use]
    pub fn config_path(&self) -> Option<std::path::PathBuf> {
        self.config.as_ref().map(std::path::PathBuf::from)
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), TesselError> {
        if let Some(path) = self.config_path() {
            if !path.exists() {
                return Err(TesselError::ConfigError(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            config::set_custom_config_path(path);
        }

        match &self.command {
            Commands::Layout(cmd) => layout::execute_layout(cmd),
            Commands::Render(args) => layout::execute_render(args),
            Commands::Tree(args) => layout::execute_tree(args),
            Commands::Simulate(cmd) => layout::execute_simulate(cmd),
            Commands::Presets { json } => layout::execute_presets(*json),
            Commands::Config(cmd) => config_cmd::execute(cmd),

            Commands::Schema => {
                println!("{}", schema::generate_schema_json());
                Ok(())
            }

            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "tessel", &mut io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // CLI parsing tests
    // ========================================================================

    #[test]
    fn test_cli_definition_is_valid() { Cli::command().debug_assert(); }

    #[test]
    fn test_cli_parses_layout_defaults() {
        let cli = Cli::try_parse_from(["tessel", "layout"]).unwrap();
        match cli.command {
            Commands::Layout(cmd) => {
                assert_eq!(cmd.target.layout, "minimal");
                assert_eq!(cmd.target.width, None);
                assert!(!cmd.json);
                assert!(!cmd.detailed);
            }
            _ => panic!("Expected Layout command"),
        }
    }

    #[test]
    fn test_cli_parses_layout_with_viewport() {
        let cli = Cli::try_parse_from([
            "tessel", "layout", "-l", "constraints", "-W", "200", "-H", "50", "--json", "-d",
        ])
        .unwrap();
        match cli.command {
            Commands::Layout(cmd) => {
                assert_eq!(cmd.target.layout, "constraints");
                assert_eq!(cmd.target.width, Some(200));
                assert_eq!(cmd.target.height, Some(50));
                assert!(cmd.json);
                assert!(cmd.detailed);
            }
            _ => panic!("Expected Layout command"),
        }
    }

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from(["tessel", "render", "--layout", "overview"]).unwrap();
        match cli.command {
            Commands::Render(args) => assert_eq!(args.layout, "overview"),
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_parses_tree() {
        let cli = Cli::try_parse_from(["tessel", "tree", "-W", "120"]).unwrap();
        match cli.command {
            Commands::Tree(args) => assert_eq!(args.width, Some(120)),
            _ => panic!("Expected Tree command"),
        }
    }

    #[test]
    fn test_cli_parses_simulate() {
        let cli = Cli::try_parse_from([
            "tessel", "simulate", "--from", "40x12", "--to", "160x48", "--steps", "4",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate(cmd) => {
                assert_eq!(cmd.from, Viewport::new(40, 12));
                assert_eq!(cmd.to, Viewport::new(160, 48));
                assert_eq!(cmd.steps, 4);
            }
            _ => panic!("Expected Simulate command"),
        }
    }

    #[test]
    fn test_cli_bounds_simulate_steps() {
        let args = |steps: &'static str| {
            ["tessel", "simulate", "--from", "40x12", "--to", "160x48", "--steps", steps]
        };
        assert!(Cli::try_parse_from(args("10000")).is_ok());
        assert!(Cli::try_parse_from(args("10001")).is_err());
        assert!(Cli::try_parse_from(args("4294967295")).is_err());
    }

    #[test]
    fn test_cli_rejects_bad_viewport() {
        let result = Cli::try_parse_from(["tessel", "simulate", "--from", "wide", "--to", "80x24"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_simulate_requires_bounds() {
        assert!(Cli::try_parse_from(["tessel", "simulate", "--from", "80x24"]).is_err());
    }

    #[test]
    fn test_cli_parses_presets_json() {
        let cli = Cli::try_parse_from(["tessel", "presets", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Presets { json: true }));
    }

    #[test]
    fn test_cli_parses_schema() {
        let cli = Cli::try_parse_from(["tessel", "schema"]).unwrap();
        assert!(matches!(cli.command, Commands::Schema));
    }

    #[test]
    fn test_cli_parses_completions_zsh() {
        let cli = Cli::try_parse_from(["tessel", "completions", "--shell", "zsh"]).unwrap();
        match cli.command {
            Commands::Completions { shell } => assert_eq!(shell, Shell::Zsh),
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_cli_parses_config_init() {
        let cli = Cli::try_parse_from(["tessel", "config", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Config(ConfigCommands::Init { force, path, stdout }) => {
                assert!(force);
                assert!(path.is_none());
                assert!(!stdout);
            }
            _ => panic!("Expected Config Init command"),
        }
    }

    // ========================================================================
    // Global flags
    // ========================================================================

    #[test]
    fn test_app_version_is_not_empty() {
        assert!(!APP_VERSION.is_empty());
    }

    #[test]
    fn test_cli_parses_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["tessel", "render", "--config", "/path/to/config.json"])
            .unwrap();
        assert_eq!(cli.config_path(), Some(std::path::PathBuf::from("/path/to/config.json")));
    }

    #[test]
    fn test_cli_config_path_returns_none_when_not_specified() {
        let cli = Cli::try_parse_from(["tessel", "schema"]).unwrap();
        assert!(cli.config_path().is_none());
    }

    #[test]
    fn test_cli_parses_verbose() {
        let cli = Cli::try_parse_from(["tessel", "-v", "presets"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_execute_rejects_missing_config_file() {
        let cli =
            Cli::try_parse_from(["tessel", "--config", "/nonexistent/tessel.jsonc", "schema"])
                .unwrap();
        let err = cli.execute().unwrap_err();
        assert!(matches!(err, TesselError::ConfigError(_)));
    }
}
