//! Error types for Tessel.
//!
//! This module provides the unified error type used by the layout engine,
//! the tree builder, configuration loading, and the CLI.
//!
//! # Error Categories
//!
//! - **Tree wiring errors**: unknown tiles, leaf parents, reparenting, cycles
//! - **Sizing errors**: leftover redistribution that fails to converge
//! - **Configuration errors**: unreadable or invalid configuration files
//! - **CLI errors**: invalid arguments, unknown layout names, I/O failures

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for Tessel operations.
pub type TesselResult<T> = Result<T, TesselError>;

/// Errors that can occur while building or laying out a tile tree.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum TesselError {
    /// A tile id that does not belong to the tree.
    #[error("Unknown tile id: {0}")]
    UnknownTile(usize),

    /// A leaf was used where a container is required.
    #[error("Tile '{0}' is not a container")]
    NotAContainer(String),

    /// The child already has a parent. Tiles are never reparented.
    #[error("Tile '{child}' already belongs to '{parent}'")]
    AlreadyParented {
        /// Name of the tile being added.
        child: String,
        /// Name of its current parent.
        parent: String,
    },

    /// The root of a tree can never become somebody's child.
    #[error("The root tile cannot be added as a child")]
    RootCannotBeChild,

    /// The wiring would make a tile its own ancestor.
    #[error("Adding '{child}' to '{parent}' would create a cycle")]
    CycleDetected {
        /// Name of the would-be parent.
        parent: String,
        /// Name of the would-be child.
        child: String,
    },

    /// Leftover redistribution did not settle within the round cap.
    ///
    /// This is a configuration bug (usually conflicting min/max values)
    /// rather than a runtime condition. The whole layout pass is aborted.
    #[error(
        "Layout '{container}' did not converge after {rounds} redistribution rounds \
         ({leftover} cells still unassigned)"
    )]
    NonConvergence {
        /// Name of the container whose pass failed.
        container: String,
        /// The round cap that was exceeded.
        rounds: u32,
        /// Main-axis space still unassigned when the pass gave up.
        leftover: i64,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// No preset or configured layout has the given name.
    #[error("Unknown layout: {0}")]
    UnknownLayout(String),

    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
}

impl TesselError {
    /// Creates a non-convergence error for the named container.
    #[must_use]
    pub fn non_convergence(container: impl Into<String>, rounds: u32, leftover: i64) -> Self {
        Self::NonConvergence {
            container: container.into(),
            rounds,
            leftover,
        }
    }

    /// Returns `true` if this error aborted a layout pass.
    ///
    /// Renderers must not draw a tree whose pass failed this way.
    #[must_use]
    pub const fn is_fatal(&self) -> bool { matches!(self, Self::NonConvergence { .. }) }

    /// Returns `true` if this error comes from wiring the tree.
    #[must_use]
    pub const fn is_wiring_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownTile(_)
                | Self::NotAContainer(_)
                | Self::AlreadyParented { .. }
                | Self::RootCannotBeChild
                | Self::CycleDetected { .. }
        )
    }
}

impl From<std::io::Error> for TesselError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for TesselError {
    fn from(err: serde_json::Error) -> Self { Self::ConfigError(err.to_string()) }
}

impl From<ConfigError> for TesselError {
    fn from(err: ConfigError) -> Self { Self::ConfigError(err.to_string()) }
}
