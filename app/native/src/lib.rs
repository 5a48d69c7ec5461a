//! Tessel - constraint-based box partitioning for terminal panel layouts.
//!
//! The [`layout`] module is the engine: an arena tree of named tiles whose
//! containers split their main axis among children by weight, min, max and
//! fixed constraints. [`config`] describes trees declaratively and ships a few
//! presets; [`cli`] resolves and draws them.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod layout;
pub mod schema;

pub use error::{TesselError, TesselResult};
pub use layout::{Direction, EngineOptions, LayoutEvent, LayoutNotice, Size, TileId, TileTree};
