//! Configuration module for Tessel.
//!
//! This module provides configuration types, the built-in layout presets and
//! configuration file loading.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

pub mod presets;
pub mod template;
pub mod types;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub use presets::{PRESET_NAMES, preset};
pub use types::{
    ConfigError, ContentSpec, EngineConfig, LayoutSource, TesselConfig, TileSpec, config_paths,
    load_config as load_config_default, load_config_from_path,
};

/// Global configuration instance, loaded once per process.
static CONFIG: OnceLock<TesselConfig> = OnceLock::new();

/// Path to the currently loaded configuration file.
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Custom config path override (set via CLI --config flag).
static CUSTOM_CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Sets a custom configuration file path to use instead of the default search paths.
///
/// This must be called before `init()` or `get_config()` to take effect.
///
/// Returns `false` if a path was already set.
pub fn set_custom_config_path(path: PathBuf) -> bool { CUSTOM_CONFIG_PATH.set(path).is_ok() }

/// Returns the custom configuration path, if one was set.
pub fn custom_config_path() -> Option<&'static PathBuf> { CUSTOM_CONFIG_PATH.get() }

/// Loads the configuration from disk.
///
/// A missing file is not an error: the presets and engine defaults are
/// enough to run every command. `tessel config init` writes a template.
fn load_or_default() -> TesselConfig {
    let result = load(CUSTOM_CONFIG_PATH.get().map(PathBuf::as_path));

    match result {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), layouts = config.layouts.len(), "loaded configuration");
            let _ = CONFIG_PATH.set(path);
            config
        }
        Err(ConfigError::NotFound) => {
            if let Some(path) = CUSTOM_CONFIG_PATH.get() {
                tracing::warn!(path = %path.display(), "configuration file not found, using defaults");
            } else {
                tracing::debug!("no configuration file found, using defaults");
            }
            TesselConfig::default()
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load configuration, using defaults");
            TesselConfig::default()
        }
    }
}

/// Loads `custom` when given, otherwise the first file on the search path.
fn load(custom: Option<&Path>) -> Result<(TesselConfig, PathBuf), ConfigError> {
    custom.map_or_else(load_config_default, load_config_from_path)
}

/// Initializes and returns the global configuration instance.
///
/// This function is idempotent - calling it multiple times will return
/// the same configuration instance.
pub fn init() -> &'static TesselConfig { CONFIG.get_or_init(load_or_default) }

/// Returns the global configuration instance, initializing it if necessary.
pub fn get_config() -> &'static TesselConfig { CONFIG.get_or_init(load_or_default) }

/// Returns the path to the loaded configuration file, if any.
pub fn get_config_path() -> Option<&'static PathBuf> { CONFIG_PATH.get() }
