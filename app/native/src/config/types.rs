//! Configuration types for Tessel.
//!
//! The configuration file declares engine options and named layout trees.
//! Layout trees use the same camelCase constraint keys as [`Size`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::presets;
use crate::constants::engine::MAX_REDISTRIBUTION_ROUNDS;
use crate::constants::tree::ROOT_NAME;
use crate::constants::viewport::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::{TesselError, TesselResult};
use crate::layout::{
    Direction, EngineOptions, MetricsLog, Size, TextContent, TileContent, TileId, TileTree,
};

// ============================================================================
// Engine
// ============================================================================

/// Layout engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Maximum leftover redistribution rounds per container before a layout
    /// pass is aborted.
    /// Default: 100
    pub max_rounds: u32,

    /// Viewport width used when none is given on the command line.
    /// Default: 80
    pub default_width: u32,

    /// Viewport height used when none is given on the command line.
    /// Default: 24
    pub default_height: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_rounds: MAX_REDISTRIBUTION_ROUNDS,
            default_width: DEFAULT_WIDTH,
            default_height: DEFAULT_HEIGHT,
        }
    }
}

impl EngineConfig {
    /// Engine options derived from this configuration.
    #[must_use]
    pub const fn options(&self) -> EngineOptions { EngineOptions::new(self.max_rounds) }
}

// ============================================================================
// Layout Trees
// ============================================================================

/// Content hosted by a leaf tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContentSpec {
    /// Static text, word-wrapped to the tile.
    Text {
        /// The text to show.
        text: String,
    },
    /// Latest layout timing report of every container.
    Metrics,
}

impl ContentSpec {
    /// Creates the content this spec describes.
    #[must_use]
    pub fn instantiate(&self) -> Box<dyn TileContent> {
        match self {
            Self::Text { text } => Box::new(TextContent::new(text.clone())),
            Self::Metrics => Box::new(MetricsLog::new()),
        }
    }
}

/// Declarative description of a tile and its subtree.
///
/// A spec with a `direction` or any `children` is a container; anything else
/// is a leaf.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TileSpec {
    /// Tile name. Unique among siblings.
    pub name: String,

    /// Sizing constraints (`weight`, `minWidth`, `maxHeight`, `fixedWidth`, ...).
    #[serde(flatten)]
    pub size: Size,

    /// Layout direction of a container: "row" or "column".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,

    /// Child tiles, in layout order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TileSpec>,

    /// Content of a leaf tile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentSpec>,
}

impl TileSpec {
    /// Creates a leaf spec.
    #[must_use]
    pub fn leaf(name: impl Into<String>, size: Size) -> Self {
        Self {
            name: name.into(),
            size,
            ..Self::default()
        }
    }

    /// Creates a container spec.
    #[must_use]
    pub fn container(
        name: impl Into<String>,
        direction: Direction,
        size: Size,
        children: Vec<Self>,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            direction: Some(direction),
            children,
            content: None,
        }
    }

    /// Attaches content to a leaf spec.
    #[must_use]
    pub fn with_content(mut self, content: ContentSpec) -> Self {
        self.content = Some(content);
        self
    }

    /// Whether this spec describes a container.
    #[must_use]
    pub fn is_container(&self) -> bool { self.direction.is_some() || !self.children.is_empty() }

    /// Builds a tree whose root is this spec.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be wired.
    pub fn build(&self, options: EngineOptions) -> TesselResult<TileTree> {
        let name = if self.name.is_empty() { ROOT_NAME } else { self.name.as_str() };
        let mut tree =
            TileTree::with_root(name, self.direction.unwrap_or_default(), self.size).with_options(options);
        for child in &self.children {
            child.attach(&mut tree, TileId::ROOT)?;
        }
        Ok(tree)
    }

    fn attach(&self, tree: &mut TileTree, parent: TileId) -> TesselResult<TileId> {
        if self.is_container() {
            if self.content.is_some() {
                tracing::warn!(tile = %self.name, "content on a container tile is ignored");
            }
            let id = tree.add_container(
                parent,
                self.name.clone(),
                self.direction.unwrap_or_default(),
                self.size,
            )?;
            for child in &self.children {
                child.attach(tree, id)?;
            }
            return Ok(id);
        }

        let id = match &self.content {
            Some(content) => tree.leaf_with_content(self.name.clone(), self.size, content.instantiate()),
            None => tree.leaf(self.name.clone(), self.size),
        };
        tree.add(parent, id)?;
        Ok(id)
    }

    /// Number of tiles in this subtree, including itself.
    #[must_use]
    pub fn count(&self) -> usize { 1 + self.children.iter().map(Self::count).sum::<usize>() }
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure for Tessel.
///
/// Loaded from `config.jsonc` or `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TesselConfig {
    /// Layout engine settings.
    pub engine: EngineConfig,

    /// Named layout trees. A layout named like a built-in preset replaces it.
    pub layouts: BTreeMap<String, TileSpec>,
}

/// Where a layout definition comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutSource {
    /// Shipped with the binary.
    Preset,
    /// Declared in the configuration file.
    Config,
}

impl std::fmt::Display for LayoutSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preset => f.write_str("preset"),
            Self::Config => f.write_str("config"),
        }
    }
}

impl TesselConfig {
    /// Looks up a layout by name. Configured layouts shadow presets.
    ///
    /// # Errors
    ///
    /// Returns `TesselError::UnknownLayout` if no layout has that name.
    pub fn layout(&self, name: &str) -> TesselResult<TileSpec> {
        self.layouts
            .get(name)
            .cloned()
            .or_else(|| presets::preset(name))
            .ok_or_else(|| TesselError::UnknownLayout(name.to_string()))
    }

    /// Builds the tree of the named layout with the configured engine options.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout is unknown or cannot be wired.
    pub fn build_layout(&self, name: &str) -> TesselResult<TileTree> {
        self.layout(name)?.build(self.engine.options())
    }

    /// All available layout names with their source, sorted by name.
    #[must_use]
    pub fn layout_names(&self) -> Vec<(String, LayoutSource)> {
        let mut names: BTreeMap<String, LayoutSource> = presets::PRESET_NAMES
            .iter()
            .map(|name| ((*name).to_string(), LayoutSource::Preset))
            .collect();
        for name in self.layouts.keys() {
            names.insert(name.clone(), LayoutSource::Config);
        }
        names.into_iter().collect()
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Errors that can occur when loading the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    NotFound,
    /// The configuration file exists but could not be read.
    IoError(std::io::Error),
    /// The configuration file contains invalid JSON.
    ParseError(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(
                f,
                "No configuration file found. Expected at ~/.config/tessel/config.jsonc \
                or ~/.tessel.jsonc"
            ),
            Self::IoError(err) => write!(f, "Failed to read configuration file: {err}"),
            Self::ParseError(err) => write!(f, "Failed to parse configuration file: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            Self::ParseError(err) => Some(err),
            Self::NotFound => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err) }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self { Self::ParseError(err) }
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Legacy configuration file names in home directory.
const LEGACY_CONFIG_FILE_NAMES: &[&str] = &[".tessel.jsonc", ".tessel.json"];

/// Returns the possible configuration file paths in priority order.
///
/// The function checks the following locations (both `.jsonc` and `.json` variants):
/// 1. `$XDG_CONFIG_HOME/tessel/config.jsonc` when the variable is set
/// 2. `~/.config/tessel/config.jsonc`
/// 3. The platform configuration directory (`dirs::config_dir()`)
/// 4. `~/.tessel.jsonc` or `~/.tessel.json` (legacy/simple location)
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // Check XDG_CONFIG_HOME first if explicitly set
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        push_config_dir(&mut paths, &PathBuf::from(xdg_config).join("tessel"));
    }

    if let Some(home) = dirs::home_dir() {
        push_config_dir(&mut paths, &home.join(".config").join("tessel"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        push_config_dir(&mut paths, &config_dir.join("tessel"));
    }

    if let Some(home) = dirs::home_dir() {
        for filename in LEGACY_CONFIG_FILE_NAMES {
            paths.push(home.join(filename));
        }
    }

    paths
}

/// Appends the config file candidates of `dir`, skipping duplicates
/// (`XDG_CONFIG_HOME` is often `~/.config`).
fn push_config_dir(paths: &mut Vec<PathBuf>, dir: &Path) {
    for filename in CONFIG_FILE_NAMES {
        let path = dir.join(filename);
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
}

/// Loads the configuration from the first existing default location.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any of the expected locations.
/// Returns `ConfigError::IoError` if a configuration file exists but could not be read.
/// Returns `ConfigError::ParseError` if the configuration file contains invalid JSON.
pub fn load_config() -> Result<(TesselConfig, PathBuf), ConfigError> {
    for path in config_paths() {
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    Err(ConfigError::NotFound)
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist, `IoError` if it
/// cannot be read and `ParseError` if it is not valid JSONC.
pub fn load_config_from_path(path: &Path) -> Result<(TesselConfig, PathBuf), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }
    let file = fs::File::open(path)?;
    // Strip comments from JSONC before parsing
    let reader = json_comments::StripComments::new(file);
    let config: TesselConfig = serde_json::from_reader(reader)?;
    Ok((config, path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    // ========================================================================
    // Deserialization
    // ========================================================================

    #[test]
    fn test_default_config() {
        let config = TesselConfig::default();
        assert!(config.layouts.is_empty());
        assert_eq!(config.engine.max_rounds, 100);
        assert_eq!(config.engine.default_width, 80);
        assert_eq!(config.engine.default_height, 24);
    }

    #[test]
    fn test_tile_spec_deserializes_nested_tree() {
        let json = r#"{
            "name": "Dashboard",
            "direction": "column",
            "children": [
                {
                    "name": "Main",
                    "weight": 1.0,
                    "direction": "row",
                    "children": [
                        { "name": "Nav", "weight": 0.3, "maxWidth": 30 },
                        { "name": "Body", "weight": 0.7, "content": { "type": "text", "text": "hi" } }
                    ]
                },
                { "name": "Status", "fixedHeight": 1, "content": { "type": "metrics" } }
            ]
        }"#;
        let spec: TileSpec = serde_json::from_str(json).unwrap();

        assert_eq!(spec.direction, Some(Direction::Column));
        assert_eq!(spec.count(), 5);
        let main = &spec.children[0];
        assert!(main.is_container());
        assert_eq!(main.children[0].size.max_width, 30);
        assert_eq!(
            main.children[1].content,
            Some(ContentSpec::Text {
                text: "hi".to_string()
            })
        );
        assert_eq!(spec.children[1].size.fixed_height, 1);
        assert_eq!(spec.children[1].content, Some(ContentSpec::Metrics));
        assert!(!spec.children[1].is_container());
    }

    #[test]
    fn test_engine_config_partial() {
        let config: TesselConfig = serde_json::from_str(r#"{ "engine": { "maxRounds": 5 } }"#).unwrap();
        assert_eq!(config.engine.max_rounds, 5);
        assert_eq!(config.engine.default_width, 80);
        assert_eq!(config.engine.options(), EngineOptions::new(5));
    }

    // ========================================================================
    // Building
    // ========================================================================

    #[test]
    fn test_build_wires_tree() {
        let spec = TileSpec::container(
            "Dashboard",
            Direction::Row,
            Size::weighted(1.0),
            vec![
                TileSpec::leaf("Nav", Size::new().with_fixed_width(20)),
                TileSpec::container(
                    "Body",
                    Direction::Column,
                    Size::weighted(1.0),
                    vec![TileSpec::leaf("Text", Size::weighted(1.0))
                        .with_content(ContentSpec::Text { text: "x".to_string() })],
                ),
            ],
        );
        let mut tree = spec.build(EngineOptions::default()).unwrap();

        assert_eq!(tree.root().name(), "Dashboard");
        assert_eq!(tree.len(), 4);
        let body = tree.find("Body").unwrap();
        let text = tree.find("Text").unwrap();
        assert_eq!(tree.parent(text), Some(body));
        assert!(tree.content(text).is_some());

        tree.resize(100, 10).unwrap();
        assert_eq!(tree.resolved(tree.find("Nav").unwrap()).unwrap().width, 20);
        assert_eq!(tree.resolved(body).unwrap().width, 80);
    }

    #[test]
    fn test_build_unnamed_root_uses_default_name() {
        let spec = TileSpec::default();
        let tree = spec.build(EngineOptions::default()).unwrap();
        assert_eq!(tree.root().name(), "Root");
        assert_eq!(tree.root().direction(), Some(Direction::Row));
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    #[test]
    fn test_configured_layout_shadows_preset() {
        let mut config = TesselConfig::default();
        config
            .layouts
            .insert("minimal".to_string(), TileSpec::leaf("Custom", Size::weighted(1.0)));

        assert_eq!(config.layout("minimal").unwrap().name, "Custom");
        assert!(config.layout("constraints").is_ok());
        assert_eq!(
            config.layout("nope").unwrap_err(),
            TesselError::UnknownLayout("nope".to_string())
        );

        let names = config.layout_names();
        assert!(names.contains(&("minimal".to_string(), LayoutSource::Config)));
        assert!(names.contains(&("overview".to_string(), LayoutSource::Preset)));
    }

    // ========================================================================
    // Loading
    // ========================================================================

    #[test]
    fn test_load_config_from_path_strips_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{
                // engine tuning
                "engine": {{ "maxRounds": 7 }},
                /* layouts */
                "layouts": {{ "solo": {{ "name": "Solo", "children": [{{ "name": "A", "weight": 1 }}] }} }}
            }}"#
        )
        .unwrap();

        let (config, path) = load_config_from_path(file.path()).unwrap();
        assert_eq!(path, file.path());
        assert_eq!(config.engine.max_rounds, 7);
        assert_eq!(config.layouts["solo"].children.len(), 1);
    }

    #[test]
    fn test_load_config_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from_path(&dir.path().join("missing.jsonc")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound));
    }

    #[test]
    fn test_load_config_from_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{ not json").unwrap();
        let err = load_config_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().starts_with("Failed to parse"));
    }

    #[test]
    fn test_config_paths_are_not_empty() {
        let paths = config_paths();
        assert!(!paths.is_empty() || std::env::var("HOME").is_err());
        assert!(paths.iter().all(|path| path.to_string_lossy().contains("tessel")));
    }
}
