//! Configuration template generation.
//!
//! Generates a commented configuration template with every available option.

use std::fs;
use std::path::Path;

/// Generates a configuration template.
///
/// Engine options are commented out and show their default values. One
/// example layout is left active so the file works as written.
#[must_use]
pub fn generate_config_template() -> String {
    r##"// Tessel Configuration File
// ==========================
// This file uses JSONC format (JSON with comments).
// Uncomment and modify the options you want to configure.
//
// Documentation: https://github.com/tessel-rs/tessel

{
  // ============================================================================
  // Layout Engine
  // ============================================================================
  // "engine": {
  //   // Redistribution rounds allowed per container before a layout pass
  //   // fails. Conflicting min/max values are the usual cause of failures.
  //   "maxRounds": 100,
  //
  //   // Viewport used when `--width` / `--height` are not given
  //   "defaultWidth": 80,
  //   "defaultHeight": 24
  // },

  // ============================================================================
  // Layouts
  // ============================================================================
  // Named tile trees. A layout named like a built-in preset ("minimal",
  // "weights-only", "constraints", "overview") replaces it.
  //
  // Every tile accepts:
  //   "name"                        Unique among siblings
  //   "weight"                      Share of the free space (0 = no share)
  //   "minWidth" / "minHeight"      Lower bound (0 = unset)
  //   "maxWidth" / "maxHeight"      Upper bound (0 = unset)
  //   "fixedWidth" / "fixedHeight"  Exact extent, overrides the rest (0 = unset)
  //
  // Containers add "direction" ("row" or "column") and "children".
  // Leaves may add "content": { "type": "text", "text": "..." }
  // or { "type": "metrics" }.
  "layouts": {
    "editor": {
      "name": "Root",
      "direction": "column",
      "weight": 1.0,
      "children": [
        {
          "name": "Workspace",
          "direction": "row",
          "weight": 1.0,
          "children": [
            { "name": "Files", "fixedWidth": 24 },
            { "name": "Editor", "weight": 0.7 },
            { "name": "Outline", "weight": 0.3, "maxWidth": 40 }
          ]
        },
        {
          "name": "Status",
          "fixedHeight": 1,
          "content": { "type": "metrics" }
        }
      ]
    }
  }
}
"##
    .to_string()
}

/// Creates a configuration file with the template at the specified path.
///
/// Creates parent directories if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn create_config_file(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, generate_config_template())
}
