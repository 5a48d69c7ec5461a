//! JSON Schema generation for the configuration file.

use crate::config::TesselConfig;

/// Generates a JSON Schema for the Tessel configuration.
///
/// The schema includes all configuration options with their types,
/// descriptions, and default values.
#[must_use]
pub fn generate_schema() -> schemars::Schema {
    let mut schema = schemars::schema_for!(TesselConfig);

    if let Some(obj) = schema.as_object_mut() {
        obj.insert(
            "$id".to_string(),
            serde_json::json!(
                "https://raw.githubusercontent.com/tessel-rs/tessel/main/tessel.schema.json"
            ),
        );
    }

    schema
}

/// Generates a pretty-printed JSON Schema string for the Tessel configuration.
#[must_use]
pub fn generate_schema_json() -> String {
    let schema = generate_schema();
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
