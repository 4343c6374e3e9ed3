//! Build options: validated [`TreeOptions`] and their file format.

pub mod options;
pub mod schema;

use std::path::Path;

pub use options::{SortColumn, SortDirection, TreeOptions, TreeScope};
pub use schema::TreeConfig;

use crate::error::Result;

/// Load a [`TreeConfig`] from disk.
///
/// `.json` files are parsed as JSON, everything else as YAML.
pub fn load_config(path: &Path) -> Result<TreeConfig> {
    let text = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        TreeConfig::from_json_str(&text)?
    } else {
        TreeConfig::from_yaml_str(&text)?
    };
    tracing::debug!(path = %path.display(), "loaded tree options");
    Ok(config)
}

/// Load and validate options in one step.
pub fn load_options(path: &Path) -> Result<TreeOptions> {
    load_config(path)?.into_options()
}
