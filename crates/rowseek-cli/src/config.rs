//! Loading a [`TableConfig`] from YAML or JSON.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rowseek::TableConfig;
use tracing::debug;

/// Reads a table config; `.json` files are JSON, everything else YAML.
pub fn load_config(path: &Path) -> Result<TableConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = parse_config(&content, is_json(path))
        .with_context(|| format!("invalid config {}", path.display()))?;

    debug!(
        path = %path.display(),
        columns = config.columns.len(),
        filter_field = ?config.filter_field,
        "loaded table config"
    );
    Ok(config)
}

/// Parses config text as JSON or YAML.
pub fn parse_config(content: &str, json: bool) -> Result<TableConfig> {
    if json {
        Ok(serde_json::from_str(content)?)
    } else if content.trim().is_empty() {
        // serde_yaml rejects an empty document
        Ok(TableConfig::default())
    } else {
        Ok(serde_yaml::from_str(content)?)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
