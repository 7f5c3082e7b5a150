use std::path::Path;

use crate::error::OAuthCliError;

use super::env::expand_json_strings;
use super::normalize::normalize;
use super::types::Config;

/// Read a JSON config file, expand environment references, and normalize it.
pub fn load_config(path: &Path) -> Result<Config, OAuthCliError> {
    let content = std::fs::read_to_string(path).map_err(|e| OAuthCliError::ConfigFile {
        path: path.to_path_buf(),
        detail: format!("Cannot read file: {e}"),
    })?;

    let mut json: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| OAuthCliError::ConfigFile {
            path: path.to_path_buf(),
            detail: format!("Invalid JSON: {e}"),
        })?;

    expand_json_strings(&mut json).map_err(|detail| OAuthCliError::ConfigFile {
        path: path.to_path_buf(),
        detail,
    })?;

    let config = normalize(&json)?;
    tracing::debug!(
        "Loaded OAuth config for client '{}' from {}",
        config.client_id(),
        path.display()
    );
    Ok(config)
}
