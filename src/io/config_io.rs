use std::fs;

use crate::model::config::Config;

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Load configuration from an itin.toml file. With no path, defaults apply.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
