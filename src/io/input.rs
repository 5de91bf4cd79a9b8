use std::fs;
use std::io::Read;

use crate::model::item::PlanItem;

/// Error type for item-list loading
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("cannot read {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid items JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Load a flat plan-item list from a JSON array file. `-` reads stdin.
pub fn load_items(path: &str) -> Result<Vec<PlanItem>, InputError> {
    let text = if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| InputError::ReadError {
                path: "<stdin>".to_string(),
                source: e,
            })?;
        buffer
    } else {
        fs::read_to_string(path).map_err(|e| InputError::ReadError {
            path: path.to_string(),
            source: e,
        })?
    };
    Ok(serde_json::from_str(&text)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
