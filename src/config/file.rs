//! JSON settings files.

use std::path::Path;

use serde_json::Value;

use super::ConfigError;

/// File name used by [`Settings::with_default_json`](super::Settings::with_default_json).
pub const DEFAULT_JSON_FILE: &str = "secrets.json";

/// Reads and parses a JSON settings file.
///
/// Any I/O failure is reported as [`ConfigError::SourceUnavailable`]; a file
/// that reads fine but does not parse is [`ConfigError::MalformedSource`].
pub fn load_json(path: &Path) -> Result<Value, ConfigError> {
    let contents = std::fs::read(path).map_err(|e| ConfigError::SourceUnavailable {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_slice(&contents).map_err(|e| ConfigError::MalformedSource {
        path: path.to_path_buf(),
        source: e,
    })
}
