use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(
        "path expressions may only contain alphanumerics, '_', '-', '@' and non-empty \
         '.'-separated segments, but got '{0}'"
    )]
    InvalidPathExpression(String),

    #[error("settings file '{path}' is unavailable: {source}")]
    SourceUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The settings file was read but is not valid JSON.
    ///
    /// [`NotAnObject`](Self::NotAnObject) and
    /// [`MalformedValue`](Self::MalformedValue) report the same class of
    /// fatal problem for documents that parse but cannot be loaded.
    #[error("failed to parse settings file '{path}': {source}")]
    MalformedSource {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("settings document must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("cannot convert value at '{path}' for member {member}: {source}")]
    MalformedValue {
        member: String,
        path: String,
        source: serde_json::Error,
    },

    #[error("cannot convert environment variable {variable} for member {member}: {source}")]
    ConversionFailure {
        variable: String,
        member: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
