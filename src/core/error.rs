use crate::core::item::Item;
use std::path::PathBuf;
use thiserror::Error;

/// Rejection of a toggle by the selection policy.
///
/// This is a user-facing signal, not a failure: the controller reports it
/// as an effect and stays interactive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("only one option may be selected ({held} is already selected)")]
    SingleSelection { held: Item, attempted: Item },
}

/// Failure raised by a filter implementation.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid filter pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("filter failed: {0}")]
    Custom(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl FilterError {
    pub fn custom(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Custom(error.into())
    }
}

/// Errors returned by the search controller to its host.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Errors raised while loading configuration or item files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {}: {error}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("failed to parse {} as YAML: {error}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        error: serde_yaml::Error,
    },

    #[error("failed to parse {} as JSON: {error}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        error: serde_json::Error,
    },

    #[error("unsupported file format for {} (expected .yaml, .yml or .json)", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("item loader stopped before delivering items")]
    LoaderStopped,
}

pub type Result<T> = std::result::Result<T, SearchError>;
