//! Error types for elastic-cluster-info
//!
//! Every failure class is fatal: the pipeline surfaces the first error it
//! hits and the process exits non-zero. There is no transient/permanent
//! distinction and no retry.

use thiserror::Error;

/// Main error type for the inventory pipeline
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("ElastiCache API error: {message}")]
    Api { message: String },

    #[error("unrecognized cache engine '{engine}' (expected 'redis' or 'memcached')")]
    UnknownEngine { engine: String },

    #[error("invalid engine version '{version}': {message}")]
    VersionParse { version: String, message: String },

    #[error("API record for '{resource}' is missing required field '{field}'")]
    IncompleteRecord {
        resource: String,
        field: &'static str,
    },

    #[error("failed to write report '{path}': {message}")]
    Report { path: String, message: String },
}

/// Result type for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;
