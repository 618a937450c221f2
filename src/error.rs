//! Error type shared by the fallible edges of the crate.
//!
//! The selection pipeline itself never fails; errors only come from loading
//! configuration files, tool catalogs, and custom category catalogs.

use thiserror::Error;

/// All errors produced by bibliotool.
#[derive(Debug, Error)]
pub enum BiblioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid configuration value (bad env override, unreadable file, ...).
    #[error("configuration error: {0}")]
    Config(String),

    /// A catalog declared the same category id twice.
    #[error("duplicate category id in catalog: {0}")]
    DuplicateCategory(String),

    /// The tool list supplied by the caller is malformed.
    #[error("invalid tool catalog: {0}")]
    ToolCatalog(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BiblioError>;
