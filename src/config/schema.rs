//! Configuration data structures for bibliotool.
//!
//! Defines the YAML config format: selection policy, the read-only switch,
//! and an optional replacement category catalog. Designed for multi-source
//! loading with serde (see [`super::loader`]).

use serde::{Deserialize, Serialize};

use super::catalog::{Catalog, Category, DEFAULT_CATEGORIES};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration for bibliotool.
///
/// Loaded from YAML files, environment variables, and CLI flags.
/// Multiple sources are merged with well-defined priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiblioConfig {
    /// Config format version (currently "1.0").
    #[serde(default = "default_version")]
    pub version: String,

    /// Per-request selection policy.
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Only offer tools that call GET endpoints.
    #[serde(default)]
    pub read_only: bool,

    /// Replacement for the built-in library catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogConfig>,
}

impl Default for BiblioConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            selection: SelectionConfig::default(),
            read_only: false,
            catalog: None,
        }
    }
}

impl BiblioConfig {
    /// Build the catalog this config describes.
    ///
    /// Falls back to [`Catalog::library`] when no custom catalog is set.
    pub fn build_catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(custom) => Catalog::new(
                custom.categories.clone(),
                custom.default_categories.clone(),
            ),
            None => Ok(Catalog::library()),
        }
    }
}

// ---------------------------------------------------------------------------
// SelectionConfig
// ---------------------------------------------------------------------------

/// Caller-supplied policy for one selection run.
///
/// The category lists are treated as sets; order only matters for
/// `preferred_categories`, which are appended in the listed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Hard cap on the number of tools returned. Zero returns nothing.
    #[serde(default = "default_max_tools_per_request")]
    pub max_tools_per_request: usize,

    /// Categories merged into every request.
    #[serde(default)]
    pub always_include_categories: Vec<String>,

    /// Categories removed after merging. Wins over every inclusion.
    #[serde(default)]
    pub excluded_categories: Vec<String>,

    /// Categories appended to whatever the query selected.
    #[serde(default)]
    pub preferred_categories: Vec<String>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_tools_per_request: default_max_tools_per_request(),
            always_include_categories: Vec::new(),
            excluded_categories: Vec::new(),
            preferred_categories: Vec::new(),
        }
    }
}

impl SelectionConfig {
    /// Config with the given cap and no category lists.
    pub fn with_max_tools(max_tools_per_request: usize) -> Self {
        Self {
            max_tools_per_request,
            ..Self::default()
        }
    }

    pub fn is_excluded(&self, category: &str) -> bool {
        self.excluded_categories.iter().any(|c| c == category)
    }
}

// ---------------------------------------------------------------------------
// CatalogConfig
// ---------------------------------------------------------------------------

/// A category catalog declared in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Fallback categories for queries nothing matched.
    #[serde(default = "default_categories")]
    pub default_categories: Vec<String>,

    #[serde(default)]
    pub categories: Vec<Category>,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_version() -> String {
    "1.0".to_string()
}

fn default_max_tools_per_request() -> usize {
    15
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
