//! bibliotool: query-driven tool selection for a library chat assistant.
//!
//! Scores a chat message against a catalog of keyword categories, expands
//! the match with a few hand-written rules, and trims the backend tool list
//! to a bounded, priority-ranked subset before it is sent to the LLM.

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod registry;
pub mod selection;
pub mod types;

pub use config::{BiblioConfig, Catalog, Category, SelectionConfig};
pub use error::{BiblioError, Result};
pub use selection::{QueryAnalysis, SelectionStats, ToolSelection, ToolSelector};
pub use types::{ApiMethod, Tool};
