//! Query-driven tool selection.
//!
//! The pipeline is split into modules by stage:
//! - [`analyzer`]: keyword scoring and confidence per category
//! - [`suggester`]: ordered heuristic rules adding related categories
//! - [`filter`]: category union, exclusion, priority truncation
//! - [`selector`]: composes the stages into [`ToolSelector`]
//! - [`stats`]: reduction statistics and the one-line summary
//!
//! Everything here is pure: no I/O and no state between calls.

pub mod analyzer;
pub mod filter;
pub mod selector;
pub mod stats;
pub mod suggester;

pub use analyzer::{analyze_query, QueryAnalysis};
pub use filter::filter_tools;
pub use selector::{ToolSelection, ToolSelector};
pub use stats::{compute_stats, format_summary, SelectionStats};
pub use suggester::suggest_categories;
