//! Before/after statistics and the human-readable selection summary.

use serde::Serialize;

use super::analyzer::QueryAnalysis;
use crate::config::catalog::Catalog;
use crate::types::Tool;

/// How much a selection shrank the tool list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionStats {
    pub total_tools: usize,
    pub selected_count: usize,
    /// `round((1 - selected / total) * 100)`, 0 for an empty tool list.
    pub reduction_percentage: i64,
    /// Catalog categories owning at least one selected tool, in catalog order.
    pub categories_used: Vec<String>,
}

pub fn compute_stats(selected: &[&Tool], all_tools: &[Tool], catalog: &Catalog) -> SelectionStats {
    let total_tools = all_tools.len();
    let selected_count = selected.len();

    let categories_used = catalog
        .categories()
        .iter()
        .filter(|c| selected.iter().any(|t| c.has_tool(&t.name)))
        .map(|c| c.id.clone())
        .collect();

    SelectionStats {
        total_tools,
        selected_count,
        reduction_percentage: reduction_percentage(selected_count, total_tools),
        categories_used,
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn reduction_percentage(selected: usize, total: usize) -> i64 {
    if total == 0 {
        return 0;
    }
    ((1.0 - selected as f64 / total as f64) * 100.0).round() as i64
}

/// Render a one-line summary, e.g.
/// `Книги, Пользователи | 13/40 tools (-68%) | detected: books 14%`.
pub fn format_summary(
    analysis: &QueryAnalysis,
    used_categories: &[String],
    stats: &SelectionStats,
    catalog: &Catalog,
) -> String {
    let names: Vec<&str> = used_categories
        .iter()
        .map(|id| catalog.display_name(id))
        .collect();

    let mut line = format!(
        "{} | {}/{} tools (-{}%)",
        if names.is_empty() {
            "no categories".to_string()
        } else {
            names.join(", ")
        },
        stats.selected_count,
        stats.total_tools,
        stats.reduction_percentage,
    );

    if analysis.detected_categories.is_empty() {
        line.push_str(" | no keywords matched, using defaults");
    } else {
        let detected: Vec<String> = analysis
            .detected_categories
            .iter()
            .map(|id| format!("{id} {:.0}%", analysis.confidence_of(id) * 100.0))
            .collect();
        line.push_str(&format!(" | detected: {}", detected.join(", ")));
    }

    if !analysis.suggested_categories.is_empty() {
        line.push_str(&format!(
            " | suggested: {}",
            analysis.suggested_categories.join(", ")
        ));
    }

    line
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
