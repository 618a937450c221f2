//! End-to-end selection: analyse, pick categories, filter.

use serde::Serialize;

use super::analyzer::{analyze_query, QueryAnalysis};
use super::filter::filter_tools;
use super::stats::{compute_stats, format_summary, SelectionStats};
use crate::config::catalog::Catalog;
use crate::config::schema::SelectionConfig;
use crate::types::Tool;

/// Output of [`ToolSelector::select`].
#[derive(Debug, Clone, Serialize)]
pub struct ToolSelection<'a> {
    /// Chosen tools, borrowed from the caller's list.
    pub selected_tools: Vec<&'a Tool>,
    /// Analysis exactly as produced by the analyzer.
    pub analysis: QueryAnalysis,
    /// Detected (or default), suggested, preferred, then non-excluded
    /// always-include categories.
    pub used_categories: Vec<String>,
}

/// Per-request tool selector bound to one catalog.
#[derive(Debug, Clone, Default)]
pub struct ToolSelector {
    catalog: Catalog,
}

impl ToolSelector {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn analyze(&self, query: &str) -> QueryAnalysis {
        analyze_query(query, &self.catalog)
    }

    /// Filter `all_tools` down to `category_ids` under `config`.
    pub fn filter<'a>(
        &self,
        all_tools: &'a [Tool],
        category_ids: &[String],
        config: &SelectionConfig,
    ) -> Vec<&'a Tool> {
        filter_tools(all_tools, category_ids, config, &self.catalog)
    }

    /// Pick the tools to send along with `query`.
    ///
    /// Detected categories come first, or the catalog defaults when nothing
    /// matched. Suggested, preferred and always-include categories follow;
    /// excluded always-include entries are not listed.
    pub fn select<'a>(
        &self,
        query: &str,
        all_tools: &'a [Tool],
        config: &SelectionConfig,
    ) -> ToolSelection<'a> {
        let analysis = self.analyze(query);

        let mut categories = if analysis.detected_categories.is_empty() {
            self.catalog.default_categories().to_vec()
        } else {
            analysis.detected_categories.clone()
        };
        append_missing(&mut categories, &analysis.suggested_categories);
        append_missing(&mut categories, &config.preferred_categories);
        for id in &config.always_include_categories {
            if !config.is_excluded(id) && !categories.contains(id) {
                categories.push(id.clone());
            }
        }

        let selected_tools = self.filter(all_tools, &categories, config);

        tracing::debug!(
            categories = ?categories,
            selected = selected_tools.len(),
            total = all_tools.len(),
            "tools selected"
        );

        ToolSelection {
            selected_tools,
            analysis,
            used_categories: categories,
        }
    }

    pub fn stats(&self, selection: &ToolSelection<'_>, all_tools: &[Tool]) -> SelectionStats {
        compute_stats(&selection.selected_tools, all_tools, &self.catalog)
    }

    /// One-line human summary of a selection.
    pub fn summary(&self, selection: &ToolSelection<'_>, all_tools: &[Tool]) -> String {
        let stats = self.stats(selection, all_tools);
        format_summary(
            &selection.analysis,
            &selection.used_categories,
            &stats,
            &self.catalog,
        )
    }
}

fn append_missing(target: &mut Vec<String>, extra: &[String]) {
    for id in extra {
        if !target.contains(id) {
            target.push(id.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
