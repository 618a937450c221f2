//! Category-based tool filtering with priority truncation.

use std::collections::HashSet;

use crate::config::catalog::{Catalog, UNRANKED_PRIORITY};
use crate::config::schema::SelectionConfig;
use crate::types::Tool;

/// Resolve the final set of category ids for a request.
///
/// `category_ids` plus `always_include_categories`, minus
/// `excluded_categories`. Exclusion wins over both sources. Order is first
/// occurrence, duplicates removed.
pub fn resolve_categories(category_ids: &[String], config: &SelectionConfig) -> Vec<String> {
    let mut resolved: Vec<String> = Vec::new();
    for id in category_ids
        .iter()
        .chain(config.always_include_categories.iter())
    {
        if config.is_excluded(id) || resolved.contains(id) {
            continue;
        }
        resolved.push(id.clone());
    }
    resolved
}

/// Keep the tools that belong to `category_ids` and fit the cap.
///
/// Unknown category ids and tool names are ignored. Under the cap the
/// caller's order is preserved; over it, tools are stable-sorted by
/// effective priority and truncated. The returned references point into
/// `all_tools`.
pub fn filter_tools<'a>(
    all_tools: &'a [Tool],
    category_ids: &[String],
    config: &SelectionConfig,
    catalog: &Catalog,
) -> Vec<&'a Tool> {
    let included = resolve_categories(category_ids, config);

    let mut tool_ids: HashSet<&str> = HashSet::new();
    for id in &included {
        match catalog.get(id) {
            Some(category) => tool_ids.extend(category.tool_ids.iter().map(String::as_str)),
            None => tracing::warn!(category = %id, "ignoring unknown category"),
        }
    }

    let mut result: Vec<&Tool> = all_tools
        .iter()
        .filter(|t| tool_ids.contains(t.name.as_str()))
        .collect();

    let max = config.max_tools_per_request;
    if result.len() > max {
        let priorities = catalog.tool_priorities();
        result.sort_by_key(|t| {
            priorities
                .get(t.name.as_str())
                .copied()
                .unwrap_or(UNRANKED_PRIORITY)
        });
        tracing::debug!(
            matched = result.len(),
            max,
            "truncating tool set by priority"
        );
        result.truncate(max);
    }

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
