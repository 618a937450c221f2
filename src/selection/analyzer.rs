//! Keyword scoring of a chat query against the category catalog.
//!
//! Each matched keyword contributes its word count to the category score, so
//! phrases outweigh single words. Confidence divides by the length of the
//! whole keyword list, not by the number of matches.

use std::collections::HashMap;

use serde::Serialize;

use super::suggester::suggest_categories;
use crate::config::catalog::{Catalog, Category};

/// Minimum confidence (exclusive) for a category to count as detected.
pub const DETECTION_THRESHOLD: f64 = 0.1;

/// Result of analysing one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryAnalysis {
    /// Matched categories, most confident first (ties in catalog order).
    pub detected_categories: Vec<String>,
    /// Confidence in `[0, 1]` for every catalog category.
    pub confidence: HashMap<String, f64>,
    /// Categories added by the heuristic rules, never already detected.
    pub suggested_categories: Vec<String>,
}

impl QueryAnalysis {
    /// Confidence for `category`, 0 for ids outside the catalog.
    pub fn confidence_of(&self, category: &str) -> f64 {
        self.confidence.get(category).copied().unwrap_or(0.0)
    }
}

/// Trim and lower-case a query the way keywords are compared.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Score `query` against every category of `catalog`.
pub fn analyze_query(query: &str, catalog: &Catalog) -> QueryAnalysis {
    let normalized = normalize_query(query);

    let mut confidence = HashMap::with_capacity(catalog.len());
    let mut detected: Vec<(&str, f64)> = Vec::new();

    for category in catalog.categories() {
        let (matched, score) = score_category(&normalized, category);
        let conf = category_confidence(score, category.keywords.len());
        confidence.insert(category.id.clone(), conf);

        if matched > 0 && conf > DETECTION_THRESHOLD {
            detected.push((category.id.as_str(), conf));
        }
    }

    // sort_by is stable: equal confidences keep catalog order.
    detected.sort_by(|a, b| b.1.total_cmp(&a.1));
    let detected_categories: Vec<String> = detected
        .into_iter()
        .map(|(id, _)| id.to_string())
        .collect();

    let suggested_categories = suggest_categories(&detected_categories, &normalized);

    tracing::debug!(
        query = %normalized,
        detected = ?detected_categories,
        suggested = ?suggested_categories,
        "query analysed"
    );

    QueryAnalysis {
        detected_categories,
        confidence,
        suggested_categories,
    }
}

/// Count matched keywords and sum their word counts.
///
/// Keywords are compared lower-cased; empty keywords never match.
fn score_category(normalized_query: &str, category: &Category) -> (usize, usize) {
    let mut matched = 0;
    let mut score = 0;
    for keyword in &category.keywords {
        let keyword = keyword.to_lowercase();
        if keyword.trim().is_empty() {
            continue;
        }
        if normalized_query.contains(keyword.as_str()) {
            matched += 1;
            score += keyword.split_whitespace().count();
        }
    }
    (matched, score)
}

#[allow(clippy::cast_precision_loss)]
fn category_confidence(score: usize, keyword_count: usize) -> f64 {
    if keyword_count == 0 {
        return 0.0;
    }
    (score as f64 / keyword_count as f64).min(1.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::catalog::{
        CATEGORY_BOOKS, CATEGORY_RESERVATIONS, CATEGORY_ROLES, CATEGORY_USERS,
    };
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn cat(id: &str, keywords: &[&str]) -> Category {
        Category {
            id: id.to_string(),
            display_name: id.to_uppercase(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            priority: 1,
            tool_ids: Vec::new(),
        }
    }

    fn catalog(categories: Vec<Category>) -> Catalog {
        Catalog::new(categories, Vec::new()).unwrap()
    }

    #[test]
    fn reservation_phrase_detects_reservations_then_books() {
        let analysis = analyze_query("Забронировать книгу", &Catalog::library());
        assert_eq!(
            analysis.detected_categories,
            vec![CATEGORY_RESERVATIONS, CATEGORY_BOOKS]
        );
        // "брон" + "забронировать" out of 8 keywords
        assert_eq!(analysis.confidence_of(CATEGORY_RESERVATIONS), 0.25);
        assert_eq!(analysis.confidence_of(CATEGORY_BOOKS), 1.0 / 7.0);
        assert_eq!(analysis.suggested_categories, vec![CATEGORY_USERS]);
    }

    #[test]
    fn single_role_word_stays_at_threshold() {
        let analysis = analyze_query("изменить роль пользователя", &Catalog::library());
        assert_eq!(analysis.confidence_of(CATEGORY_ROLES), 0.1);
        assert_eq!(analysis.detected_categories, vec![CATEGORY_USERS]);
        assert_eq!(analysis.suggested_categories, vec![CATEGORY_ROLES]);
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "whitespace")]
    #[test_case("привет" ; "greeting")]
    fn no_match_detects_nothing(query: &str) {
        let analysis = analyze_query(query, &Catalog::library());
        assert!(analysis.detected_categories.is_empty());
        assert!(analysis.confidence.values().all(|c| *c == 0.0));
        assert_eq!(analysis.confidence.len(), Catalog::library().len());
    }

    #[test]
    fn multi_word_keyword_weighs_more() {
        let c = catalog(vec![cat("a", &["due date", "x", "y", "z"])]);
        let analysis = analyze_query("what is the due date", &c);
        assert_eq!(analysis.confidence_of("a"), 0.5);
    }

    #[test]
    fn confidence_is_capped_at_one() {
        let c = catalog(vec![cat("a", &["return the book now"])]);
        let analysis = analyze_query("please return the book now", &c);
        assert_eq!(analysis.confidence_of("a"), 1.0);
        assert_eq!(analysis.detected_categories, vec!["a"]);
    }

    #[test]
    fn threshold_is_exclusive() {
        let keywords: Vec<String> = (0..10).map(|i| format!("kw{i}x")).collect();
        let refs: Vec<&str> = keywords.iter().map(String::as_str).collect();
        let c = catalog(vec![cat("a", &refs)]);
        let analysis = analyze_query("kw0x", &c);
        assert_eq!(analysis.confidence_of("a"), 0.1);
        assert!(analysis.detected_categories.is_empty());
    }

    #[test]
    fn ties_keep_catalog_order() {
        let c = catalog(vec![
            cat("second", &["book", "fine"]),
            cat("first", &["loan", "hold"]),
            cat("best", &["book loan"]),
        ]);
        let analysis = analyze_query("book loan", &c);
        assert_eq!(analysis.detected_categories, vec!["best", "second", "first"]);
    }

    #[test]
    fn keywords_compared_lowercase() {
        let c = catalog(vec![cat("a", &["ISBN"])]);
        let analysis = analyze_query("find by isbn", &c);
        assert_eq!(analysis.detected_categories, vec!["a"]);
    }

    #[test]
    fn empty_keywords_never_match() {
        let c = catalog(vec![cat("a", &["", "  "])]);
        let analysis = analyze_query("anything", &c);
        assert!(analysis.detected_categories.is_empty());
        assert_eq!(analysis.confidence_of("a"), 0.0);
    }

    #[test]
    fn category_without_keywords_has_zero_confidence() {
        let c = catalog(vec![cat("a", &[])]);
        assert_eq!(analyze_query("a", &c).confidence_of("a"), 0.0);
    }

    #[test]
    fn unknown_category_confidence_is_zero() {
        let analysis = analyze_query("книга", &Catalog::library());
        assert_eq!(analysis.confidence_of("nonexistent"), 0.0);
    }
}
