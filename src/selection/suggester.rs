//! Hand-authored rules that add related categories to a detected set.
//!
//! Rules are evaluated in order. Extend by appending to [`SUGGESTION_RULES`].

use crate::config::catalog::{
    CATEGORY_BOOKS, CATEGORY_REPORTS, CATEGORY_RESERVATIONS, CATEGORY_ROLES, CATEGORY_USERS,
};

/// Words hinting that a users query is really about roles or permissions.
pub const ROLE_WORDS: &[&str] = &[
    "роль",
    "роли",
    "прав",
    "администратор",
    "админ",
    "role",
    "permission",
    "admin",
];

/// Interrogative and statistical words that call for reporting tools.
pub const QUESTION_WORDS: &[&str] = &[
    "сколько",
    "какие",
    "какой",
    "где",
    "когда",
    "статистик",
    "how many",
    "which",
    "where",
    "when",
    "statistic",
];

/// Input seen by a rule predicate.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub detected: &'a [String],
    /// Trimmed, lower-cased query.
    pub query: &'a str,
}

impl RuleContext<'_> {
    pub fn is_detected(&self, category: &str) -> bool {
        self.detected.iter().any(|c| c == category)
    }

    pub fn mentions_any(&self, words: &[&str]) -> bool {
        words.iter().any(|w| self.query.contains(w))
    }
}

/// One `(predicate, suggested category)` pair.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionRule {
    /// Short label used in logs.
    pub name: &'static str,
    pub suggests: &'static str,
    pub applies: fn(&RuleContext<'_>) -> bool,
}

pub static SUGGESTION_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        name: "reservations_need_users",
        suggests: CATEGORY_USERS,
        applies: |ctx| ctx.is_detected(CATEGORY_RESERVATIONS),
    },
    SuggestionRule {
        name: "reservations_need_books",
        suggests: CATEGORY_BOOKS,
        applies: |ctx| ctx.is_detected(CATEGORY_RESERVATIONS),
    },
    SuggestionRule {
        name: "users_with_role_words",
        suggests: CATEGORY_ROLES,
        applies: |ctx| ctx.is_detected(CATEGORY_USERS) && ctx.mentions_any(ROLE_WORDS),
    },
    SuggestionRule {
        name: "questions_need_reports",
        suggests: CATEGORY_REPORTS,
        applies: |ctx| ctx.mentions_any(QUESTION_WORDS),
    },
];

/// Apply [`SUGGESTION_RULES`] to a detected set.
///
/// `normalized_query` must already be trimmed and lower-cased. A rule never
/// suggests an already detected category, and each suggestion appears once.
pub fn suggest_categories(detected: &[String], normalized_query: &str) -> Vec<String> {
    suggest_with_rules(SUGGESTION_RULES, detected, normalized_query)
}

/// Apply an explicit rule list.
pub fn suggest_with_rules(
    rules: &[SuggestionRule],
    detected: &[String],
    normalized_query: &str,
) -> Vec<String> {
    let ctx = RuleContext {
        detected,
        query: normalized_query,
    };
    let mut suggestions: Vec<String> = Vec::new();

    for rule in rules {
        if ctx.is_detected(rule.suggests) || suggestions.iter().any(|s| s == rule.suggests) {
            continue;
        }
        if (rule.applies)(&ctx) {
            tracing::trace!(rule = rule.name, category = rule.suggests, "suggestion rule fired");
            suggestions.push(rule.suggests.to_string());
        }
    }

    suggestions
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn ids(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reservations_suggest_users_then_books() {
        let s = suggest_categories(&ids(&["reservations"]), "забронировать");
        assert_eq!(s, vec!["users", "books"]);
    }

    #[test]
    fn reservations_skip_already_detected() {
        let s = suggest_categories(&ids(&["reservations", "books"]), "забронировать книгу");
        assert_eq!(s, vec!["users"]);
    }

    #[test_case("сменить роль пользователя" ; "russian role")]
    #[test_case("дать права читателю" ; "russian rights")]
    #[test_case("grant admin to user" ; "english admin")]
    #[test_case("user permission" ; "english permission")]
    fn users_with_role_words_suggest_roles(query: &str) {
        let s = suggest_categories(&ids(&["users"]), query);
        assert_eq!(s, vec!["roles"]);
    }

    #[test]
    fn role_words_without_users_do_nothing() {
        let s = suggest_categories(&ids(&["books"]), "роль");
        assert!(s.is_empty());
    }

    #[test]
    fn roles_not_suggested_when_detected() {
        let s = suggest_categories(&ids(&["users", "roles"]), "роль пользователя");
        assert!(s.is_empty());
    }

    #[test_case("сколько книг выдано" ; "how many ru")]
    #[test_case("какие книги популярны" ; "which ru")]
    #[test_case("когда вернут книгу" ; "when ru")]
    #[test_case("which books are overdue" ; "which en")]
    #[test_case("how many readers" ; "how many en")]
    fn question_words_suggest_reports(query: &str) {
        let s = suggest_categories(&[], query);
        assert_eq!(s, vec!["reports"]);
    }

    #[test]
    fn reports_not_suggested_when_detected() {
        let s = suggest_categories(&ids(&["reports"]), "статистика выдач");
        assert!(s.is_empty());
    }

    #[test]
    fn all_rules_fire_in_order() {
        let s = suggest_categories(&ids(&["reservations"]), "сколько броней");
        assert_eq!(s, vec!["users", "books", "reports"]);
    }

    #[test]
    fn duplicate_suggestions_collapse() {
        let rules = [
            SuggestionRule {
                name: "a",
                suggests: "x",
                applies: |_| true,
            },
            SuggestionRule {
                name: "b",
                suggests: "x",
                applies: |_| true,
            },
        ];
        assert_eq!(suggest_with_rules(&rules, &[], ""), vec!["x"]);
    }

    #[test]
    fn empty_query_suggests_nothing() {
        assert!(suggest_categories(&[], "").is_empty());
    }
}
