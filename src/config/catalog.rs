//! Category catalog: the keyword buckets tools are grouped into.
//!
//! A [`Catalog`] is an immutable value handed to the selector at construction
//! time. [`Catalog::library`] is the built-in catalog for the library
//! back office; a YAML config may replace it wholesale.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{BiblioError, Result};

// ---------------------------------------------------------------------------
// Category ids of the built-in catalog
// ---------------------------------------------------------------------------

pub const CATEGORY_BOOKS: &str = "books";
pub const CATEGORY_USERS: &str = "users";
pub const CATEGORY_RESERVATIONS: &str = "reservations";
pub const CATEGORY_ROLES: &str = "roles";
pub const CATEGORY_JOURNALS: &str = "journals";
pub const CATEGORY_NOTIFICATIONS: &str = "notifications";
pub const CATEGORY_REPORTS: &str = "reports";
pub const CATEGORY_SYSTEM: &str = "system";

/// All built-in category ids, in catalog order.
pub const ALL_CATEGORIES: &[&str] = &[
    CATEGORY_BOOKS,
    CATEGORY_USERS,
    CATEGORY_RESERVATIONS,
    CATEGORY_ROLES,
    CATEGORY_JOURNALS,
    CATEGORY_NOTIFICATIONS,
    CATEGORY_REPORTS,
    CATEGORY_SYSTEM,
];

/// Categories used when a query matches nothing.
pub const DEFAULT_CATEGORIES: &[&str] = &[CATEGORY_BOOKS, CATEGORY_USERS, CATEGORY_RESERVATIONS];

/// Priority given to tools no catalog category declares. Sorts last.
pub const UNRANKED_PRIORITY: u32 = u32::MAX;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// A named bucket of related backend tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique key, e.g. `"reservations"`.
    pub id: String,
    /// Human-readable label.
    pub display_name: String,
    /// Substrings matched against the lower-cased query.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Lower value wins when an oversized tool set is truncated.
    #[serde(default)]
    pub priority: u32,
    /// Names of the tools that belong to this category.
    #[serde(default)]
    pub tool_ids: Vec<String>,
}

impl Category {
    /// Whether this category declares `tool_name`.
    pub fn has_tool(&self, tool_name: &str) -> bool {
        self.tool_ids.iter().any(|t| t == tool_name)
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Immutable, ordered set of categories plus the fallback category list.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    default_categories: Vec<String>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate category ids.
    ///
    /// `default_categories` may name ids the catalog does not contain; they
    /// simply contribute no tools.
    pub fn new(categories: Vec<Category>, default_categories: Vec<String>) -> Result<Self> {
        let mut seen = HashSet::new();
        for c in &categories {
            if !seen.insert(c.id.as_str()) {
                return Err(BiblioError::DuplicateCategory(c.id.clone()));
            }
        }
        Ok(Self {
            categories,
            default_categories,
        })
    }

    /// The built-in library back-office catalog.
    pub fn library() -> Self {
        Self {
            categories: library_categories(),
            default_categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Categories in catalog order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Fallback categories for queries nothing matched.
    pub fn default_categories(&self) -> &[String] {
        &self.default_categories
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Display name for `id`, falling back to the id itself.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|c| c.display_name.as_str()).unwrap_or(id)
    }

    /// Map every declared tool to its effective priority.
    ///
    /// A tool declared by several categories takes the minimum priority.
    pub fn tool_priorities(&self) -> HashMap<&str, u32> {
        let mut priorities: HashMap<&str, u32> = HashMap::new();
        for category in &self.categories {
            for tool in &category.tool_ids {
                priorities
                    .entry(tool.as_str())
                    .and_modify(|p| *p = (*p).min(category.priority))
                    .or_insert(category.priority);
            }
        }
        priorities
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::library()
    }
}

// ---------------------------------------------------------------------------
// Built-in catalog data
// ---------------------------------------------------------------------------

fn library_categories() -> Vec<Category> {
    vec![
        category(
            CATEGORY_BOOKS,
            "Книги",
            &[
                "книг",
                "book",
                "издани",
                "автор",
                "isbn",
                "экземпляр",
                "каталог книг",
            ],
            1,
            &[
                "get_books",
                "get_book_by_id",
                "search_books",
                "create_book",
                "update_book",
                "delete_book",
                "get_book_copies",
            ],
        ),
        category(
            CATEGORY_USERS,
            "Пользователи",
            &[
                "пользовател",
                "читател",
                "user",
                "reader",
                "профил",
                "аккаунт",
            ],
            2,
            &[
                "get_users",
                "get_user_by_id",
                "search_users",
                "create_user",
                "update_user",
                "delete_user",
            ],
        ),
        category(
            CATEGORY_RESERVATIONS,
            "Бронирования",
            &[
                "брон",
                "резерв",
                "reservation",
                "reserve",
                "заказ книг",
                "выдач",
                "вернуть книгу",
                "забронировать",
            ],
            1,
            &[
                "get_reservations",
                "get_reservation_by_id",
                "create_reservation",
                "update_reservation_status",
                "cancel_reservation",
                "get_user_reservations",
                "get_overdue_reservations",
            ],
        ),
        // Keep ten keywords: one role word alone must not clear the 0.1 threshold.
        category(
            CATEGORY_ROLES,
            "Роли и права",
            &[
                "роль",
                "роли",
                "ролей",
                "права доступа",
                "role",
                "permission",
                "администратор",
                "admin",
                "модератор",
                "привилеги",
            ],
            3,
            &["get_roles", "get_user_roles", "assign_role", "revoke_role"],
        ),
        category(
            CATEGORY_JOURNALS,
            "Журналы",
            &[
                "журнал",
                "journal",
                "периодик",
                "выпуск",
                "issn",
                "doi",
                "статья",
            ],
            3,
            &[
                "get_journals",
                "get_journal_by_id",
                "create_journal",
                "update_journal",
                "lookup_doi_metadata",
            ],
        ),
        category(
            CATEGORY_NOTIFICATIONS,
            "Уведомления",
            &[
                "уведомлен",
                "notification",
                "оповещ",
                "напомин",
                "рассылк",
                "сообщени",
            ],
            4,
            &[
                "get_notifications",
                "send_notification",
                "mark_notification_read",
                "delete_notification",
            ],
        ),
        category(
            CATEGORY_REPORTS,
            "Отчёты",
            &[
                "отчет",
                "отчёт",
                "статистик",
                "report",
                "statistic",
                "аналитик",
                "популярн",
            ],
            4,
            &[
                "get_library_statistics",
                "get_popular_books",
                "get_overdue_reservations",
                "get_activity_report",
            ],
        ),
        category(
            CATEGORY_SYSTEM,
            "Система",
            &[
                "систем",
                "настройк",
                "system",
                "settings",
                "конфигурац",
                "health",
            ],
            5,
            &[
                "get_system_settings",
                "update_system_settings",
                "get_health_status",
                "get_audit_log",
            ],
        ),
    ]
}

/// Convenience constructor for [`Category`].
fn category(
    id: &str,
    display_name: &str,
    keywords: &[&str],
    priority: u32,
    tool_ids: &[&str],
) -> Category {
    Category {
        id: id.to_string(),
        display_name: display_name.to_string(),
        keywords: keywords.iter().map(|s| s.to_string()).collect(),
        priority,
        tool_ids: tool_ids.iter().map(|s| s.to_string()).collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
