//! Tool list loading and API metadata extraction.
//!
//! The backend serves its tools as JSON. Many entries only document the
//! HTTP call inside the description ("... GET /api/books ..."), so
//! [`enrich_api_metadata`] lifts that pair into `api_method`/`api_endpoint`.

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::{BiblioError, Result};
use crate::types::{ApiMethod, Tool};

/// Accepted top-level shapes of a tool document.
#[derive(Deserialize)]
#[serde(untagged)]
enum ToolDocument {
    List(Vec<Tool>),
    Wrapped { tools: Vec<Tool> },
}

fn api_call_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(GET|POST|PUT|PATCH|DELETE)\s+(/api/[^\s,;)]*)").ok())
        .as_ref()
}

/// Parse a tool document: a JSON array, or an object with a `tools` array.
///
/// API metadata is extracted from descriptions and tool names must be unique.
pub fn parse_tools(json: &str) -> Result<Vec<Tool>> {
    let mut tools = match serde_json::from_str::<ToolDocument>(json)? {
        ToolDocument::List(tools) | ToolDocument::Wrapped { tools } => tools,
    };

    let mut seen = HashSet::new();
    for tool in &tools {
        if tool.name.trim().is_empty() {
            return Err(BiblioError::ToolCatalog("tool with empty name".into()));
        }
        if !seen.insert(tool.name.as_str()) {
            return Err(BiblioError::ToolCatalog(format!(
                "duplicate tool name: {}",
                tool.name
            )));
        }
    }

    enrich_api_metadata(&mut tools);
    Ok(tools)
}

/// Read and parse a tool document from disk.
pub fn load_tools(path: &Path) -> Result<Vec<Tool>> {
    let json = std::fs::read_to_string(path)?;
    let tools = parse_tools(&json)?;
    tracing::info!("Loaded {} tools from {}", tools.len(), path.display());
    Ok(tools)
}

/// Find the first `METHOD /api/...` pair in a description.
pub fn extract_api_call(description: &str) -> Option<(ApiMethod, String)> {
    let caps = api_call_regex()?.captures(description)?;
    let method = ApiMethod::from_str_loose(caps.get(1)?.as_str())?;
    let endpoint = caps.get(2)?.as_str().trim_end_matches('.').to_string();
    Some((method, endpoint))
}

/// Fill `api_method`/`api_endpoint` from descriptions where they are missing.
///
/// Values already present are kept.
pub fn enrich_api_metadata(tools: &mut [Tool]) {
    for tool in tools.iter_mut() {
        if tool.api_method.is_some() && tool.api_endpoint.is_some() {
            continue;
        }
        if let Some((method, endpoint)) = extract_api_call(&tool.description) {
            if tool.api_method.is_none() {
                tool.api_method = Some(method);
            }
            if tool.api_endpoint.is_none() {
                tool.api_endpoint = Some(endpoint);
            }
        }
    }
}

/// Tools known to call GET endpoints.
pub fn read_only_tools(tools: &[Tool]) -> Vec<&Tool> {
    tools.iter().filter(|t| t.is_read_only()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use test_case::test_case;

    #[test_case("Список книг. GET /api/books", Some((ApiMethod::Get, "/api/books")) ; "trailing call")]
    #[test_case("post /api/reservations creates one", Some((ApiMethod::Post, "/api/reservations")) ; "lowercase method")]
    #[test_case("Calls (DELETE /api/users/{id})", Some((ApiMethod::Delete, "/api/users/{id}")) ; "parenthesised")]
    #[test_case("Ends with a period PATCH /api/journals/{id}.", Some((ApiMethod::Patch, "/api/journals/{id}")) ; "trailing period")]
    #[test_case("GET /health", None ; "not an api path")]
    #[test_case("No endpoint here", None ; "no call")]
    fn extract_api_call_cases(description: &str, expected: Option<(ApiMethod, &str)>) {
        let got = extract_api_call(description);
        assert_eq!(
            got.as_ref().map(|(m, e)| (*m, e.as_str())),
            expected
        );
    }

    #[test]
    fn parse_plain_array() {
        let json = r#"[
            {"name": "get_books", "description": "List books GET /api/books"},
            {"name": "delete_book", "description": "DELETE /api/books/{id}"}
        ]"#;
        let tools = parse_tools(json).unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].api_method, Some(ApiMethod::Get));
        assert_eq!(tools[1].api_endpoint.as_deref(), Some("/api/books/{id}"));
    }

    #[test]
    fn parse_wrapped_object() {
        let json = r#"{"tools": [{"name": "get_users"}]}"#;
        let tools = parse_tools(json).unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].api_method, None);
    }

    #[test]
    fn explicit_metadata_is_kept() {
        let json = r#"[{
            "name": "search_books",
            "description": "POST /api/books/search",
            "apiMethod": "GET",
            "apiEndpoint": "/api/books"
        }]"#;
        let tools = parse_tools(json).unwrap();
        assert_eq!(tools[0].api_method, Some(ApiMethod::Get));
        assert_eq!(tools[0].api_endpoint.as_deref(), Some("/api/books"));
    }

    #[test]
    fn duplicate_names_rejected() {
        let json = r#"[{"name": "a"}, {"name": "a"}]"#;
        let err = parse_tools(json).unwrap_err();
        assert!(matches!(err, BiblioError::ToolCatalog(_)));
    }

    #[test]
    fn empty_name_rejected() {
        let err = parse_tools(r#"[{"name": "  "}]"#).unwrap_err();
        assert!(matches!(err, BiblioError::ToolCatalog(_)));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            parse_tools("{\"tools\": 3}").unwrap_err(),
            BiblioError::Json(_)
        ));
    }

    #[test]
    fn read_only_filter_keeps_get_tools() {
        let json = r#"[
            {"name": "get_books", "description": "GET /api/books"},
            {"name": "create_book", "description": "POST /api/books"},
            {"name": "mystery"}
        ]"#;
        let tools = parse_tools(json).unwrap();
        let read_only = read_only_tools(&tools);
        let names: Vec<&str> = read_only.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["get_books"]);
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tools.json");
        let json = r#"[{"name": "get_roles", "description": "GET /api/roles"}]"#;
        std::fs::write(&path, json).unwrap();
        let tools = load_tools(&path).unwrap();
        assert_eq!(tools[0].name, "get_roles");
        assert!(tools[0].is_read_only());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_tools(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, BiblioError::Io(_)));
    }
}
