//! Core domain types shared by the registry and the selection pipeline.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ApiMethod
// ---------------------------------------------------------------------------

/// HTTP method of the backend endpoint a tool ultimately calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApiMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl ApiMethod {
    /// Parse from a loose string (case-insensitive, surrounding whitespace ignored).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "PATCH" => Some(Self::Patch),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Whether calling the endpoint leaves backend state untouched.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::Get)
    }
}

impl std::fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tool
// ---------------------------------------------------------------------------

/// A callable backend operation offered to the LLM.
///
/// Only `name` is interpreted by the selection pipeline. `api_method` and
/// `api_endpoint` are filled in by [`crate::registry::enrich_api_metadata`]
/// when the backend only documents them inside the description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Unique tool identifier.
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// JSON schema of the tool arguments, passed through untouched.
    #[serde(default)]
    pub parameters: serde_json::Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_method: Option<ApiMethod>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
}

impl Tool {
    /// Build a tool with only a name and description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: serde_json::Value::Null,
            api_method: None,
            api_endpoint: None,
        }
    }

    /// True when the tool is known to call a GET endpoint.
    pub fn is_read_only(&self) -> bool {
        self.api_method.is_some_and(|m| m.is_read_only())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
