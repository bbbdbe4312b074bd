//! Todo wire types and input rules.
//!
//! The rules here run twice: once in the API client before a request is sent,
//! and once in the backend before anything is written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::SharedError;

/// Page size used when the request does not carry a usable `limit`
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page a single list request may ask for
pub const MAX_PAGE_SIZE: u32 = 100;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const TITLE_EMPTY_OR_UNDEFINED: &str = "Title cannot be empty or 'undefined'";
pub const COMPLETED_NOT_BOOLEAN: &str = "Completed must be true or false";

/// A todo as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub tags: Vec<String>,
    /// Stored image name, served under `/uploads/<name>`
    pub image_path: Option<String>,
    /// Stored ancillary file name, served under `/uploads/<name>`
    pub file_path: Option<String>,
    /// Owning user id
    pub user: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pagination block of a list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    pub total_count: u64,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total_count: u64) -> Self {
        Self {
            page,
            limit,
            total_pages: total_pages(total_count, limit),
            total_count,
        }
    }
}

/// One page of todos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPage {
    pub todos: Vec<Todo>,
    pub pagination: Pagination,
}

/// Body returned by a successful delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedTodo {
    pub id: Uuid,
}

/// Query string of `GET /api/todos`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// `ceil(total_count / limit)`; zero when there is nothing to page through
pub fn total_pages(total_count: u64, limit: u32) -> u64 {
    if limit == 0 {
        return 0;
    }
    total_count.div_ceil(u64::from(limit))
}

/// Validate a raw title and return it trimmed.
pub fn validate_title(raw: Option<&str>) -> Result<String, SharedError> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(SharedError::validation("title", TITLE_REQUIRED)),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "undefined" {
        return Err(SharedError::validation("title", TITLE_EMPTY_OR_UNDEFINED));
    }

    Ok(trimmed.to_string())
}

/// Parse the string form of the completed flag (`"true"` / `"false"`).
pub fn parse_completed(raw: &str) -> Result<bool, SharedError> {
    let value = raw.trim();
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(SharedError::validation("completed", COMPLETED_NOT_BOOLEAN))
    }
}

/// Trim tags, drop blanks and duplicates. First occurrence wins, so display
/// order follows the order the client sent.
pub fn normalize_tags<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tags: Vec<String> = Vec::new();
    for tag in raw {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || tags.iter().any(|existing| existing == tag) {
            continue;
        }
        tags.push(tag.to_string());
    }
    tags
}
