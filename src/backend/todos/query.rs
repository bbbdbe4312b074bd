//! `GET /api/todos` query parameters.
//!
//! Parsing is lenient: a missing, non-numeric or zero `page`/`limit` falls
//! back to its default instead of failing the request, and blank `search` or
//! `tag` values are ignored.

use serde::Deserialize;

use crate::shared::todo::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub tag: Option<String>,
}

impl ListQuery {
    /// 1-based page number
    pub fn page(&self) -> u32 {
        positive(self.page.as_deref()).unwrap_or(1)
    }

    /// Page size, capped at `MAX_PAGE_SIZE`
    pub fn limit(&self) -> u32 {
        positive(self.limit.as_deref())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE)
    }

    /// Rows to skip for the requested page
    pub fn offset(&self) -> u64 {
        u64::from(self.page() - 1) * u64::from(self.limit())
    }

    pub fn search(&self) -> Option<String> {
        non_blank(self.search.as_deref())
    }

    pub fn tag(&self) -> Option<String> {
        non_blank(self.tag.as_deref())
    }
}

fn positive(raw: Option<&str>) -> Option<u32> {
    raw?.trim().parse::<u32>().ok().filter(|value| *value >= 1)
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
