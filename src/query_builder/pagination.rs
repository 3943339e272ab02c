use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;
use crate::constants::pagination::DEFAULT_PAGE;

/// Page window for a list query.
///
/// Pages are 1-indexed. Construction never yields a zero page or a zero limit:
/// missing, non-numeric and non-positive inputs fall back to the defaults. There is no
/// upper bound on the page; asking for a page past the data yields an empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    limit: u32,
}

/// Pagination metadata returned alongside a page of tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: u64,
    pub page: u32,
    pub total_pages: u64,
}

impl Pagination {
    /// Create pagination with page number and per-page count
    pub fn new(page: u32, limit: u32) -> Self {
        let defaults = PaginationConfig::default();
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { defaults.default_limit } else { limit },
        }
    }

    /// Coerce raw `page` / `limit` query values.
    pub fn from_params(page: Option<&str>, limit: Option<&str>, config: &PaginationConfig) -> Self {
        let page = parse_positive(page).unwrap_or(DEFAULT_PAGE);
        let limit = parse_positive(limit)
            .map(|limit| limit.min(config.max_limit))
            .unwrap_or(config.default_limit);
        Self::new(page, limit)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of matching rows to skip
    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Calculate total pages given a total count; never less than 1
    pub fn total_pages(&self, total: u64) -> u64 {
        if total == 0 {
            1
        } else {
            total.div_ceil(u64::from(self.limit))
        }
    }

    pub fn page_info(&self, total: u64) -> PageInfo {
        PageInfo {
            total,
            page: self.page,
            total_pages: self.total_pages(total),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, PaginationConfig::default().default_limit)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    let value = raw?.trim().parse::<i64>().ok()?;
    if value <= 0 {
        return None;
    }
    Some(u32::try_from(value).unwrap_or(u32::MAX))
}
