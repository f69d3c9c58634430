//! Offset pagination primitives shared by the listing endpoints

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used when the caller does not ask for one
pub const DEFAULT_LIMIT: u32 = 20;

/// Largest page size a caller may request; bigger values are clamped
pub const MAX_LIMIT: u32 = 100;

/// Rejected pagination parameters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("invalid 'page' parameter: must be a positive integer")]
    InvalidPage,

    #[error("invalid 'limit' parameter: must be a positive integer")]
    InvalidLimit,
}

/// Raw `?page=&limit=` query parameters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    /// Page number (1-based)
    pub page: Option<u32>,
    /// Number of items per page
    pub limit: Option<u32>,
}

/// A validated page request: `page >= 1`, `1 <= limit <= MAX_LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Validate explicit values; a limit above `MAX_LIMIT` is clamped
    pub fn new(page: u32, limit: u32) -> Result<Self, PageError> {
        if page == 0 {
            return Err(PageError::InvalidPage);
        }
        if limit == 0 {
            return Err(PageError::InvalidLimit);
        }

        Ok(Self {
            page,
            limit: limit.min(MAX_LIMIT),
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows to skip: `(page - 1) * limit`
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl TryFrom<PageQuery> for PageRequest {
    type Error = PageError;

    fn try_from(query: PageQuery) -> Result<Self, Self::Error> {
        Self::new(
            query.page.unwrap_or(1),
            query.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}

/// One page of results plus the totals needed to render a pager
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: i64,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            data,
            total,
            page: request.page,
            limit: request.limit,
            total_pages: total_pages(total, request.limit),
        }
    }

    /// The short-circuit result when the count query found nothing
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }
}

/// `ceil(total / limit)`, zero when there is nothing to page through
pub fn total_pages(total: i64, limit: u32) -> i64 {
    if total <= 0 || limit == 0 {
        return 0;
    }
    let limit = i64::from(limit);
    (total + limit - 1) / limit
}
