//! Shared API response types
//!
//! Envelopes around the service views, so that every list endpoint returns
//! an object rather than a bare array.

use serde::Serialize;

use crate::models::{CategoryWithCount, PagedResult, TagWithCount};
use crate::services::{CatalogStatus, PostSummary, ProductView, SuggestionView};

/// Paginated post list response
#[derive(Debug, Serialize)]
pub struct PaginatedPostsResponse {
    pub posts: Vec<PostSummary>,
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl From<PagedResult<PostSummary>> for PaginatedPostsResponse {
    fn from(page: PagedResult<PostSummary>) -> Self {
        Self {
            total_pages: page.total_pages(),
            has_next: page.has_next(),
            has_prev: page.has_prev(),
            total: page.total,
            page: page.page,
            page_size: page.per_page,
            posts: page.items,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub slug: String,
    pub suggestions: Vec<SuggestionView>,
}

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryWithCount>,
}

#[derive(Debug, Serialize)]
pub struct TagListResponse {
    pub tags: Vec<TagWithCount>,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductView>,
}

/// Response for public site info
#[derive(Debug, Serialize)]
pub struct SiteInfoResponse {
    pub version: String,
    pub catalog: CatalogStatus,
    pub total_requests: u64,
    pub avg_response_time_ms: f64,
    pub uptime_seconds: u64,
}
