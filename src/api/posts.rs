//! Post API endpoints
//!
//! - GET /api/v1/posts - Blog list (quick filter, sort, pagination)
//! - GET /api/v1/posts/highlights - Featured and trending posts
//! - GET /api/v1/posts/{slug} - Post detail
//! - GET /api/v1/posts/{slug}/suggestions - Suggested articles

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::api::common::{default_page, default_page_size, PaginationQuery};
use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::{PaginatedPostsResponse, SuggestionsResponse};
use crate::models::ListParams;
use crate::search::{BlogListFilter, SortMode};
use crate::services::{HighlightsView, PostDetail};

/// Query parameters for the blog list
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    /// Free-text quick filter
    #[serde(default)]
    pub q: String,
    /// Category slug
    #[serde(default)]
    pub category: String,
    /// Tag slug
    #[serde(default)]
    pub tag: String,
    /// latest, oldest, popular or liked
    #[serde(default)]
    pub sort: String,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl ListPostsQuery {
    fn filter(&self) -> BlogListFilter {
        BlogListFilter::new()
            .with_query(self.q.as_str())
            .with_category(self.category.as_str())
            .with_tag(self.tag.as_str())
            .with_sort(SortMode::parse(&self.sort))
    }

    fn params(&self) -> ListParams {
        ListParams::from(&PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        })
    }
}

/// Build the post router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts))
        .route("/highlights", get(get_highlights))
        .route("/{slug}", get(get_post))
        .route("/{slug}/suggestions", get(get_suggestions))
}

/// GET /api/v1/posts
async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Json<PaginatedPostsResponse> {
    let filter = query.filter();
    let page = state
        .catalog_service
        .list_posts(&filter, &query.params())
        .await;
    Json(page.into())
}

/// GET /api/v1/posts/highlights
async fn get_highlights(State(state): State<AppState>) -> Json<HighlightsView> {
    Json(state.catalog_service.highlights().await)
}

/// GET /api/v1/posts/{slug}
async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PostDetail>, ApiError> {
    let post = state.catalog_service.get_post(&slug).await?;
    Ok(Json(post))
}

/// GET /api/v1/posts/{slug}/suggestions
async fn get_suggestions(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let suggestions = state.catalog_service.suggestions(&slug).await?;
    Ok(Json(SuggestionsResponse { slug, suggestions }))
}
