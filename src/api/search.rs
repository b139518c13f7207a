//! Search API endpoint
//!
//! GET /api/v1/search?q=&preview= - Unified search over posts and products

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::api::middleware::AppState;
use crate::services::SearchView;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    /// Cap the lists for the search dropdown
    #[serde(default)]
    pub preview: bool,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(search))
}

/// GET /api/v1/search
///
/// An empty `q` returns `searched: false` rather than an empty result.
async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchView> {
    tracing::debug!("Search q={:?} preview={}", params.q, params.preview);
    Json(state.catalog_service.search(&params.q, params.preview).await)
}
