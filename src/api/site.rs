//! Public site information API
//!
//! Reports the running version, the loaded catalog and request statistics.

use axum::{extract::State, routing::get, Json, Router};

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::SiteInfoResponse;

/// Build the public site router
pub fn router() -> Router<AppState> {
    Router::new().route("/info", get(get_site_info))
}

/// GET /api/v1/site/info
///
/// 503 until the first catalog load succeeds.
async fn get_site_info(State(state): State<AppState>) -> Result<Json<SiteInfoResponse>, ApiError> {
    let catalog = state.catalog_service.status().await?;
    let stats = &state.request_stats;
    Ok(Json(SiteInfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog,
        total_requests: stats.total_requests(),
        avg_response_time_ms: stats.avg_response_time_ms(),
        uptime_seconds: stats.uptime_seconds(),
    }))
}
