//! API layer - HTTP handlers and routing
//!
//! Read-only JSON API under `/api/v1`:
//! - Unified search
//! - Blog list, post detail, suggestions and highlights
//! - Categories, tags and products
//! - Site info

pub mod catalog;
pub mod common;
pub mod middleware;
pub mod posts;
pub mod responses;
pub mod search;
pub mod site;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

pub use middleware::{ApiError, AppState, RequestStats};

/// Build the main API router
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .nest("/search", search::router())
        .nest("/posts", posts::router())
        .nest("/site", site::router())
        .merge(catalog::router())
        .layer(axum_middleware::from_fn(middleware::add_api_cache_headers))
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let cors = match cors_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]),
        Err(_) => {
            tracing::warn!("Invalid CORS origin {:?}, cross-origin requests disabled", cors_origin);
            CorsLayer::new()
        }
    };

    Router::new()
        .nest("/api/v1", build_api_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::request_stats_middleware,
        ))
        .with_state(state)
}
