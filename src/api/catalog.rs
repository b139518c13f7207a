//! Taxonomy and shop endpoints
//!
//! - GET /api/v1/categories - Categories with post counts
//! - GET /api/v1/tags - Tags with post counts
//! - GET /api/v1/products - Active products

use axum::{extract::State, routing::get, Json, Router};

use crate::api::middleware::AppState;
use crate::api::responses::{CategoryListResponse, ProductListResponse, TagListResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/tags", get(list_tags))
        .route("/products", get(list_products))
}

async fn list_categories(State(state): State<AppState>) -> Json<CategoryListResponse> {
    Json(CategoryListResponse {
        categories: state.catalog_service.categories().await,
    })
}

async fn list_tags(State(state): State<AppState>) -> Json<TagListResponse> {
    Json(TagListResponse {
        tags: state.catalog_service.tags().await,
    })
}

async fn list_products(State(state): State<AppState>) -> Json<ProductListResponse> {
    Json(ProductListResponse {
        products: state.catalog_service.products().await,
    })
}
