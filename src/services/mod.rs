//! Services layer
//!
//! Coordinates the content source, the ranking core and the result cache:
//! - Holding the current catalog and reloading it
//! - Running search, blog-list and suggestion queries
//! - Projecting results into presentation-ready views

pub mod catalog;
pub mod views;

pub use catalog::{CatalogService, CatalogServiceError};
pub use views::{
    CatalogStatus, HighlightsView, PostDetail, PostSummary, ProductView, SearchView,
    SuggestionView,
};
