//! Pencraft - content ranking and search
//!
//! Normalizes raw blog and shop content into a catalog and serves unified
//! search, blog-list filtering and suggested articles over it.

pub mod api;
pub mod cache;
pub mod config;
pub mod models;
pub mod normalize;
pub mod search;
pub mod services;
pub mod source;
