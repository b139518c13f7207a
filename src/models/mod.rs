//! Data models
//!
//! This module contains the canonical entities used throughout Pencraft:
//! - Content entities (Post, Author, Category, Tag, Product)
//! - The `Catalog` snapshot the ranking and search operations run against
//! - Pagination types for list queries

mod author;
mod catalog;
mod category;
mod post;
mod product;
mod tag;

pub use author::{Author, AuthorRole, SocialLinks, UNKNOWN_AUTHOR_NAME};
pub use catalog::Catalog;
pub use category::{Category, CategoryWithCount, DEFAULT_CATEGORY_COLOR, UNCATEGORIZED_SLUG};
pub use post::{ContentBlock, ListParams, PagedResult, Post, PostBody, DEFAULT_READING_TIME_MINUTES};
pub use product::Product;
pub use tag::{Tag, TagWithCount};
