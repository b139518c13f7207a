//! Category model
//!
//! This module defines the Category entity. Every post belongs to exactly one
//! category; posts whose backend relation is missing are assigned the
//! placeholder returned by [`Category::uncategorized`].

use serde::{Deserialize, Serialize};

/// Slug of the placeholder category
pub const UNCATEGORIZED_SLUG: &str = "uncategorized";

/// Default accent colour for categories without one
pub const DEFAULT_CATEGORY_COLOR: &str = "#6366f1";

/// Category entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique identifier
    pub id: String,
    /// URL-friendly slug
    pub slug: String,
    /// Category name
    pub name: String,
    /// Category description
    pub description: String,
    /// Accent colour, used by the UI only
    pub color: String,
}

impl Category {
    /// Create a new Category with an empty description and the default colour.
    pub fn new(id: impl Into<String>, slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            name: name.into(),
            description: String::new(),
            color: DEFAULT_CATEGORY_COLOR.to_string(),
        }
    }

    /// Placeholder used when a post has no category relation
    pub fn uncategorized() -> Self {
        Self::new(UNCATEGORIZED_SLUG, UNCATEGORIZED_SLUG, "Uncategorized")
    }

    /// Check if this category is the placeholder "uncategorized" category
    pub fn is_default(&self) -> bool {
        self.slug == UNCATEGORIZED_SLUG
    }
}

/// Category with the number of posts filed under it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    pub post_count: usize,
}
