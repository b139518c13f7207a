//! Tag model
//!
//! This module defines the Tag entity used to group posts across categories.

use serde::{Deserialize, Serialize};

/// Tag entity.
///
/// Tags link posts across categories and drive both the blog-list tag filter
/// and the suggested-articles scorer. The slug is the stable routing key; the
/// name is display-only and may be Bengali.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Tag {
    /// Unique identifier
    pub id: String,
    /// URL-friendly slug
    pub slug: String,
    /// Tag name
    pub name: String,
}

impl Tag {
    /// Create a new Tag
    pub fn new(id: impl Into<String>, slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            name: name.into(),
        }
    }
}

/// Tag with the number of posts carrying it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagWithCount {
    /// The tag itself
    #[serde(flatten)]
    pub tag: Tag,
    /// Number of posts with this tag
    pub post_count: usize,
}

impl TagWithCount {
    /// Create a new TagWithCount
    pub fn new(tag: Tag, post_count: usize) -> Self {
        Self { tag, post_count }
    }
}
