//! Post model
//!
//! This module provides:
//! - `Post` entity representing a published blog post
//! - `PostBody` / `ContentBlock` for plain-text or block-structured bodies
//! - Pagination types for list queries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Author, Category, Tag};

/// Reading time used when the backend has none
pub const DEFAULT_READING_TIME_MINUTES: u32 = 5;

/// Post entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    /// Unique identifier
    pub id: String,
    /// Post title
    pub title: String,
    /// URL-friendly slug
    pub slug: String,
    /// Short summary shown in lists
    pub excerpt: String,
    /// Body content
    pub body: PostBody,
    /// Featured image URL
    pub featured_image_url: String,
    /// Author
    pub author: Author,
    /// Category
    pub category: Category,
    /// Tags in display order
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Publication timestamp
    pub published_at: DateTime<Utc>,
    /// Estimated reading time in minutes, always positive
    pub reading_time_minutes: u32,
    /// View count
    #[serde(default)]
    pub view_count: u64,
    /// Like count
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_trending: bool,
    /// Search-only keywords curated by editors; never rendered
    #[serde(default, skip_serializing)]
    pub hidden_keywords: Vec<String>,
}

impl Post {
    /// Create a post with the given identity, author and category.
    ///
    /// Everything else starts empty: no tags, plain-text empty body, epoch
    /// publication time and the default reading time.
    pub fn new(
        id: impl Into<String>,
        slug: impl Into<String>,
        title: impl Into<String>,
        author: Author,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            slug: slug.into(),
            excerpt: String::new(),
            body: PostBody::default(),
            featured_image_url: String::new(),
            author,
            category,
            tags: Vec::new(),
            published_at: DateTime::<Utc>::UNIX_EPOCH,
            reading_time_minutes: DEFAULT_READING_TIME_MINUTES,
            view_count: 0,
            like_count: 0,
            is_featured: false,
            is_trending: false,
            hidden_keywords: Vec::new(),
        }
    }

    /// Check whether the post carries a tag with the given slug
    pub fn has_tag_slug(&self, slug: &str) -> bool {
        self.tags.iter().any(|t| t.slug == slug)
    }
}

/// Post body: either plain text or a list of typed blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", content = "content", rename_all = "lowercase")]
pub enum PostBody {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl Default for PostBody {
    fn default() -> Self {
        PostBody::Text(String::new())
    }
}

impl PostBody {
    /// All textual content of the body, one piece per line.
    ///
    /// Block bodies contribute heading, paragraph and quote text plus quote
    /// and image captions. Image URLs are not text.
    pub fn plain_text(&self) -> String {
        match self {
            PostBody::Text(text) => text.clone(),
            PostBody::Blocks(blocks) => {
                let mut parts: Vec<&str> = Vec::new();
                for block in blocks {
                    match block {
                        ContentBlock::Heading { text, .. } | ContentBlock::Paragraph { text } => {
                            parts.push(text)
                        }
                        ContentBlock::Quote { text, caption } => {
                            parts.push(text);
                            if let Some(caption) = caption {
                                parts.push(caption);
                            }
                        }
                        ContentBlock::Image { caption, .. } => {
                            if let Some(caption) = caption {
                                parts.push(caption);
                            }
                        }
                    }
                }
                parts.join("\n")
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            PostBody::Text(text) => text.trim().is_empty(),
            PostBody::Blocks(blocks) => blocks.is_empty(),
        }
    }
}

/// A typed block of a structured post body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// Heading, level 1 or 2
    Heading { level: u8, text: String },
    Paragraph { text: String },
    Quote {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Image {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
}

/// Pagination parameters for list queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListParams {
    /// Page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub per_page: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
        }
    }
}

impl ListParams {
    /// Create new pagination parameters
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, 100),
        }
    }

    /// Index of the first item of the page
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.per_page as usize
    }

    pub fn limit(&self) -> usize {
        self.per_page as usize
    }

    /// Cut the page out of a full, already ordered list
    pub fn paginate<T>(&self, items: Vec<T>) -> PagedResult<T> {
        let total = items.len();
        let page = items
            .into_iter()
            .skip(self.offset())
            .take(self.limit())
            .collect();
        PagedResult::new(page, total, self)
    }
}

/// Paginated result container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult<T> {
    /// Items in the current page
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: usize,
    /// Current page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub per_page: u32,
}

impl<T> PagedResult<T> {
    /// Create a new paginated result
    pub fn new(items: Vec<T>, total: usize, params: &ListParams) -> Self {
        Self {
            items,
            total,
            page: params.page,
            per_page: params.per_page,
        }
    }

    /// Calculate the total number of pages
    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(self.per_page as usize) as u32
    }

    /// Check if there is a next page
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Check if there is a previous page
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Convert the items while keeping the page metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

impl<T> Default for PagedResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            per_page: 10,
        }
    }
}
