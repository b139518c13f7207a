//! Presentation-ready views
//!
//! Owned, serializable projections of the catalog entities. These are what
//! the service memoizes and what the API renders. None of them carries
//! hidden keywords.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Author, Category, Post, PostBody, Product, Tag};
use crate::search::{Highlights, SearchResults, Suggestion};

/// Post fields shown in lists and cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub featured_image_url: String,
    pub author: Author,
    pub category: Category,
    pub tags: Vec<Tag>,
    pub published_at: DateTime<Utc>,
    pub reading_time_minutes: u32,
    pub view_count: u64,
    pub like_count: u64,
    pub is_featured: bool,
    pub is_trending: bool,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            slug: post.slug.clone(),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            featured_image_url: post.featured_image_url.clone(),
            author: post.author.clone(),
            category: post.category.clone(),
            tags: post.tags.clone(),
            published_at: post.published_at,
            reading_time_minutes: post.reading_time_minutes,
            view_count: post.view_count,
            like_count: post.like_count,
            is_featured: post.is_featured,
            is_trending: post.is_trending,
        }
    }
}

/// Full post page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub summary: PostSummary,
    pub body: PostBody,
}

impl From<&Post> for PostDetail {
    fn from(post: &Post) -> Self {
        Self {
            summary: PostSummary::from(post),
            body: post.body.clone(),
        }
    }
}

/// Product card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub stock_quantity: u32,
    pub in_stock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            stock_quantity: product.stock_quantity,
            in_stock: product.in_stock(),
            category: product.category.clone(),
        }
    }
}

/// Suggested article with the reason it was suggested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionView {
    #[serde(flatten)]
    pub post: PostSummary,
    pub matching_tags: Vec<Tag>,
    pub tag_score: usize,
    /// 1 when the post shares the reference post's category, else 0
    pub category_match: u8,
}

impl From<&Suggestion<'_>> for SuggestionView {
    fn from(s: &Suggestion<'_>) -> Self {
        Self {
            post: PostSummary::from(s.post),
            matching_tags: s.matching_tags.iter().map(|t| (*t).clone()).collect(),
            tag_score: s.tag_score,
            category_match: u8::from(s.category_match),
        }
    }
}

/// Unified search result.
///
/// `searched` is false when the query was empty; the counts are always the
/// full match counts, even when the lists are preview-capped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchView {
    pub searched: bool,
    pub query: String,
    pub total: usize,
    pub post_count: usize,
    pub product_count: usize,
    pub posts: Vec<PostSummary>,
    pub products: Vec<ProductView>,
}

impl SearchView {
    /// Result of an empty query
    pub fn idle(query: &str) -> Self {
        Self {
            searched: false,
            query: query.to_string(),
            total: 0,
            post_count: 0,
            product_count: 0,
            posts: Vec::new(),
            products: Vec::new(),
        }
    }

    /// Counts from `full`, lists from `shown`
    pub fn searched(query: &str, full: &SearchResults<'_>, shown: &SearchResults<'_>) -> Self {
        Self {
            searched: true,
            query: query.to_string(),
            total: full.total(),
            post_count: full.posts.len(),
            product_count: full.products.len(),
            posts: shown.posts.iter().map(|p| PostSummary::from(*p)).collect(),
            products: shown.products.iter().map(|p| ProductView::from(*p)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightsView {
    pub featured: Vec<PostSummary>,
    pub trending: Vec<PostSummary>,
}

impl From<&Highlights<'_>> for HighlightsView {
    fn from(h: &Highlights<'_>) -> Self {
        Self {
            featured: h.featured.iter().map(|p| PostSummary::from(*p)).collect(),
            trending: h.trending.iter().map(|p| PostSummary::from(*p)).collect(),
        }
    }
}

/// Catalog status for the site info endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStatus {
    pub version: u64,
    pub loaded_at: DateTime<Utc>,
    pub source: String,
    pub post_count: usize,
    pub product_count: usize,
    pub category_count: usize,
    pub tag_count: usize,
}
