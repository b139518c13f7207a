//! Blog-list quick filter and sort
//!
//! Filters are ANDed together; an empty filter value is a no-op. Sorting is
//! stable and happens after filtering.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::models::Post;

use super::fields::PostField;
use super::matcher::post_matches;
use super::query::SearchQuery;

/// Sort order of the blog list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Newest first
    #[default]
    Latest,
    /// Oldest first
    Oldest,
    /// Most viewed first
    Popular,
    /// Most liked first
    Liked,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Latest => "latest",
            SortMode::Oldest => "oldest",
            SortMode::Popular => "popular",
            SortMode::Liked => "liked",
        }
    }

    /// Parse a sort mode; unknown or empty values fall back to `Latest`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "oldest" => SortMode::Oldest,
            "popular" => SortMode::Popular,
            "liked" => SortMode::Liked,
            _ => SortMode::Latest,
        }
    }

    /// Stable in-place sort
    pub fn sort(&self, posts: &mut [&Post]) {
        match self {
            SortMode::Latest => posts.sort_by_key(|p| Reverse(p.published_at)),
            SortMode::Oldest => posts.sort_by_key(|p| p.published_at),
            SortMode::Popular => posts.sort_by_key(|p| Reverse(p.view_count)),
            SortMode::Liked => posts.sort_by_key(|p| Reverse(p.like_count)),
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Blog-list filter state
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlogListFilter {
    /// Free-text query
    #[serde(default)]
    pub query: String,
    /// Category slug
    #[serde(default)]
    pub category: String,
    /// Tag slug
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub sort: SortMode,
}

impl BlogListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_category(mut self, slug: impl Into<String>) -> Self {
        self.category = slug.into();
        self
    }

    pub fn with_tag(mut self, slug: impl Into<String>) -> Self {
        self.tag = slug.into();
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Check the filters (not the sort) against one post
    pub fn accepts(&self, post: &Post, query: Option<&SearchQuery>, fields: &[PostField]) -> bool {
        let category = self.category.trim();
        let tag = self.tag.trim();

        if !category.is_empty() && post.category.slug != category {
            return false;
        }
        if !tag.is_empty() && !post.has_tag_slug(tag) {
            return false;
        }
        match query {
            Some(q) => post_matches(q, post, fields),
            None => true,
        }
    }

    /// Filter then sort `posts`. `fields` is the quick-filter field set.
    pub fn apply<'a>(&self, posts: &'a [Post], fields: &[PostField]) -> Vec<&'a Post> {
        let query = SearchQuery::parse(&self.query);
        let mut matched: Vec<&Post> = posts
            .iter()
            .filter(|p| self.accepts(p, query.as_ref(), fields))
            .collect();
        self.sort.sort(&mut matched);
        matched
    }

    /// Short stable identifier, for cache keys
    pub fn cache_key(&self) -> String {
        format!(
            "q={}&c={}&t={}&s={}",
            self.query.trim().to_lowercase(),
            self.category.trim(),
            self.tag.trim(),
            self.sort
        )
    }
}
