//! Unified search across posts and products

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::models::{Post, Product};

use super::fields::MatchFields;
use super::matcher::{post_matches, product_matches};
use super::query::SearchQuery;

/// Matches of one search, partitioned by entity type, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults<'a> {
    pub posts: Vec<&'a Post>,
    pub products: Vec<&'a Product>,
}

impl<'a> SearchResults<'a> {
    pub fn total(&self) -> usize {
        self.posts.len() + self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Truncate both lists to the preview caps
    pub fn preview(mut self, caps: &PreviewCaps) -> Self {
        self.posts.truncate(caps.posts);
        self.products.truncate(caps.products);
        self
    }
}

/// Outcome of a search request.
///
/// An empty query is `Idle` ("no search performed"), which callers can tell
/// apart from `Searched` with zero matches.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    Idle,
    Searched(SearchResults<'a>),
}

impl<'a> SearchOutcome<'a> {
    pub fn is_searched(&self) -> bool {
        matches!(self, SearchOutcome::Searched(_))
    }

    /// Results, or empty lists when idle
    pub fn into_results(self) -> SearchResults<'a> {
        match self {
            SearchOutcome::Idle => SearchResults {
                posts: Vec::new(),
                products: Vec::new(),
            },
            SearchOutcome::Searched(results) => results,
        }
    }
}

/// Result caps for the compact search preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewCaps {
    pub posts: usize,
    pub products: usize,
}

impl Default for PreviewCaps {
    fn default() -> Self {
        Self {
            posts: 3,
            products: 4,
        }
    }
}

/// Search posts and products independently with the same query.
///
/// No relevance scoring is applied: each list keeps input order.
pub fn search<'a>(
    raw_query: &str,
    posts: &'a [Post],
    products: &'a [Product],
    fields: &MatchFields,
) -> SearchOutcome<'a> {
    let Some(query) = SearchQuery::parse(raw_query) else {
        return SearchOutcome::Idle;
    };

    SearchOutcome::Searched(SearchResults {
        posts: posts
            .iter()
            .filter(|p| post_matches(&query, p, &fields.post))
            .collect(),
        products: products
            .iter()
            .filter(|p| product_matches(&query, p, &fields.product))
            .collect(),
    })
}

/// Featured and trending posts for the home page
#[derive(Debug, Clone, PartialEq)]
pub struct Highlights<'a> {
    /// Featured posts, input order
    pub featured: Vec<&'a Post>,
    /// Trending posts, most viewed first
    pub trending: Vec<&'a Post>,
}

/// Collect featured and trending posts, each capped at `cap`
pub fn highlights(posts: &[Post], cap: usize) -> Highlights<'_> {
    let featured = posts.iter().filter(|p| p.is_featured).take(cap).collect();

    let mut trending: Vec<&Post> = posts.iter().filter(|p| p.is_trending).collect();
    trending.sort_by_key(|p| Reverse(p.view_count));
    trending.truncate(cap);

    Highlights { featured, trending }
}
