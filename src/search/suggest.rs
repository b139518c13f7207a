//! Suggested articles
//!
//! Ranks other posts by how many tags they share with a reference post and
//! whether they are in the same category.

use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashSet;

use crate::models::{Post, Tag};

/// Suggestion cap used by the post page
pub const DEFAULT_SUGGESTION_CAP: usize = 4;

/// A candidate post annotated with its relation to the reference post.
///
/// `matching_tags`, `tag_score` and `category_match` are presentation
/// metadata computed per call, not stored attributes of the post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion<'a> {
    pub post: &'a Post,
    /// Tags present on both posts, in the candidate's order
    pub matching_tags: Vec<&'a Tag>,
    pub tag_score: usize,
    pub category_match: bool,
}

/// Score a single candidate against the reference post
pub fn score<'a>(reference: &Post, candidate: &'a Post) -> Suggestion<'a> {
    let reference_ids: HashSet<&str> = reference.tags.iter().map(|t| t.id.as_str()).collect();
    let mut seen = HashSet::new();
    let matching_tags: Vec<&Tag> = candidate
        .tags
        .iter()
        .filter(|t| reference_ids.contains(t.id.as_str()) && seen.insert(t.id.as_str()))
        .collect();

    Suggestion {
        post: candidate,
        tag_score: matching_tags.len(),
        matching_tags,
        category_match: candidate.category.id == reference.category.id,
    }
}

/// Posts related to `reference`, most related first.
///
/// The reference itself (matched by id) and posts sharing neither a tag nor
/// the category are left out. Ordering is by shared-tag count, then category
/// match, then input order. At most `cap` suggestions are returned.
pub fn suggest<'a>(reference: &Post, posts: &'a [Post], cap: usize) -> Vec<Suggestion<'a>> {
    let mut suggestions: Vec<Suggestion<'a>> = posts
        .iter()
        .filter(|p| p.id != reference.id)
        .map(|p| score(reference, p))
        .filter(|s| s.tag_score > 0 || s.category_match)
        .collect();

    // sort_by_key is stable
    suggestions.sort_by_key(|s| (Reverse(s.tag_score), Reverse(s.category_match)));
    suggestions.truncate(cap);
    suggestions
}
