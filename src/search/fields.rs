//! Searchable field sets
//!
//! The full search page and the blog-list quick filter deliberately match
//! against different fields. Both are expressed as a [`MatchFields`] value
//! instead of two hand-written predicates.

use serde::{Deserialize, Serialize};

/// A searchable field of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostField {
    Title,
    Excerpt,
    /// Full body text, including block captions
    Body,
    TagName,
    TagSlug,
    CategoryName,
    AuthorName,
    HiddenKeywords,
}

impl PostField {
    pub const ALL: [PostField; 8] = [
        PostField::Title,
        PostField::Excerpt,
        PostField::Body,
        PostField::TagName,
        PostField::TagSlug,
        PostField::CategoryName,
        PostField::AuthorName,
        PostField::HiddenKeywords,
    ];
}

/// A searchable field of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductField {
    Name,
    Description,
    /// Free-text category label
    Category,
    HiddenKeywords,
}

impl ProductField {
    pub const ALL: [ProductField; 4] = [
        ProductField::Name,
        ProductField::Description,
        ProductField::Category,
        ProductField::HiddenKeywords,
    ];
}

/// Which fields take part in matching, per entity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFields {
    pub post: Vec<PostField>,
    pub product: Vec<ProductField>,
}

impl MatchFields {
    /// Dedicated search page: every field, hidden keywords included
    pub fn full_search() -> Self {
        Self {
            post: PostField::ALL.to_vec(),
            product: ProductField::ALL.to_vec(),
        }
    }

    /// Blog-list quick filter: title, excerpt, body and tag names only.
    /// Author, category and hidden keywords are not consulted.
    pub fn quick_filter() -> Self {
        Self {
            post: vec![
                PostField::Title,
                PostField::Excerpt,
                PostField::Body,
                PostField::TagName,
            ],
            product: vec![ProductField::Name, ProductField::Description],
        }
    }

    /// Short stable identifier of the field set, for cache keys
    pub fn fingerprint(&self) -> String {
        let post: Vec<String> = self.post.iter().map(|f| format!("{:?}", f)).collect();
        let product: Vec<String> = self.product.iter().map(|f| format!("{:?}", f)).collect();
        format!("{}|{}", post.join(","), product.join(","))
    }
}

impl Default for MatchFields {
    fn default() -> Self {
        Self::full_search()
    }
}
