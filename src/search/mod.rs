//! Content ranking and search
//!
//! Pure, synchronous functions over already-normalized collections:
//! - `matcher`: does a query match a post or product over a field set
//! - `suggest`: suggested articles by shared tags and category
//! - `assemble`: unified post + product search, preview caps, highlights
//! - `blog_list`: quick filter and sort for the article list
//!
//! Nothing here mutates its inputs or keeps state between calls.

pub mod assemble;
pub mod blog_list;
pub mod fields;
pub mod matcher;
pub mod query;
pub mod suggest;

pub use assemble::{highlights, search, Highlights, PreviewCaps, SearchOutcome, SearchResults};
pub use blog_list::{BlogListFilter, SortMode};
pub use fields::{MatchFields, PostField, ProductField};
pub use matcher::{post_matches, product_matches};
pub use query::SearchQuery;
pub use suggest::{suggest, Suggestion, DEFAULT_SUGGESTION_CAP};
