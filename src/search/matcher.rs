//! Match predicates
//!
//! Decide whether a single post or product matches a query over a given set
//! of fields. Matching is boolean; there is no partial score.

use crate::models::{Post, Product};

use super::fields::{PostField, ProductField};
use super::query::SearchQuery;

/// Check a single post field
pub fn post_field_matches(query: &SearchQuery, post: &Post, field: PostField) -> bool {
    match field {
        PostField::Title => query.is_in(&post.title),
        PostField::Excerpt => query.is_in(&post.excerpt),
        PostField::Body => query.is_in(&post.body.plain_text()),
        PostField::TagName => post.tags.iter().any(|t| query.is_in(&t.name)),
        PostField::TagSlug => post.tags.iter().any(|t| query.is_in(&t.slug)),
        PostField::CategoryName => query.is_in(&post.category.name),
        PostField::AuthorName => query.is_in(&post.author.name),
        PostField::HiddenKeywords => post.hidden_keywords.iter().any(|k| query.is_in(k)),
    }
}

/// Check a single product field
pub fn product_field_matches(query: &SearchQuery, product: &Product, field: ProductField) -> bool {
    match field {
        ProductField::Name => query.is_in(&product.name),
        ProductField::Description => query.is_in(&product.description),
        ProductField::Category => product.category.as_deref().is_some_and(|c| query.is_in(c)),
        ProductField::HiddenKeywords => product.hidden_keywords.iter().any(|k| query.is_in(k)),
    }
}

/// True if the query occurs in any of `fields` of the post
pub fn post_matches(query: &SearchQuery, post: &Post, fields: &[PostField]) -> bool {
    fields.iter().any(|f| post_field_matches(query, post, *f))
}

/// True if the query occurs in any of `fields` of the product
pub fn product_matches(query: &SearchQuery, product: &Product, fields: &[ProductField]) -> bool {
    fields.iter().any(|f| product_field_matches(query, product, *f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, Category, ContentBlock, PostBody, Tag};
    use crate::search::fields::MatchFields;

    fn q(s: &str) -> SearchQuery {
        SearchQuery::parse(s).unwrap()
    }

    fn post() -> Post {
        let mut author = Author::unknown("");
        author.name = "Nusrat Jahan".into();
        let mut post = Post::new(
            "p1",
            "rust-intro",
            "Intro to Rust",
            author,
            Category::new("c1", "tech", "Technology"),
        );
        post.excerpt = "Systems programming made friendly".into();
        post.body = PostBody::Blocks(vec![
            ContentBlock::Paragraph { text: "Ownership explained".into() },
            ContentBlock::Image { url: "https://cdn/ferris.png".into(), caption: Some("Ferris the crab".into()) },
        ]);
        post.tags = vec![Tag::new("t1", "web-dev", "Web Development")];
        post.hidden_keywords = vec!["oxidize".into()];
        post
    }

    #[test]
    fn test_each_post_field() {
        let post = post();
        let cases = [
            ("intro", PostField::Title),
            ("FRIENDLY", PostField::Excerpt),
            ("ownership", PostField::Body),
            ("ferris", PostField::Body),
            ("development", PostField::TagName),
            ("web-dev", PostField::TagSlug),
            ("technology", PostField::CategoryName),
            ("nusrat", PostField::AuthorName),
            ("oxid", PostField::HiddenKeywords),
        ];
        for (needle, field) in cases {
            assert!(post_field_matches(&q(needle), &post, field), "{needle} in {field:?}");
        }
    }

    #[test]
    fn test_image_url_is_not_body_text() {
        assert!(!post_field_matches(&q("cdn"), &post(), PostField::Body));
    }

    #[test]
    fn test_quick_filter_ignores_author_category_and_hidden() {
        let post = post();
        let quick = MatchFields::quick_filter();
        let full = MatchFields::full_search();

        for needle in ["nusrat", "technology", "oxidize"] {
            assert!(!post_matches(&q(needle), &post, &quick.post), "{needle}");
            assert!(post_matches(&q(needle), &post, &full.post), "{needle}");
        }
        assert!(post_matches(&q("development"), &post, &quick.post));
    }

    #[test]
    fn test_product_fields() {
        let mut product = Product::new("pr1", "Leather Wallet", 900.0);
        product.description = "Hand stitched".into();
        product.category = Some("Accessories".into());
        product.hidden_keywords = vec!["bkash".into(), "mobile banking".into()];
        let full = MatchFields::full_search();

        assert!(product_matches(&q("WALLET"), &product, &full.product));
        assert!(product_matches(&q("stitched"), &product, &full.product));
        assert!(product_matches(&q("accessor"), &product, &full.product));
        assert!(product_matches(&q("bKash"), &product, &full.product));
        assert!(!product_matches(&q("bkash"), &product, &[ProductField::Name]));
        assert!(!product_matches(&q("laptop"), &product, &full.product));
    }

    #[test]
    fn test_product_without_category() {
        let product = Product::new("pr1", "Pen", 10.0);
        assert!(!product_field_matches(&q("pen"), &product, ProductField::Category));
    }

    #[test]
    fn test_empty_field_set_matches_nothing() {
        assert!(!post_matches(&q("intro"), &post(), &[]));
    }
}
