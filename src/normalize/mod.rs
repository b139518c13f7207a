//! Entity normalizer
//!
//! Converts raw backend rows (`serde_json::Value`) into the canonical
//! entities in [`crate::models`]. This is the only place where untyped rows
//! are read: every missing, null or mistyped field is replaced by a default,
//! so nothing downstream has to deal with absent values.
//!
//! None of the functions here fail or panic, whatever the input.

mod fields;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::models::{
    Author, AuthorRole, Catalog, Category, ContentBlock, Post, PostBody, Product, SocialLinks,
    Tag, DEFAULT_CATEGORY_COLOR, DEFAULT_READING_TIME_MINUTES,
};

use fields::{bool_field, keyword_list, opt_bool, relation, str_field, text_field, u64_field};

static NON_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").expect("static regex"));

/// Defaults substituted for missing values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Avatar used for authors without one
    pub placeholder_avatar_url: String,
    /// Image used for posts and products without one
    pub placeholder_image_url: String,
    /// Reading time used when the row has none
    pub default_reading_time: u32,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            placeholder_avatar_url: "/images/placeholder-avatar.png".to_string(),
            placeholder_image_url: "/images/placeholder.png".to_string(),
            default_reading_time: DEFAULT_READING_TIME_MINUTES,
        }
    }
}

/// Raw collections as delivered by a content source.
///
/// A `None` collection (still loading, or not exported) is treated exactly
/// like an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSnapshot {
    #[serde(default)]
    pub posts: Option<Vec<Value>>,
    #[serde(default)]
    pub products: Option<Vec<Value>>,
    #[serde(default)]
    pub categories: Option<Vec<Value>>,
    #[serde(default)]
    pub tags: Option<Vec<Value>>,
    #[serde(default)]
    pub authors: Option<Vec<Value>>,
}

fn rows(collection: &Option<Vec<Value>>) -> &[Value] {
    collection.as_deref().unwrap_or(&[])
}

/// Normalize a whole snapshot into a catalog (version 0)
pub fn normalize_snapshot(raw: &RawSnapshot, opts: &NormalizeOptions) -> Catalog {
    let posts = rows(&raw.posts).iter().map(|r| normalize_post(r, opts)).collect();
    let products = rows(&raw.products)
        .iter()
        .map(|r| normalize_product(r, opts))
        .collect();
    let categories = rows(&raw.categories).iter().map(normalize_category).collect();
    let tags = rows(&raw.tags).iter().map(normalize_tag).collect();
    let authors = rows(&raw.authors)
        .iter()
        .map(|r| normalize_author(r, opts))
        .collect();

    Catalog::new(posts, products, categories, tags, authors)
}

/// Normalize a tag row. A missing slug is derived from the name, a missing
/// id falls back to the slug.
pub fn normalize_tag(row: &Value) -> Tag {
    let name = text_field(row, &["name", "title"]);
    let slug = str_field(row, &["slug"]).unwrap_or_else(|| slugify(&name));
    let id = str_field(row, &["id"]).unwrap_or_else(|| slug.clone());
    Tag { id, slug, name }
}

/// Normalize a category row
pub fn normalize_category(row: &Value) -> Category {
    if !row.is_object() {
        return Category::uncategorized();
    }
    let name = text_field(row, &["name", "title"]);
    let slug = str_field(row, &["slug"]).unwrap_or_else(|| slugify(&name));
    let id = str_field(row, &["id"]).unwrap_or_else(|| slug.clone());
    if id.is_empty() && name.is_empty() {
        return Category::uncategorized();
    }
    Category {
        id,
        slug,
        name,
        description: text_field(row, &["description"]),
        color: str_field(row, &["color", "accent_color"])
            .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string()),
    }
}

/// Normalize an author/profile row
pub fn normalize_author(row: &Value, opts: &NormalizeOptions) -> Author {
    if !row.is_object() {
        return Author::unknown(opts.placeholder_avatar_url.clone());
    }
    let name = str_field(row, &["name", "full_name", "display_name", "username"])
        .unwrap_or_else(|| crate::models::UNKNOWN_AUTHOR_NAME.to_string());
    let website = str_field(row, &["website", "website_url"]);
    Author {
        id: text_field(row, &["id"]),
        name,
        avatar_url: str_field(row, &["avatar_url", "avatar"])
            .unwrap_or_else(|| opts.placeholder_avatar_url.clone()),
        bio: text_field(row, &["bio"]),
        role: AuthorRole::from_website(website.as_deref()),
        website,
        social: SocialLinks {
            twitter: str_field(row, &["twitter"]),
            facebook: str_field(row, &["facebook"]),
            linkedin: str_field(row, &["linkedin"]),
            instagram: str_field(row, &["instagram"]),
            github: str_field(row, &["github"]),
        },
    }
}

/// Normalize a post row, including its nested author, category and tags
pub fn normalize_post(row: &Value, opts: &NormalizeOptions) -> Post {
    let author = relation(row, &["author", "profiles", "authors", "profile"])
        .map(|r| normalize_author(r, opts))
        .unwrap_or_else(|| Author::unknown(opts.placeholder_avatar_url.clone()));
    let category = relation(row, &["category", "categories"])
        .map(normalize_category)
        .unwrap_or_else(Category::uncategorized);

    let published_at = str_field(row, &["published_at"])
        .and_then(|s| parse_timestamp(&s))
        .or_else(|| str_field(row, &["created_at"]).and_then(|s| parse_timestamp(&s)))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    let slug = text_field(row, &["slug"]);

    Post {
        id: str_field(row, &["id"]).unwrap_or_else(|| slug.clone()),
        title: text_field(row, &["title"]),
        slug,
        excerpt: text_field(row, &["excerpt", "summary"]),
        body: normalize_body(row.get("content").or_else(|| row.get("body"))),
        featured_image_url: str_field(row, &["featured_image", "featured_image_url", "image_url"])
            .unwrap_or_else(|| opts.placeholder_image_url.clone()),
        author,
        category,
        tags: post_tags(row),
        published_at,
        reading_time_minutes: parse_reading_time(
            row.get("read_time").or_else(|| row.get("reading_time")),
            opts.default_reading_time,
        ),
        view_count: u64_field(row, &["views", "view_count"]),
        like_count: u64_field(row, &["likes", "like_count"]),
        is_featured: bool_field(row, &["is_featured", "featured"]),
        is_trending: bool_field(row, &["is_trending", "trending"]),
        hidden_keywords: keyword_list(row, &["hidden_keywords", "secret_keywords", "search_keywords"]),
    }
}

/// Normalize a product row
pub fn normalize_product(row: &Value, opts: &NormalizeOptions) -> Product {
    let price = row
        .get("price")
        .and_then(|v| v.as_f64().or_else(|| v.as_str().and_then(|s| s.trim().parse().ok())))
        .filter(|p: &f64| p.is_finite() && *p > 0.0)
        .unwrap_or(0.0);

    Product {
        id: text_field(row, &["id"]),
        name: text_field(row, &["name", "title"]),
        description: text_field(row, &["description"]),
        price,
        image_url: str_field(row, &["image_url", "image"])
            .unwrap_or_else(|| opts.placeholder_image_url.clone()),
        stock_quantity: u64_field(row, &["stock_quantity", "stock"]).min(u32::MAX as u64) as u32,
        category: str_field(row, &["category"]),
        hidden_keywords: keyword_list(row, &["hidden_keywords", "secret_keywords", "search_keywords"]),
        is_active: opt_bool(row, &["is_active", "active"]).unwrap_or(true),
    }
}

/// Tags of a post row, deduplicated by id.
///
/// Accepts a plain list of tag rows, join rows wrapping the tag under
/// `tags`/`tag`, or a list of bare tag names.
fn post_tags(row: &Value) -> Vec<Tag> {
    let entries = row
        .get("tags")
        .and_then(Value::as_array)
        .or_else(|| row.get("post_tags").and_then(Value::as_array));

    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    for entry in entries.into_iter().flatten() {
        let tag = match entry {
            Value::String(name) if !name.trim().is_empty() => {
                let slug = slugify(name);
                Tag::new(slug.clone(), slug, name.trim())
            }
            Value::Object(_) => {
                let inner = relation(entry, &["tags", "tag"]).unwrap_or(entry);
                normalize_tag(inner)
            }
            _ => continue,
        };
        if tag.id.is_empty() {
            continue;
        }
        if seen.insert(tag.id.clone()) {
            tags.push(tag);
        }
    }
    tags
}

/// Parse a reading time.
///
/// Numbers are used as-is; strings such as `"7 min read"` are stripped of
/// non-digits. Empty, zero or unparsable values give `default`.
pub fn parse_reading_time(value: Option<&Value>, default: u32) -> u32 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_u64().map(|n| n.min(u32::MAX as u64) as u32),
        Some(Value::String(s)) => NON_DIGITS.replace_all(s, "").parse::<u32>().ok(),
        _ => None,
    };
    match parsed {
        Some(minutes) if minutes > 0 => minutes,
        _ => default.max(1),
    }
}

/// Parse a backend timestamp (RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]`, or a
/// bare date). Naive values are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Normalize a post body.
///
/// A JSON array (or a string holding one) is read as content blocks;
/// any other string is plain text.
pub fn normalize_body(value: Option<&Value>) -> PostBody {
    match value {
        Some(Value::Array(blocks)) => PostBody::Blocks(blocks.iter().filter_map(normalize_block).collect()),
        Some(Value::String(text)) => {
            let trimmed = text.trim_start();
            if trimmed.starts_with('[') {
                if let Ok(Value::Array(blocks)) = serde_json::from_str::<Value>(trimmed) {
                    return PostBody::Blocks(blocks.iter().filter_map(normalize_block).collect());
                }
            }
            PostBody::Text(text.clone())
        }
        _ => PostBody::default(),
    }
}

fn normalize_block(value: &Value) -> Option<ContentBlock> {
    let kind = str_field(value, &["type"])?.to_lowercase();
    let text = text_field(value, &["text", "content", "value"]);
    let caption = str_field(value, &["caption"]);

    match kind.as_str() {
        "heading" | "h1" | "h2" => {
            let level = match kind.as_str() {
                "h1" => 1,
                "h2" => 2,
                _ => value.get("level").and_then(Value::as_u64).unwrap_or(2).clamp(1, 2) as u8,
            };
            Some(ContentBlock::Heading { level, text })
        }
        "paragraph" | "p" | "text" => Some(ContentBlock::Paragraph { text }),
        "quote" | "blockquote" => Some(ContentBlock::Quote { text, caption }),
        "image" | "img" => Some(ContentBlock::Image {
            url: text_field(value, &["url", "src"]),
            caption,
        }),
        _ => None,
    }
}

/// Generate a URL-friendly slug from a name.
///
/// Lowercases, replaces spaces and ASCII punctuation with hyphens and
/// collapses runs of hyphens. Non-ASCII characters (Bengali) are kept.
pub fn slugify(name: &str) -> String {
    let slug: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || !c.is_ascii() {
                c
            } else {
                '-'
            }
        })
        .collect();

    let mut result = String::new();
    let mut prev_hyphen = false;
    for c in slug.chars() {
        if c == '-' {
            if !prev_hyphen && !result.is_empty() {
                result.push(c);
                prev_hyphen = true;
            }
        } else if !c.is_whitespace() {
            result.push(c);
            prev_hyphen = false;
        }
    }

    result.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNKNOWN_AUTHOR_NAME;
    use chrono::Datelike;
    use serde_json::json;

    fn opts() -> NormalizeOptions {
        NormalizeOptions::default()
    }

    #[test]
    fn test_post_with_missing_relations_gets_placeholders() {
        let post = normalize_post(&json!({ "id": "p1", "title": "Hello", "slug": "hello" }), &opts());

        assert_eq!(post.author.name, UNKNOWN_AUTHOR_NAME);
        assert_eq!(post.author.avatar_url, opts().placeholder_avatar_url);
        assert!(post.category.is_default());
        assert_eq!(post.category.name, "Uncategorized");
        assert!(post.tags.is_empty());
        assert_eq!(post.reading_time_minutes, 5);
        assert_eq!(post.featured_image_url, opts().placeholder_image_url);
        assert_eq!(post.published_at, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_post_with_null_relations() {
        let row = json!({
            "id": "p1",
            "title": null,
            "categories": null,
            "profiles": null,
            "views": null,
            "hidden_keywords": null
        });
        let post = normalize_post(&row, &opts());

        assert_eq!(post.title, "");
        assert!(post.category.is_default());
        assert_eq!(post.author.name, UNKNOWN_AUTHOR_NAME);
        assert_eq!(post.view_count, 0);
        assert!(post.hidden_keywords.is_empty());
    }

    #[test]
    fn test_post_without_id_falls_back_to_slug() {
        let a = normalize_post(&json!({ "slug": "a", "tags": ["rust"] }), &opts());
        let b = normalize_post(&json!({ "slug": "b", "tags": ["rust"] }), &opts());
        assert_eq!(a.id, "a");
        assert_eq!(b.id, "b");

        let posts = vec![a.clone(), b];
        let suggestions = crate::search::suggest(&a, &posts, 4);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].post.slug, "b");
        assert_eq!(suggestions[0].tag_score, 1);
    }

    #[test]
    fn test_full_post_row() {
        let row = json!({
            "id": 42,
            "title": "ঢাকার গল্প",
            "slug": "dhakar-golpo",
            "excerpt": "A short story",
            "content": "Plain body",
            "featured_image": "https://cdn/img.jpg",
            "published_at": "2024-03-01T10:00:00+06:00",
            "read_time": "7 min read",
            "views": 120,
            "likes": "8",
            "is_featured": true,
            "is_trending": "true",
            "secret_keywords": "bkash, mobile banking",
            "profiles": {
                "id": "u1",
                "full_name": "Rahim",
                "website": "https://rahim.dev",
                "twitter": "@rahim"
            },
            "categories": { "id": "c1", "name": "Tech", "slug": "tech", "color": "#000" },
            "post_tags": [
                { "tags": { "id": "t1", "name": "AI", "slug": "ai" } },
                { "tags": { "id": "t2", "name": "ML", "slug": "ml" } },
                { "tags": { "id": "t1", "name": "AI", "slug": "ai" } }
            ]
        });
        let post = normalize_post(&row, &opts());

        assert_eq!(post.id, "42");
        assert_eq!(post.title, "ঢাকার গল্প");
        assert_eq!(post.body, PostBody::Text("Plain body".into()));
        assert_eq!(post.published_at.year(), 2024);
        assert_eq!(post.reading_time_minutes, 7);
        assert_eq!(post.view_count, 120);
        assert_eq!(post.like_count, 8);
        assert!(post.is_featured);
        assert!(post.is_trending);
        assert_eq!(post.hidden_keywords, vec!["bkash", "mobile banking"]);
        assert_eq!(post.author.name, "Rahim");
        assert_eq!(post.author.role, AuthorRole::Writer);
        assert_eq!(post.author.social.twitter.as_deref(), Some("@rahim"));
        assert_eq!(post.category.slug, "tech");
        assert_eq!(post.category.color, "#000");
        let slugs: Vec<_> = post.tags.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["ai", "ml"]);
    }

    #[test]
    fn test_published_at_falls_back_to_created_at() {
        let post = normalize_post(&json!({ "created_at": "2023-05-06 07:08:09" }), &opts());
        assert_eq!(post.published_at.year(), 2023);
        assert_eq!(post.published_at.month(), 5);
    }

    #[test]
    fn test_tags_as_names() {
        let post = normalize_post(&json!({ "tags": ["Web Dev", "", 3, "প্রযুক্তি"] }), &opts());
        let slugs: Vec<_> = post.tags.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["web-dev", "প্রযুক্তি"]);
        assert_eq!(post.tags[0].name, "Web Dev");
    }

    #[test]
    fn test_reading_time_parsing() {
        assert_eq!(parse_reading_time(Some(&json!("12 min")), 5), 12);
        assert_eq!(parse_reading_time(Some(&json!("min")), 5), 5);
        assert_eq!(parse_reading_time(Some(&json!("0")), 5), 5);
        assert_eq!(parse_reading_time(Some(&json!("")), 5), 5);
        assert_eq!(parse_reading_time(Some(&json!(3)), 5), 3);
        assert_eq!(parse_reading_time(Some(&json!(-3)), 5), 5);
        assert_eq!(parse_reading_time(Some(&json!("99999999999999")), 5), 5);
        assert_eq!(parse_reading_time(None, 5), 5);
    }

    #[test]
    fn test_block_body() {
        let row = json!({
            "content": [
                { "type": "h1", "text": "Title" },
                { "type": "heading", "level": 7, "text": "Sub" },
                { "type": "paragraph", "content": "Para" },
                { "type": "quote", "text": "Q", "caption": "C" },
                { "type": "image", "url": "https://x/y.png" },
                { "type": "video", "url": "https://x/y.mp4" },
                "not a block"
            ]
        });
        let post = normalize_post(&row, &opts());

        assert_eq!(
            post.body,
            PostBody::Blocks(vec![
                ContentBlock::Heading { level: 1, text: "Title".into() },
                ContentBlock::Heading { level: 2, text: "Sub".into() },
                ContentBlock::Paragraph { text: "Para".into() },
                ContentBlock::Quote { text: "Q".into(), caption: Some("C".into()) },
                ContentBlock::Image { url: "https://x/y.png".into(), caption: None },
            ])
        );
    }

    #[test]
    fn test_block_body_encoded_as_string() {
        let body = normalize_body(Some(&json!(r#"[{"type":"paragraph","text":"Hi"}]"#)));
        assert_eq!(body, PostBody::Blocks(vec![ContentBlock::Paragraph { text: "Hi".into() }]));

        let body = normalize_body(Some(&json!("[not json")));
        assert_eq!(body, PostBody::Text("[not json".into()));
    }

    #[test]
    fn test_product_defaults() {
        let product = normalize_product(&json!({ "id": "pr1", "price": -5, "stock_quantity": -2 }), &opts());

        assert_eq!(product.price, 0.0);
        assert_eq!(product.stock_quantity, 0);
        assert!(product.is_active);
        assert!(product.category.is_none());
        assert_eq!(product.image_url, opts().placeholder_image_url);
    }

    #[test]
    fn test_product_row() {
        let row = json!({
            "id": "pr1",
            "name": "Phone cover",
            "price": "349.50",
            "stock_quantity": 12,
            "category": "Accessories",
            "hidden_keywords": ["bkash", " mobile banking ", ""],
            "is_active": false
        });
        let product = normalize_product(&row, &opts());

        assert_eq!(product.price, 349.5);
        assert_eq!(product.stock_quantity, 12);
        assert_eq!(product.category.as_deref(), Some("Accessories"));
        assert_eq!(product.hidden_keywords, vec!["bkash", "mobile banking"]);
        assert!(!product.is_active);
    }

    #[test]
    fn test_non_object_rows() {
        let post = normalize_post(&json!("garbage"), &opts());
        assert!(post.category.is_default());
        let product = normalize_product(&json!(null), &opts());
        assert_eq!(product.name, "");
        let tag = normalize_tag(&json!(17));
        assert_eq!(tag.slug, "");
    }

    #[test]
    fn test_tag_slug_and_id_fallbacks() {
        let tag = normalize_tag(&json!({ "name": "Machine Learning" }));
        assert_eq!(tag.slug, "machine-learning");
        assert_eq!(tag.id, "machine-learning");
    }

    #[test]
    fn test_normalize_snapshot_with_missing_collections() {
        let raw = RawSnapshot {
            posts: Some(vec![json!({ "id": "p1", "slug": "a" })]),
            ..Default::default()
        };
        let catalog = normalize_snapshot(&raw, &opts());

        assert_eq!(catalog.posts.len(), 1);
        assert!(catalog.products.is_empty());
        assert_eq!(catalog.categories.len(), 1);
        assert!(catalog.categories[0].is_default());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-01-02T03:04:05Z").is_some());
        assert!(parse_timestamp("2024-01-02T03:04:05.123456").is_some());
        assert!(parse_timestamp("2024-01-02").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Tech   বাংলা "), "tech-বাংলা");
        assert_eq!(slugify("--a__b--"), "a-b");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_json() -> impl Strategy<Value = Value> {
            let leaf = prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::Bool),
                any::<i64>().prop_map(|n| json!(n)),
                ".{0,12}".prop_map(Value::String),
            ];
            leaf.prop_recursive(3, 24, 4, |inner| {
                prop_oneof![
                    prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                    prop::collection::hash_map(
                        prop_oneof![
                            Just("title".to_string()),
                            Just("tags".to_string()),
                            Just("categories".to_string()),
                            Just("profiles".to_string()),
                            Just("content".to_string()),
                            Just("read_time".to_string()),
                            Just("price".to_string()),
                            "[a-z_]{1,8}",
                        ],
                        inner,
                        0..6
                    )
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
                ]
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            /// Arbitrary rows always normalize to fully-populated entities.
            #[test]
            fn normalizing_arbitrary_rows_never_panics(row in arb_json()) {
                let post = normalize_post(&row, &opts());
                prop_assert!(post.reading_time_minutes > 0);
                prop_assert!(!post.author.name.is_empty());
                prop_assert!(!post.category.slug.is_empty() || !post.category.id.is_empty() || !post.category.name.is_empty());

                let product = normalize_product(&row, &opts());
                prop_assert!(product.price >= 0.0);

                let ids: HashSet<_> = post.tags.iter().map(|t| t.id.clone()).collect();
                prop_assert_eq!(ids.len(), post.tags.len());
            }
        }
    }
}
