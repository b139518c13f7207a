//! Catalog snapshot
//!
//! A `Catalog` is one normalized, read-only snapshot of everything the
//! ranking and search operations work on. It is replaced wholesale on every
//! reload and never mutated in place.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use super::{Author, Category, CategoryWithCount, Post, Product, Tag, TagWithCount};

#[derive(Debug, Clone)]
pub struct Catalog {
    /// Version stamp, incremented on every reload
    pub version: u64,
    /// When the snapshot was loaded
    pub loaded_at: DateTime<Utc>,
    pub posts: Vec<Post>,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub authors: Vec<Author>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            version: 0,
            loaded_at: DateTime::<Utc>::UNIX_EPOCH,
            posts: Vec::new(),
            products: Vec::new(),
            categories: Vec::new(),
            tags: Vec::new(),
            authors: Vec::new(),
        }
    }
}

impl Catalog {
    /// Build a catalog from normalized collections.
    ///
    /// Empty category or tag collections are derived from the posts,
    /// deduplicated by id in first-seen order.
    pub fn new(
        posts: Vec<Post>,
        products: Vec<Product>,
        categories: Vec<Category>,
        tags: Vec<Tag>,
        authors: Vec<Author>,
    ) -> Self {
        let categories = if categories.is_empty() {
            let mut seen = HashSet::new();
            posts
                .iter()
                .filter(|p| seen.insert(p.category.id.clone()))
                .map(|p| p.category.clone())
                .collect()
        } else {
            categories
        };

        let tags = if tags.is_empty() {
            let mut seen = HashSet::new();
            posts
                .iter()
                .flat_map(|p| p.tags.iter())
                .filter(|t| seen.insert(t.id.clone()))
                .cloned()
                .collect()
        } else {
            tags
        };

        Self {
            version: 0,
            loaded_at: Utc::now(),
            posts,
            products,
            categories,
            tags,
            authors,
        }
    }

    /// Set the version stamp
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn find_post(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Products that are listed in the shop
    pub fn active_products(&self) -> Vec<Product> {
        self.products.iter().filter(|p| p.is_active).cloned().collect()
    }

    /// Categories with the number of posts in each
    pub fn categories_with_counts(&self) -> Vec<CategoryWithCount> {
        self.categories
            .iter()
            .map(|c| CategoryWithCount {
                category: c.clone(),
                post_count: self.posts.iter().filter(|p| p.category.id == c.id).count(),
            })
            .collect()
    }

    /// Tags with the number of posts carrying each
    pub fn tags_with_counts(&self) -> Vec<TagWithCount> {
        self.tags
            .iter()
            .map(|t| {
                let count = self
                    .posts
                    .iter()
                    .filter(|p| p.tags.iter().any(|pt| pt.id == t.id))
                    .count();
                TagWithCount::new(t.clone(), count)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, category: Category, tags: Vec<Tag>) -> Post {
        let mut post = Post::new(id, id, id, Author::unknown(""), category);
        post.tags = tags;
        post
    }

    #[test]
    fn test_derives_categories_and_tags_from_posts() {
        let tech = Category::new("c1", "tech", "Tech");
        let ai = Tag::new("t1", "ai", "AI");
        let ml = Tag::new("t2", "ml", "ML");
        let catalog = Catalog::new(
            vec![
                post("p1", tech.clone(), vec![ai.clone(), ml.clone()]),
                post("p2", tech.clone(), vec![ml.clone()]),
            ],
            vec![],
            vec![],
            vec![],
            vec![],
        );

        assert_eq!(catalog.categories, vec![tech]);
        assert_eq!(catalog.tags, vec![ai, ml]);
    }

    #[test]
    fn test_counts() {
        let tech = Category::new("c1", "tech", "Tech");
        let design = Category::new("c2", "design", "Design");
        let ai = Tag::new("t1", "ai", "AI");
        let catalog = Catalog::new(
            vec![
                post("p1", tech.clone(), vec![ai.clone()]),
                post("p2", tech.clone(), vec![]),
            ],
            vec![],
            vec![tech, design],
            vec![ai],
            vec![],
        );

        let categories = catalog.categories_with_counts();
        assert_eq!(categories[0].post_count, 2);
        assert_eq!(categories[1].post_count, 0);
        assert_eq!(catalog.tags_with_counts()[0].post_count, 1);
    }

    #[test]
    fn test_active_products() {
        let mut hidden = Product::new("pr2", "Old mug", 100.0);
        hidden.is_active = false;
        let catalog = Catalog::new(
            vec![],
            vec![Product::new("pr1", "Mug", 100.0), hidden],
            vec![],
            vec![],
            vec![],
        );

        let active = catalog.active_products();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "pr1");
    }
}
