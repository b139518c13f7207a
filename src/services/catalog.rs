//! Catalog service
//!
//! Owns the current catalog and runs the ranking and search functions over
//! it:
//! - Reload from the content source (normalize, bump version, swap)
//! - Unified search with optional preview caps
//! - Blog list filter, sort and pagination
//! - Suggested articles for a post
//! - Featured and trending highlights
//!
//! Results are memoized per catalog version. A reload bumps the version, so
//! nothing computed from the previous snapshot is served afterwards.

use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::cache::{version_pattern, versioned_key, CacheLayer, MemoryCache};
use crate::config::RankingConfig;
use crate::models::{Catalog, CategoryWithCount, ListParams, PagedResult, TagWithCount};
use crate::normalize::{normalize_snapshot, NormalizeOptions};
use crate::search::{highlights, search, suggest, BlogListFilter, SearchOutcome, SearchQuery};
use crate::source::ContentSource;

use super::views::{
    CatalogStatus, HighlightsView, PostDetail, PostSummary, ProductView, SearchView,
    SuggestionView,
};

/// Cache key prefixes
const CACHE_KEY_SEARCH: &str = "search";
const CACHE_KEY_POSTS: &str = "posts";
const CACHE_KEY_SUGGESTIONS: &str = "suggest";
const CACHE_KEY_HIGHLIGHTS: &str = "highlights";
const CACHE_KEY_CATEGORIES: &str = "categories";
const CACHE_KEY_TAGS: &str = "tags";
const CACHE_KEY_PRODUCTS: &str = "products";

/// Error types for catalog service operations
#[derive(Debug, thiserror::Error)]
pub enum CatalogServiceError {
    /// No post with this slug
    #[error("Post not found: {0}")]
    NotFound(String),

    /// Content source failed
    #[error("Content source error: {0}")]
    SourceError(#[from] anyhow::Error),
}

/// Catalog service
pub struct CatalogService {
    source: Arc<dyn ContentSource>,
    catalog: RwLock<Arc<Catalog>>,
    cache: Arc<MemoryCache>,
    ranking: RankingConfig,
    content: NormalizeOptions,
}

impl CatalogService {
    /// Create a service with an empty catalog (version 0).
    /// Call [`reload`](Self::reload) to load content.
    pub fn new(
        source: Arc<dyn ContentSource>,
        cache: Arc<MemoryCache>,
        ranking: RankingConfig,
        content: NormalizeOptions,
    ) -> Self {
        Self {
            source,
            catalog: RwLock::new(Arc::new(Catalog::default())),
            cache,
            ranking,
            content,
        }
    }

    pub fn ranking(&self) -> &RankingConfig {
        &self.ranking
    }

    /// Fetch and normalize a fresh snapshot, then swap it in.
    ///
    /// On a source error the current catalog stays in place.
    /// Returns the new catalog version.
    pub async fn reload(&self) -> Result<u64, CatalogServiceError> {
        let raw = self.source.fetch().await.map_err(|e| {
            tracing::error!("Failed to fetch content from {}: {:#}", self.source.describe(), e);
            CatalogServiceError::SourceError(e)
        })?;

        let fresh = normalize_snapshot(&raw, &self.content);

        let (previous, current) = {
            let mut guard = self.catalog.write().await;
            let previous = guard.version;
            let next = Arc::new(fresh.with_version(previous + 1));
            let current = Arc::clone(&next);
            *guard = next;
            (previous, current)
        };

        if let Err(e) = self.cache.delete_pattern(&version_pattern(previous)).await {
            tracing::warn!("Failed to purge results of catalog v{}: {}", previous, e);
        }

        tracing::info!(
            "Catalog v{} loaded from {}: {} posts, {} products, {} categories, {} tags",
            current.version,
            self.source.describe(),
            current.posts.len(),
            current.products.len(),
            current.categories.len(),
            current.tags.len()
        );

        Ok(current.version)
    }

    /// Current catalog snapshot
    pub async fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&*self.catalog.read().await)
    }

    /// Look up a memoized result, computing and storing it on a miss
    async fn memoized<T, F>(&self, kind: &str, version: u64, detail: &str, compute: F) -> T
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> T,
    {
        let key = versioned_key(kind, version, detail);
        if let Some(hit) = self.cache.get::<T>(&key).await.ok().flatten() {
            return hit;
        }

        let value = compute();
        if let Err(e) = self.cache.set(&key, &value).await {
            tracing::warn!("Failed to cache {}: {}", key, e);
        }
        value
    }

    /// Unified search over posts and products (full-search field set).
    ///
    /// With `preview`, the lists are capped but the counts are not.
    pub async fn search(&self, raw_query: &str, preview: bool) -> SearchView {
        let Some(query) = SearchQuery::parse(raw_query) else {
            return SearchView::idle(raw_query.trim());
        };

        let catalog = self.catalog().await;
        let fields = &self.ranking.full_search;
        let detail = format!("{}|preview={}|{}", fields.fingerprint(), preview, query.as_str());

        let mut view = self
            .memoized(CACHE_KEY_SEARCH, catalog.version, &detail, || {
                let products = catalog.active_products();
                match search(query.as_str(), &catalog.posts, &products, fields) {
                    SearchOutcome::Idle => SearchView::idle(query.as_str()),
                    SearchOutcome::Searched(full) => {
                        let shown = if preview {
                            full.clone().preview(&self.ranking.preview)
                        } else {
                            full.clone()
                        };
                        SearchView::searched(query.as_str(), &full, &shown)
                    }
                }
            })
            .await;

        // Memoized per normalized query; echo what the caller typed
        view.query = raw_query.trim().to_string();
        view
    }

    /// Blog list: filter, sort and paginate posts (quick-filter field set)
    pub async fn list_posts(
        &self,
        filter: &BlogListFilter,
        params: &ListParams,
    ) -> PagedResult<PostSummary> {
        let catalog = self.catalog().await;
        let fields = &self.ranking.quick_filter.post;
        let detail = format!(
            "{}|{}|page={}&per_page={}",
            filter.cache_key(),
            self.ranking.quick_filter.fingerprint(),
            params.page,
            params.per_page
        );

        self.memoized(CACHE_KEY_POSTS, catalog.version, &detail, || {
            let matched: Vec<PostSummary> = filter
                .apply(&catalog.posts, fields)
                .into_iter()
                .map(PostSummary::from)
                .collect();
            params.paginate(matched)
        })
        .await
    }

    /// Full post by slug
    pub async fn get_post(&self, slug: &str) -> Result<PostDetail, CatalogServiceError> {
        let catalog = self.catalog().await;
        catalog
            .find_post(slug)
            .map(PostDetail::from)
            .ok_or_else(|| CatalogServiceError::NotFound(slug.to_string()))
    }

    /// Suggested articles for the post with this slug
    pub async fn suggestions(&self, slug: &str) -> Result<Vec<SuggestionView>, CatalogServiceError> {
        let catalog = self.catalog().await;
        let reference = catalog
            .find_post(slug)
            .ok_or_else(|| CatalogServiceError::NotFound(slug.to_string()))?;

        let cap = self.ranking.suggestion_cap;
        let detail = format!("cap={}|{}", cap, slug);
        Ok(self
            .memoized(CACHE_KEY_SUGGESTIONS, catalog.version, &detail, || {
                suggest(reference, &catalog.posts, cap)
                    .iter()
                    .map(SuggestionView::from)
                    .collect()
            })
            .await)
    }

    /// Featured and trending posts
    pub async fn highlights(&self) -> HighlightsView {
        let catalog = self.catalog().await;
        let cap = self.ranking.highlight_cap;
        self.memoized(CACHE_KEY_HIGHLIGHTS, catalog.version, &format!("cap={}", cap), || {
            HighlightsView::from(&highlights(&catalog.posts, cap))
        })
        .await
    }

    pub async fn categories(&self) -> Vec<CategoryWithCount> {
        let catalog = self.catalog().await;
        self.memoized(CACHE_KEY_CATEGORIES, catalog.version, "all", || {
            catalog.categories_with_counts()
        })
        .await
    }

    pub async fn tags(&self) -> Vec<TagWithCount> {
        let catalog = self.catalog().await;
        self.memoized(CACHE_KEY_TAGS, catalog.version, "all", || catalog.tags_with_counts())
            .await
    }

    /// Active products, in catalog order
    pub async fn products(&self) -> Vec<ProductView> {
        let catalog = self.catalog().await;
        self.memoized(CACHE_KEY_PRODUCTS, catalog.version, "active", || {
            catalog
                .products
                .iter()
                .filter(|p| p.is_active)
                .map(ProductView::from)
                .collect()
        })
        .await
    }

    /// Status of the loaded catalog. Fails until a reload has succeeded.
    pub async fn status(&self) -> Result<CatalogStatus, CatalogServiceError> {
        let catalog = self.catalog().await;
        if catalog.version == 0 {
            return Err(anyhow::anyhow!(
                "no catalog loaded yet from {}",
                self.source.describe()
            )
            .into());
        }
        Ok(CatalogStatus {
            version: catalog.version,
            loaded_at: catalog.loaded_at,
            source: self.source.describe(),
            post_count: catalog.posts.len(),
            product_count: catalog.products.len(),
            category_count: catalog.categories.len(),
            tag_count: catalog.tags.len(),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::cache::create_cache;
    use crate::config::CacheConfig;
    use crate::normalize::RawSnapshot;
    use crate::search::SortMode;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// In-memory source whose snapshot can be replaced between reloads
    pub(crate) struct StaticSource {
        snapshot: Mutex<Option<RawSnapshot>>,
    }

    impl StaticSource {
        pub(crate) fn new(snapshot: RawSnapshot) -> Self {
            Self {
                snapshot: Mutex::new(Some(snapshot)),
            }
        }

        pub(crate) fn replace(&self, snapshot: Option<RawSnapshot>) {
            *self.snapshot.lock().unwrap() = snapshot;
        }
    }

    #[async_trait]
    impl ContentSource for StaticSource {
        async fn fetch(&self) -> anyhow::Result<RawSnapshot> {
            self.snapshot
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| anyhow::anyhow!("backend unavailable"))
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    pub(crate) fn sample_snapshot() -> RawSnapshot {
        RawSnapshot {
            posts: Some(vec![
                json!({
                    "id": "p1", "slug": "rust-intro", "title": "Intro to Rust",
                    "excerpt": "Ownership basics",
                    "category": {"id": "c1", "slug": "tech", "name": "Tech"},
                    "tags": [{"id": "t1", "slug": "rust", "name": "Rust"},
                             {"id": "t2", "slug": "ai", "name": "AI"}],
                    "published_at": "2024-03-01T10:00:00Z",
                    "views": 120, "is_featured": true, "is_trending": true,
                    "hidden_keywords": ["borrowck"]
                }),
                json!({
                    "id": "p2", "slug": "rust-async", "title": "Async Rust",
                    "category": {"id": "c1", "slug": "tech", "name": "Tech"},
                    "tags": [{"id": "t1", "slug": "rust", "name": "Rust"},
                             {"id": "t2", "slug": "ai", "name": "AI"}],
                    "published_at": "2024-03-05T10:00:00Z",
                    "views": 300, "is_trending": true
                }),
                json!({
                    "id": "p3", "slug": "curry", "title": "Fish Curry",
                    "category": {"id": "c2", "slug": "food", "name": "Food"},
                    "tags": [{"id": "t3", "slug": "recipes", "name": "Recipes"}],
                    "published_at": "2024-02-01T10:00:00Z"
                }),
                json!({
                    "id": "p4", "slug": "gadgets", "title": "Gadget Review",
                    "category": {"id": "c1", "slug": "tech", "name": "Tech"},
                    "published_at": "2024-01-01T10:00:00Z"
                }),
            ]),
            products: Some(vec![
                json!({"id": "pr1", "name": "Rust Mug", "price": 300, "stock_quantity": 5}),
                json!({"id": "pr2", "name": "Wallet", "price": 900,
                       "hidden_keywords": "bkash, mobile banking"}),
                json!({"id": "pr3", "name": "Old Rust Poster", "price": 50, "is_active": false}),
            ]),
            ..RawSnapshot::default()
        }
    }

    pub(crate) fn service_with(source: Arc<dyn ContentSource>) -> CatalogService {
        CatalogService::new(
            source,
            create_cache(&CacheConfig::default()),
            RankingConfig::default(),
            NormalizeOptions::default(),
        )
    }

    async fn loaded_service() -> (CatalogService, Arc<StaticSource>) {
        let source = Arc::new(StaticSource::new(sample_snapshot()));
        let service = service_with(source.clone());
        service.reload().await.unwrap();
        (service, source)
    }

    #[tokio::test]
    async fn test_reload_bumps_version() {
        let (service, _) = loaded_service().await;
        assert_eq!(service.catalog().await.version, 1);
        assert_eq!(service.reload().await.unwrap(), 2);
        assert_eq!(service.status().await.unwrap().post_count, 4);
    }

    #[tokio::test]
    async fn test_status_before_first_load() {
        let source = Arc::new(StaticSource::new(sample_snapshot()));
        source.replace(None);
        let service = service_with(source.clone());

        assert!(service.reload().await.is_err());
        let err = service.status().await.unwrap_err();
        assert!(matches!(err, CatalogServiceError::SourceError(_)));

        source.replace(Some(sample_snapshot()));
        service.reload().await.unwrap();
        assert_eq!(service.status().await.unwrap().version, 1);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_catalog() {
        let (service, source) = loaded_service().await;
        source.replace(None);

        let err = service.reload().await.unwrap_err();
        assert!(matches!(err, CatalogServiceError::SourceError(_)));
        let catalog = service.catalog().await;
        assert_eq!(catalog.version, 1);
        assert_eq!(catalog.posts.len(), 4);
    }

    #[tokio::test]
    async fn test_search_excludes_inactive_products() {
        let (service, _) = loaded_service().await;
        let view = service.search("rust", false).await;

        assert!(view.searched);
        let post_ids: Vec<_> = view.posts.iter().map(|p| p.id.as_str()).collect();
        let product_ids: Vec<_> = view.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(post_ids, vec!["p1", "p2"]);
        assert_eq!(product_ids, vec!["pr1"]);
        assert_eq!(view.total, 3);
    }

    #[tokio::test]
    async fn test_search_hidden_keyword() {
        let (service, _) = loaded_service().await;
        let view = service.search("BKASH", false).await;

        assert_eq!(view.product_count, 1);
        assert_eq!(view.products[0].name, "Wallet");
        assert_eq!(view.query, "BKASH");
        let rendered = serde_json::to_string(&(&view.posts, &view.products))
            .unwrap()
            .to_lowercase();
        assert!(!rendered.contains("bkash"));
        assert!(!rendered.contains("hidden_keywords"));
    }

    #[tokio::test]
    async fn test_search_empty_query_is_idle() {
        let (service, _) = loaded_service().await;
        let view = service.search("   ", false).await;
        assert!(!view.searched);
        assert_eq!(view.total, 0);
    }

    #[tokio::test]
    async fn test_search_preview_keeps_full_counts() {
        let mut raw = sample_snapshot();
        raw.posts = Some(
            (0..6)
                .map(|i| json!({"id": format!("p{i}"), "slug": format!("s{i}"), "title": "Rust"}))
                .collect(),
        );
        let service = service_with(Arc::new(StaticSource::new(raw)));
        service.reload().await.unwrap();

        let view = service.search("rust", true).await;
        assert_eq!(view.posts.len(), 3);
        assert_eq!(view.post_count, 6);
        assert_eq!(view.products.len(), 1);

        let full = service.search("rust", false).await;
        assert_eq!(full.posts.len(), 6);
    }

    #[tokio::test]
    async fn test_list_posts_filters_sorts_and_paginates() {
        let (service, _) = loaded_service().await;
        let filter = BlogListFilter::new().with_category("tech").with_sort(SortMode::Popular);

        let page = service.list_posts(&filter, &ListParams::new(1, 2)).await;
        let ids: Vec<_> = page.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p1"]);
        assert_eq!(page.total, 3);
        assert!(page.has_next());

        let page = service.list_posts(&filter, &ListParams::new(2, 2)).await;
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "p4");
    }

    #[tokio::test]
    async fn test_list_posts_quick_filter_ignores_hidden_keywords() {
        let (service, _) = loaded_service().await;
        let filter = BlogListFilter::new().with_query("borrowck");
        let page = service.list_posts(&filter, &ListParams::default()).await;
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_get_post_not_found() {
        let (service, _) = loaded_service().await;
        assert!(service.get_post("rust-intro").await.is_ok());
        let err = service.get_post("missing").await.unwrap_err();
        assert!(matches!(err, CatalogServiceError::NotFound(slug) if slug == "missing"));
    }

    #[tokio::test]
    async fn test_suggestions() {
        let (service, _) = loaded_service().await;
        let suggestions = service.suggestions("rust-intro").await.unwrap();

        let ids: Vec<_> = suggestions.iter().map(|s| s.post.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p4"]);
        assert_eq!(suggestions[0].tag_score, 2);
        assert_eq!(suggestions[0].category_match, 1);
        assert_eq!(suggestions[1].tag_score, 0);

        assert!(matches!(
            service.suggestions("missing").await,
            Err(CatalogServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_highlights() {
        let (service, _) = loaded_service().await;
        let h = service.highlights().await;
        let trending: Vec<_> = h.trending.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(h.featured.len(), 1);
        assert_eq!(trending, vec!["p2", "p1"]);
    }

    #[tokio::test]
    async fn test_categories_tags_products() {
        let (service, _) = loaded_service().await;

        let categories = service.categories().await;
        let tech = categories.iter().find(|c| c.category.slug == "tech").unwrap();
        assert_eq!(tech.post_count, 3);

        let tags = service.tags().await;
        let rust = tags.iter().find(|t| t.tag.slug == "rust").unwrap();
        assert_eq!(rust.post_count, 2);

        let products = service.products().await;
        assert_eq!(products.len(), 2);
        assert!(products.iter().all(|p| p.id != "pr3"));
    }

    #[tokio::test]
    async fn test_reload_invalidates_memoized_results() {
        let (service, source) = loaded_service().await;
        assert_eq!(service.search("curry", false).await.post_count, 1);

        let mut raw = sample_snapshot();
        if let Some(posts) = raw.posts.as_mut() {
            posts.retain(|p| p["id"] != "p3");
        }
        source.replace(Some(raw));
        service.reload().await.unwrap();

        assert_eq!(service.search("curry", false).await.post_count, 0);
    }

    #[tokio::test]
    async fn test_memoized_results_are_stable() {
        let (service, _) = loaded_service().await;
        let first = service.search("rust", true).await;
        let second = service.search("rust", true).await;
        assert_eq!(first, second);

        let shouted = service.search("  RUST ", true).await;
        assert_eq!(shouted.query, "RUST");
        assert_eq!(shouted.posts, first.posts);
    }
}
