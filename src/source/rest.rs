//! PostgREST-style HTTP backend

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Value;
use std::time::Duration;

use super::ContentSource;
use crate::normalize::RawSnapshot;

/// A collection and the `select` expression used to fetch it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Collection {
    table: &'static str,
    select: &'static str,
    /// Extra filter as `(column, expression)`
    filter: Option<(&'static str, &'static str)>,
}

// Order matches the fields of RawSnapshot
const COLLECTIONS: [Collection; 5] = [
    Collection {
        table: "posts",
        select: "*,author:profiles(*),category:categories(*),post_tags(tags(*))",
        filter: Some(("status", "eq.published")),
    },
    Collection {
        table: "products",
        select: "*",
        filter: None,
    },
    Collection {
        table: "categories",
        select: "*",
        filter: None,
    },
    Collection {
        table: "tags",
        select: "*",
        filter: None,
    },
    Collection {
        table: "profiles",
        select: "*",
        filter: None,
    },
];

/// Fetches every collection from `{base_url}/rest/v1/{table}`
#[derive(Debug, Clone)]
pub struct RestSource {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestSource {
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("Pencraft/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn collection_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn fetch_collection(&self, collection: Collection) -> Result<Vec<Value>> {
        let mut query = vec![("select", collection.select)];
        if let Some(filter) = collection.filter {
            query.push(filter);
        }

        let mut request = self
            .client
            .get(self.collection_url(collection.table))
            .query(&query);
        if !self.api_key.is_empty() {
            request = request
                .header("apikey", &self.api_key)
                .bearer_auth(&self.api_key);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", collection.table))?;

        let status = response.status();
        if !status.is_success() {
            bail!("Fetching {} failed with status {}", collection.table, status);
        }

        let rows: Vec<Value> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} response", collection.table))?;

        tracing::debug!("Fetched {} {} rows", rows.len(), collection.table);
        Ok(rows)
    }
}

#[async_trait]
impl ContentSource for RestSource {
    async fn fetch(&self) -> Result<RawSnapshot> {
        let mut collections = try_join_all(COLLECTIONS.iter().map(|c| self.fetch_collection(*c)))
            .await?
            .into_iter()
            .map(Some);

        Ok(RawSnapshot {
            posts: collections.next().flatten(),
            products: collections.next().flatten(),
            categories: collections.next().flatten(),
            tags: collections.next().flatten(),
            authors: collections.next().flatten(),
        })
    }

    fn describe(&self) -> String {
        format!("rest {}", self.base_url)
    }
}
