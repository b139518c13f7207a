//! Content sources
//!
//! A content source delivers the raw collections (posts, products,
//! categories, tags, authors) that the normalizer turns into a catalog.
//! Two drivers are provided:
//! - `snapshot`: a JSON export on local disk
//! - `rest`: a PostgREST-style backend over HTTP

pub mod rest;
pub mod snapshot;

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{SourceConfig, SourceDriver};
use crate::normalize::RawSnapshot;

pub use rest::RestSource;
pub use snapshot::SnapshotFileSource;

/// Produces raw collections for the catalog
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch every collection
    async fn fetch(&self) -> Result<RawSnapshot>;

    /// Human-readable description, for logs
    fn describe(&self) -> String;
}

/// Create the content source selected by configuration
pub fn create_source(config: &SourceConfig) -> Result<Arc<dyn ContentSource>> {
    match config.driver {
        SourceDriver::Snapshot => Ok(Arc::new(SnapshotFileSource::new(&config.snapshot_path))),
        SourceDriver::Rest => {
            let base_url = config
                .base_url
                .as_deref()
                .context("source.base_url is required for the rest driver")?;
            let source = RestSource::new(
                base_url,
                config.api_key.clone().unwrap_or_default(),
                Duration::from_secs(config.timeout_secs),
            )?;
            Ok(Arc::new(source))
        }
    }
}
