//! JSON snapshot on local disk

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::ContentSource;
use crate::normalize::RawSnapshot;

/// Reads a JSON document with `posts`, `products`, `categories`, `tags` and
/// `authors` arrays. Missing keys are treated as empty collections.
#[derive(Debug, Clone)]
pub struct SnapshotFileSource {
    path: PathBuf,
}

impl SnapshotFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ContentSource for SnapshotFileSource {
    async fn fetch(&self) -> Result<RawSnapshot> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read snapshot {}", self.path.display()))?;

        if content.trim().is_empty() {
            tracing::warn!("Snapshot {} is empty", self.path.display());
            return Ok(RawSnapshot::default());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse snapshot {}", self.path.display()))
    }

    fn describe(&self) -> String {
        format!("snapshot {}", self.path.display())
    }
}
