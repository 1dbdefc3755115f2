use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::StateStore;
use crate::config::Config;

/// Blob store backed by a single JSON file under the configured data
/// directory.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.data_dir.join(format!("{}.json", config.storage_name)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StateStore for FileStore {
    async fn load(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).context("Failed to read game state file"),
        }
    }

    async fn save(&self, blob: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create data directory")?;
        }

        // Write-then-rename keeps the previous blob intact if the process
        // dies mid-write.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, blob)
            .await
            .context("Failed to write game state file")?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .context("Failed to replace game state file")?;

        Ok(())
    }
}
