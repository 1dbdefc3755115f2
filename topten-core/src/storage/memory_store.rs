use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::StateStore;

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    blob: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a blob, as if a previous run had saved it.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    /// Current contents, for assertions.
    pub fn snapshot(&self) -> Option<String> {
        self.blob.lock().ok().and_then(|guard| (*guard).clone())
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self) -> Result<Option<String>> {
        let blob = self
            .blob
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        Ok(blob.clone())
    }

    async fn save(&self, new_blob: &str) -> Result<()> {
        let mut blob = self
            .blob
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        *blob = Some(new_blob.to_string());
        Ok(())
    }
}
