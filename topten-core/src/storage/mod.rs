use anyhow::Result;
use async_trait::async_trait;

pub mod file_store;
pub mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// Durable key-value blob store the session is written through to. The core
/// serializes the whole session record into one opaque blob under a fixed
/// storage name; the store never looks inside it.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Returns the stored blob, or `None` on first run.
    async fn load(&self) -> Result<Option<String>>;

    async fn save(&self, blob: &str) -> Result<()>;
}
