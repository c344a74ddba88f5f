//! The key-value persistence seam. The `Store` only ever talks to a `Storage`, so the same ledger
//! logic runs against files on disk or against memory in tests.

mod file;
mod memory;

use crate::error::Res;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// A minimal string key-value store.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Returns the value stored under `key`, or `None` if nothing is stored there.
    async fn get(&self, key: &str) -> Res<Option<String>>;

    /// Stores `value` under `key`, replacing whatever was there.
    async fn set(&mut self, key: &str, value: &str) -> Res<()>;

    /// Removes `key`. Removing a key that does not exist is not an error.
    async fn remove(&mut self, key: &str) -> Res<()>;
}
