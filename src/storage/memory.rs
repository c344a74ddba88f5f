//! Implements the `Storage` trait using in-memory data for testing purposes.

use crate::error::Res;
use crate::storage::Storage;
use std::collections::HashMap;

/// An implementation of the `Storage` trait that keeps everything in a `HashMap`.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    data: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `MemoryStorage` that already holds `value` under `key`.
    pub fn with(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut data = HashMap::new();
        data.insert(key.into(), value.into());
        Self { data }
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Res<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: &str) -> Res<()> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Res<()> {
        self.data.remove(key);
        Ok(())
    }
}
