//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{Amount, Document, Transaction, TransactionType, TxnId};
use crate::Config;
use std::str::FromStr;
use tempfile::TempDir;

/// Test environment that sets up a gf home directory with a Config and a seeded ledger.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment with Config and the seed document.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("gf");
        let config = Config::create(&root).await.unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Creates a test environment whose ledger holds no transactions and no categories.
    pub async fn empty() -> Self {
        let env = Self::new().await;
        env.config
            .store()
            .save(&Document::default())
            .await
            .unwrap();
        env
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// A scratch directory inside the environment, e.g. for exports.
    pub fn scratch(&self) -> std::path::PathBuf {
        let p = self._temp_dir.path().join("scratch");
        std::fs::create_dir_all(&p).unwrap();
        p
    }

    /// Loads the current ledger document.
    pub async fn document(&self) -> Document {
        self.config.store().load().await.unwrap()
    }

    /// Adds a transaction directly through the store and returns its id.
    pub async fn insert_test_transaction(
        &self,
        description: &str,
        value: &str,
        r#type: TransactionType,
        date: &str,
        category: &str,
    ) -> TxnId {
        let txn = Transaction::new(
            description,
            Amount::from_str(value).unwrap(),
            r#type,
            date,
            category,
        );
        self.config.store().add_transaction(txn).await.unwrap()
    }
}
