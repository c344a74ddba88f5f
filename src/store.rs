//! The `Store` owns every read and write of the persisted `Document`.
//!
//! Each operation is a full read-modify-write of the whole document under one storage key. There
//! is no locking: the last write wins.

use crate::error::Res;
use crate::model::{Document, Transaction, TxnId};
use crate::storage::Storage;
use crate::utils;
use anyhow::Context;
use tracing::debug;

/// The storage key the document lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "gf_data_v1";

/// Reads and writes the ledger `Document` through a `Storage`.
#[derive(Debug, Clone)]
pub struct Store<S: Storage> {
    storage: S,
    key: String,
}

impl<S: Storage> Store<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// First-run initialization: writes the seed document if nothing is stored yet. Returns `true`
    /// if the seed was written.
    pub async fn init(&mut self) -> Res<bool> {
        if self.storage.get(&self.key).await?.is_some() {
            return Ok(false);
        }
        debug!("No document under '{}', writing seed data", self.key);
        let seed = Document::seed(utils::now_ms(), &utils::today());
        self.save(&seed).await?;
        Ok(true)
    }

    /// Reads the document.
    ///
    /// - If nothing is stored, an empty document is written and returned.
    /// - If the stored blob does not parse, an empty document is returned and the stored blob is
    ///   left untouched.
    pub async fn load(&mut self) -> Res<Document> {
        let raw = match self.storage.get(&self.key).await? {
            Some(raw) => raw,
            None => {
                let empty = Document::default();
                self.save(&empty).await?;
                return Ok(empty);
            }
        };
        match serde_json::from_str(&raw) {
            Ok(doc) => Ok(doc),
            Err(e) => {
                debug!("Unable to parse the document under '{}': {e}", self.key);
                Ok(Document::default())
            }
        }
    }

    /// The stored blob exactly as it is, whether or not it parses.
    pub async fn raw(&self) -> Res<Option<String>> {
        self.storage
            .get(&self.key)
            .await
            .with_context(|| format!("Unable to read the document under '{}'", self.key))
    }

    /// Serializes and writes the whole document, replacing what was stored.
    pub async fn save(&mut self, doc: &Document) -> Res<()> {
        let json = serde_json::to_string(doc).context("Unable to serialize the document")?;
        self.storage
            .set(&self.key, &json)
            .await
            .with_context(|| format!("Unable to save the document under '{}'", self.key))
    }

    /// Registers a category. Empty names and names already present are ignored. Returns `true` if
    /// the category was added.
    pub async fn add_category(&mut self, name: &str) -> Res<bool> {
        let mut doc = self.load().await?;
        if !doc.categories.insert(name) {
            return Ok(false);
        }
        self.save(&doc).await?;
        Ok(true)
    }

    /// Appends `txn` with a freshly assigned id, registers its category, and returns the id.
    pub async fn add_transaction(&mut self, txn: Transaction) -> Res<TxnId> {
        let mut doc = self.load().await?;
        let id = doc.next_id(utils::now_ms());
        let txn = txn.with_id(id);
        doc.categories.insert(txn.category.clone());
        doc.transactions.push(txn);
        self.save(&doc).await?;
        debug!("Added transaction {id}");
        Ok(id)
    }

    /// Replaces the transaction with `id` in place, keeping its position and id. Returns `false`
    /// and writes nothing if no transaction has that id.
    pub async fn update_transaction(&mut self, id: TxnId, txn: Transaction) -> Res<bool> {
        let mut doc = self.load().await?;
        let Some(slot) = doc.transactions.iter_mut().find(|t| t.id == id) else {
            debug!("Transaction {id} not found, nothing to update");
            return Ok(false);
        };
        *slot = txn.with_id(id);
        let category = slot.category.clone();
        doc.categories.insert(category);
        self.save(&doc).await?;
        Ok(true)
    }

    /// Removes the transaction with `id`. Returns whether anything was removed.
    pub async fn delete_transaction(&mut self, id: TxnId) -> Res<bool> {
        let mut doc = self.load().await?;
        let before = doc.transactions.len();
        doc.transactions.retain(|t| t.id != id);
        self.save(&doc).await?;
        Ok(doc.transactions.len() < before)
    }

    /// Looks up a single transaction.
    pub async fn get_transaction(&mut self, id: TxnId) -> Res<Option<Transaction>> {
        Ok(self.load().await?.get(id).cloned())
    }

    /// Erases the stored document and runs first-run initialization again.
    pub async fn clear_all(&mut self) -> Res<()> {
        self.storage
            .remove(&self.key)
            .await
            .with_context(|| format!("Unable to erase the document under '{}'", self.key))?;
        self.init().await?;
        Ok(())
    }
}
