//! Implements the `Storage` trait with one JSON file per key.

use crate::error::Res;
use crate::storage::Storage;
use crate::utils;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file that holds the value for `key`.
    pub fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait::async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Res<Option<String>> {
        let path = self.path(key);
        trace!("get {key} from {}", path.display());
        if !utils::exists(&path).await? {
            return Ok(None);
        }
        Ok(Some(utils::read(&path).await?))
    }

    async fn set(&mut self, key: &str, value: &str) -> Res<()> {
        let path = self.path(key);
        trace!("set {key} at {}", path.display());
        // Write next to the target and rename so a failed write never truncates the old value.
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        utils::write(&tmp, value).await?;
        utils::rename(&tmp, &path).await
    }

    async fn remove(&mut self, key: &str) -> Res<()> {
        let path = self.path(key);
        trace!("remove {key} at {}", path.display());
        if utils::exists(&path).await? {
            utils::remove(&path).await?;
        }
        Ok(())
    }
}
