//! Backup management for the ledger document before destructive operations.

use crate::error::Res;
use crate::model::Document;
use crate::{utils, Config};
use anyhow::Context;
use std::path::PathBuf;

/// Prefix for the backup written before a clear-all.
pub const CLEAR_ALL: &str = "clear-all";

/// Manages backup file creation and rotation.
///
/// The `Backup` struct is immutable and owns copies of the paths and settings it needs.
/// Create a new instance via `Config::backup()` or `Backup::new()`.
#[derive(Debug, Clone)]
pub struct Backup {
    backups_dir: PathBuf,
    backup_copies: u32,
}

impl Backup {
    /// Creates a new `Backup` instance from a `Config`.
    pub fn new(config: &Config) -> Self {
        Self {
            backups_dir: config.backups().to_path_buf(),
            backup_copies: config.backup_copies(),
        }
    }

    /// Saves a `Document` as a pretty-printed JSON backup file.
    ///
    /// The filename format is `{prefix}.YYYY-MM-DD-NNN.json` where NNN is a sequence number.
    /// Automatically rotates old backups, keeping only `backup_copies` files.
    ///
    /// Returns the path to the created backup file.
    pub async fn save_json(&self, prefix: &str, data: &Document) -> Res<PathBuf> {
        let json =
            serde_json::to_string_pretty(data).context("Failed to serialize the document")?;
        self.save_raw(prefix, &json).await
    }

    /// Saves `contents` byte for byte, even when they are not a valid document. Naming and
    /// rotation are the same as `save_json`.
    pub async fn save_raw(&self, prefix: &str, contents: &str) -> Res<PathBuf> {
        let date = utils::today();
        let seq = self.next_sequence_number(prefix, &date).await?;
        let filename = format!("{prefix}.{date}-{seq:03}.json");
        let path = self.backups_dir.join(&filename);

        utils::write(&path, contents).await?;

        self.rotate(prefix).await?;

        Ok(path)
    }

    /// Scans the backups directory for existing files with the given prefix and date,
    /// and returns the next sequence number.
    async fn next_sequence_number(&self, prefix: &str, date: &str) -> Res<u32> {
        let mut max_seq: u32 = 0;

        let mut dir = utils::read_dir(&self.backups_dir).await?;
        while let Some(entry) = dir
            .next_entry()
            .await
            .context("Failed to read directory entry")?
        {
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if let Some(seq) = parse_sequence_number(&name, prefix, date) {
                max_seq = max_seq.max(seq);
            }
        }

        Ok(max_seq + 1)
    }

    /// Rotates old backup files, keeping only `backup_copies` files with the given prefix.
    async fn rotate(&self, prefix: &str) -> Res<()> {
        let mut files: Vec<(PathBuf, String)> = Vec::new();

        let mut dir = utils::read_dir(&self.backups_dir).await?;
        while let Some(entry) = dir
            .next_entry()
            .await
            .context("Failed to read directory entry")?
        {
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy().to_string();
            if is_backup_file(&name, prefix) {
                files.push((entry.path(), name));
            }
        }

        // Sort by filename (which sorts by date and sequence number due to format)
        files.sort_by(|a, b| a.1.cmp(&b.1));

        let to_delete = files.len().saturating_sub(self.backup_copies as usize);
        for (path, _) in files.into_iter().take(to_delete) {
            utils::remove(&path).await?;
        }

        Ok(())
    }
}

/// Parses the sequence number from a backup filename.
/// Returns None if the filename doesn't match `{prefix}.{date}-{NNN}.json`.
fn parse_sequence_number(filename: &str, prefix: &str, date: &str) -> Option<u32> {
    filename
        .strip_prefix(&format!("{prefix}.{date}-"))?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

fn is_backup_file(filename: &str, prefix: &str) -> bool {
    filename.starts_with(&format!("{prefix}.")) && filename.ends_with(".json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[test]
    fn test_parse_sequence_number() {
        assert_eq!(
            parse_sequence_number("clear-all.2025-12-14-001.json", "clear-all", "2025-12-14"),
            Some(1)
        );
        assert_eq!(
            parse_sequence_number("clear-all.2025-12-14-042.json", "clear-all", "2025-12-14"),
            Some(42)
        );
        // Wrong prefix
        assert_eq!(
            parse_sequence_number("other.2025-12-14-001.json", "clear-all", "2025-12-14"),
            None
        );
        // Wrong date
        assert_eq!(
            parse_sequence_number("clear-all.2025-12-13-001.json", "clear-all", "2025-12-14"),
            None
        );
        // Wrong extension
        assert_eq!(
            parse_sequence_number("clear-all.2025-12-14-001.csv", "clear-all", "2025-12-14"),
            None
        );
    }

    #[test]
    fn test_is_backup_file() {
        assert!(is_backup_file("clear-all.2025-12-14-001.json", "clear-all"));
        assert!(!is_backup_file("clear-all.2025-12-14-001.json", "other"));
        assert!(!is_backup_file("clear-all.2025-12-14-001", "clear-all"));
    }

    #[tokio::test]
    async fn test_save_json_sequence_and_rotation() {
        let env = TestEnv::new().await;
        let backup = env.config().backup();
        let doc = Document::seed(1_000_000, "2025-01-01");

        let mut paths = Vec::new();
        for _ in 0..7 {
            paths.push(backup.save_json(CLEAR_ALL, &doc).await.unwrap());
        }

        let first_name = paths[0].file_name().unwrap().to_string_lossy().to_string();
        assert!(first_name.ends_with("-001.json"));
        let last_name = paths[6].file_name().unwrap().to_string_lossy().to_string();
        assert!(last_name.ends_with("-007.json"));

        // Only the newest five survive.
        assert!(!paths[0].exists());
        assert!(!paths[1].exists());
        assert!(paths[2..].iter().all(|p| p.exists()));

        let saved: Document = utils::deserialize(&paths[6]).await.unwrap();
        assert_eq!(saved, doc);
    }
}
