use crate::error::Res;
use anyhow::Context;
use chrono::Utc;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Write a file.
pub(crate) async fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Res<()> {
    let path = path.as_ref();
    tokio::fs::write(path, contents)
        .await
        .context(format!("Unable to write to {}", path.to_string_lossy()))
}

/// Read a file to a `String`.
pub(crate) async fn read(path: &Path) -> Res<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file at {}", path.display()))
}

/// Deserialize a JSON file into type `T`.
pub(crate) async fn deserialize<T>(path: &Path) -> Res<T>
where
    T: DeserializeOwned,
{
    let content = read(path).await?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file at {}", path.display()))
}

/// Basically move a file. Renames `from` -> `to`.
pub(crate) async fn rename(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Res<()> {
    tokio::fs::rename(from.as_ref(), to.as_ref())
        .await
        .with_context(|| {
            format!(
                "Unable to move file from '{}' to '{}'",
                from.as_ref().to_string_lossy(),
                to.as_ref().to_string_lossy()
            )
        })
}

/// Delete a file.
pub(crate) async fn remove(path: impl AsRef<Path>) -> Res<()> {
    let path = path.as_ref();
    tokio::fs::remove_file(path)
        .await
        .with_context(|| format!("Unable to remove file {}", path.display()))
}

/// Whether anything exists at `path`.
pub(crate) async fn exists(path: impl AsRef<Path>) -> Res<bool> {
    let path = path.as_ref();
    tokio::fs::try_exists(path)
        .await
        .with_context(|| format!("Unable to check for {}", path.display()))
}

/// Create a directory and all of its parents.
pub(crate) async fn make_dir(p: impl AsRef<Path>) -> Res<()> {
    let p = p.as_ref();
    tokio::fs::create_dir_all(p)
        .await
        .with_context(|| format!("Unable to create directory at {}", p.to_string_lossy()))
}

pub(crate) async fn canonicalize(p: impl AsRef<Path>) -> Res<PathBuf> {
    let p = p.as_ref();
    tokio::fs::canonicalize(p)
        .await
        .with_context(|| format!("Unable to canonicalize the path {}", p.to_string_lossy()))
}

pub(crate) async fn read_dir(p: impl AsRef<Path>) -> Res<tokio::fs::ReadDir> {
    let p = p.as_ref();
    tokio::fs::read_dir(p)
        .await
        .with_context(|| format!("Unable to read directory {}", p.display()))
}

/// Returns today's UTC date in YYYY-MM-DD format.
pub(crate) fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Milliseconds since the Unix epoch.
pub(crate) fn now_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}

/// Asks a yes/no question on the terminal. The default answer is no.
pub(crate) fn confirm(prompt: &str) -> Res<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Unable to read the confirmation")
}
