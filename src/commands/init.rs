use crate::commands::Out;
use crate::{Config, Result};
use std::path::Path;

/// Creates the data directory, its subdirectories, an initial `config.json` with default settings,
/// and the ledger document seeded with sample data.
///
/// # Errors
/// - Returns an error if the directory already holds a `config.json`.
/// - Returns an error if any file operations fail.
pub async fn init(gf_home: &Path) -> Result<Out<()>> {
    let config = Config::create(gf_home).await?;
    Ok(format!(
        "Successfully created the gf directory and config at {}",
        config.root().display()
    )
    .into())
}
