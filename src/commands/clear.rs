use crate::args::ClearArgs;
use crate::backup::CLEAR_ALL;
use crate::commands::{classify, plural, Out};
use crate::error::IntoResult;
use crate::model::Document;
use crate::{utils, Config, ErrorType, Result};
use std::path::PathBuf;
use tracing::{info, warn};

const CLEAR_PROMPT: &str = "Erase all data and restore the sample ledger?";

/// Removes the stored ledger and starts again from the seed data, after confirmation.
///
/// The stored blob is copied to the backups directory first, byte for byte, so even a document
/// that no longer parses is kept. The path of that backup is the structured output.
pub async fn clear(config: Config, args: ClearArgs) -> Result<Out<PathBuf>> {
    if !args.yes() && !utils::confirm(CLEAR_PROMPT).pub_result(ErrorType::Request)? {
        return Ok("Cancelled, nothing cleared".into());
    }

    let mut store = config.store();
    let backup = config.backup();
    let backup = match store.raw().await.map_err(classify)? {
        Some(raw) => backup.save_raw(CLEAR_ALL, &raw).await,
        None => backup.save_json(CLEAR_ALL, &Document::default()).await,
    }
    .pub_result(ErrorType::Storage)?;
    info!("Backed up the ledger to {}", backup.display());

    let doc = store.load().await.map_err(classify)?;
    store.clear_all().await.map_err(classify)?;
    warn!(
        "Cleared {} and restored the sample data",
        plural(doc.transactions().len(), "transaction", "transactions")
    );
    Ok(Out::new(
        format!("All data cleared, backup saved to {}", backup.display()),
        backup,
    ))
}
