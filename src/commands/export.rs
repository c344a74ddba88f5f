use crate::args::ExportArgs;
use crate::commands::{classify, plural, Out};
use crate::{export, utils, Config, Result};
use std::path::PathBuf;
use tracing::info;

/// Writes every stored transaction, ignoring any month filter, to `transacoes_<today>.csv`.
///
/// # Errors
/// - Returns an `Export` error when there are no transactions.
pub async fn export(config: Config, args: ExportArgs) -> Result<Out<PathBuf>> {
    let doc = config.store().load().await.map_err(classify)?;
    let dir = args
        .output()
        .map(PathBuf::from)
        .unwrap_or_else(|| config.export_dir());
    let path = export::write_csv(doc.transactions(), &dir, &utils::today())
        .await
        .map_err(classify)?;
    info!("Exported to {}", path.display());
    Ok(Out::new(
        format!(
            "Exported {} to {}",
            plural(doc.transactions().len(), "transaction", "transactions"),
            path.display()
        ),
        path,
    ))
}
