//! CSV export of every stored transaction.

use crate::error::Res;
use crate::model::Transaction;
use crate::utils;
use anyhow::Context;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The header row of the export file.
pub const CSV_HEADERS: [&str; 6] = ["id", "description", "value", "type", "date", "category"];

/// Why an export was not produced.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ExportError {
    NoTransactions,
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::NoTransactions => write!(f, "There are no transactions to export"),
        }
    }
}

impl std::error::Error for ExportError {}

/// The export file name for the given date, e.g. `transacoes_2024-03-05.csv`.
pub fn file_name(today: &str) -> String {
    format!("transacoes_{today}.csv")
}

/// Renders `transactions`, in the order given, as CSV. Every field is quoted and rows are joined by
/// `\n` with no trailing line break.
///
/// Returns `ExportError::NoTransactions` (inside the `anyhow::Error`) when there is nothing to
/// export.
pub fn to_csv(transactions: &[Transaction]) -> Res<String> {
    if transactions.is_empty() {
        return Err(ExportError::NoTransactions.into());
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADERS)
        .context("Unable to write the CSV header")?;
    for txn in transactions {
        writer
            .write_record([
                txn.id().to_string(),
                txn.description().to_string(),
                txn.value().to_plain_string(),
                txn.r#type().to_string(),
                txn.date().to_string(),
                txn.category().to_string(),
            ])
            .with_context(|| format!("Unable to write transaction {} as CSV", txn.id()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Unable to finish the CSV data: {}", e.error()))?;
    let mut csv = String::from_utf8(bytes).context("The CSV data is not valid UTF-8")?;
    if csv.ends_with('\n') {
        csv.pop();
    }
    Ok(csv)
}

/// Writes the CSV export of `transactions` into `dir` and returns the path of the new file.
pub async fn write_csv(transactions: &[Transaction], dir: &Path, today: &str) -> Res<PathBuf> {
    let csv = to_csv(transactions)?;
    let path = dir.join(file_name(today));
    utils::write(&path, csv)
        .await
        .context("Unable to write the export file")?;
    debug!("Exported {} transactions to {}", transactions.len(), path.display());
    Ok(path)
}
