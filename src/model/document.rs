use crate::model::{Amount, Categories, Transaction, TransactionType, TxnId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The whole persisted ledger: every transaction plus the known categories. It is read and
/// written as a single JSON blob.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub(crate) transactions: Vec<Transaction>,
    #[serde(default)]
    pub(crate) categories: Categories,
}

impl Document {
    pub fn new(transactions: Vec<Transaction>, categories: Categories) -> Self {
        Self {
            transactions,
            categories,
        }
    }

    /// The sample data written on first run and after a clear-all. `now_ms` is the current time in
    /// milliseconds since the epoch and `today` is the current date as `YYYY-MM-DD`.
    pub fn seed(now_ms: u64, today: &str) -> Self {
        let transactions = vec![
            Transaction::new(
                "Salário",
                Amount::new(Decimal::new(200000, 2)),
                TransactionType::Income,
                today,
                "Salário",
            )
            .with_id(TxnId::new(now_ms.saturating_sub(200_000))),
            Transaction::new(
                "Almoço",
                Amount::new(Decimal::new(2550, 2)),
                TransactionType::Expense,
                today,
                "Alimentação",
            )
            .with_id(TxnId::new(now_ms.saturating_sub(100_000))),
        ];
        let categories = Categories::new(["Salário", "Alimentação", "Transporte", "Lazer"]);
        Self {
            transactions,
            categories,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    pub fn get(&self, id: TxnId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// The id a newly added transaction should get: the current time, unless some existing id is
    /// already at or past it.
    pub(crate) fn next_id(&self, now_ms: u64) -> TxnId {
        let floor = self
            .transactions
            .iter()
            .map(|t| t.id.value().saturating_add(1))
            .max()
            .unwrap_or(0);
        TxnId::new(now_ms.max(floor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed() {
        let doc = Document::seed(1_000_000, "2024-03-05");
        assert_eq!(doc.transactions().len(), 2);
        assert_eq!(doc.transactions()[0].id(), TxnId::new(800_000));
        assert_eq!(doc.transactions()[1].id(), TxnId::new(900_000));
        assert!(doc.transactions().iter().all(|t| t.date() == "2024-03-05"));
        assert_eq!(
            doc.categories().data(),
            &["Salário", "Alimentação", "Transporte", "Lazer"]
        );
    }

    #[test]
    fn test_next_id_uses_clock_when_ahead() {
        let doc = Document::seed(1_000_000, "2024-03-05");
        assert_eq!(doc.next_id(2_000_000), TxnId::new(2_000_000));
    }

    #[test]
    fn test_next_id_never_collides() {
        let doc = Document::seed(1_000_000, "2024-03-05");
        assert_eq!(doc.next_id(5), TxnId::new(900_001));
    }

    #[test]
    fn test_empty_document_json() {
        let doc: Document = serde_json::from_str(r#"{"transactions":[],"categories":[]}"#).unwrap();
        assert_eq!(doc, Document::default());
        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            r#"{"transactions":[],"categories":[]}"#
        );
    }
}
