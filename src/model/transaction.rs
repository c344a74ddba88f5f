use crate::model::Amount;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

/// The identifier of a `Transaction`: milliseconds since the Unix epoch at creation time, bumped
/// when needed so that it is always larger than every id already in the document.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TxnId(u64);

impl TxnId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Display for TxnId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for TxnId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<u64> for TxnId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Whether money came in or went out.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
pub enum TransactionType {
    #[serde(alias = "Receita", alias = "income")]
    Income,
    #[default]
    #[serde(alias = "Despesa", alias = "expense")]
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

/// A single ledger entry.
///
/// `date` is kept as the ISO `YYYY-MM-DD` string it was entered as. Sorting and month filtering
/// work directly on that string.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub(crate) id: TxnId,
    pub(crate) description: String,
    pub(crate) value: Amount,
    #[serde(rename = "type")]
    pub(crate) r#type: TransactionType,
    pub(crate) date: String,
    #[serde(default)]
    pub(crate) category: String,
}

impl Transaction {
    /// Creates a transaction with no id. The `Store` assigns one when it is added.
    pub fn new(
        description: impl Into<String>,
        value: Amount,
        r#type: TransactionType,
        date: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: TxnId::default(),
            description: description.into(),
            value,
            r#type,
            date: date.into(),
            category: category.into(),
        }
    }

    pub fn id(&self) -> TxnId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value(&self) -> Amount {
        self.value
    }

    pub fn r#type(&self) -> TransactionType {
        self.r#type
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// The category label, empty when the transaction is uncategorized.
    pub fn category(&self) -> &str {
        &self.category
    }

    pub(crate) fn with_id(mut self, id: TxnId) -> Self {
        self.id = id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_json_field_names() {
        let txn = Transaction::new(
            "Lunch",
            Amount::from_str("25.5").unwrap(),
            TransactionType::Expense,
            "2024-03-05",
            "Food",
        )
        .with_id(TxnId::new(1709600000000));
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["id"], 1709600000000u64);
        assert_eq!(json["description"], "Lunch");
        assert_eq!(json["value"].to_string(), "25.5");
        assert_eq!(json["type"], "Expense");
        assert_eq!(json["date"], "2024-03-05");
        assert_eq!(json["category"], "Food");
    }

    #[test]
    fn test_transaction_reads_legacy_type_labels_and_missing_category() {
        let json = r#"{"id":1,"description":"Salário","value":2000,"type":"Receita","date":"2024-01-05"}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.r#type(), TransactionType::Income);
        assert_eq!(txn.category(), "");
        assert_eq!(txn.value().to_string(), "2.000,00");
    }

    #[test]
    fn test_transaction_type_from_str() {
        assert_eq!(
            TransactionType::from_str("Income").unwrap(),
            TransactionType::Income
        );
        assert_eq!(
            TransactionType::from_str("Despesa").unwrap(),
            TransactionType::Expense
        );
        assert!(TransactionType::from_str("Transfer").is_err());
    }

    #[test]
    fn test_txn_id_parse() {
        assert_eq!(TxnId::from_str(" 42 ").unwrap(), TxnId::new(42));
        assert!(TxnId::from_str("x").is_err());
    }
}
