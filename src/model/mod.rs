//! Types that represent the core data model, such as `Transaction` and `Document`.
mod amount;
mod category;
mod document;
mod transaction;

pub use amount::{Amount, AmountError};
pub use category::Categories;
pub use document::Document;
pub use transaction::{Transaction, TransactionType, TxnId};
