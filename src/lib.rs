pub mod args;
pub mod backup;
pub mod commands;
mod config;
mod error;
pub mod export;
pub mod form;
pub mod model;
pub mod storage;
pub mod store;
pub mod view;
mod utils;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{Error, ErrorType, IntoResult, Result};
pub use model::{Amount, Document, Transaction, TransactionType, TxnId};
pub use store::Store;
