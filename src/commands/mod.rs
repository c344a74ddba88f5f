//! Command handlers for the gf CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod add;
mod categories;
mod clear;
mod delete;
mod edit;
mod export;
mod init;
mod list;

use crate::error::{Error, ErrorType};
use crate::export::ExportError;
use crate::form::ValidationError;
use serde::Serialize;
use std::fmt::Debug;
use tracing::debug;

pub use add::add;
pub use categories::categories;
pub use clear::clear;
pub use delete::delete;
pub use edit::edit;
pub use export::export;
pub use init::init;
pub use list::list;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to stdout and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        println!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Tags an internal error with the `ErrorType` that matches what went wrong.
fn classify(e: anyhow::Error) -> Error {
    let error_type = if e.downcast_ref::<ValidationError>().is_some() {
        ErrorType::Validation
    } else if e.downcast_ref::<ExportError>().is_some() {
        ErrorType::Export
    } else {
        ErrorType::Storage
    };
    Error::new(error_type, e)
}

/// `1 category`, `2 categories`.
fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{count} {}", if count == 1 { one } else { many })
}
