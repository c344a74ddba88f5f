//! Error types for the public boundary of the crate.
//!
//! Internally, functions return `Res<T>`, which is an `anyhow` result with context attached at
//! each I/O step. Public functions return `Result<T>`, which carries an `ErrorType` so that callers
//! can tell a validation problem from a broken data directory without parsing messages.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// The internal result type.
pub(crate) type Res<T> = std::result::Result<T, anyhow::Error>;

/// The public result type.
pub type Result<T> = std::result::Result<T, Error>;

/// The broad category of an `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The user's input was rejected. Nothing was written.
    Validation,
    /// Reading or writing the persisted document failed.
    Storage,
    /// The data directory or its `config.json` is missing or invalid.
    Config,
    /// The CSV export could not be produced.
    Export,
    /// The request itself could not be carried out, e.g. the user declined a confirmation.
    Request,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// The public error type.
pub struct Error {
    error_type: ErrorType,
    source: anyhow::Error,
}

impl Error {
    pub fn new(error_type: ErrorType, source: impl Into<anyhow::Error>) -> Self {
        Self {
            error_type,
            source: source.into(),
        }
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    pub fn inner(&self) -> &anyhow::Error {
        &self.source
    }

    /// Attempts to downcast the underlying error, e.g. to a `ValidationError`.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: Display + Debug + Send + Sync + 'static,
    {
        self.source.downcast_ref::<E>()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#}", self.source)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error({}): {:?}", self.error_type, self.source)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Converts an internal result into a public `Result` tagged with an `ErrorType`.
pub trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| Error::new(error_type, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pub_result_keeps_message_and_type() {
        let r: Res<()> = Err(anyhow::anyhow!("disk is full"));
        let e = r.pub_result(ErrorType::Storage).unwrap_err();
        assert_eq!(e.error_type(), ErrorType::Storage);
        assert!(e.to_string().contains("disk is full"));
    }

    #[test]
    fn test_error_type_display() {
        assert_eq!(ErrorType::Validation.to_string(), "validation");
        assert_eq!(ErrorType::Export.to_string(), "export");
    }
}
