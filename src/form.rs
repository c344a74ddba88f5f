//! The entry form: holds a draft, knows whether it is creating a new transaction or editing an
//! existing one, validates on submit and hands the result to the `Store`.

use crate::error::Res;
use crate::model::{Amount, Transaction, TransactionType, TxnId};
use crate::storage::Storage;
use crate::store::Store;
use std::fmt::{Display, Formatter};
use tracing::debug;

/// Whether the form will create a new transaction or overwrite an existing one.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum DraftState {
    #[default]
    Create,
    Editing(TxnId),
}

/// The unsaved form fields, exactly as typed.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Draft {
    pub description: String,
    pub value: String,
    pub r#type: TransactionType,
    pub date: String,
    pub category: String,
}

impl Draft {
    /// An empty draft with the date set to `today`.
    pub fn blank(today: impl Into<String>) -> Self {
        Self {
            date: today.into(),
            ..Self::default()
        }
    }

    fn from_transaction(txn: &Transaction) -> Self {
        Self {
            description: txn.description().to_string(),
            value: txn.value().to_plain_string(),
            r#type: txn.r#type(),
            date: txn.date().to_string(),
            category: txn.category().to_string(),
        }
    }

    /// Checks the draft and turns it into a `Transaction` with no id.
    pub fn validate(&self) -> std::result::Result<Transaction, ValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        let value = Amount::coerce(&self.value);
        if !value.is_positive() {
            return Err(ValidationError::NonPositiveValue);
        }
        if !is_iso_date(&self.date) {
            return Err(ValidationError::MalformedDate(self.date.clone()));
        }
        Ok(Transaction::new(
            description,
            value,
            self.r#type,
            self.date.as_str(),
            self.category.trim(),
        ))
    }
}

/// Why a draft was rejected.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ValidationError {
    EmptyDescription,
    NonPositiveValue,
    MalformedDate(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyDescription => write!(f, "A description is required"),
            ValidationError::NonPositiveValue => write!(f, "The value must be greater than zero"),
            ValidationError::MalformedDate(d) => {
                write!(f, "Invalid date '{d}', expected YYYY-MM-DD")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// What a successful submit did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Submitted {
    Created(TxnId),
    Updated(TxnId),
    /// The transaction being edited no longer exists, so nothing was written.
    Missing(TxnId),
}

impl Submitted {
    pub fn id(&self) -> TxnId {
        match self {
            Submitted::Created(id) | Submitted::Updated(id) | Submitted::Missing(id) => *id,
        }
    }
}

/// Owns the form's draft and its create/edit state.
#[derive(Debug, Clone)]
pub struct FormController {
    state: DraftState,
    draft: Draft,
    today: String,
}

impl FormController {
    /// A form in create state whose date defaults to `today`.
    pub fn new(today: impl Into<String>) -> Self {
        let today = today.into();
        Self {
            state: DraftState::Create,
            draft: Draft::blank(today.clone()),
            today,
        }
    }

    pub fn state(&self) -> DraftState {
        self.state
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Loads the transaction with `id` into the draft and switches to edit state. If there is no
    /// such transaction the form is left as it was and `false` is returned.
    pub async fn start_edit<S: Storage>(&mut self, store: &mut Store<S>, id: TxnId) -> Res<bool> {
        let Some(txn) = store.get_transaction(id).await? else {
            debug!("Transaction {id} not found, staying in {:?}", self.state);
            return Ok(false);
        };
        self.draft = Draft::from_transaction(&txn);
        self.state = DraftState::Editing(id);
        Ok(true)
    }

    /// Validates the draft and writes it. On a validation error the draft, the state and the store
    /// are all left untouched and the returned error downcasts to `ValidationError`. On success the
    /// form resets to create state.
    pub async fn submit<S: Storage>(&mut self, store: &mut Store<S>) -> Res<Submitted> {
        let txn = self.draft.validate()?;
        let submitted = match self.state {
            DraftState::Create => Submitted::Created(store.add_transaction(txn).await?),
            DraftState::Editing(id) => {
                if store.update_transaction(id, txn).await? {
                    Submitted::Updated(id)
                } else {
                    Submitted::Missing(id)
                }
            }
        };
        self.reset();
        Ok(submitted)
    }

    /// Discards the draft and goes back to create state.
    pub fn cancel(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.state = DraftState::Create;
        self.draft = Draft::blank(self.today.clone());
    }
}

/// `^\d{4}-\d{2}-\d{2}$`
fn is_iso_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}
