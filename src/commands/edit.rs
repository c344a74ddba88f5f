use crate::args::EditArgs;
use crate::commands::{classify, Out};
use crate::form::{FormController, Submitted};
use crate::model::TxnId;
use crate::view::{MonthFilter, View};
use crate::{utils, Config, Result};
use tracing::{debug, info};

/// Loads a transaction into the form, applies the given overrides and submits it.
///
/// Fields that are not given keep their stored values. An id that does not exist is not an error;
/// nothing is written and the returned `Out` has no structure.
pub async fn edit(config: Config, args: EditArgs) -> Result<Out<TxnId>> {
    let mut store = config.store();
    let mut form = FormController::new(utils::today());
    let id = args.id;
    if !form.start_edit(&mut store, id).await.map_err(classify)? {
        debug!("Nothing to edit for {id}");
        return Ok(format!("No transaction with id {id}, nothing changed").into());
    }

    let draft = form.draft_mut();
    if let Some(description) = args.description {
        draft.description = description;
    }
    if let Some(value) = args.value {
        draft.value = value;
    }
    if let Some(kind) = args.kind {
        draft.r#type = kind;
    }
    if let Some(date) = args.date {
        draft.date = date;
    }
    if let Some(category) = args.category {
        draft.category = category;
    }

    match form.submit(&mut store).await.map_err(classify)? {
        Submitted::Updated(id) => {
            info!("Updated transaction {id}");
            let doc = store.load().await.map_err(classify)?;
            let view = View::build(&doc, &MonthFilter::none());
            Ok(Out::new(format!("Updated transaction {id}\n\n{view}"), id))
        }
        other => Ok(format!("Transaction {} is gone, nothing changed", other.id()).into()),
    }
}
