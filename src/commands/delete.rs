use crate::args::DeleteArgs;
use crate::commands::{classify, Out};
use crate::error::IntoResult;
use crate::model::TxnId;
use crate::view::{MonthFilter, View};
use crate::{utils, Config, ErrorType, Result};
use tracing::info;

/// Removes a transaction after confirmation. Deleting an id that does not exist changes nothing.
pub async fn delete(config: Config, args: DeleteArgs) -> Result<Out<TxnId>> {
    let id = args.id();
    if !args.yes() && !utils::confirm(&prompt(id)).pub_result(ErrorType::Request)? {
        return Ok("Cancelled, nothing deleted".into());
    }

    let mut store = config.store();
    if !store.delete_transaction(id).await.map_err(classify)? {
        return Ok(format!("No transaction with id {id}, nothing deleted").into());
    }
    info!("Deleted transaction {id}");

    let doc = store.load().await.map_err(classify)?;
    let view = View::build(&doc, &MonthFilter::none());
    Ok(Out::new(format!("Deleted transaction {id}\n\n{view}"), id))
}

fn prompt(id: TxnId) -> String {
    format!("Delete transaction {id}?")
}
