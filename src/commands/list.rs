use crate::args::ListArgs;
use crate::commands::{classify, Out};
use crate::view::{MonthFilter, View};
use crate::{Config, Result};

/// Renders the ledger table, totals and category suggestions, optionally for a single month.
pub async fn list(config: Config, args: ListArgs) -> Result<Out<View>> {
    let doc = config.store().load().await.map_err(classify)?;
    let filter = MonthFilter::new(args.month().unwrap_or_default());
    let view = View::build(&doc, &filter);
    Ok(Out::new(view.to_string(), view))
}
