use crate::args::CategoriesArgs;
use crate::commands::{classify, plural, Out};
use crate::{Config, Result};
use tracing::info;

/// Lists the known categories, first registering a new one when `--add` is given.
pub async fn categories(config: Config, args: CategoriesArgs) -> Result<Out<Vec<String>>> {
    let mut store = config.store();
    if let Some(name) = args.add() {
        if store.add_category(name).await.map_err(classify)? {
            info!("Added category '{name}'");
        }
    }
    let doc = store.load().await.map_err(classify)?;
    let names = doc.categories().data().to_vec();
    let mut message = plural(names.len(), "category", "categories");
    for name in &names {
        message.push_str("\n  ");
        message.push_str(name);
    }
    Ok(Out::new(message, names))
}
