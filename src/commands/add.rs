use crate::args::AddArgs;
use crate::commands::{classify, plural, Out};
use crate::form::FormController;
use crate::model::TxnId;
use crate::view::{MonthFilter, View};
use crate::{utils, Config, Result};
use tracing::info;

/// Submits a new transaction through the form and re-renders the ledger.
///
/// The date defaults to today and the category to empty. Nothing is written when validation fails.
pub async fn add(config: Config, args: AddArgs) -> Result<Out<TxnId>> {
    let mut store = config.store();
    let mut form = FormController::new(utils::today());
    {
        let draft = form.draft_mut();
        draft.description = args.description;
        draft.value = args.value;
        draft.r#type = args.kind;
        if let Some(date) = args.date {
            draft.date = date;
        }
        if let Some(category) = args.category {
            draft.category = category;
        }
    }

    let id = form.submit(&mut store).await.map_err(classify)?.id();
    info!("Added transaction {id}");

    let doc = store.load().await.map_err(classify)?;
    let view = View::build(&doc, &MonthFilter::none());
    let message = format!(
        "Added transaction {id} ({} total)\n\n{view}",
        plural(doc.transactions().len(), "transaction", "transactions")
    );
    Ok(Out::new(message, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, TransactionType};
    use crate::test::TestEnv;
    use crate::ErrorType;
    use std::str::FromStr;

    fn args(description: &str, value: &str) -> AddArgs {
        AddArgs {
            description: description.to_string(),
            value: value.to_string(),
            kind: TransactionType::Expense,
            date: Some("2024-03-10".to_string()),
            category: Some("Food".to_string()),
        }
    }

    #[tokio::test]
    async fn test_add() {
        let env = TestEnv::empty().await;
        let out = add(env.config(), args("Coffee", "12.50")).await.unwrap();
        let id = *out.structure().unwrap();
        assert!(out.message().contains("Added transaction"));
        assert!(out.message().contains("12,50"));

        let doc = env.document().await;
        let txn = doc.get(id).unwrap();
        assert_eq!(txn.description(), "Coffee");
        assert_eq!(txn.value(), Amount::from_str("12.5").unwrap());
        assert_eq!(txn.date(), "2024-03-10");
        assert_eq!(txn.category(), "Food");
        assert!(doc.categories().contains("Food"));
    }

    #[tokio::test]
    async fn test_add_defaults_date_to_today() {
        let env = TestEnv::empty().await;
        let mut a = args("Bus", "4");
        a.date = None;
        a.category = None;
        let id = *add(env.config(), a).await.unwrap().structure().unwrap();
        let doc = env.document().await;
        let txn = doc.get(id).unwrap();
        assert_eq!(txn.date(), utils::today());
        assert_eq!(txn.category(), "");
    }

    #[tokio::test]
    async fn test_add_invalid() {
        let env = TestEnv::empty().await;
        let e = add(env.config(), args("  ", "10")).await.unwrap_err();
        assert_eq!(e.error_type(), ErrorType::Validation);
        let e = add(env.config(), args("Coffee", "0")).await.unwrap_err();
        assert_eq!(e.error_type(), ErrorType::Validation);
        let mut a = args("Coffee", "3");
        a.date = Some("10/03/2024".to_string());
        let e = add(env.config(), a).await.unwrap_err();
        assert_eq!(e.error_type(), ErrorType::Validation);
        assert!(env.document().await.transactions().is_empty());
    }
}
