//! Builds the read-only view of the ledger: the sorted, month-filtered table, the running totals
//! and the category suggestions.

use crate::model::{Amount, Document, Transaction, TransactionType, TxnId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A month filter such as `2024-03`. Transactions match when their date starts with the filter
/// text. An empty filter matches everything.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthFilter(Option<String>);

impl MonthFilter {
    pub fn new(s: impl AsRef<str>) -> Self {
        let s = s.as_ref().trim();
        if s.is_empty() {
            Self(None)
        } else {
            Self(Some(s.to_string()))
        }
    }

    pub fn none() -> Self {
        Self(None)
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        match &self.0 {
            None => true,
            Some(prefix) => txn.date().starts_with(prefix.as_str()),
        }
    }
}

impl Display for MonthFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_deref().unwrap_or(""))
    }
}

/// Income and expense sums over the filtered set.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub income: Amount,
    pub expense: Amount,
}

impl Totals {
    pub fn balance(&self) -> Amount {
        self.income - self.expense
    }

    fn add(&mut self, txn: &Transaction) {
        match txn.r#type() {
            TransactionType::Income => self.income = self.income + txn.value(),
            TransactionType::Expense => self.expense = self.expense + txn.value(),
        }
    }
}

/// One table row. Text fields are already escaped and the value is already formatted.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: TxnId,
    pub description: String,
    pub value: String,
    pub r#type: TransactionType,
    pub date: String,
    pub category: String,
}

impl Row {
    fn new(txn: &Transaction) -> Self {
        Self {
            id: txn.id(),
            description: escape_html(txn.description()),
            value: money(txn.value()),
            r#type: txn.r#type(),
            date: txn.date().to_string(),
            category: escape_html(txn.category()),
        }
    }
}

/// Everything needed to draw the ledger screen.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct View {
    filter: MonthFilter,
    rows: Vec<Row>,
    totals: Totals,
    suggestions: Vec<String>,
}

impl View {
    /// Builds the view of `doc` restricted to `filter`.
    ///
    /// Rows are sorted newest date first, and newest id first within a date. Totals only count the
    /// rows that pass the filter; suggestions always list every known category.
    pub fn build(doc: &Document, filter: &MonthFilter) -> Self {
        let mut txns: Vec<&Transaction> = doc
            .transactions()
            .iter()
            .filter(|t| filter.matches(t))
            .collect();
        txns.sort_by(|a, b| b.date().cmp(a.date()).then_with(|| b.id().cmp(&a.id())));

        let mut totals = Totals::default();
        for txn in &txns {
            totals.add(txn);
        }

        Self {
            filter: filter.clone(),
            rows: txns.into_iter().map(Row::new).collect(),
            totals,
            suggestions: doc.categories().iter().map(String::from).collect(),
        }
    }

    pub fn filter(&self) -> &MonthFilter {
        &self.filter
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }
}

impl Display for View {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let headers = ["ID", "Description", "Value", "Type", "Date", "Category"];
        let cells: Vec<[String; 6]> = self
            .rows
            .iter()
            .map(|r| {
                [
                    r.id.to_string(),
                    r.description.clone(),
                    r.value.clone(),
                    r.r#type.to_string(),
                    r.date.clone(),
                    r.category.clone(),
                ]
            })
            .collect();

        let mut widths = headers.map(|h| h.chars().count());
        for row in &cells {
            for (w, cell) in widths.iter_mut().zip(row.iter()) {
                *w = (*w).max(cell.chars().count());
            }
        }

        write_row(f, &headers.map(String::from), &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "|-{}-|", rule.join("-|-"))?;
        for row in &cells {
            write_row(f, row, &widths)?;
        }
        if cells.is_empty() {
            writeln!(f, "(no transactions)")?;
        }

        writeln!(f)?;
        if self.filter.is_set() {
            writeln!(f, "Month:    {}", self.filter)?;
        }
        writeln!(f, "Balance:  {}", money(self.totals.balance()))?;
        writeln!(f, "Income:   {}", money(self.totals.income))?;
        writeln!(f, "Expense:  {}", money(self.totals.expense))?;
        write!(f, "Categories: {}", self.suggestions.join(", "))
    }
}

fn write_row(f: &mut Formatter<'_>, cells: &[String; 6], widths: &[usize; 6]) -> std::fmt::Result {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(c, w)| format!("{c}{}", " ".repeat(w - c.chars().count())))
        .collect();
    writeln!(f, "| {} |", padded.join(" | "))
}

/// Formats money for display, e.g. `R$ 1.234,56`.
pub fn money(amount: Amount) -> String {
    format!("R$ {amount}")
}

/// Escapes the characters that would otherwise be read as markup.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Categories;
    use std::str::FromStr;

    fn txn(id: u64, value: &str, t: TransactionType, date: &str) -> Transaction {
        Transaction::new("x", Amount::from_str(value).unwrap(), t, date, "").with_id(TxnId::new(id))
    }

    fn doc() -> Document {
        Document::new(
            vec![
                txn(1, "100", TransactionType::Income, "2024-03-01"),
                txn(2, "30", TransactionType::Expense, "2024-03-15"),
                txn(3, "12.5", TransactionType::Expense, "2024-04-02"),
                txn(4, "7", TransactionType::Expense, "2024-03-15"),
                txn(5, "1000", TransactionType::Income, "2023-03-20"),
            ],
            Categories::new(["Food", "Rent"]),
        )
    }

    fn ids(view: &View) -> Vec<u64> {
        view.rows().iter().map(|r| r.id.value()).collect()
    }

    #[test]
    fn test_sort_date_desc_then_id_desc() {
        let view = View::build(&doc(), &MonthFilter::none());
        assert_eq!(ids(&view), vec![3, 4, 2, 1, 5]);
    }

    #[test]
    fn test_month_filter() {
        let view = View::build(&doc(), &MonthFilter::new("2024-03"));
        assert_eq!(ids(&view), vec![4, 2, 1]);
        assert!(view.rows().iter().all(|r| r.date.starts_with("2024-03")));
    }

    #[test]
    fn test_blank_filter_is_no_filter() {
        let view = View::build(&doc(), &MonthFilter::new("   "));
        assert!(!view.filter().is_set());
        assert_eq!(view.rows().len(), 5);
    }

    #[test]
    fn test_totals_over_filtered_set() {
        let view = View::build(&doc(), &MonthFilter::new("2024-03"));
        let totals = view.totals();
        assert_eq!(totals.income, Amount::from_str("100").unwrap());
        assert_eq!(totals.expense, Amount::from_str("37").unwrap());
        assert_eq!(totals.balance(), totals.income - totals.expense);
        assert_eq!(totals.balance(), Amount::from_str("63").unwrap());
    }

    #[test]
    fn test_totals_empty_set() {
        let view = View::build(&doc(), &MonthFilter::new("1999-01"));
        assert!(view.rows().is_empty());
        assert!(view.totals().balance().is_zero());
    }

    #[test]
    fn test_suggestions_ignore_filter() {
        let view = View::build(&doc(), &MonthFilter::new("1999-01"));
        assert_eq!(view.suggestions(), &["Food", "Rent"]);
    }

    #[test]
    fn test_rows_are_escaped_and_formatted() {
        let d = Document::new(
            vec![Transaction::new(
                "<b>Tom & Jerry's \"show\"</b>",
                Amount::from_str("1234.5").unwrap(),
                TransactionType::Expense,
                "2024-03-01",
                "<i>",
            )
            .with_id(TxnId::new(9))],
            Categories::default(),
        );
        let view = View::build(&d, &MonthFilter::none());
        let row = &view.rows()[0];
        assert_eq!(
            row.description,
            "&lt;b&gt;Tom &amp; Jerry&#39;s &quot;show&quot;&lt;/b&gt;"
        );
        assert_eq!(row.category, "&lt;i&gt;");
        assert_eq!(row.value, "R$ 1.234,50");
    }

    #[test]
    fn test_display_has_summary() {
        let view = View::build(&doc(), &MonthFilter::new("2024-03"));
        let s = view.to_string();
        assert!(s.contains("| ID "));
        assert!(s.contains("Month:    2024-03"));
        assert!(s.contains("Balance:  R$ 63,00"));
        assert!(s.contains("Income:   R$ 100,00"));
        assert!(s.contains("Expense:  R$ 37,00"));
        assert!(s.contains("Categories: Food, Rent"));
    }

    #[test]
    fn test_display_empty() {
        let view = View::build(&Document::default(), &MonthFilter::none());
        let s = view.to_string();
        assert!(s.contains("(no transactions)"));
        assert!(s.contains("Balance:  R$ 0,00"));
    }
}
