//! These structs provide the CLI interface for the gf CLI.

use crate::model::{TransactionType, TxnId};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// gf: A personal finance ledger for the command line.
///
/// Record income and expenses, give them categories, see a month at a time with running totals,
/// and export everything to CSV. All data lives in a single JSON document under --gf-home.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory, its config file and the sample ledger.
    ///
    /// Running any other command against an empty --gf-home does this automatically, so you only
    /// need `init` if you want to set things up ahead of time.
    Init,
    /// Show the transactions table with balance, income and expense totals.
    List(ListArgs),
    /// Record a new transaction.
    Add(AddArgs),
    /// Change an existing transaction. Only the fields you pass are changed.
    Edit(EditArgs),
    /// Delete a transaction.
    Delete(DeleteArgs),
    /// Write every transaction to transacoes_YYYY-MM-DD.csv.
    Export(ExportArgs),
    /// Erase all data and start over with the sample ledger. A backup is written first.
    Clear(ClearArgs),
    /// List the known categories, or register a new one.
    Categories(CategoriesArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the ledger and configuration are held. Defaults to ~/gf
    #[arg(long, env = "GF_HOME", default_value_t = default_gf_home())]
    gf_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, gf_home: PathBuf) -> Self {
        Self {
            log_level,
            gf_home: gf_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn gf_home(&self) -> &DisplayPath {
        &self.gf_home
    }
}

/// Args for the `gf list` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ListArgs {
    /// Only show transactions whose date starts with this, e.g. 2024-03
    #[arg(long)]
    month: Option<String>,
}

impl ListArgs {
    pub fn new(month: Option<impl Into<String>>) -> Self {
        Self {
            month: month.map(Into::into),
        }
    }

    pub fn month(&self) -> Option<&str> {
        self.month.as_deref()
    }
}

/// Args for the `gf add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// What the money was for.
    #[arg(long, short)]
    pub description: String,

    /// The amount, e.g. 25.50. Use a period for decimals.
    #[arg(long, short = 'v', allow_hyphen_values = true)]
    pub value: String,

    /// Whether this is money coming in or going out.
    #[arg(long = "type", short = 't', value_enum, default_value = "expense")]
    pub kind: TransactionType,

    /// The date as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    pub date: Option<String>,

    /// An optional category. New categories are remembered.
    #[arg(long, short)]
    pub category: Option<String>,
}

/// Args for the `gf edit` command.
#[derive(Debug, Parser, Clone)]
pub struct EditArgs {
    /// The id of the transaction, as shown by `gf list`.
    pub id: TxnId,

    #[arg(long, short)]
    pub description: Option<String>,

    #[arg(long, short = 'v', allow_hyphen_values = true)]
    pub value: Option<String>,

    #[arg(long = "type", short = 't', value_enum)]
    pub kind: Option<TransactionType>,

    #[arg(long)]
    pub date: Option<String>,

    /// Pass an empty string to remove the category.
    #[arg(long, short)]
    pub category: Option<String>,
}

impl EditArgs {
    /// Edit args that change nothing.
    pub fn new(id: TxnId) -> Self {
        Self {
            id,
            description: None,
            value: None,
            kind: None,
            date: None,
            category: None,
        }
    }
}

/// Args for the `gf delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The id of the transaction, as shown by `gf list`.
    id: TxnId,

    /// Do not ask for confirmation.
    #[arg(long, short)]
    yes: bool,
}

impl DeleteArgs {
    pub fn new(id: TxnId, yes: bool) -> Self {
        Self { id, yes }
    }

    pub fn id(&self) -> TxnId {
        self.id
    }

    pub fn yes(&self) -> bool {
        self.yes
    }
}

/// Args for the `gf export` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ExportArgs {
    /// The directory to write the CSV file into. Defaults to `export_dir` from config.json, or the
    /// current directory.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl ExportArgs {
    pub fn new(output: Option<PathBuf>) -> Self {
        Self { output }
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

/// Args for the `gf clear` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ClearArgs {
    /// Do not ask for confirmation.
    #[arg(long, short)]
    yes: bool,
}

impl ClearArgs {
    pub fn new(yes: bool) -> Self {
        Self { yes }
    }

    pub fn yes(&self) -> bool {
        self.yes
    }
}

/// Args for the `gf categories` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct CategoriesArgs {
    /// Register this category before listing.
    #[arg(long)]
    add: Option<String>,
}

impl CategoriesArgs {
    pub fn new(add: Option<impl Into<String>>) -> Self {
        Self {
            add: add.map(Into::into),
        }
    }

    pub fn add(&self) -> Option<&str> {
        self.add.as_deref()
    }
}

fn default_gf_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("gf"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --gf-home or GF_HOME instead of relying on the default \
                directory. If you continue using the program right now, you may have problems!",
            );
            PathBuf::from("gf")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("gf").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_add() {
        let args = parse(&[
            "--gf-home", "/tmp/x", "add", "-d", "Lunch", "-v", "25.5", "--type", "expense",
            "--category", "Food",
        ]);
        assert_eq!(args.common().gf_home().path(), Path::new("/tmp/x"));
        let Command::Add(add) = args.command() else {
            panic!("expected add")
        };
        assert_eq!(add.description, "Lunch");
        assert_eq!(add.value, "25.5");
        assert_eq!(add.kind, TransactionType::Expense);
        assert_eq!(add.date, None);
        assert_eq!(add.category.as_deref(), Some("Food"));
    }

    #[test]
    fn test_parse_add_income_default_and_negative_value() {
        let args = parse(&["add", "-d", "Refund", "-v", "-3", "-t", "income"]);
        let Command::Add(add) = args.command() else {
            panic!("expected add")
        };
        assert_eq!(add.kind, TransactionType::Income);
        assert_eq!(add.value, "-3");
    }

    #[test]
    fn test_parse_edit_and_delete() {
        let args = parse(&["edit", "1709600000000", "--value", "30"]);
        let Command::Edit(edit) = args.command() else {
            panic!("expected edit")
        };
        assert_eq!(edit.id, TxnId::new(1709600000000));
        assert_eq!(edit.value.as_deref(), Some("30"));
        assert!(edit.description.is_none());

        let args = parse(&["delete", "42", "--yes"]);
        let Command::Delete(delete) = args.command() else {
            panic!("expected delete")
        };
        assert_eq!(delete.id(), TxnId::new(42));
        assert!(delete.yes());
    }

    #[test]
    fn test_parse_list_month() {
        let args = parse(&["--log-level", "debug", "list", "--month", "2024-03"]);
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
        let Command::List(list) = args.command() else {
            panic!("expected list")
        };
        assert_eq!(list.month(), Some("2024-03"));
    }

    #[test]
    fn test_constructed_args_match_parsed() {
        let built = Args::new(
            Common::new(LevelFilter::DEBUG, PathBuf::from("/tmp/x")),
            Command::List(ListArgs::new(Some("2024-03"))),
        );
        let parsed = parse(&[
            "--log-level", "debug", "--gf-home", "/tmp/x", "list", "--month", "2024-03",
        ]);
        assert_eq!(built.common().log_level(), parsed.common().log_level());
        assert_eq!(built.common().gf_home(), parsed.common().gf_home());
        let (Command::List(a), Command::List(b)) = (built.command(), parsed.command()) else {
            panic!("expected list")
        };
        assert_eq!(a.month(), b.month());
    }

    #[test]
    fn test_bad_id_is_rejected() {
        assert!(Args::try_parse_from(["gf", "delete", "abc"]).is_err());
    }
}
