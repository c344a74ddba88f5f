use clap::Parser;
use gf_ledger::args::{Args, Command};
use gf_ledger::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().gf_home().path();

    // Commands other than init create the home on first use.
    let _: () = match args.command().clone() {
        Command::Init => commands::init(home).await?.print(),
        Command::List(a) => commands::list(Config::load_or_create(home).await?, a)
            .await?
            .print(),
        Command::Add(a) => commands::add(Config::load_or_create(home).await?, a)
            .await?
            .print(),
        Command::Edit(a) => commands::edit(Config::load_or_create(home).await?, a)
            .await?
            .print(),
        Command::Delete(a) => commands::delete(Config::load_or_create(home).await?, a)
            .await?
            .print(),
        Command::Export(a) => commands::export(Config::load_or_create(home).await?, a)
            .await?
            .print(),
        Command::Clear(a) => commands::clear(Config::load_or_create(home).await?, a)
            .await?
            .print(),
        Command::Categories(a) => commands::categories(Config::load_or_create(home).await?, a)
            .await?
            .print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        // Without RUST_LOG only this crate's library and binary log at the requested level.
        None => EnvFilter::new(format!(
            "gf_ledger={},{}={}",
            level,
            env!("CARGO_BIN_NAME"),
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
