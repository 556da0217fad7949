//! `taskpad` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the local database.
//! - Run one controller session per invocation.

mod app;
mod cli;
mod config;
mod render;
mod terminal;

use app::{run_command, Outcome};
use clap::Parser;
use cli::{Cli, Commands};
use config::AppConfig;
use log::{error, info};
use std::error::Error;
use std::io;
use std::process::ExitCode;
use taskpad_core::db::open_db;
use taskpad_core::{core_version, init_logging, SqliteTaskStore, TaskListController};
use terminal::TerminalNotifier;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(outcome) if outcome.is_success() => ExitCode::SUCCESS,
        Ok(Outcome::Missing(id)) => {
            eprintln!("taskpad: task {id} not found");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("taskpad: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<Outcome, Box<dyn Error>> {
    let config = AppConfig::from_cli(&cli)?;

    // Logging is diagnostics only; a broken log dir must not block the list.
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("taskpad: logging disabled: {err}");
    }
    info!(
        "event=cli_start module=cli status=ok version={} db={}",
        core_version(),
        config.db_path.display()
    );

    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = open_db(&config.db_path)?;
    let store = SqliteTaskStore::try_with_key(&conn, config.storage_key.as_str())?;

    let command = cli.command.unwrap_or(Commands::List);
    let assume_yes = matches!(command, Commands::Delete { yes: true, .. });
    let notifier =
        TerminalNotifier::new(io::stdin().lock(), io::stdout(), io::stderr()).assume_yes(assume_yes);

    let mut controller = TaskListController::initialize(store, notifier, config.catalog())?;
    let outcome = run_command(
        &mut controller,
        &command,
        config.locale,
        &mut io::stdout().lock(),
    )?;
    info!("event=cli_exit module=cli status=ok outcome={outcome:?}");
    Ok(outcome)
}
