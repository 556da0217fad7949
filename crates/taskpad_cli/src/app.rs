//! Maps one CLI command onto controller operations.

use crate::cli::Commands;
use crate::render::render_tasks;
use log::info;
use std::io::{self, Write};
use taskpad_core::{ControllerError, Locale, Notifier, TaskId, TaskListController, TaskStore};

/// How a command ended, for the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The user declined a confirmation.
    Declined,
    /// The referenced task does not exist.
    Missing(TaskId),
    /// Input was rejected; the notifier already told the user why.
    Rejected,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Done | Self::Declined)
    }
}

#[derive(Debug)]
pub enum AppError {
    Controller(ControllerError),
    Output(io::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Controller(err) => write!(f, "{err}"),
            Self::Output(err) => write!(f, "failed to write output: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Controller(err) => Some(err),
            Self::Output(err) => Some(err),
        }
    }
}

impl From<io::Error> for AppError {
    fn from(value: io::Error) -> Self {
        Self::Output(value)
    }
}

/// Runs `command` against an initialized controller.
pub fn run_command<S: TaskStore, N: Notifier>(
    controller: &mut TaskListController<S, N>,
    command: &Commands,
    locale: Locale,
    out: &mut impl Write,
) -> Result<Outcome, AppError> {
    info!("event=cli_command module=cli status=start command={}", command_name(command));
    let outcome = match command {
        Commands::List => {
            out.write_all(render_tasks(controller.tasks(), locale).as_bytes())?;
            if !controller.is_empty() {
                writeln!(
                    out,
                    "{} pending, {} done",
                    controller.pending_count(),
                    controller.done_count()
                )?;
            }
            Outcome::Done
        }
        Commands::Add { title, desc } => {
            let form = controller.form_mut();
            form.title = title.clone();
            form.desc = desc.clone();
            submit(controller)?
        }
        Commands::Toggle { id } => {
            let id = TaskId(*id);
            if controller.toggle(id).map_err(AppError::Controller)? {
                out.write_all(render_tasks(controller.tasks(), locale).as_bytes())?;
                Outcome::Done
            } else {
                Outcome::Missing(id)
            }
        }
        Commands::Edit { id, title, desc } => {
            let id = TaskId(*id);
            if !controller.begin_edit(id) {
                return Ok(Outcome::Missing(id));
            }
            let form = controller.form_mut();
            if let Some(title) = title {
                form.title = title.clone();
            }
            if let Some(desc) = desc {
                form.desc = desc.clone();
            }
            submit(controller)?
        }
        Commands::Delete { id, .. } => {
            let id = TaskId(*id);
            if controller.task(id).is_none() {
                Outcome::Missing(id)
            } else if controller.delete(id).map_err(AppError::Controller)? {
                Outcome::Done
            } else {
                Outcome::Declined
            }
        }
    };
    Ok(outcome)
}

fn submit<S: TaskStore, N: Notifier>(
    controller: &mut TaskListController<S, N>,
) -> Result<Outcome, AppError> {
    match controller.submit() {
        Ok(_) => Ok(Outcome::Done),
        Err(ControllerError::Validation(_)) => Ok(Outcome::Rejected),
        Err(err) => Err(AppError::Controller(err)),
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::List => "list",
        Commands::Add { .. } => "add",
        Commands::Toggle { .. } => "toggle",
        Commands::Edit { .. } => "edit",
        Commands::Delete { .. } => "delete",
    }
}
