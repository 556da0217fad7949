//! Command-line surface.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use taskpad_core::{Locale, DEFAULT_STORAGE_KEY};

#[derive(Debug, Parser)]
#[command(name = "taskpad")]
#[command(version)]
#[command(about = "Keep a short to-do list in a local database")]
pub struct Cli {
    /// SQLite database file
    #[arg(long, env = "TASKPAD_DB", global = true)]
    pub db: Option<PathBuf>,
    /// Directory for rolling log files (absolute)
    #[arg(long, env = "TASKPAD_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long, env = "TASKPAD_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,
    /// Language of confirmations and messages
    #[arg(long, env = "TASKPAD_LOCALE", value_enum, default_value_t = LocaleArg::En, global = true)]
    pub locale: LocaleArg,
    /// Storage key the list is saved under
    #[arg(long, default_value = DEFAULT_STORAGE_KEY, global = true)]
    pub storage_key: String,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Commands {
    /// Show all tasks (default)
    List,
    /// Add a task
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        desc: String,
    },
    /// Flip a task between pending and done
    Toggle { id: i64 },
    /// Change a task's title and/or description
    Edit {
        id: i64,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        desc: Option<String>,
    },
    /// Delete a task after confirmation
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LocaleArg {
    En,
    Id,
}

impl From<LocaleArg> for Locale {
    fn from(value: LocaleArg) -> Self {
        match value {
            LocaleArg::En => Locale::English,
            LocaleArg::Id => Locale::Indonesian,
        }
    }
}
