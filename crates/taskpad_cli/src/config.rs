//! Runtime configuration resolved from CLI flags, env vars and defaults.

use crate::cli::Cli;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use taskpad_core::{default_log_level, Locale, MessageCatalog};

const APP_DIR_NAME: &str = "taskpad";
const DB_FILE_NAME: &str = "taskpad.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug)]
pub enum ConfigError {
    /// No platform data directory and no explicit path was given.
    NoDataDir(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDataDir(what) => write!(
                f,
                "cannot locate a data directory for the {what}; pass it explicitly"
            ),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub locale: Locale,
    pub storage_key: String,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Self::resolve(cli, dirs::data_dir())
    }

    fn resolve(cli: &Cli, data_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let app_dir = data_dir.map(|dir| dir.join(APP_DIR_NAME));

        let db_path = match (&cli.db, &app_dir) {
            (Some(path), _) => path.clone(),
            (None, Some(dir)) => dir.join(DB_FILE_NAME),
            (None, None) => return Err(ConfigError::NoDataDir("database")),
        };
        let log_dir = match (&cli.log_dir, &app_dir) {
            (Some(path), _) => path.clone(),
            (None, Some(dir)) => dir.join(LOG_DIR_NAME),
            (None, None) => return Err(ConfigError::NoDataDir("log files")),
        };

        Ok(Self {
            db_path,
            log_dir,
            log_level: cli
                .log_level
                .clone()
                .unwrap_or_else(|| default_log_level().to_string()),
            locale: cli.locale.into(),
            storage_key: cli.storage_key.clone(),
        })
    }

    pub fn catalog(&self) -> MessageCatalog {
        MessageCatalog::for_locale(self.locale)
    }
}
