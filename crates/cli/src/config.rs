//! Runtime configuration: where the backing file lives.

use std::path::PathBuf;

use stockfile_inventory::DEFAULT_INVENTORY_FILE;
use thiserror::Error;

/// Environment variable naming the backing file.
pub const PATH_ENV: &str = "STOCKFILE_PATH";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("inventory file path from {0} is empty")]
    EmptyPath(&'static str),

    #[error("unexpected argument '{0}' (usage: stockfile [INVENTORY_FILE])")]
    UnexpectedArgument(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub inventory_path: PathBuf,
}

impl Config {
    /// First positional argument, else `STOCKFILE_PATH`, else `inventory.txt`.
    pub fn from_env_and_args() -> Result<Self, ConfigError> {
        Self::resolve(std::env::args().skip(1), std::env::var(PATH_ENV).ok())
    }

    pub fn resolve(
        mut args: impl Iterator<Item = String>,
        env_path: Option<String>,
    ) -> Result<Self, ConfigError> {
        let arg = args.next();
        if let Some(extra) = args.next() {
            return Err(ConfigError::UnexpectedArgument(extra));
        }

        let inventory_path = match (arg, env_path) {
            (Some(arg), _) if arg.trim().is_empty() => {
                return Err(ConfigError::EmptyPath("the command line"));
            }
            (Some(arg), _) => PathBuf::from(arg),
            (None, Some(env)) if env.trim().is_empty() => {
                return Err(ConfigError::EmptyPath(PATH_ENV));
            }
            (None, Some(env)) => PathBuf::from(env),
            (None, None) => PathBuf::from(DEFAULT_INVENTORY_FILE),
        };

        Ok(Self { inventory_path })
    }
}
