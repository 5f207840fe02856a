use std::io;
use std::path::PathBuf;

use crate::config::ConfigError;
use crate::storage::StorageError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to read theme file: {path}")]
    ReadTheme { path: PathBuf, source: io::Error },
    #[error("failed to parse theme file")]
    ParseTheme(#[from] serde_json::Error),
    #[error("theme file has no id")]
    MissingThemeId,
    #[error("unknown theme: {0}")]
    UnknownTheme(String),
    #[error("failed to write output")]
    Output(#[from] io::Error),
}
