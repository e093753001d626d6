use std::path::PathBuf;

use crate::core::config::ConfigError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("{0}")]
    Usage(String),
    #[error("File {} does not exist", .0.display())]
    MissingFile(PathBuf),
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Ctrl-C error: {0}")]
    CtrlC(#[from] ctrlc::Error),
}
