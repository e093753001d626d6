//! Defaults read from `~/.txbrowserc` before command-line flags apply.

use std::path::PathBuf;

mod loader;
mod paths;

pub use loader::ConfigLoader;
pub use paths::ConfigPaths;

use crate::store::StoreKind;

pub const DEFAULT_HISTORY_SIZE: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub store_dir: Option<String>,
    pub store_type: Option<StoreKind>,
    pub exception_trace: bool,
    pub history_size: usize,
    pub history_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: None,
            store_type: None,
            exception_trace: false,
            history_size: DEFAULT_HISTORY_SIZE,
            history_file: None,
        }
    }
}

impl Config {
    pub fn load(paths: &ConfigPaths) -> Result<Self, ConfigError> {
        let mut config = Config {
            history_file: Some(paths.history_path.clone()),
            ..Config::default()
        };

        ConfigLoader::new(paths).load_configs(&mut config)?;
        Ok(config)
    }

    /// Loads from the home directory, or falls back to defaults without one.
    pub fn load_default() -> Result<Self, ConfigError> {
        match ConfigPaths::new() {
            Ok(paths) => Self::load(&paths),
            Err(ConfigError::HomeDirNotFound) => Ok(Config::default()),
            Err(e) => Err(e),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: invalid value '{value}' for {key}")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },
}
