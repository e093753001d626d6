use std::{fs, path::Path};

use tracing::{debug, warn};

use super::{Config, ConfigError, ConfigPaths};
use crate::store::StoreKind;

pub struct ConfigLoader<'a> {
    paths: &'a ConfigPaths,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(paths: &'a ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn load_configs(&self, config: &mut Config) -> Result<(), ConfigError> {
        self.source_if_exists(&self.paths.rc_path, config)
    }

    fn source_if_exists(&self, path: &Path, config: &mut Config) -> Result<(), ConfigError> {
        if !path.exists() {
            return Ok(());
        }

        debug!(path = %path.display(), "loading configuration");
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        for (index, line) in content.lines().enumerate() {
            self.process_line(index + 1, line, config)?;
        }
        Ok(())
    }

    fn process_line(&self, number: usize, line: &str, config: &mut Config) -> Result<(), ConfigError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let Some((key, value)) = line.split_once('=') else {
            warn!(line = number, "ignoring configuration line without '='");
            return Ok(());
        };
        let key = key.trim();
        let value = unquote(value.trim());

        let invalid = || ConfigError::InvalidValue {
            line: number,
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "store_dir" => config.store_dir = Some(value.to_string()),
            "store_type" => {
                config.store_type = Some(StoreKind::from_discriminator(value).ok_or_else(invalid)?)
            }
            "exception_trace" => config.exception_trace = value.parse().map_err(|_| invalid())?,
            "history_size" => config.history_size = value.parse().map_err(|_| invalid())?,
            _ => warn!(line = number, key, "ignoring unknown configuration key"),
        }
        Ok(())
    }
}

fn unquote(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));

    if quoted {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
