use std::path::{Path, PathBuf};

use crate::error::BrowserError;

/// Expands a leading `~` in store locations and command file paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathExpander;

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    pub fn expand(&self, path: &str) -> Result<PathBuf, BrowserError> {
        if path == "~" {
            return self.home_dir();
        }

        match path.strip_prefix("~/") {
            Some(rest) => {
                let mut expanded = self.home_dir()?;
                for part in rest.split('/').filter(|part| !part.is_empty()) {
                    expanded.push(part);
                }
                Ok(expanded)
            }
            // "~user/..." is left alone
            None => Ok(Path::new(path).to_path_buf()),
        }
    }

    fn home_dir(&self) -> Result<PathBuf, BrowserError> {
        dirs::home_dir().ok_or(BrowserError::HomeDirNotFound)
    }
}
