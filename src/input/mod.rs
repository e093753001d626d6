mod completer;
mod console;

pub use completer::{BrowserHelper, CommandCompleter};
pub use console::ConsoleInput;

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use crate::error::BrowserError;

/// Where the shell reads its command lines from.
pub trait InputSource {
    /// Blocks for the next line; `None` once the source is exhausted or closed.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, BrowserError>;

    /// Closing is permanent and may be repeated.
    fn close(&mut self);

    /// Sources that draw their own prompt (a line editor) return true, otherwise
    /// the shell writes the prompt to its output.
    fn renders_prompt(&self) -> bool {
        false
    }

    /// Record types known to the session, for completion.
    fn update_types(&mut self, _types: &[String]) {}
}

/// Pre-loaded command lines, e.g. from a `-f` command file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchInput {
    lines: VecDeque<String>,
    closed: bool,
}

impl BatchInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            closed: false,
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines().map(str::trim))
    }

    pub fn from_file(path: &Path) -> Result<Self, BrowserError> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_text(&content))
    }

    /// True when no lines are left to read.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl InputSource for BatchInput {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>, BrowserError> {
        if self.closed {
            return Ok(None);
        }
        Ok(self.lines.pop_front())
    }

    fn close(&mut self) {
        self.closed = true;
        self.lines.clear();
    }
}
