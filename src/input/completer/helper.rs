use std::borrow::Cow;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

use super::CommandCompleter;
use crate::core::commands::CommandName;
use crate::highlight::SyntaxHighlighter;

/// Line editor helper: completion, hints and colouring for the console.
#[derive(Debug, Clone, Default)]
pub struct BrowserHelper {
    completer: CommandCompleter,
    highlighter: SyntaxHighlighter,
}

impl BrowserHelper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_types(&mut self, types: &[String]) {
        self.completer.update_types(types);
    }

    /// Start offset of the word being completed and its candidates.
    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let before_cursor = &line[..pos];
        let mut words: Vec<&str> = before_cursor.split_whitespace().collect();
        if before_cursor.is_empty() || before_cursor.ends_with(char::is_whitespace) {
            words.push("");
        }

        let current = words.last().copied().unwrap_or("");
        let start = pos - current.len();

        let matches = match words.len() {
            1 => self.completer.complete_command(current),
            2 => match CommandName::matching(words[0]) {
                Some(CommandName::Select | CommandName::Ls) => {
                    self.completer.complete_type(current)
                }
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };
        (start, matches)
    }
}

impl Helper for BrowserHelper {}

impl Completer for BrowserHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(line, pos))
    }
}

impl Highlighter for BrowserHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlighter.highlight_command(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.highlighter.highlight_hint(hint))
    }
}

impl Hinter for BrowserHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        // only hint while typing the command word at the end of the line
        if pos < line.len() || line.contains(char::is_whitespace) {
            return None;
        }
        self.completer.command_hint(line)
    }
}

impl Validator for BrowserHelper {}
