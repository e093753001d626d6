use std::collections::BTreeSet;

use rustyline::completion::Pair;

use crate::core::commands::CommandName;

/// Completion candidates for command words and record type arguments.
#[derive(Debug, Clone)]
pub struct CommandCompleter {
    commands: Vec<String>,
    types: BTreeSet<String>,
}

impl Default for CommandCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandCompleter {
    pub fn new() -> Self {
        Self {
            commands: CommandName::ALL
                .iter()
                .map(|name| name.display_name())
                .collect(),
            types: BTreeSet::new(),
        }
    }

    pub fn update_types(&mut self, types: &[String]) {
        self.types = types.iter().cloned().collect();
    }

    pub fn complete_command(&self, word: &str) -> Vec<Pair> {
        Self::matches(self.commands.iter(), word)
    }

    pub fn complete_type(&self, word: &str) -> Vec<Pair> {
        Self::matches(self.types.iter(), word)
    }

    /// The rest of the first command name that `word` is a proper prefix of.
    pub fn command_hint(&self, word: &str) -> Option<String> {
        if word.is_empty() {
            return None;
        }
        let lowered = word.to_lowercase();
        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(&lowered) && cmd.len() > lowered.len())
            .map(|cmd| cmd[lowered.len()..].to_string())
    }

    fn matches<'a>(candidates: impl Iterator<Item = &'a String>, word: &str) -> Vec<Pair> {
        let lowered = word.to_lowercase();
        candidates
            .filter(|candidate| candidate.to_lowercase().starts_with(&lowered))
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate.clone(),
            })
            .collect()
    }
}
