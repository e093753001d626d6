use std::path::PathBuf;

use rustyline::{config::Configurer, error::ReadlineError, history::FileHistory, Editor};
use tracing::{debug, warn};

use super::{BrowserHelper, InputSource};
use crate::error::BrowserError;

const INTERRUPT_HINT: &str = "Use 'quit' to exit the browser";

/// Interactive line editor with history and completion.
pub struct ConsoleInput {
    editor: Editor<BrowserHelper, FileHistory>,
    history_file: Option<PathBuf>,
    closed: bool,
}

impl ConsoleInput {
    pub fn new(history_file: Option<PathBuf>, history_size: usize) -> Result<Self, BrowserError> {
        let mut editor = Editor::<BrowserHelper, FileHistory>::new()?;
        editor.set_helper(Some(BrowserHelper::new()));
        editor.set_auto_add_history(true);
        editor.set_max_history_size(history_size)?;

        if let Some(path) = &history_file {
            // no history yet on first use
            if path.exists() {
                if let Err(e) = editor.load_history(path) {
                    warn!(path = %path.display(), error = %e, "could not load history");
                }
            }
        }

        // a blocking registry query should not be killed by Ctrl-C
        ctrlc::set_handler(move || {
            println!("\n{}", INTERRUPT_HINT);
        })?;

        Ok(Self {
            editor,
            history_file,
            closed: false,
        })
    }
}

impl InputSource for ConsoleInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, BrowserError> {
        if self.closed {
            return Ok(None);
        }

        loop {
            match self.editor.readline(prompt) {
                Ok(line) => return Ok(Some(line)),
                Err(ReadlineError::Interrupted) => {
                    println!("{}", INTERRUPT_HINT);
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    debug!("end of console input");
                    return Ok(None);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Some(path) = &self.history_file {
            if let Err(e) = self.editor.save_history(path) {
                warn!(path = %path.display(), error = %e, "could not save history");
            }
        }
    }

    fn renders_prompt(&self) -> bool {
        true
    }

    fn update_types(&mut self, types: &[String]) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.update_types(types);
        }
    }
}
