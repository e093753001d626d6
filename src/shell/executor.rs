use std::error::Error;
use std::io::{self, Write};

use tracing::{debug, error, warn};

use crate::core::commands::{Command, CommandLine};

pub(crate) trait CommandHandler {
    /// Runs one input line. Command failures end here: they are reported on
    /// the output and never reach the caller.
    fn execute_line(&mut self, line: &str);
}

impl<W: Write> CommandHandler for super::Shell<W> {
    fn execute_line(&mut self, line: &str) {
        let command_line = CommandLine::parse(line);
        let command = self.commands.resolve(&command_line.command).clone();
        debug!(line = %command_line, command = command.name().as_str(), "executing");

        let result = {
            let mut ctx = self.context();
            command.execute(&mut ctx, &command_line.args)
        };

        if let Err(e) = result {
            warn!(line = %command_line, error = %e, "command failed");
            let verbose = self.session.is_verbose();
            if let Err(write_error) = write_failure(&mut self.out, &command_line, &e, verbose) {
                error!(error = %write_error, "could not report command failure");
            }
        }
    }
}

/// One message line, plus the cause chain and the failing line when verbose.
pub(crate) fn write_failure(
    out: &mut dyn Write,
    line: &CommandLine,
    failure: &dyn Error,
    verbose: bool,
) -> io::Result<()> {
    writeln!(out, "{}", failure)?;
    if !verbose {
        return Ok(());
    }

    writeln!(out, "Trace:")?;
    let mut cause = Some(failure);
    let mut depth = 0;
    while let Some(current) = cause {
        writeln!(out, "  {}: {}", depth, current)?;
        cause = current.source();
        depth += 1;
    }
    writeln!(out, "  while executing: {}", line)
}
