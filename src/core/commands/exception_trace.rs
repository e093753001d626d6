use super::{Command, CommandError, CommandName, Context};

/// `exception_trace [true|false]`: anything other than `true` turns traces off.
#[derive(Debug, Clone, Default)]
pub struct ExceptionTraceCommand;

impl Command for ExceptionTraceCommand {
    fn name(&self) -> CommandName {
        CommandName::ExceptionTrace
    }

    fn execute(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<(), CommandError> {
        if let [value] = args {
            ctx.session.set_verbose(value.eq_ignore_ascii_case("true"));
        }

        writeln!(ctx.out, "exception_trace is {}", ctx.session.is_verbose())?;
        Ok(())
    }
}
