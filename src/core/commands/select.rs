use super::{Command, CommandError, CommandName, Context};
use crate::core::session::Selection;

#[derive(Debug, Clone, Default)]
pub struct SelectCommand;

impl SelectCommand {
    /// Applies `select <type>`; no argument selects every type. Unknown types
    /// only produce a message.
    pub(crate) fn apply(ctx: &mut Context<'_>, args: &[String]) -> Result<(), CommandError> {
        let requested = args.first().map(String::as_str).unwrap_or("");

        if let Selection::Rejected(message) = ctx.session.select(requested) {
            writeln!(ctx.out, "{}", message)?;
        }
        Ok(())
    }
}

impl Command for SelectCommand {
    fn name(&self) -> CommandName {
        CommandName::Select
    }

    fn execute(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<(), CommandError> {
        Self::apply(ctx, args)
    }
}
