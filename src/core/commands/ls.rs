use super::{select::SelectCommand, Command, CommandError, CommandName, Context};
use crate::core::browser::ResourceBrowser;

/// `ls [type]`: a type argument is selected first, as `select` would.
#[derive(Debug, Clone, Default)]
pub struct LsCommand;

impl Command for LsCommand {
    fn name(&self) -> CommandName {
        CommandName::Ls
    }

    fn execute(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<(), CommandError> {
        if !args.is_empty() {
            SelectCommand::apply(ctx, args)?;
        }

        ResourceBrowser::new(&*ctx.registry).list(&*ctx.session, &mut *ctx.out)
    }
}
