use tracing::info;

use super::{Command, CommandError, CommandName, Context};

/// Ends the session: closes the input, cancels the session and shuts the
/// registry and store down. Only the first call does any of that.
#[derive(Debug, Clone, Default)]
pub struct QuitCommand;

impl Command for QuitCommand {
    fn name(&self) -> CommandName {
        CommandName::Quit
    }

    fn execute(&self, ctx: &mut Context<'_>, _args: &[String]) -> Result<(), CommandError> {
        self.cancel(ctx);
        Ok(())
    }

    fn cancel(&self, ctx: &mut Context<'_>) -> bool {
        if !ctx.session.cancel() {
            return false;
        }

        ctx.input.close();
        ctx.registry.stop();
        ctx.store.shutdown();
        info!(store = ctx.session.store_location(), "browser session ended");
        true
    }
}
