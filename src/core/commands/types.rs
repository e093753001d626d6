use tracing::debug;

use super::{Command, CommandError, CommandName, Context};

/// Re-reads the record types from the store and prints them.
#[derive(Debug, Clone, Default)]
pub struct TypesCommand;

impl Command for TypesCommand {
    fn name(&self) -> CommandName {
        CommandName::Types
    }

    fn execute(&self, ctx: &mut Context<'_>, _args: &[String]) -> Result<(), CommandError> {
        // the known types only change once the store answered
        let types = ctx.store.all_types()?;
        for type_name in &types {
            writeln!(ctx.out, "{}", type_name)?;
        }

        debug!(count = types.len(), "refreshed record types");
        ctx.session.replace_types(types);
        Ok(())
    }
}
