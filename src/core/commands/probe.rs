use super::{Command, CommandError, CommandName, Context};

#[derive(Debug, Clone, Default)]
pub struct ProbeCommand;

impl Command for ProbeCommand {
    fn name(&self) -> CommandName {
        CommandName::Probe
    }

    fn execute(&self, ctx: &mut Context<'_>, _args: &[String]) -> Result<(), CommandError> {
        ctx.registry.probe(&*ctx.store)?;
        Ok(())
    }
}
