use super::{Command, CommandError, CommandName, Context};

#[derive(Debug, Clone, Default)]
pub struct HelpCommand;

impl Command for HelpCommand {
    fn name(&self) -> CommandName {
        CommandName::Help
    }

    fn execute(&self, ctx: &mut Context<'_>, _args: &[String]) -> Result<(), CommandError> {
        for name in CommandName::ALL {
            writeln!(ctx.out, "{} - {}", name.display_name(), name.help())?;
        }
        Ok(())
    }
}
