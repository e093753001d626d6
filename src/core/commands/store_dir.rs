use super::{Command, CommandError, CommandName, Context};
use crate::flags::SYNTAX;

/// Shows the store location. Changing it needs a restart with `-s`.
#[derive(Debug, Clone, Default)]
pub struct StoreDirCommand;

impl Command for StoreDirCommand {
    fn name(&self) -> CommandName {
        CommandName::StoreDir
    }

    fn execute(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<(), CommandError> {
        if args.is_empty() {
            writeln!(ctx.out, "{}", ctx.session.store_location())?;
        } else {
            writeln!(
                ctx.out,
                "not supported - please restart and use the \"-s\" option ({})",
                SYNTAX
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::Harness;

    #[test]
    fn test_store_dir_shows_location() {
        let mut harness = Harness::new();
        harness.run("store_dir").unwrap();
        assert_eq!(harness.output(), "/var/lib/txstore\n");
    }

    #[test]
    fn test_store_dir_cannot_be_changed() {
        let mut harness = Harness::new();
        harness.run("sto /elsewhere").unwrap();

        assert!(harness.output().starts_with("not supported"));
        assert_eq!(harness.session.store_location(), "/var/lib/txstore");
    }
}
