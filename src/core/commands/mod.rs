use std::io::Write;

mod exception_trace;
mod help;
mod ls;
mod probe;
mod quit;
mod select;
mod store_dir;
mod types;

pub use exception_trace::ExceptionTraceCommand;
pub use help::HelpCommand;
pub use ls::LsCommand;
pub use probe::ProbeCommand;
pub use quit::QuitCommand;
pub use select::SelectCommand;
pub use store_dir::StoreDirCommand;
pub use types::TypesCommand;

use crate::core::session::Session;
use crate::input::InputSource;
use crate::registry::{Registry, RegistryError};
use crate::store::{Store, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Names of the browser commands, in resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandName {
    Help,
    Quit,
    StoreDir,
    Probe,
    ExceptionTrace,
    Types,
    Select,
    Ls,
}

impl CommandName {
    pub const ALL: [CommandName; 8] = [
        CommandName::Help,
        CommandName::Quit,
        CommandName::StoreDir,
        CommandName::Probe,
        CommandName::ExceptionTrace,
        CommandName::Types,
        CommandName::Select,
        CommandName::Ls,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CommandName::Help => "HELP",
            CommandName::Quit => "QUIT",
            CommandName::StoreDir => "STORE_DIR",
            CommandName::Probe => "PROBE",
            CommandName::ExceptionTrace => "EXCEPTION_TRACE",
            CommandName::Types => "TYPES",
            CommandName::Select => "SELECT",
            CommandName::Ls => "LS",
        }
    }

    /// The form shown in help output and offered by completion.
    pub fn display_name(self) -> String {
        self.as_str().to_lowercase()
    }

    pub fn help(self) -> &'static str {
        match self {
            CommandName::Help => "show command options and syntax",
            CommandName::Quit => "exit the browser",
            CommandName::StoreDir => "get/set the location of the object store (set fails)",
            CommandName::Probe => "refresh the view of the object store",
            CommandName::ExceptionTrace => "true | false - show full exception traces",
            CommandName::Types => "list record types",
            CommandName::Select => "<type> - start browsing a particular transaction type",
            CommandName::Ls => {
                "[type] - list transactions of type type. Use the select command to set the default type"
            }
        }
    }

    /// First command, in resolution order, whose name starts with `token`
    /// ignoring case.
    pub fn matching(token: &str) -> Option<CommandName> {
        let token = token.to_uppercase();
        Self::ALL
            .into_iter()
            .find(|name| name.as_str().starts_with(&token))
    }

    /// Like [`CommandName::matching`] but never misses: unknown tokens get HELP.
    pub fn resolve(token: &str) -> CommandName {
        Self::matching(token).unwrap_or(CommandName::Help)
    }
}

/// One tokenized input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub command: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// A blank line becomes the help command.
    pub fn parse(line: &str) -> Self {
        let mut tokens = line.split_whitespace().map(String::from);
        let command = tokens
            .next()
            .unwrap_or_else(|| CommandName::Help.display_name());

        Self {
            command,
            args: tokens.collect(),
        }
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.command)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Everything a command may touch while it runs.
pub struct Context<'a> {
    pub session: &'a mut Session,
    pub store: &'a mut dyn Store,
    pub registry: &'a mut dyn Registry,
    pub input: &'a mut dyn InputSource,
    pub out: &'a mut dyn Write,
}

pub trait Command {
    fn name(&self) -> CommandName;

    fn execute(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<(), CommandError>;

    /// Returns true when the command cancelled something.
    fn cancel(&self, _ctx: &mut Context<'_>) -> bool {
        false
    }
}

#[derive(Debug, Clone)]
pub enum CommandType {
    Help(HelpCommand),
    Quit(QuitCommand),
    StoreDir(StoreDirCommand),
    Probe(ProbeCommand),
    ExceptionTrace(ExceptionTraceCommand),
    Types(TypesCommand),
    Select(SelectCommand),
    Ls(LsCommand),
}

impl CommandType {
    fn for_name(name: CommandName) -> Self {
        match name {
            CommandName::Help => CommandType::Help(HelpCommand),
            CommandName::Quit => CommandType::Quit(QuitCommand),
            CommandName::StoreDir => CommandType::StoreDir(StoreDirCommand),
            CommandName::Probe => CommandType::Probe(ProbeCommand),
            CommandName::ExceptionTrace => CommandType::ExceptionTrace(ExceptionTraceCommand),
            CommandName::Types => CommandType::Types(TypesCommand),
            CommandName::Select => CommandType::Select(SelectCommand),
            CommandName::Ls => CommandType::Ls(LsCommand),
        }
    }

    fn as_command(&self) -> &dyn Command {
        match self {
            CommandType::Help(cmd) => cmd,
            CommandType::Quit(cmd) => cmd,
            CommandType::StoreDir(cmd) => cmd,
            CommandType::Probe(cmd) => cmd,
            CommandType::ExceptionTrace(cmd) => cmd,
            CommandType::Types(cmd) => cmd,
            CommandType::Select(cmd) => cmd,
            CommandType::Ls(cmd) => cmd,
        }
    }
}

impl Command for CommandType {
    fn name(&self) -> CommandName {
        self.as_command().name()
    }

    fn execute(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<(), CommandError> {
        self.as_command().execute(ctx, args)
    }

    fn cancel(&self, ctx: &mut Context<'_>) -> bool {
        self.as_command().cancel(ctx)
    }
}

/// Fixed, ordered table of the browser commands.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: Vec<CommandType>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: CommandName::ALL
                .into_iter()
                .map(CommandType::for_name)
                .collect(),
        }
    }

    pub fn resolve(&self, token: &str) -> &CommandType {
        self.get(CommandName::resolve(token))
    }

    pub fn get(&self, name: CommandName) -> &CommandType {
        // every name is registered by new(); the fallback only guards a broken table
        self.commands
            .iter()
            .find(|cmd| cmd.name() == name)
            .unwrap_or(&self.commands[0])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandType> {
        self.commands.iter()
    }
}
