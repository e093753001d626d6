pub mod browser;
pub mod commands;
pub mod config;
pub mod session;

pub use browser::ResourceBrowser;
pub use commands::{Command, CommandError, CommandLine, CommandName, CommandRegistry, Context};
pub use session::{RunState, Selection, Session};
