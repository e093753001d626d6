mod command;
mod helper;

pub use command::CommandCompleter;
pub use helper::BrowserHelper;
