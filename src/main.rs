use std::env;
use std::process;

use txbrowse::error::BrowserError;
use txbrowse::flags::{Flags, SYNTAX};
use txbrowse::highlight::SyntaxHighlighter;
use txbrowse::{core::config::Config, logging, shell};

fn main() {
    let flags = match Flags::parse_args(env::args_os()) {
        Ok(flags) => flags,
        Err(_) => {
            eprintln!("{}", SYNTAX);
            process::exit(2);
        }
    };
    logging::init(flags.debug);

    if let Err(e) = run(flags) {
        tracing::error!(error = %e, "browser failed");
        eprintln!("{}", SyntaxHighlighter::new().highlight_error(&e.to_string()));
        process::exit(1);
    }
}

fn run(flags: Flags) -> Result<(), BrowserError> {
    let config = Config::load_default()?;
    let options = flags.resolve(&config)?;
    shell::launch(&options)?.run()
}
