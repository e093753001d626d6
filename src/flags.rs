use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;

use crate::core::config::Config;
use crate::error::BrowserError;
use crate::input::BatchInput;
use crate::path::PathExpander;
use crate::store::StoreKind;

pub const SYNTAX: &str = "syntax: [-s <store location>] | [-f <command file>] [-t <h|f|d>]";

/// Store directory used when neither `-s` nor the rc file name one.
pub const DEFAULT_STORE_DIR: &str = "ObjectStore";

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "txbrowse", version, about = "Browse transaction records in an object store")]
pub struct Flags {
    /// Location of the object store (a directory, or a URL for database stores)
    #[arg(short = 's', long = "store", value_name = "store location")]
    pub store: Option<String>,

    /// Read commands from this file instead of the console
    #[arg(short = 'f', long = "file", value_name = "command file")]
    pub file: Option<PathBuf>,

    /// Store backend: h (journal), f (file) or d (database)
    #[arg(short = 't', long = "type", value_name = "h|f|d", value_parser = parse_store_kind)]
    pub store_type: Option<StoreKind>,

    /// Enable debug logging on stderr
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,
}

fn parse_store_kind(value: &str) -> Result<StoreKind, String> {
    StoreKind::from_discriminator(value).ok_or_else(|| SYNTAX.to_string())
}

/// Everything needed to start a session, after flags and config are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchOptions {
    pub store_location: String,
    pub store_kind: StoreKind,
    /// Commands from `-f`; `None` means an interactive console.
    pub batch: Option<BatchInput>,
    pub exception_trace: bool,
    pub history_file: Option<PathBuf>,
    pub history_size: usize,
}

impl Flags {
    /// Help and version requests print and exit like any clap program; every
    /// other parse failure becomes the fixed usage message.
    pub fn parse_args<I, T>(args: I) -> Result<Self, BrowserError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Flags::try_parse_from(args) {
            Ok(flags) => Ok(flags),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(_) => Err(BrowserError::Usage(SYNTAX.to_string())),
        }
    }

    pub fn resolve(self, config: &Config) -> Result<LaunchOptions, BrowserError> {
        let expander = PathExpander::new();
        let store_kind = self.store_type.or(config.store_type).unwrap_or_default();

        let store_location = match self.store.or_else(|| config.store_dir.clone()) {
            Some(location) if store_kind.needs_directory() => {
                expander.expand(&location)?.to_string_lossy().into_owned()
            }
            Some(location) => location,
            None => env::current_dir()?
                .join(DEFAULT_STORE_DIR)
                .to_string_lossy()
                .into_owned(),
        };

        if store_kind.needs_directory() && !PathBuf::from(&store_location).is_dir() {
            return Err(BrowserError::MissingFile(PathBuf::from(store_location)));
        }

        let batch = match self.file {
            Some(file) => {
                let path = expander.expand(&file.to_string_lossy())?;
                if !path.is_file() {
                    return Err(BrowserError::MissingFile(path));
                }
                // an empty command file falls back to the console
                Some(BatchInput::from_file(&path)?).filter(|batch| !batch.is_empty())
            }
            None => None,
        };

        Ok(LaunchOptions {
            store_location,
            store_kind,
            batch,
            exception_trace: config.exception_trace,
            history_file: config.history_file.clone(),
            history_size: config.history_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn parse(args: &[&str]) -> Result<Flags, BrowserError> {
        Flags::parse_args(std::iter::once("txbrowse").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_all_flags() {
        let flags = parse(&["-s", "/srv/store", "-f", "cmds.txt", "-t", "h", "-d"]).unwrap();

        assert_eq!(flags.store.as_deref(), Some("/srv/store"));
        assert_eq!(flags.file, Some(PathBuf::from("cmds.txt")));
        assert_eq!(flags.store_type, Some(StoreKind::Journal));
        assert!(flags.debug);
    }

    #[test]
    fn test_bad_arguments_give_usage() {
        for args in [&["-x", "1"][..], &["-t", "z"], &["-s"], &["stray"]] {
            match parse(args) {
                Err(BrowserError::Usage(message)) => assert_eq!(message, SYNTAX),
                other => panic!("{:?} should be a usage error, got {:?}", args, other),
            }
        }
    }

    #[test]
    fn test_resolve_existing_store_and_batch_file() {
        let temp = tempfile::tempdir().unwrap();
        let commands = temp.path().join("commands.txt");
        fs::write(&commands, "  types\nls A  \n").unwrap();

        let flags = Flags {
            store: Some(temp.path().to_string_lossy().into_owned()),
            file: Some(commands),
            ..Flags::default()
        };
        let options = flags.resolve(&Config::default()).unwrap();

        assert_eq!(options.store_kind, StoreKind::File);
        assert_eq!(options.store_location, temp.path().to_string_lossy());
        assert_eq!(options.batch, Some(BatchInput::new(["types", "ls A"])));
    }

    #[test]
    fn test_empty_command_file_uses_console() {
        let temp = tempfile::tempdir().unwrap();
        let commands = temp.path().join("empty.txt");
        fs::write(&commands, "").unwrap();

        let flags = Flags {
            store: Some(temp.path().to_string_lossy().into_owned()),
            file: Some(commands),
            ..Flags::default()
        };
        let options = flags.resolve(&Config::default()).unwrap();

        assert_eq!(options.batch, None);
    }

    #[test]
    fn test_resolve_missing_store_directory() {
        let flags = Flags {
            store: Some("/path/that/does/not/exist".to_string()),
            ..Flags::default()
        };

        assert!(matches!(
            flags.resolve(&Config::default()),
            Err(BrowserError::MissingFile(_))
        ));
    }

    #[test]
    fn test_resolve_missing_command_file() {
        let temp = tempfile::tempdir().unwrap();
        let flags = Flags {
            store: Some(temp.path().to_string_lossy().into_owned()),
            file: Some(temp.path().join("nope.txt")),
            ..Flags::default()
        };

        assert!(matches!(
            flags.resolve(&Config::default()),
            Err(BrowserError::MissingFile(_))
        ));
    }

    #[test]
    fn test_database_location_is_not_checked() {
        let flags = Flags {
            store: Some("jdbc:h2:file:./h2/store".to_string()),
            store_type: Some(StoreKind::Database),
            ..Flags::default()
        };
        let options = flags.resolve(&Config::default()).unwrap();

        assert_eq!(options.store_location, "jdbc:h2:file:./h2/store");
        assert_eq!(options.batch, None);
    }

    #[test]
    fn test_flags_override_config() {
        let from_config = tempfile::tempdir().unwrap();
        let from_flag = tempfile::tempdir().unwrap();
        let config = Config {
            store_dir: Some(from_config.path().to_string_lossy().into_owned()),
            store_type: Some(StoreKind::Journal),
            exception_trace: true,
            ..Config::default()
        };

        let options = Flags::default().resolve(&config).unwrap();
        assert_eq!(options.store_location, from_config.path().to_string_lossy());
        assert_eq!(options.store_kind, StoreKind::Journal);
        assert!(options.exception_trace);

        let flags = Flags {
            store: Some(from_flag.path().to_string_lossy().into_owned()),
            store_type: Some(StoreKind::File),
            ..Flags::default()
        };
        let options = flags.resolve(&config).unwrap();
        assert_eq!(options.store_location, from_flag.path().to_string_lossy());
        assert_eq!(options.store_kind, StoreKind::File);
    }
}
