//! The read-execute loop that owns a browsing session.

use std::io::{self, Stdout, Write};

use tracing::{debug, error, info};

mod executor;

use crate::{
    core::{
        commands::{Command, CommandName, CommandRegistry, Context},
        session::Session,
    },
    error::BrowserError,
    flags::LaunchOptions,
    input::{ConsoleInput, InputSource},
    registry::{Registry, StoreRegistry},
    store::{self, Store},
};

pub(crate) use executor::CommandHandler;

pub struct Shell<W: Write> {
    pub(crate) commands: CommandRegistry,
    pub(crate) session: Session,
    pub(crate) store: Box<dyn Store>,
    pub(crate) registry: Box<dyn Registry>,
    pub(crate) input: Box<dyn InputSource>,
    pub(crate) out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(
        session: Session,
        store: Box<dyn Store>,
        registry: Box<dyn Registry>,
        input: Box<dyn InputSource>,
        out: W,
    ) -> Self {
        Self {
            commands: CommandRegistry::new(),
            session,
            store,
            registry,
            input,
            out,
        }
    }

    /// Opens the store named by `options` and wires the bundled registry.
    pub fn open(
        options: &LaunchOptions,
        input: Box<dyn InputSource>,
        out: W,
    ) -> Result<Self, BrowserError> {
        let store = store::open(options.store_kind, &options.store_location)?;
        let mut session = Session::new(&options.store_location);
        session.set_verbose(options.exception_trace);

        Ok(Self::new(
            session,
            store,
            Box::new(StoreRegistry::new()),
            input,
            out,
        ))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub(crate) fn context(&mut self) -> Context<'_> {
        Context {
            session: &mut self.session,
            store: self.store.as_mut(),
            registry: self.registry.as_mut(),
            input: self.input.as_mut(),
            out: &mut self.out,
        }
    }

    /// Lists the types and probes the store. Returns false if the session
    /// was already started or has ended.
    pub fn start(&mut self) -> bool {
        if !self.session.start() {
            return false;
        }

        info!(store = self.session.store_location(), "browser session started");
        self.execute_line(CommandName::Types.as_str());
        self.execute_line(CommandName::Probe.as_str());
        self.input.update_types(self.session.known_types());
        true
    }

    pub fn run(&mut self) -> Result<(), BrowserError> {
        self.start();
        while self.session.is_running() {
            self.step();
        }
        self.out.flush()?;
        Ok(())
    }

    /// Reads and runs one line. Running out of input ends the session.
    pub fn step(&mut self) {
        let prompt = format!("{}> ", self.session.current_type());
        if !self.input.renders_prompt() {
            if let Err(e) = write!(self.out, "{}", prompt).and_then(|_| self.out.flush()) {
                error!(error = %e, "could not write prompt");
            }
        }

        match self.input.read_line(&prompt) {
            Ok(Some(line)) => self.execute_line(&line),
            Ok(None) => {
                debug!("input exhausted");
                self.quit();
            }
            Err(e) => {
                error!(error = %e, "could not read input");
                if let Err(write_error) = writeln!(self.out, "{}", e) {
                    error!(error = %write_error, "could not report input failure");
                }
                self.quit();
            }
        }

        self.input.update_types(self.session.known_types());
    }

    /// Same as typing `quit`; only the first call tears anything down.
    pub fn quit(&mut self) -> bool {
        let quit = self.commands.get(CommandName::Quit).clone();
        let mut ctx = self.context();
        quit.cancel(&mut ctx)
    }
}

/// Starts a session on the terminal, reading either the console or the
/// command file.
pub fn launch(options: &LaunchOptions) -> Result<Shell<Stdout>, BrowserError> {
    let input: Box<dyn InputSource> = match &options.batch {
        Some(batch) => Box::new(batch.clone()),
        None => Box::new(ConsoleInput::new(
            options.history_file.clone(),
            options.history_size,
        )?),
    };
    Shell::open(options, input, io::stdout())
}

/// Runs the command file in `options` (or nothing but startup) and returns
/// everything the session wrote.
pub fn run_captured(options: &LaunchOptions) -> Result<String, BrowserError> {
    let batch = options.batch.clone().unwrap_or_default();
    let mut shell = Shell::open(options, Box::new(batch), Vec::new())?;
    shell.run()?;
    Ok(String::from_utf8_lossy(&shell.into_output()).into_owned())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;

    use super::*;
    use crate::core::session::RunState;
    use crate::input::BatchInput;
    use crate::store::StoreKind;
    use crate::testing::{MemoryStore, ScriptedRegistry};

    fn sample_store() -> MemoryStore {
        MemoryStore::new()
            .with_record("A", "tx1", &[("Status", json!("Active"))], &["p1"])
            .with_record("B", "tx2", &[], &[])
    }

    fn shell(store: MemoryStore, registry: ScriptedRegistry, script: &str) -> Shell<Vec<u8>> {
        Shell::new(
            Session::new("/var/lib/txstore"),
            Box::new(store),
            Box::new(registry),
            Box::new(BatchInput::from_text(script)),
            Vec::new(),
        )
    }

    fn run(mut shell: Shell<Vec<u8>>) -> (Session, String) {
        shell.run().unwrap();
        let session = shell.session().clone();
        let output = String::from_utf8_lossy(&shell.into_output()).into_owned();
        (session, output)
    }

    #[test]
    fn test_startup_lists_types_and_probes() {
        let (session, output) = run(shell(sample_store(), ScriptedRegistry::new(), "ls A\nquit"));

        assert!(output.starts_with("A\nB\n> "));
        assert!(output.contains("Transaction: txstore:type=ObjectStore,itype=A,uid=tx1\n"));
        assert!(output.contains("\t\tParticipant: txstore:type=ObjectStore,itype=A,uid=tx1,puid=p1\n"));
        assert_eq!(session.state(), RunState::Cancelled);
    }

    #[test]
    fn test_prompt_shows_selected_type() {
        let (_, output) = run(shell(sample_store(), ScriptedRegistry::new(), "select B\ntypes\nquit"));

        assert!(output.contains("> B> A\nB\nB> "));
    }

    #[test]
    fn test_blank_line_prints_help() {
        let (_, output) = run(shell(sample_store(), ScriptedRegistry::new(), "\nquit"));
        assert!(output.contains("help - show command options and syntax\n"));
        assert!(output.contains("ls - [type] - list transactions"));
    }

    #[test]
    fn test_failures_do_not_end_the_session() {
        let registry = ScriptedRegistry::new().failing_on("puid=*");
        let (session, output) = run(shell(sample_store(), registry, "ls A\ntypes\nquit"));

        assert!(output.contains(",puid=*: rejected by the registry\n"));
        assert!(output.ends_with("A> A\nB\nA> "));
        assert!(!output.contains("Trace:"));
        assert_eq!(session.state(), RunState::Cancelled);
    }

    #[test]
    fn test_failing_store_at_startup_keeps_running() {
        let (_, output) = run(shell(MemoryStore::failing(), ScriptedRegistry::new(), "help\nquit"));

        assert!(output.starts_with("cannot read memory: disk unavailable\n"));
        assert!(output.contains("probe of the record store failed: cannot read memory: disk unavailable\n"));
        assert!(output.contains("quit - exit the browser\n"));
    }

    #[test]
    fn test_exception_trace_toggles_traces() {
        let registry = ScriptedRegistry::new().failing_on("puid=*");
        let script = "exception_trace true\nls A\nexception_trace false\nls A\nquit";
        let (session, output) = run(shell(sample_store(), registry, script));

        assert_eq!(output.matches("Trace:").count(), 1);
        assert_eq!(output.matches("  while executing: ls A\n").count(), 1);
        assert_eq!(output.matches("rejected by the registry\n").count(), 3);
        assert!(!session.is_verbose());
    }

    #[test]
    fn test_end_of_input_quits_once() {
        let store = sample_store();
        let shutdowns = store.shutdowns();
        let registry = ScriptedRegistry::new();
        let stops = registry.stops();

        let mut shell = shell(store, registry, "types");
        shell.run().unwrap();

        assert_eq!(shell.session().state(), RunState::Cancelled);
        assert_eq!(shutdowns.get(), 1);
        assert_eq!(stops.get(), 1);

        assert!(!shell.quit());
        shell.execute_line("quit");
        assert_eq!(shutdowns.get(), 1);
        assert_eq!(stops.get(), 1);
    }

    #[test]
    fn test_quit_stops_reading_input() {
        let store = sample_store();
        let shutdowns = store.shutdowns();

        let (_, output) = run(shell(store, ScriptedRegistry::new(), "quit\nhelp\nquit"));

        assert!(!output.contains("help - "));
        assert_eq!(shutdowns.get(), 1);
    }

    #[test]
    fn test_start_only_once() {
        let mut shell = shell(sample_store(), ScriptedRegistry::new(), "");
        assert!(shell.start());
        assert!(!shell.start());

        shell.quit();
        assert!(!shell.start());
        assert_eq!(String::from_utf8_lossy(&shell.into_output()), "A\nB\n");
    }

    #[test]
    fn test_run_captured_on_file_store() {
        let temp = tempfile::tempdir().unwrap();
        let type_dir = temp.path().join("StateManager").join("Atomic");
        fs::create_dir_all(&type_dir).unwrap();
        fs::write(
            type_dir.join("0_1"),
            r#"{"attributes": {"Status": "Committed"}, "participants": [{"id": "p1"}]}"#,
        )
        .unwrap();

        let options = LaunchOptions {
            store_location: temp.path().to_string_lossy().into_owned(),
            store_kind: StoreKind::File,
            batch: Some(BatchInput::new(["select StateManager/Atomic", "ls"])),
            exception_trace: false,
            history_file: None,
            history_size: 10,
        };
        let output = run_captured(&options).unwrap();

        assert!(output.starts_with("StateManager/Atomic\n"));
        assert!(output.contains("Transactions of type txstore:type=ObjectStore,itype=StateManager/Atomic\n"));
        assert!(output.contains("\tStatus=Committed\n"));
        assert!(output.contains("\t\t\tId=p1\n"));
        assert!(output.ends_with("StateManager/Atomic> "));
    }
}
