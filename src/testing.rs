//! In-memory collaborators shared by the unit tests.

use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::Rc;

use serde_json::Value;

use crate::core::commands::{Command, CommandError, CommandLine, CommandRegistry, Context};
use crate::core::session::Session;
use crate::input::BatchInput;
use crate::registry::{Attribute, ObjectName, Registry, RegistryError, StoreRegistry};
use crate::store::{ParticipantRecord, RecordBody, Store, StoreError, TransactionRecord};

#[derive(Default)]
pub(crate) struct MemoryStore {
    records: Vec<TransactionRecord>,
    failing: bool,
    failing_type: Option<String>,
    shutdowns: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Reading the records of `type_name` fails; everything else works.
    pub(crate) fn failing_on_type(mut self, type_name: &str) -> Self {
        self.failing_type = Some(type_name.to_string());
        self
    }

    pub(crate) fn with_record(
        mut self,
        type_name: &str,
        uid: &str,
        attributes: &[(&str, Value)],
        participants: &[&str],
    ) -> Self {
        let body = RecordBody {
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            participants: participants
                .iter()
                .map(|id| ParticipantRecord {
                    id: id.to_string(),
                    attributes: [("Status".to_string(), Value::from("Active"))]
                        .into_iter()
                        .collect(),
                })
                .collect(),
        };
        self.records.push(TransactionRecord::new(type_name, uid, body));
        self
    }

    pub(crate) fn shutdowns(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.shutdowns)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::Io {
                path: "memory".into(),
                source: std::io::Error::other("disk unavailable"),
            });
        }
        Ok(())
    }
}

impl Store for MemoryStore {
    fn all_types(&self) -> Result<Vec<String>, StoreError> {
        self.check()?;
        let mut types: Vec<String> = Vec::new();
        for record in &self.records {
            if !types.contains(&record.type_name) {
                types.push(record.type_name.clone());
            }
        }
        Ok(types)
    }

    fn records(&self, type_name: &str) -> Result<Vec<TransactionRecord>, StoreError> {
        self.check()?;
        if self.failing_type.as_deref() == Some(type_name) {
            return Err(StoreError::UnknownType(type_name.to_string()));
        }
        Ok(self
            .records
            .iter()
            .filter(|record| record.type_name == type_name)
            .cloned()
            .collect())
    }

    fn shutdown(&mut self) {
        self.shutdowns.set(self.shutdowns.get() + 1);
    }
}

/// Wraps a [`StoreRegistry`], reversing result order and injecting failures.
#[derive(Default)]
pub(crate) struct ScriptedRegistry {
    inner: StoreRegistry,
    reversed: bool,
    failing_queries: Vec<String>,
    vanished: BTreeSet<String>,
    stops: Rc<Cell<usize>>,
}

impl ScriptedRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    /// Queries whose pattern contains `fragment` fail.
    pub(crate) fn failing_on(mut self, fragment: &str) -> Self {
        self.failing_queries.push(fragment.to_string());
        self
    }

    /// Attribute lookups for `name` fail as if it was unregistered after the query.
    pub(crate) fn vanishing(mut self, name: &str) -> Self {
        if let Ok(name) = ObjectName::parse(name) {
            self.vanished.insert(name.canonical_name());
        }
        self
    }

    pub(crate) fn stops(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.stops)
    }
}

impl Registry for ScriptedRegistry {
    fn query(&self, pattern: &str) -> Result<Vec<ObjectName>, RegistryError> {
        if self.failing_queries.iter().any(|f| pattern.contains(f.as_str())) {
            return Err(RegistryError::MalformedName {
                name: pattern.to_string(),
                reason: "rejected by the registry",
            });
        }

        let mut names = self.inner.query(pattern)?;
        if self.reversed {
            names.reverse();
        }
        Ok(names)
    }

    fn attributes(&self, name: &ObjectName) -> Result<Vec<Attribute>, RegistryError> {
        if self.vanished.contains(&name.canonical_name()) {
            return Err(RegistryError::InstanceNotFound(name.to_string()));
        }
        self.inner.attributes(name)
    }

    fn probe(&mut self, store: &dyn Store) -> Result<(), RegistryError> {
        self.inner.probe(store)
    }

    fn stop(&mut self) {
        self.stops.set(self.stops.get() + 1);
        self.inner.stop();
    }
}

/// A session wired to in-memory collaborators, for driving single commands.
pub(crate) struct Harness {
    pub(crate) commands: CommandRegistry,
    pub(crate) session: Session,
    pub(crate) store: MemoryStore,
    pub(crate) registry: ScriptedRegistry,
    pub(crate) input: BatchInput,
    pub(crate) out: Vec<u8>,
}

impl Harness {
    pub(crate) fn new() -> Self {
        Self::with(MemoryStore::new(), ScriptedRegistry::new())
    }

    pub(crate) fn with(store: MemoryStore, registry: ScriptedRegistry) -> Self {
        Self {
            commands: CommandRegistry::new(),
            session: Session::new("/var/lib/txstore"),
            store,
            registry,
            input: BatchInput::default(),
            out: Vec::new(),
        }
    }

    /// Probes the registry and loads the store's types into the session.
    pub(crate) fn probed(store: MemoryStore, registry: ScriptedRegistry) -> Self {
        let mut harness = Self::with(store, registry);
        harness
            .registry
            .probe(&harness.store)
            .expect("probe of the memory store");
        let types = harness.store.all_types().expect("types of the memory store");
        harness.session.replace_types(types);
        harness
    }

    pub(crate) fn context(&mut self) -> Context<'_> {
        Context {
            session: &mut self.session,
            store: &mut self.store,
            registry: &mut self.registry,
            input: &mut self.input,
            out: &mut self.out,
        }
    }

    pub(crate) fn run(&mut self, line: &str) -> Result<(), CommandError> {
        let line = CommandLine::parse(line);
        let command = self.commands.resolve(&line.command).clone();
        let mut ctx = self.context();
        command.execute(&mut ctx, &line.args)
    }

    pub(crate) fn output(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }

    pub(crate) fn take_output(&mut self) -> String {
        let output = self.output();
        self.out.clear();
        output
    }
}
