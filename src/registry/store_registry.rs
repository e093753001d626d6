use std::collections::BTreeMap;

use tracing::{debug, info};

use super::{
    type_object_name, Attribute, ObjectName, Registry, RegistryError, PARTICIPANT_KEY,
};
use crate::store::{render_value, Store, TransactionRecord};

struct Entry {
    name: ObjectName,
    attributes: Vec<Attribute>,
}

type Entries = BTreeMap<String, Entry>;

/// In-process registry mirroring the record store. Every successful probe
/// replaces the previous registrations with one resource per transaction
/// plus one per participant.
pub struct StoreRegistry {
    entries: Entries,
    running: bool,
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            running: true,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn ensure_running(&self) -> Result<(), RegistryError> {
        if !self.running {
            return Err(RegistryError::Stopped);
        }
        Ok(())
    }
}

fn insert(entries: &mut Entries, name: ObjectName, attributes: Vec<Attribute>) {
    entries.insert(name.canonical_name(), Entry { name, attributes });
}

fn register_record(entries: &mut Entries, record: &TransactionRecord) {
    let transaction = type_object_name(&record.type_name).with_property("uid", record.uid.clone());

    let mut attributes = vec![
        Attribute::new("Id", Some(record.uid.clone())),
        Attribute::new("Type", Some(record.type_name.clone())),
    ];
    attributes.extend(
        record
            .body
            .attributes
            .iter()
            .map(|(name, value)| Attribute::new(name.clone(), render_value(value))),
    );

    for participant in &record.body.participants {
        let name = transaction
            .clone()
            .with_property(PARTICIPANT_KEY, participant.id.clone());

        let mut participant_attributes = vec![Attribute::new("Id", Some(participant.id.clone()))];
        participant_attributes.extend(
            participant
                .attributes
                .iter()
                .map(|(name, value)| Attribute::new(name.clone(), render_value(value))),
        );
        insert(entries, name, participant_attributes);
    }

    insert(entries, transaction, attributes);
}

impl Registry for StoreRegistry {
    fn query(&self, pattern: &str) -> Result<Vec<ObjectName>, RegistryError> {
        self.ensure_running()?;
        let pattern = ObjectName::parse(pattern)?;

        if !pattern.is_pattern() {
            return Ok(self
                .entries
                .get(&pattern.canonical_name())
                .map(|entry| vec![entry.name.clone()])
                .unwrap_or_default());
        }

        Ok(self
            .entries
            .values()
            .filter(|entry| pattern.matches(&entry.name))
            .map(|entry| entry.name.clone())
            .collect())
    }

    fn attributes(&self, name: &ObjectName) -> Result<Vec<Attribute>, RegistryError> {
        self.ensure_running()?;
        self.entries
            .get(&name.canonical_name())
            .map(|entry| entry.attributes.clone())
            .ok_or_else(|| RegistryError::InstanceNotFound(name.to_string()))
    }

    /// The new registrations replace the old ones only once the whole store
    /// has been read; a failure leaves the registry as it was.
    fn probe(&mut self, store: &dyn Store) -> Result<(), RegistryError> {
        self.ensure_running()?;

        let mut entries = Entries::new();
        let mut transactions = 0;
        for type_name in store.all_types()? {
            for record in store.records(&type_name)? {
                register_record(&mut entries, &record);
                transactions += 1;
            }
        }

        self.entries = entries;
        info!(transactions, resources = self.len(), "probed record store");
        Ok(())
    }

    fn stop(&mut self) {
        if self.running {
            debug!(resources = self.len(), "stopping registry");
            self.entries.clear();
            self.running = false;
        }
    }
}
