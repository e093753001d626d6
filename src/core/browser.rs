//! Two-level listing of transactions and their participants.
//!
//! Transactions of a record type are found with one registry query; each
//! transaction's attributes are fetched right after it is found, followed by
//! a second query for its participants. A resource that disappears between
//! the query and the attribute fetch is reported and skipped, any other
//! registry failure ends the listing.

use std::io::Write;

use tracing::{debug, warn};

use crate::core::commands::CommandError;
use crate::core::session::Session;
use crate::registry::{type_base_name, ObjectName, Registry, RegistryError, PARTICIPANT_KEY, TYPE_KEY};

pub struct ResourceBrowser<'a> {
    registry: &'a dyn Registry,
}

impl<'a> ResourceBrowser<'a> {
    pub fn new(registry: &'a dyn Registry) -> Self {
        Self { registry }
    }

    /// Lists the selected type, or every known type when none is selected.
    pub fn list(&self, session: &Session, out: &mut dyn Write) -> Result<(), CommandError> {
        if session.current_type().is_empty() {
            for type_name in session.known_types() {
                self.list_type(type_name, out)?;
            }
            Ok(())
        } else {
            self.list_type(session.current_type(), out)
        }
    }

    pub fn list_type(&self, type_name: &str, out: &mut dyn Write) -> Result<(), CommandError> {
        let base = type_base_name(type_name);
        writeln!(out, "Transactions of type {}", base)?;

        let resources = self.registry.query(&format!("{},*", base))?;
        debug!(type_name, count = resources.len(), "queried transactions");

        for transaction in resources.iter().filter(|name| is_transaction(name)) {
            writeln!(out, "Transaction: {}", transaction)?;
            if !self.print_attributes(out, "\t", transaction)? {
                continue;
            }

            let participants = self.registry.query(&format!(
                "{},{}=*",
                transaction.canonical_name(),
                PARTICIPANT_KEY
            ))?;

            writeln!(out, "\tParticipants:")?;
            for participant in &participants {
                writeln!(out, "\t\tParticipant: {}", participant)?;
                self.print_attributes(out, "\t\t\t", participant)?;
            }
        }
        Ok(())
    }

    /// Returns false when the resource was no longer registered.
    fn print_attributes(
        &self,
        out: &mut dyn Write,
        prefix: &str,
        name: &ObjectName,
    ) -> Result<bool, CommandError> {
        match self.registry.attributes(name) {
            Ok(attributes) => {
                for attribute in &attributes {
                    writeln!(out, "{}{}={}", prefix, attribute.name, attribute.display_value())?;
                }
                Ok(true)
            }
            Err(RegistryError::InstanceNotFound(_)) => {
                warn!(resource = %name, "resource vanished while listing");
                writeln!(out, "{}{} is no longer registered", prefix, name)?;
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Transactions carry a type key; participants add a participant key.
fn is_transaction(name: &ObjectName) -> bool {
    name.key(TYPE_KEY).is_some() && name.key(PARTICIPANT_KEY).is_none()
}
