//! Management registry: a flat namespace of named resources exposing
//! textual attributes.

mod name;
mod store_registry;

pub use name::ObjectName;
pub use store_registry::StoreRegistry;

use crate::store::{Store, StoreError};

/// Domain under which object store resources are registered.
pub const OBJECT_STORE_DOMAIN: &str = "txstore";
/// Key naming the record type of a transaction resource.
pub const TYPE_KEY: &str = "itype";
/// Key marking a participant scoped under a transaction.
pub const PARTICIPANT_KEY: &str = "puid";

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("malformed object name {name}: {reason}")]
    MalformedName { name: String, reason: &'static str },
    #[error("instance not found: {0}")]
    InstanceNotFound(String),
    #[error("probe of the record store failed: {0}")]
    Probe(#[from] StoreError),
    #[error("the registry has been stopped")]
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn display_value(&self) -> &str {
        self.value.as_deref().unwrap_or("null")
    }
}

pub trait Registry {
    /// Names registered under `pattern`, in the registry's own order.
    fn query(&self, pattern: &str) -> Result<Vec<ObjectName>, RegistryError>;

    fn attributes(&self, name: &ObjectName) -> Result<Vec<Attribute>, RegistryError>;

    /// Rebuilds the registered resources from the current store contents.
    fn probe(&mut self, store: &dyn Store) -> Result<(), RegistryError>;

    /// Unregisters everything. Calling it more than once has no further effect.
    fn stop(&mut self);
}

/// `txstore:type=ObjectStore,itype=<type>`, the key shared by every
/// transaction of one record type.
pub fn type_object_name(type_name: &str) -> ObjectName {
    ObjectName::new(OBJECT_STORE_DOMAIN)
        .with_property("type", "ObjectStore")
        .with_property(TYPE_KEY, type_name)
}

pub fn type_base_name(type_name: &str) -> String {
    type_object_name(type_name).to_string()
}
