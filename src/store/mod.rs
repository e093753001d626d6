use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

mod file;
mod journal;
mod record;

pub use file::FileStore;
pub use journal::JournalStore;
pub use record::{render_value, ParticipantRecord, RecordBody, TransactionRecord};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a store directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("corrupt record {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },
    #[error("{0} is not a record type in this store")]
    UnknownType(String),
    #[error("{kind} stores are not supported (location {location})")]
    Unsupported { kind: StoreKind, location: String },
    #[error("the store has been shut down")]
    ShutDown,
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Storage backend selected with `-t <h|f|d>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    File,
    Journal,
    Database,
}

impl StoreKind {
    /// Only the first character is significant, so `-t hornetq` selects the journal.
    pub fn from_discriminator(value: &str) -> Option<Self> {
        match value.chars().next()? {
            'f' => Some(StoreKind::File),
            'h' => Some(StoreKind::Journal),
            'd' => Some(StoreKind::Database),
            _ => None,
        }
    }

    /// Database locations are connection URLs rather than directories.
    pub fn needs_directory(self) -> bool {
        !matches!(self, StoreKind::Database)
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::File => write!(f, "file"),
            StoreKind::Journal => write!(f, "journal"),
            StoreKind::Database => write!(f, "database"),
        }
    }
}

/// Durable record store holding transaction records grouped by type.
pub trait Store {
    /// Every record type currently present, in the store's own order.
    fn all_types(&self) -> Result<Vec<String>, StoreError>;

    fn records(&self, type_name: &str) -> Result<Vec<TransactionRecord>, StoreError>;

    /// Releases the store. Calling it more than once has no further effect.
    fn shutdown(&mut self);
}

pub fn open(kind: StoreKind, location: &str) -> Result<Box<dyn Store>, StoreError> {
    let store: Box<dyn Store> = match kind {
        StoreKind::File => Box::new(FileStore::open(location)?),
        StoreKind::Journal => Box::new(JournalStore::open(location)?),
        StoreKind::Database => {
            return Err(StoreError::Unsupported {
                kind,
                location: location.to_string(),
            })
        }
    };

    info!(%kind, location, "opened record store");
    Ok(store)
}
