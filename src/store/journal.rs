use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::{RecordBody, Store, StoreError, TransactionRecord};

pub const JOURNAL_FILE: &str = "journal.log";

#[derive(Debug, Deserialize)]
struct JournalEntry {
    #[serde(rename = "type")]
    type_name: String,
    uid: String,
    #[serde(default)]
    removed: bool,
    #[serde(default)]
    record: RecordBody,
}

/// Append-only journal: one JSON entry per line, later entries win.
pub struct JournalStore {
    path: PathBuf,
    shut_down: bool,
}

impl JournalStore {
    pub fn open(location: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = location.as_ref();
        if !dir.is_dir() {
            return Err(StoreError::NotADirectory(dir.to_path_buf()));
        }

        Ok(Self {
            path: dir.join(JOURNAL_FILE),
            shut_down: false,
        })
    }

    /// Replays the journal into (type, uid -> body) in first-seen type order.
    fn replay(&self) -> Result<Vec<(String, BTreeMap<String, RecordBody>)>, StoreError> {
        if self.shut_down {
            return Err(StoreError::ShutDown);
        }

        // a journal that was never written to is an empty store
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        let mut types: Vec<(String, BTreeMap<String, RecordBody>)> = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let entry: JournalEntry =
                serde_json::from_str(line).map_err(|e| StoreError::Corrupt {
                    path: self.path.clone(),
                    reason: format!("line {}: {}", index + 1, e),
                })?;

            let position = match types.iter().position(|(name, _)| *name == entry.type_name) {
                Some(position) => position,
                None => {
                    types.push((entry.type_name.clone(), BTreeMap::new()));
                    types.len() - 1
                }
            };

            let records = &mut types[position].1;
            if entry.removed {
                records.remove(&entry.uid);
            } else {
                records.insert(entry.uid, entry.record);
            }
        }

        Ok(types)
    }
}

impl Store for JournalStore {
    fn all_types(&self) -> Result<Vec<String>, StoreError> {
        let types: Vec<String> = self
            .replay()?
            .into_iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(name, _)| name)
            .collect();

        debug!(count = types.len(), journal = %self.path.display(), "replayed journal types");
        Ok(types)
    }

    fn records(&self, type_name: &str) -> Result<Vec<TransactionRecord>, StoreError> {
        let (_, records) = self
            .replay()?
            .into_iter()
            .find(|(name, records)| name == type_name && !records.is_empty())
            .ok_or_else(|| StoreError::UnknownType(type_name.to_string()))?;

        Ok(records
            .into_iter()
            .map(|(uid, body)| TransactionRecord::new(type_name, uid, body))
            .collect())
    }

    fn shutdown(&mut self) {
        self.shut_down = true;
    }
}
