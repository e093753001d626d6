use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{RecordBody, Store, StoreError, TransactionRecord};

/// Directory-per-type store: `<root>/<type path>/<uid>` holds one JSON record.
pub struct FileStore {
    root: PathBuf,
    shut_down: bool,
}

impl FileStore {
    pub fn open(location: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = location.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(StoreError::NotADirectory(root));
        }

        Ok(Self {
            root,
            shut_down: false,
        })
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.shut_down {
            return Err(StoreError::ShutDown);
        }
        Ok(())
    }

    fn collect_types(&self, dir: &Path, types: &mut BTreeSet<String>) -> Result<(), StoreError> {
        let entries = fs::read_dir(dir).map_err(|e| StoreError::io(dir, e))?;
        let mut holds_records = false;

        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(dir, e))?;
            let path = entry.path();
            if is_hidden(&path) {
                continue;
            }

            // symlinked directories are not followed, so links cannot loop
            let file_type = entry.file_type().map_err(|e| StoreError::io(&path, e))?;
            if file_type.is_dir() {
                self.collect_types(&path, types)?;
            } else if path.is_file() {
                holds_records = true;
            }
        }

        if holds_records {
            if let Some(type_name) = self.type_name(dir) {
                types.insert(type_name);
            }
        }
        Ok(())
    }

    fn type_name(&self, dir: &Path) -> Option<String> {
        let relative = dir.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("/"))
        }
    }

    fn read_record(&self, type_name: &str, path: &Path) -> Result<TransactionRecord, StoreError> {
        let content = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        let body: RecordBody =
            serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let uid = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(TransactionRecord::new(type_name, uid, body))
    }
}

impl Store for FileStore {
    fn all_types(&self) -> Result<Vec<String>, StoreError> {
        self.ensure_open()?;

        let mut types = BTreeSet::new();
        self.collect_types(&self.root, &mut types)?;
        debug!(count = types.len(), root = %self.root.display(), "scanned record types");

        Ok(types.into_iter().collect())
    }

    fn records(&self, type_name: &str) -> Result<Vec<TransactionRecord>, StoreError> {
        self.ensure_open()?;

        let dir = type_name
            .split('/')
            .fold(self.root.clone(), |path, part| path.join(part));
        if type_name.is_empty() || !dir.is_dir() {
            return Err(StoreError::UnknownType(type_name.to_string()));
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| StoreError::io(&dir, e))? {
            let path = entry.map_err(|e| StoreError::io(&dir, e))?.path();
            if path.is_file() && !is_hidden(&path) {
                records.push(self.read_record(type_name, &path)?);
            }
        }

        records.sort_by(|a, b| a.uid.cmp(&b.uid));
        Ok(records)
    }

    fn shutdown(&mut self) {
        if !self.shut_down {
            debug!(root = %self.root.display(), "file store shut down");
            self.shut_down = true;
        }
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
