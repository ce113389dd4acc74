//! JSON-file-backed record collections.

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::{QuoteError, Result};

/// A record kept in a [`JsonStore`].
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Human-readable kind, used in errors.
    const KIND: &'static str;
    /// Id prefix for new records, e.g. `FAC`.
    const PREFIX: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

/// Records persisted as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonStore<T> {
    path: PathBuf,
    records: Vec<T>,
}

impl<T: Record> JsonStore<T> {
    /// Open a store. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            Vec::new()
        };
        debug!("Opened {} with {} record(s)", path.display(), records.len());
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    /// Append a record, assigning an id when it has none. Returns the id.
    pub fn insert(&mut self, mut record: T) -> String {
        if record.id().is_empty() {
            record.set_id(self.next_id());
        }
        let id = record.id().to_string();
        self.records.push(record);
        id
    }

    /// Replace a record in place, keeping its id and position.
    pub fn replace(&mut self, id: &str, mut record: T) -> Result<()> {
        let slot = self.get_mut(id).ok_or_else(|| not_found::<T>(id))?;
        record.set_id(id.to_string());
        *slot = record;
        Ok(())
    }

    /// Remove and return a record.
    pub fn remove(&mut self, id: &str) -> Result<T> {
        let pos = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| not_found::<T>(id))?;
        Ok(self.records.remove(pos))
    }

    /// Write all records back to the file.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(&self.path, json)?;
        debug!("Saved {} record(s) to {}", self.records.len(), self.path.display());
        Ok(())
    }

    /// Next free `PREFIX-NNNN` id.
    fn next_id(&self) -> String {
        let prefix = format!("{}-", T::PREFIX);
        let max = self
            .records
            .iter()
            .filter_map(|r| r.id().strip_prefix(&prefix))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("{}{:04}", prefix, max + 1)
    }
}

fn not_found<T: Record>(id: &str) -> QuoteError {
    QuoteError::RecordNotFound {
        kind: T::KIND,
        id: id.to_string(),
    }
}
