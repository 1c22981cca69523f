//! JSON file fight store
//!
//! All fights live in one JSON document. Every write goes to a sibling temp
//! file which is fsynced and renamed over the previous one, so a failed write
//! leaves the previous document (and the in-memory table) untouched.

use super::{FightStore, FightTable};
use crate::error::StoreError;
use crate::session::FightSession;
use crate::types::FightId;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Fight store persisted to a single JSON file
#[derive(Debug)]
pub struct JsonFileFightStore {
    path: PathBuf,
    table: Mutex<FightTable>,
}

impl JsonFileFightStore {
    /// Open the store at `path`, starting empty if the file does not exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let table = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                FightTable::default()
            } else {
                let mut table: FightTable = serde_json::from_str(&content)?;
                table.resume_generation();
                table
            }
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            FightTable::default()
        };

        debug!(path = %path.display(), "opened fight store");
        Ok(Self {
            path,
            table: Mutex::new(table),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn table(&self) -> Result<MutexGuard<'_, FightTable>, StoreError> {
        self.table.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Apply `change` to a copy of the table, persist it, then publish it
    fn write_with<T>(
        &self,
        change: impl FnOnce(&mut FightTable) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut table = self.table()?;
        let mut next = table.clone();
        let result = change(&mut next)?;
        self.persist(&next)?;
        *table = next;
        Ok(result)
    }

    fn persist(&self, table: &FightTable) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(table)?;
        let tmp_path = self.path.with_extension("json.tmp");
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl FightStore for JsonFileFightStore {
    fn create(&self, session: FightSession) -> Result<FightId, StoreError> {
        self.write_with(|table| Ok(table.insert_new(session)))
    }

    fn get(&self, id: FightId) -> Result<Option<FightSession>, StoreError> {
        Ok(self.table()?.get(id).cloned())
    }

    fn replace(&self, id: FightId, session: &FightSession) -> Result<(), StoreError> {
        self.write_with(|table| table.replace_checked(id, session))
    }

    fn delete(&self, id: FightId) -> Result<(), StoreError> {
        self.write_with(|table| table.remove(id))
    }

    fn delete_all(&self) -> Result<usize, StoreError> {
        self.write_with(|table| Ok(table.clear()))
    }

    fn list(&self, creator: Option<&str>) -> Result<Vec<FightSession>, StoreError> {
        Ok(self.table()?.list(creator))
    }
}
