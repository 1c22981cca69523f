//! Fight session persistence
//!
//! The orchestrator only talks to [`FightStore`]. Two adapters are provided:
//! - [`InMemoryFightStore`]: process-local, for tests and embedding
//! - [`JsonFileFightStore`]: a single JSON document on disk
//!
//! Both assign ids as `max(existing) + 1` and reject a `replace` whose
//! session version does not match the stored one. A new fight starts above
//! every version the store has issued, even when its id is being reused.

mod json_file;
mod memory;

pub use json_file::JsonFileFightStore;
pub use memory::InMemoryFightStore;

use crate::error::StoreError;
use crate::session::FightSession;
use crate::types::FightId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Storage contract for fight sessions
pub trait FightStore: Send + Sync {
    /// Store a new fight, assigning its id and initial version
    fn create(&self, session: FightSession) -> Result<FightId, StoreError>;

    fn get(&self, id: FightId) -> Result<Option<FightSession>, StoreError>;

    /// Overwrite a fight; `session.version` must equal the stored version
    fn replace(&self, id: FightId, session: &FightSession) -> Result<(), StoreError>;

    /// Remove a fight; fails with `NotFound` if it does not exist
    fn delete(&self, id: FightId) -> Result<(), StoreError>;

    /// Remove every fight, returning how many were removed
    fn delete_all(&self) -> Result<usize, StoreError>;

    /// All fights in id order, optionally only those created by `creator`
    fn list(&self, creator: Option<&str>) -> Result<Vec<FightSession>, StoreError>;
}

/// Id-ordered table of fights shared by the store adapters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct FightTable {
    fights: BTreeMap<FightId, FightSession>,
    /// Highest version ever handed out. Survives `clear`, so a fight created
    /// under a reused id never matches a stale copy of its predecessor.
    #[serde(skip)]
    generation: u64,
}

impl FightTable {
    /// Recompute the version high-water mark after loading from disk
    fn resume_generation(&mut self) {
        self.generation = self.fights.values().map(|f| f.version).max().unwrap_or(0);
    }

    fn next_id(&self) -> FightId {
        self.fights
            .keys()
            .next_back()
            .map_or(FightId::FIRST, |last| last.next())
    }

    fn insert_new(&mut self, mut session: FightSession) -> FightId {
        let id = self.next_id();
        self.generation += 1;
        session.id = id;
        session.version = self.generation;
        self.fights.insert(id, session);
        id
    }

    fn get(&self, id: FightId) -> Option<&FightSession> {
        self.fights.get(&id)
    }

    fn replace_checked(&mut self, id: FightId, session: &FightSession) -> Result<(), StoreError> {
        let stored = self.fights.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if stored.version != session.version {
            return Err(StoreError::Conflict {
                fight_id: id,
                expected: session.version,
                found: stored.version,
            });
        }
        let mut updated = session.clone();
        updated.id = id;
        updated.version = stored.version + 1;
        self.generation = self.generation.max(updated.version);
        *stored = updated;
        Ok(())
    }

    fn remove(&mut self, id: FightId) -> Result<(), StoreError> {
        self.fights
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    fn clear(&mut self) -> usize {
        let count = self.fights.len();
        self.fights.clear();
        count
    }

    fn list(&self, creator: Option<&str>) -> Vec<FightSession> {
        self.fights
            .values()
            .filter(|f| creator.map_or(true, |c| f.creator.as_deref() == Some(c)))
            .cloned()
            .collect()
    }
}
