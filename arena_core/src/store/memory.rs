//! In-memory fight store

use super::{FightStore, FightTable};
use crate::error::StoreError;
use crate::session::FightSession;
use crate::types::FightId;
use std::sync::{Mutex, MutexGuard};

/// Fight store that lives only as long as the process
#[derive(Debug, Default)]
pub struct InMemoryFightStore {
    table: Mutex<FightTable>,
}

impl InMemoryFightStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> Result<MutexGuard<'_, FightTable>, StoreError> {
        self.table.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl FightStore for InMemoryFightStore {
    fn create(&self, session: FightSession) -> Result<FightId, StoreError> {
        Ok(self.table()?.insert_new(session))
    }

    fn get(&self, id: FightId) -> Result<Option<FightSession>, StoreError> {
        Ok(self.table()?.get(id).cloned())
    }

    fn replace(&self, id: FightId, session: &FightSession) -> Result<(), StoreError> {
        self.table()?.replace_checked(id, session)
    }

    fn delete(&self, id: FightId) -> Result<(), StoreError> {
        self.table()?.remove(id)
    }

    fn delete_all(&self) -> Result<usize, StoreError> {
        Ok(self.table()?.clear())
    }

    fn list(&self, creator: Option<&str>) -> Result<Vec<FightSession>, StoreError> {
        Ok(self.table()?.list(creator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::exercise_store;

    #[test]
    fn test_memory_store_contract() {
        exercise_store(&InMemoryFightStore::new());
    }
}
