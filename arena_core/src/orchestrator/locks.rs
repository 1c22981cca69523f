//! Per-fight mutual exclusion for read-modify-write turns

use crate::error::StoreError;
use crate::types::FightId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One mutex per fight id; turns on different fights never contend
#[derive(Debug, Default)]
pub struct FightLocks {
    locks: Mutex<HashMap<FightId, Arc<Mutex<()>>>>,
}

impl FightLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mutex guarding `id`, created on first use
    pub fn handle(&self, id: FightId) -> Result<Arc<Mutex<()>>, StoreError> {
        let mut locks = self.locks.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(locks.entry(id).or_default().clone())
    }

    /// Drop the mutex of `id` unless someone besides `handle` still holds it
    pub fn release(&self, id: FightId, handle: Arc<Mutex<()>>) -> Result<(), StoreError> {
        let mut locks = self.locks.lock().map_err(|_| StoreError::Poisoned)?;
        // One reference lives in the map, the other is `handle`
        if Arc::strong_count(&handle) == 2 {
            locks.remove(&id);
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.locks.lock().map(|l| l.len()).unwrap_or(0)
    }

    /// Forget the mutex of a deleted fight
    pub fn forget(&self, id: FightId) -> Result<(), StoreError> {
        self.locks
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .remove(&id);
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.locks.lock().map_err(|_| StoreError::Poisoned)?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_fight_shares_a_mutex() {
        let locks = FightLocks::new();
        let a = locks.handle(FightId(1)).unwrap();
        let b = locks.handle(FightId(1)).unwrap();
        let other = locks.handle(FightId(2)).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &other));

        let _held = a.lock().unwrap();
        assert!(b.try_lock().is_err());
        assert!(other.try_lock().is_ok());
    }

    #[test]
    fn test_release_keeps_shared_mutex() {
        let locks = FightLocks::new();
        let mine = locks.handle(FightId(1)).unwrap();
        let theirs = locks.handle(FightId(1)).unwrap();

        locks.release(FightId(1), mine).unwrap();
        assert_eq!(locks.len(), 1);

        locks.release(FightId(1), theirs).unwrap();
        assert_eq!(locks.len(), 0);
    }

    #[test]
    fn test_forget_drops_entry() {
        let locks = FightLocks::new();
        let a = locks.handle(FightId(1)).unwrap();
        locks.forget(FightId(1)).unwrap();
        let b = locks.handle(FightId(1)).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }
}
