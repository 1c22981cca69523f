//! Administrative fight operations, independent of combat outcome

use super::FightEngine;
use crate::error::{CombatError, StoreError};
use crate::session::FightSession;
use crate::types::FightId;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default page size for fight listings
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// One page of a fight listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FightPage {
    pub total: usize,
    pub total_pages: usize,
    pub page: usize,
    pub fights: Vec<FightSession>,
}

impl FightEngine {
    pub fn get_fight(&self, id: FightId) -> Result<FightSession, CombatError> {
        self.load(id)
    }

    /// List fights, newest id last, optionally only those of `creator`
    ///
    /// `page` is 1-based; 0 is treated as 1 and a `limit` of 0 as the default.
    pub fn list_fights(
        &self,
        creator: Option<&str>,
        page: usize,
        limit: usize,
    ) -> Result<FightPage, CombatError> {
        let page = page.max(1);
        let limit = if limit == 0 { DEFAULT_PAGE_LIMIT } else { limit };

        let fights = self.store.list(creator)?;
        let total = fights.len();
        let total_pages = total.div_ceil(limit);
        let fights = fights
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .collect();

        Ok(FightPage {
            total,
            total_pages,
            page,
            fights,
        })
    }

    pub fn delete_fight(&self, id: FightId) -> Result<(), CombatError> {
        self.with_fight_locked(id, || match self.store.delete(id) {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound(_)) => Err(CombatError::FightNotFound(id)),
            Err(err) => Err(err.into()),
        })?;
        self.locks.forget(id)?;
        info!(fight_id = %id, "fight deleted");
        Ok(())
    }

    /// Remove every fight, returning how many were removed
    pub fn delete_all_fights(&self) -> Result<usize, CombatError> {
        let count = self.store.delete_all()?;
        self.locks.clear()?;
        info!(count, "all fights deleted");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConstants;
    use crate::orchestrator::TurnRequest;
    use crate::roster::{Character, InMemoryRoster};
    use crate::store::InMemoryFightStore;
    use crate::types::{AttackKind, Faction};
    use std::sync::Arc;

    fn engine_with_fights(count: usize) -> FightEngine {
        let roster = InMemoryRoster::new(vec![
            Character::new(1, "Superman", Faction::Hero),
            Character::new(2, "Lex Luthor", Faction::Villain),
        ]);
        let engine = FightEngine::with_roster(
            Arc::new(InMemoryFightStore::new()),
            roster,
            ArenaConstants::default(),
        );
        for i in 0..count {
            let creator = if i % 2 == 0 { "alice" } else { "bob" };
            engine
                .duel_turn(&TurnRequest::start_duel(1, 2, 1, 2, AttackKind::Basic).with_creator(creator))
                .unwrap();
        }
        engine
    }

    #[test]
    fn test_list_pages() {
        let engine = engine_with_fights(12);

        let first = engine.list_fights(None, 1, 5).unwrap();
        assert_eq!(first.total, 12);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.fights.len(), 5);
        assert_eq!(first.fights[0].id, FightId(1));

        let last = engine.list_fights(None, 3, 5).unwrap();
        assert_eq!(last.fights.len(), 2);
        assert_eq!(last.fights[1].id, FightId(12));

        let beyond = engine.list_fights(None, 9, 5).unwrap();
        assert!(beyond.fights.is_empty());
    }

    #[test]
    fn test_list_defaults_and_creator_filter() {
        let engine = engine_with_fights(12);

        let page = engine.list_fights(None, 0, 0).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.fights.len(), DEFAULT_PAGE_LIMIT);

        let bob = engine.list_fights(Some("bob"), 1, 10).unwrap();
        assert_eq!(bob.total, 6);
        assert!(bob.fights.iter().all(|f| f.creator.as_deref() == Some("bob")));
    }

    #[test]
    fn test_delete_fight() {
        let engine = engine_with_fights(2);
        engine.delete_fight(FightId(1)).unwrap();
        assert!(matches!(
            engine.get_fight(FightId(1)),
            Err(CombatError::FightNotFound(_))
        ));
        assert!(matches!(
            engine.delete_fight(FightId(1)),
            Err(CombatError::FightNotFound(_))
        ));
        assert_eq!(engine.get_fight(FightId(2)).unwrap().id, FightId(2));
    }

    #[test]
    fn test_delete_all() {
        let engine = engine_with_fights(3);
        assert_eq!(engine.delete_all_fights().unwrap(), 3);
        assert_eq!(engine.list_fights(None, 1, 10).unwrap().total, 0);
        assert_eq!(engine.delete_all_fights().unwrap(), 0);
    }
}
