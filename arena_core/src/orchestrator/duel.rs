//! One-on-one fights

use super::{resolve_turn, DuelView, FightEngine, TurnRequest};
use crate::error::CombatError;
use crate::roster::Character;
use crate::session::{Duel, FightMode, FightSession, TurnSummary};
use crate::snapshot::CharacterSnapshot;
use crate::types::{AttackKind, CharacterId, FightId};

const MODE: &str = "one_on_one";

impl FightEngine {
    /// Resolve one turn of a 1v1 fight, starting the fight if needed
    pub fn duel_turn(&self, request: &TurnRequest) -> Result<DuelView, CombatError> {
        let kind = request.attack_kind()?;
        match request.fight_id {
            Some(id) => self.continue_duel(id, request, kind),
            None => self.start_duel(request, kind),
        }
    }

    fn start_duel(&self, request: &TurnRequest, kind: AttackKind) -> Result<DuelView, CombatError> {
        let (Some(a), Some(b)) = (request.character_a, request.character_b) else {
            return Err(CombatError::invalid_participant(
                "character_a and character_b are required to start a fight",
            ));
        };

        let first = self.roster_character(a)?;
        let second = self.roster_character(b)?;
        if second.faction != first.faction.opponent() {
            return Err(CombatError::SameFactionNotAllowed {
                first: a,
                second: b,
                faction: first.faction,
            });
        }

        let threshold = self.constants.ultimate.duel_threshold;
        let duel = Duel {
            participant_a: CharacterSnapshot::from_character(&first, threshold, &self.constants)?,
            participant_b: CharacterSnapshot::from_character(&second, threshold, &self.constants)?,
        };

        let mut session = FightSession::new(FightMode::OneOnOne(duel), request.creator.clone());
        let summary = self.apply_duel_turn(&mut session, request, kind)?;
        let session = self.create(session)?;
        duel_view(&session, summary, false)
    }

    fn continue_duel(
        &self,
        id: FightId,
        request: &TurnRequest,
        kind: AttackKind,
    ) -> Result<DuelView, CombatError> {
        self.with_fight_locked(id, || {
            let mut session = self.load(id)?;
            if let Some(summary) = self.prepare_continue(&session, request, MODE)? {
                return duel_view(&session, summary, true);
            }

            let summary = self.apply_duel_turn(&mut session, request, kind)?;
            self.commit(&mut session)?;
            duel_view(&session, summary, false)
        })
    }

    fn roster_character(&self, id: CharacterId) -> Result<Character, CombatError> {
        self.roster
            .find_character(id)?
            .ok_or_else(|| CombatError::invalid_participant(format!("character {} does not exist", id)))
    }

    fn apply_duel_turn(
        &self,
        session: &mut FightSession,
        request: &TurnRequest,
        kind: AttackKind,
    ) -> Result<TurnSummary, CombatError> {
        let FightMode::OneOnOne(duel) = &mut session.mode else {
            return Err(CombatError::WrongFightMode {
                fight_id: session.id,
                expected: MODE,
            });
        };

        let (attacker, defender) = duel
            .pair_mut(request.attacker_id, request.defender_id)
            .ok_or_else(|| {
                CombatError::invalid_participant(format!(
                    "attacker {} and defender {} must be the two fighters of this duel",
                    request.attacker_id, request.defender_id
                ))
            })?;

        let summary = resolve_turn(attacker, defender, kind, &self.constants)?;
        session.record_turn(&summary, request.request_id.as_deref());
        session.refresh_status();
        Ok(summary)
    }
}

fn duel_view(
    session: &FightSession,
    turn: TurnSummary,
    replayed: bool,
) -> Result<DuelView, CombatError> {
    let FightMode::OneOnOne(duel) = &session.mode else {
        return Err(CombatError::WrongFightMode {
            fight_id: session.id,
            expected: MODE,
        });
    };

    Ok(DuelView {
        fight_id: session.id,
        status: session.status,
        participants: vec![duel.participant_a.view(), duel.participant_b.view()],
        turn,
        turn_count: session.turn_log.len(),
        replayed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConstants;
    use crate::roster::InMemoryRoster;
    use crate::session::FightStatus;
    use crate::store::{FightStore, InMemoryFightStore};
    use crate::types::Faction;
    use std::sync::Arc;

    fn engine() -> (FightEngine, Arc<InMemoryFightStore>) {
        let roster = InMemoryRoster::new(vec![
            Character::new(1, "Superman", Faction::Hero),
            Character::new(2, "Lex Luthor", Faction::Villain).with_shield(20),
            Character::new(3, "Batman", Faction::Hero),
            Character::new(4, "Doomsday", Faction::Villain).with_level(4),
        ]);
        let store = Arc::new(InMemoryFightStore::new());
        let engine = FightEngine::with_roster(store.clone(), roster, ArenaConstants::default());
        (engine, store)
    }

    #[test]
    fn test_first_turn_creates_fight() {
        let (engine, store) = engine();
        let request = TurnRequest::start_duel(1, 2, 1, 2, AttackKind::Basic).with_creator("alice");

        let view = engine.duel_turn(&request).unwrap();
        assert_eq!(view.fight_id, FightId(1));
        assert_eq!(view.participants.len(), 2);
        assert!((view.participants[1].health - 96.0).abs() < 1e-9);
        assert!((view.turn.shield_mitigated - 1.0).abs() < 1e-9);
        assert_eq!(view.turn_count, 1);
        assert_eq!(view.status, FightStatus::Active);

        let stored = store.get(FightId(1)).unwrap().unwrap();
        assert_eq!(stored.creator.as_deref(), Some("alice"));
        assert_eq!(stored.turn_log.len(), 1);
    }

    #[test]
    fn test_continue_accumulates_damage() {
        let (engine, store) = engine();
        engine
            .duel_turn(&TurnRequest::start_duel(1, 2, 1, 2, AttackKind::Basic))
            .unwrap();
        let view = engine
            .duel_turn(&TurnRequest::continue_fight(1, 2, 1, AttackKind::Special))
            .unwrap();

        assert_eq!(view.turn.attacker, "Lex Luthor");
        assert!((view.participants[0].health - 70.0).abs() < 1e-9);
        assert_eq!(view.turn_count, 2);
        assert_eq!(store.get(FightId(1)).unwrap().unwrap().version, 2);
    }

    #[test]
    fn test_same_faction_rejected() {
        let (engine, store) = engine();
        let err = engine
            .duel_turn(&TurnRequest::start_duel(1, 3, 1, 3, AttackKind::Basic))
            .unwrap_err();
        assert!(matches!(err, CombatError::SameFactionNotAllowed { .. }));
        assert!(store.list(None).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_character_rejected() {
        let (engine, _) = engine();
        let err = engine
            .duel_turn(&TurnRequest::start_duel(1, 99, 1, 99, AttackKind::Basic))
            .unwrap_err();
        assert!(matches!(err, CombatError::InvalidParticipant(_)));
    }

    #[test]
    fn test_missing_fight_rejected() {
        let (engine, _) = engine();
        let err = engine
            .duel_turn(&TurnRequest::continue_fight(42, 1, 2, AttackKind::Basic))
            .unwrap_err();
        assert!(matches!(err, CombatError::FightNotFound(FightId(42))));
    }

    #[test]
    fn test_missing_fights_leave_no_locks_behind() {
        let (engine, _) = engine();
        for id in 1000..1100 {
            let err = engine
                .duel_turn(&TurnRequest::continue_fight(id, 1, 2, AttackKind::Basic))
                .unwrap_err();
            assert!(matches!(err, CombatError::FightNotFound(_)));
        }
        assert!(matches!(
            engine.delete_fight(FightId(7)),
            Err(CombatError::FightNotFound(_))
        ));
        assert_eq!(engine.locks.len(), 0);

        engine
            .duel_turn(&TurnRequest::start_duel(1, 2, 1, 2, AttackKind::Basic))
            .unwrap();
        engine
            .duel_turn(&TurnRequest::continue_fight(1, 2, 1, AttackKind::Basic))
            .unwrap();
        assert_eq!(engine.locks.len(), 1);
    }

    #[test]
    fn test_outsider_cannot_join_duel() {
        let (engine, _) = engine();
        engine
            .duel_turn(&TurnRequest::start_duel(1, 2, 1, 2, AttackKind::Basic))
            .unwrap();
        let err = engine
            .duel_turn(&TurnRequest::continue_fight(1, 3, 2, AttackKind::Basic))
            .unwrap_err();
        assert!(matches!(err, CombatError::InvalidParticipant(_)));
    }

    #[test]
    fn test_invalid_kind_and_unready_ultimate_write_nothing() {
        let (engine, store) = engine();
        engine
            .duel_turn(&TurnRequest::start_duel(1, 2, 1, 2, AttackKind::Basic))
            .unwrap();
        let before = store.get(FightId(1)).unwrap().unwrap();

        let mut bad_kind = TurnRequest::continue_fight(1, 1, 2, AttackKind::Basic);
        bad_kind.attack_kind = "laser".to_string();
        assert!(matches!(
            engine.duel_turn(&bad_kind).unwrap_err(),
            CombatError::InvalidAttackKind(_)
        ));

        let err = engine
            .duel_turn(&TurnRequest::continue_fight(1, 1, 2, AttackKind::Ultimate))
            .unwrap_err();
        assert!(matches!(err, CombatError::UltimateNotReady { .. }));
        assert_eq!(store.get(FightId(1)).unwrap().unwrap(), before);
    }

    #[test]
    fn test_ultimate_cycle() {
        let (engine, _) = engine();
        // Doomsday (level 4) special: 60 >= 50 threshold
        let view = engine
            .duel_turn(&TurnRequest::start_duel(1, 4, 4, 1, AttackKind::Special))
            .unwrap();
        assert!(view.participants[1].ultimate_available);

        let view = engine
            .duel_turn(&TurnRequest::continue_fight(1, 4, 1, AttackKind::Ultimate))
            .unwrap();
        assert!(!view.participants[1].ultimate_available);
        // 100 - 60 - 110, floored at 0
        assert!((view.participants[0].health - 0.0).abs() < f64::EPSILON);
        assert_eq!(
            view.status,
            FightStatus::Concluded {
                winner: Faction::Villain
            }
        );

        let err = engine
            .duel_turn(&TurnRequest::continue_fight(1, 1, 4, AttackKind::Basic))
            .unwrap_err();
        assert!(matches!(err, CombatError::FightConcluded { .. }));
    }

    #[test]
    fn test_replayed_request_is_not_applied_twice() {
        let (engine, store) = engine();
        engine
            .duel_turn(&TurnRequest::start_duel(1, 2, 1, 2, AttackKind::Basic))
            .unwrap();

        let request = TurnRequest::continue_fight(1, 1, 2, AttackKind::Special).with_request_id("turn-2");
        let first = engine.duel_turn(&request).unwrap();
        let replay = engine.duel_turn(&request).unwrap();

        assert!(!first.replayed);
        assert!(replay.replayed);
        assert_eq!(first.turn, replay.turn);
        assert_eq!(first.participants, replay.participants);
        assert_eq!(store.get(FightId(1)).unwrap().unwrap().turn_log.len(), 2);
    }
}
