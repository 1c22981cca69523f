//! Turn orchestration - Load or create a fight, resolve one attack, persist
//!
//! Each call to [`FightEngine::duel_turn`] or [`FightEngine::team_turn`]:
//! 1. Validates the request (attack kind, participants, fight existence)
//! 2. Creates the fight from the roster, or loads it under its per-fight lock
//! 3. Resolves the attack and charges the attacker's ultimate
//! 4. Appends to the turn log and checks whether one side has fallen
//! 5. Writes the whole session back to the store
//!
//! Validation failures happen before step 5, so nothing is written. A store
//! failure in step 5 is reported as `CombatError::Persistence`.

mod admin;
mod duel;
mod locks;
mod team;
mod view;

pub use admin::FightPage;
pub use locks::FightLocks;
pub use view::{DuelView, TeamView, TurnView};

use crate::combat::{charge_ultimate, resolve_attack};
use crate::config::ArenaConstants;
use crate::error::{CombatError, StoreError};
use crate::roster::{RosterProvider, TeamRosterProvider};
use crate::session::{FightMode, FightSession, FightStatus, TurnSummary};
use crate::snapshot::CharacterSnapshot;
use crate::store::FightStore;
use crate::types::{AttackKind, CharacterId, FightId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Caller-facing turn request
///
/// `fight_id` continues an existing fight. Without it, `character_a` and
/// `character_b` start a duel, or `hero_team` and `villain_team` start a team
/// battle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnRequest {
    #[serde(default)]
    pub fight_id: Option<FightId>,
    #[serde(default)]
    pub character_a: Option<CharacterId>,
    #[serde(default)]
    pub character_b: Option<CharacterId>,
    #[serde(default)]
    pub hero_team: Option<String>,
    #[serde(default)]
    pub villain_team: Option<String>,
    pub attacker_id: CharacterId,
    pub defender_id: CharacterId,
    /// Parsed on use so unknown kinds surface as `InvalidAttackKind`
    pub attack_kind: String,
    /// Identity of whoever starts the fight
    #[serde(default)]
    pub creator: Option<String>,
    /// Makes retries safe: a request id already applied is not applied again
    #[serde(default)]
    pub request_id: Option<String>,
}

impl TurnRequest {
    fn attack(attacker: CharacterId, defender: CharacterId, kind: AttackKind) -> Self {
        TurnRequest {
            attacker_id: attacker,
            defender_id: defender,
            attack_kind: kind.as_str().to_string(),
            ..Default::default()
        }
    }

    /// First turn of a new duel between `a` and `b`
    pub fn start_duel(
        a: impl Into<CharacterId>,
        b: impl Into<CharacterId>,
        attacker: impl Into<CharacterId>,
        defender: impl Into<CharacterId>,
        kind: AttackKind,
    ) -> Self {
        TurnRequest {
            character_a: Some(a.into()),
            character_b: Some(b.into()),
            ..Self::attack(attacker.into(), defender.into(), kind)
        }
    }

    /// First turn of a new team battle
    pub fn start_team_battle(
        hero_team: impl Into<String>,
        villain_team: impl Into<String>,
        attacker: impl Into<CharacterId>,
        defender: impl Into<CharacterId>,
        kind: AttackKind,
    ) -> Self {
        TurnRequest {
            hero_team: Some(hero_team.into()),
            villain_team: Some(villain_team.into()),
            ..Self::attack(attacker.into(), defender.into(), kind)
        }
    }

    /// Next turn of an existing fight
    pub fn continue_fight(
        fight_id: impl Into<FightId>,
        attacker: impl Into<CharacterId>,
        defender: impl Into<CharacterId>,
        kind: AttackKind,
    ) -> Self {
        TurnRequest {
            fight_id: Some(fight_id.into()),
            ..Self::attack(attacker.into(), defender.into(), kind)
        }
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn attack_kind(&self) -> Result<AttackKind, CombatError> {
        self.attack_kind.parse()
    }

    fn starts_team_battle(&self) -> bool {
        self.hero_team.is_some() || self.villain_team.is_some()
    }
}

/// The combat engine: rules, roster lookups and fight persistence
pub struct FightEngine {
    store: Arc<dyn FightStore>,
    roster: Arc<dyn RosterProvider>,
    teams: Arc<dyn TeamRosterProvider>,
    constants: ArenaConstants,
    locks: FightLocks,
}

impl FightEngine {
    pub fn new(
        store: Arc<dyn FightStore>,
        roster: Arc<dyn RosterProvider>,
        teams: Arc<dyn TeamRosterProvider>,
        constants: ArenaConstants,
    ) -> Self {
        FightEngine {
            store,
            roster,
            teams,
            constants,
            locks: FightLocks::new(),
        }
    }

    /// Engine whose single roster serves both characters and teams
    pub fn with_roster<R>(store: Arc<dyn FightStore>, roster: R, constants: ArenaConstants) -> Self
    where
        R: RosterProvider + TeamRosterProvider + 'static,
    {
        let roster = Arc::new(roster);
        Self::new(store, roster.clone(), roster, constants)
    }

    pub fn constants(&self) -> &ArenaConstants {
        &self.constants
    }

    /// Resolve a turn of whichever fight mode the request refers to
    pub fn take_turn(&self, request: &TurnRequest) -> Result<TurnView, CombatError> {
        match request.fight_id {
            Some(id) => match self.load(id)?.mode {
                FightMode::OneOnOne(_) => self.duel_turn(request).map(Into::into),
                FightMode::TeamBattle(_) => self.team_turn(request).map(Into::into),
            },
            None if request.starts_team_battle() => self.team_turn(request).map(Into::into),
            None => self.duel_turn(request).map(Into::into),
        }
    }

    fn load(&self, id: FightId) -> Result<FightSession, CombatError> {
        self.store.get(id)?.ok_or(CombatError::FightNotFound(id))
    }

    /// Run `f` while holding the mutex of fight `id`
    ///
    /// The mutex is dropped again when `f` finds no such fight.
    fn with_fight_locked<T>(
        &self,
        id: FightId,
        f: impl FnOnce() -> Result<T, CombatError>,
    ) -> Result<T, CombatError> {
        let handle = self.locks.handle(id)?;
        let result = {
            let _guard = handle.lock().map_err(|_| StoreError::Poisoned)?;
            f()
        };
        if matches!(result, Err(CombatError::FightNotFound(_))) {
            self.locks.release(id, handle)?;
        }
        result
    }

    /// Checks shared by both modes before a stored fight takes another turn
    ///
    /// Returns the stored summary when the request id was already applied.
    fn prepare_continue(
        &self,
        session: &FightSession,
        request: &TurnRequest,
        expected: &'static str,
    ) -> Result<Option<TurnSummary>, CombatError> {
        if session.mode.name() != expected {
            return Err(CombatError::WrongFightMode {
                fight_id: session.id,
                expected,
            });
        }
        if let Some(summary) = request
            .request_id
            .as_deref()
            .and_then(|rid| session.applied_requests.get(rid))
        {
            debug!(fight_id = %session.id, request_id = ?request.request_id, "replaying applied turn");
            return Ok(Some(summary.clone()));
        }
        if let FightStatus::Concluded { winner } = session.status {
            return Err(CombatError::FightConcluded {
                fight_id: session.id,
                winner,
            });
        }
        Ok(None)
    }

    /// Store a new fight and return it with its assigned id
    ///
    /// The returned copy only feeds the response; later turns reload the
    /// stored fight with its store-assigned version.
    fn create(&self, mut session: FightSession) -> Result<FightSession, CombatError> {
        let id = self.store.create(session.clone())?;
        session.id = id;
        info!(fight_id = %id, mode = session.mode.name(), creator = ?session.creator, "fight created");
        Ok(session)
    }

    /// Write back a mutated fight, bumping the local version on success
    fn commit(&self, session: &mut FightSession) -> Result<(), CombatError> {
        if let Err(err) = self.store.replace(session.id, session) {
            warn!(fight_id = %session.id, error = %err, "failed to persist turn");
            return Err(err.into());
        }
        session.version += 1;
        Ok(())
    }
}

/// Resolve one attack and charge the attacker's ultimate
fn resolve_turn(
    attacker: &mut CharacterSnapshot,
    defender: &mut CharacterSnapshot,
    kind: AttackKind,
    constants: &ArenaConstants,
) -> Result<TurnSummary, CombatError> {
    let outcome = resolve_attack(attacker, defender, kind, constants)?;
    if charge_ultimate(attacker, &outcome) {
        debug!(attacker = %attacker.name, "ultimate charged");
    }
    let summary = TurnSummary::new(attacker, defender, &outcome);
    debug!(
        attacker = %summary.attacker,
        defender = %summary.defender,
        kind = %kind,
        damage = summary.damage_dealt,
        health_after = summary.health_after,
        "turn resolved"
    );
    Ok(summary)
}
