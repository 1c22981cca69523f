//! FightSession - The persisted, resumable unit of combat state

mod turn;

pub use turn::TurnSummary;

use crate::snapshot::CharacterSnapshot;
use crate::types::{CharacterId, Faction, FightId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether a fight still accepts turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FightStatus {
    #[default]
    Active,
    /// Every member of the losing side is at zero health
    Concluded { winner: Faction },
}

/// A one-on-one fight between a hero and a villain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Duel {
    pub participant_a: CharacterSnapshot,
    pub participant_b: CharacterSnapshot,
}

impl Duel {
    /// Mutable access to (attacker, defender); None unless the two ids are
    /// the two distinct participants
    pub fn pair_mut(
        &mut self,
        attacker: CharacterId,
        defender: CharacterId,
    ) -> Option<(&mut CharacterSnapshot, &mut CharacterSnapshot)> {
        let (a, b) = (self.participant_a.id, self.participant_b.id);
        if attacker == a && defender == b {
            Some((&mut self.participant_a, &mut self.participant_b))
        } else if attacker == b && defender == a {
            Some((&mut self.participant_b, &mut self.participant_a))
        } else {
            None
        }
    }

    fn winner(&self) -> Option<Faction> {
        match (self.participant_a.is_defeated(), self.participant_b.is_defeated()) {
            (true, false) => Some(self.participant_b.faction),
            (false, true) => Some(self.participant_a.faction),
            _ => None,
        }
    }
}

/// One side of a team battle; membership never changes after creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRoster {
    pub team: String,
    pub faction: Faction,
    pub members: Vec<CharacterId>,
}

/// A three-versus-three fight with per-character targeting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamBattle {
    pub heroes: TeamRoster,
    pub villains: TeamRoster,
    /// Live state of every fighter; the rosters only record membership
    pub fighters: BTreeMap<CharacterId, CharacterSnapshot>,
}

impl TeamBattle {
    pub fn fighter(&self, id: CharacterId) -> Option<&CharacterSnapshot> {
        self.fighters.get(&id)
    }

    /// Live snapshots of one roster, in roster order
    pub fn side(&self, roster: &TeamRoster) -> Vec<&CharacterSnapshot> {
        roster
            .members
            .iter()
            .filter_map(|id| self.fighters.get(id))
            .collect()
    }

    fn side_defeated(&self, roster: &TeamRoster) -> bool {
        roster
            .members
            .iter()
            .all(|id| self.fighters.get(id).map_or(true, |f| f.is_defeated()))
    }

    fn winner(&self) -> Option<Faction> {
        match (self.side_defeated(&self.heroes), self.side_defeated(&self.villains)) {
            (true, false) => Some(self.villains.faction),
            (false, true) => Some(self.heroes.faction),
            _ => None,
        }
    }
}

/// The two fight shapes, fixed when the fight is created
// Externally tagged: the fighter map has integer keys, which internally
// tagged enums cannot round-trip through JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FightMode {
    OneOnOne(Duel),
    TeamBattle(TeamBattle),
}

impl FightMode {
    pub fn name(&self) -> &'static str {
        match self {
            FightMode::OneOnOne(_) => "one_on_one",
            FightMode::TeamBattle(_) => "team_battle",
        }
    }
}

/// A persisted fight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FightSession {
    /// Assigned by the store on creation
    pub id: FightId,
    #[serde(default)]
    pub creator: Option<String>,
    /// Bumped by the store on every successful write
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub status: FightStatus,
    /// Human-readable line per resolved attack, append-only
    #[serde(default)]
    pub turn_log: Vec<String>,
    /// Turns already applied, keyed by the caller's request id
    #[serde(default)]
    pub applied_requests: BTreeMap<String, TurnSummary>,
    pub mode: FightMode,
}

impl FightSession {
    /// A fight that has not been stored yet
    pub fn new(mode: FightMode, creator: Option<String>) -> Self {
        FightSession {
            id: FightId(0),
            creator,
            version: 0,
            status: FightStatus::Active,
            turn_log: Vec::new(),
            applied_requests: BTreeMap::new(),
            mode,
        }
    }

    /// Every snapshot taking part in the fight
    pub fn participants(&self) -> Vec<&CharacterSnapshot> {
        match &self.mode {
            FightMode::OneOnOne(duel) => vec![&duel.participant_a, &duel.participant_b],
            FightMode::TeamBattle(battle) => battle.fighters.values().collect(),
        }
    }

    pub fn is_concluded(&self) -> bool {
        matches!(self.status, FightStatus::Concluded { .. })
    }

    /// Move to `Concluded` once one whole side is at zero health
    ///
    /// Returns the winner if this call made the transition.
    pub fn refresh_status(&mut self) -> Option<Faction> {
        if self.is_concluded() {
            return None;
        }
        let winner = match &self.mode {
            FightMode::OneOnOne(duel) => duel.winner(),
            FightMode::TeamBattle(battle) => battle.winner(),
        }?;
        self.status = FightStatus::Concluded { winner };
        Some(winner)
    }

    /// Record a resolved turn in the log (and under its request id, if any)
    pub fn record_turn(&mut self, summary: &TurnSummary, request_id: Option<&str>) {
        self.turn_log.push(summary.log_line());
        if let Some(request_id) = request_id {
            self.applied_requests
                .insert(request_id.to_string(), summary.clone());
        }
    }
}
