//! Turn responses returned to callers

use crate::session::{FightStatus, TurnSummary};
use crate::snapshot::ParticipantView;
use crate::types::FightId;
use serde::{Deserialize, Serialize};

/// Response to a 1v1 turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuelView {
    pub fight_id: FightId,
    pub status: FightStatus,
    pub participants: Vec<ParticipantView>,
    pub turn: TurnSummary,
    /// Number of turns in the fight's log
    pub turn_count: usize,
    /// True when the request id was already applied and nothing changed
    #[serde(default)]
    pub replayed: bool,
}

/// Response to a team battle turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamView {
    pub fight_id: FightId,
    pub status: FightStatus,
    pub hero_team: String,
    pub heroes: Vec<ParticipantView>,
    pub villain_team: String,
    pub villains: Vec<ParticipantView>,
    pub turn: TurnSummary,
    pub turn_count: usize,
    #[serde(default)]
    pub replayed: bool,
}

/// Response to a turn of either fight mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnView {
    Duel(DuelView),
    Team(TeamView),
}

impl TurnView {
    pub fn fight_id(&self) -> FightId {
        match self {
            TurnView::Duel(view) => view.fight_id,
            TurnView::Team(view) => view.fight_id,
        }
    }

    pub fn status(&self) -> FightStatus {
        match self {
            TurnView::Duel(view) => view.status,
            TurnView::Team(view) => view.status,
        }
    }

    pub fn turn(&self) -> &TurnSummary {
        match self {
            TurnView::Duel(view) => &view.turn,
            TurnView::Team(view) => &view.turn,
        }
    }

    /// Every participant, heroes first for team battles
    pub fn participants(&self) -> Vec<&ParticipantView> {
        match self {
            TurnView::Duel(view) => view.participants.iter().collect(),
            TurnView::Team(view) => view.heroes.iter().chain(view.villains.iter()).collect(),
        }
    }
}

impl From<DuelView> for TurnView {
    fn from(view: DuelView) -> Self {
        TurnView::Duel(view)
    }
}

impl From<TeamView> for TurnView {
    fn from(view: TeamView) -> Self {
        TurnView::Team(view)
    }
}
