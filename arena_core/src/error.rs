//! Error types for combat resolution and fight persistence

use crate::types::{CharacterId, Faction, FightId};
use thiserror::Error;

/// Failure while reading or writing fight sessions
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Fight store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to (de)serialize fight store: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Optimistic version check failed: someone else wrote the fight first
    #[error("Fight {fight_id} was modified concurrently (expected version {expected}, found {found})")]
    Conflict {
        fight_id: FightId,
        expected: u64,
        found: u64,
    },
    #[error("Fight {0} does not exist in the store")]
    NotFound(FightId),
    #[error("Fight store lock poisoned")]
    Poisoned,
}

/// Errors surfaced by the turn orchestrator
///
/// Every variant except `Persistence` is raised before any state is mutated.
#[derive(Error, Debug)]
pub enum CombatError {
    #[error("Invalid participant: {0}")]
    InvalidParticipant(String),
    #[error("Characters {first} and {second} are both {faction}; fights must be hero versus villain")]
    SameFactionNotAllowed {
        first: CharacterId,
        second: CharacterId,
        faction: Faction,
    },
    #[error("Team '{team}' has {found} {faction} members, exactly {required} are required")]
    InvalidTeamComposition {
        team: String,
        faction: Faction,
        found: usize,
        required: usize,
    },
    #[error("Fight {0} not found")]
    FightNotFound(FightId),
    #[error("Invalid attack kind: '{0}'")]
    InvalidAttackKind(String),
    #[error("Ultimate not ready for {attacker} ({charge:.2}/{threshold:.2})")]
    UltimateNotReady {
        attacker: String,
        charge: f64,
        threshold: f64,
    },
    #[error("Fight {fight_id} is not a {expected} fight")]
    WrongFightMode {
        fight_id: FightId,
        expected: &'static str,
    },
    #[error("Fight {fight_id} is already over ({winner} side won)")]
    FightConcluded { fight_id: FightId, winner: Faction },
    #[error("Persistence failure: {0}")]
    Persistence(#[from] StoreError),
}

impl CombatError {
    /// Creates an InvalidParticipant error
    pub fn invalid_participant(message: impl Into<String>) -> Self {
        Self::InvalidParticipant(message.into())
    }

    /// True for caller mistakes, false for store failures
    ///
    /// A validation error guarantees nothing was written. After a persistence
    /// error the caller must re-read the fight before retrying.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Persistence(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_is_not_validation() {
        let err: CombatError = StoreError::Poisoned.into();
        assert!(!err.is_validation());
        assert!(CombatError::FightNotFound(FightId(3)).is_validation());
    }

    #[test]
    fn test_messages() {
        let err = CombatError::SameFactionNotAllowed {
            first: CharacterId(1),
            second: CharacterId(2),
            faction: Faction::Hero,
        };
        assert!(err.to_string().contains("both hero"));

        let err = CombatError::UltimateNotReady {
            attacker: "Batman".to_string(),
            charge: 12.0,
            threshold: 50.0,
        };
        assert!(err.to_string().contains("12.00/50.00"));
    }
}
