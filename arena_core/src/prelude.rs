//! Prelude module for convenient imports
//!
//! ```rust
//! use arena_core::prelude::*;
//! ```

// Core types
pub use crate::types::{AttackKind, CharacterId, Faction, FightId};
pub use crate::snapshot::{CharacterSnapshot, ParticipantView};
pub use crate::roster::{Character, InMemoryRoster, RosterProvider, TeamRosterProvider};

// Combat
pub use crate::combat::{charge_ultimate, choose_attack_with_rng, resolve_attack, AttackOutcome};

// Sessions and persistence
pub use crate::session::{FightMode, FightSession, FightStatus, TurnSummary};
pub use crate::store::{FightStore, InMemoryFightStore, JsonFileFightStore};

// Orchestration
pub use crate::orchestrator::{FightEngine, TurnRequest, TurnView};

// Errors and config
pub use crate::config::ArenaConstants;
pub use crate::error::{CombatError, StoreError};
