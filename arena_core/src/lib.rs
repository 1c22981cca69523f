//! arena_core - Turn-based hero/villain combat resolution
//!
//! This library provides:
//! - CharacterSnapshot: In-combat copy of a roster character
//! - Attack resolution: Raw damage, shield mitigation and ultimate charge
//! - FightSession: Resumable 1v1 and team battle state
//! - FightStore: Persistence contract with in-memory and JSON file adapters
//! - FightEngine: Turn orchestration across independent requests

pub mod combat;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod prelude;
pub mod roster;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod types;

// Re-export core types for convenience
pub use combat::{charge_ultimate, resolve_attack, AttackOutcome};
pub use config::{default_constants, default_roster, ArenaConstants, ConfigError};
pub use error::{CombatError, StoreError};
pub use orchestrator::{DuelView, FightEngine, FightPage, TeamView, TurnRequest, TurnView};
pub use roster::{Character, InMemoryRoster, RosterProvider, TeamRosterProvider};
pub use session::{Duel, FightMode, FightSession, FightStatus, TeamBattle, TurnSummary};
pub use snapshot::{CharacterSnapshot, ParticipantView};
pub use store::{FightStore, InMemoryFightStore, JsonFileFightStore};
pub use types::{AttackKind, CharacterId, Faction, FightId};
