//! Core types shared by every arena module

use crate::error::CombatError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the conflict a character fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Hero,
    Villain,
}

impl Faction {
    /// The faction a character of this faction is allowed to fight
    pub fn opponent(self) -> Faction {
        match self {
            Faction::Hero => Faction::Villain,
            Faction::Villain => Faction::Hero,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Faction::Hero => "hero",
            Faction::Villain => "villain",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four attacks a character can perform on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    Basic,
    Special,
    Critical,
    /// Requires a charged ultimate; bypasses the defender's shield
    Ultimate,
}

impl AttackKind {
    /// Get all attack kinds
    pub fn all() -> &'static [AttackKind] {
        &[
            AttackKind::Basic,
            AttackKind::Special,
            AttackKind::Critical,
            AttackKind::Ultimate,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttackKind::Basic => "basic",
            AttackKind::Special => "special",
            AttackKind::Critical => "critical",
            AttackKind::Ultimate => "ultimate",
        }
    }

    /// Whether the defender's shield reduces this attack
    pub fn is_mitigated(self) -> bool {
        !matches!(self, AttackKind::Ultimate)
    }
}

impl fmt::Display for AttackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttackKind {
    type Err = CombatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(AttackKind::Basic),
            "special" => Ok(AttackKind::Special),
            "critical" => Ok(AttackKind::Critical),
            "ultimate" => Ok(AttackKind::Ultimate),
            _ => Err(CombatError::InvalidAttackKind(s.to_string())),
        }
    }
}

/// Identifier of a roster character
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub u32);

impl From<u32> for CharacterId {
    fn from(id: u32) -> Self {
        CharacterId(id)
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a persisted fight session (positive, assigned as max + 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FightId(pub u64);

impl FightId {
    /// The id handed out when the store is empty
    pub const FIRST: FightId = FightId(1);

    pub fn next(self) -> FightId {
        FightId(self.0 + 1)
    }
}

impl From<u64> for FightId {
    fn from(id: u64) -> Self {
        FightId(id)
    }
}

impl fmt::Display for FightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
