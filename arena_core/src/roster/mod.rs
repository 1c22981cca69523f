//! Roster - static character definitions consulted when a fight starts

use crate::error::CombatError;
use crate::types::{CharacterId, Faction};
use serde::{Deserialize, Serialize};

/// A character as defined in the roster, before it enters combat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub faction: Faction,
    #[serde(default = "default_level")]
    pub level: u32,
    /// Damage reduction percentage, if the character has one
    #[serde(default)]
    pub shield: Option<u32>,
    /// Team the character belongs to, used by team battles
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    /// Not used by the current damage formulas
    #[serde(default = "default_strength")]
    pub strength: u32,
}

fn default_level() -> u32 {
    1
}

fn default_strength() -> u32 {
    50
}

impl Character {
    /// Create a level 1 character with no shield or team
    pub fn new(id: impl Into<CharacterId>, name: impl Into<String>, faction: Faction) -> Self {
        Character {
            id: id.into(),
            name: name.into(),
            faction,
            level: default_level(),
            shield: None,
            team: None,
            city: None,
            strength: default_strength(),
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_shield(mut self, shield: u32) -> Self {
        self.shield = Some(shield);
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }
}

/// Source of the character roster used when a 1v1 fight starts
pub trait RosterProvider: Send + Sync {
    fn list_characters(&self) -> Result<Vec<Character>, CombatError>;

    fn find_character(&self, id: CharacterId) -> Result<Option<Character>, CombatError> {
        Ok(self.list_characters()?.into_iter().find(|c| c.id == id))
    }
}

/// Resolves a named team to its members of one faction
pub trait TeamRosterProvider: Send + Sync {
    /// All members of `team` with the given faction, in roster order
    fn team_members(&self, team: &str, faction: Faction) -> Result<Vec<Character>, CombatError>;
}

/// Roster held entirely in memory, usually loaded from TOML
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoster {
    characters: Vec<Character>,
}

impl InMemoryRoster {
    pub fn new(characters: Vec<Character>) -> Self {
        InMemoryRoster { characters }
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

impl RosterProvider for InMemoryRoster {
    fn list_characters(&self) -> Result<Vec<Character>, CombatError> {
        Ok(self.characters.clone())
    }
}

impl TeamRosterProvider for InMemoryRoster {
    fn team_members(&self, team: &str, faction: Faction) -> Result<Vec<Character>, CombatError> {
        Ok(self
            .characters
            .iter()
            .filter(|c| c.faction == faction && c.team.as_deref() == Some(team))
            .cloned()
            .collect())
    }
}
