//! Roster configuration loading

use super::ConfigError;
use crate::roster::{Character, InMemoryRoster};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Container for roster characters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(rename = "characters")]
    pub characters: Vec<Character>,
}

impl RosterConfig {
    fn into_roster(self) -> Result<InMemoryRoster, ConfigError> {
        let mut seen = HashSet::new();
        for character in &self.characters {
            if !seen.insert(character.id) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate character id {}",
                    character.id
                )));
            }
        }
        Ok(InMemoryRoster::new(self.characters))
    }
}

/// Load a roster from a TOML file
pub fn load_roster(path: &Path) -> Result<InMemoryRoster, ConfigError> {
    let config: RosterConfig = super::load_toml(path)?;
    config.into_roster()
}

/// Load a roster from a TOML string
pub fn parse_roster(content: &str) -> Result<InMemoryRoster, ConfigError> {
    let config: RosterConfig = super::parse_toml(content)?;
    config.into_roster()
}

/// Get the bundled roster
pub fn default_roster() -> InMemoryRoster {
    let toml = include_str!("../../config/roster.toml");
    parse_roster(toml).unwrap_or_else(|_| InMemoryRoster::new(Vec::new()))
}
