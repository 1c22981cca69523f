//! CharacterSnapshot - mutable in-combat copy of a roster character

use crate::config::{default_legacy_threshold, ArenaConstants};
use crate::error::CombatError;
use crate::roster::Character;
use crate::types::{CharacterId, Faction};
use serde::{Deserialize, Serialize};

/// Combat state of one character inside a fight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    // === Identity ===
    pub id: CharacterId,
    pub name: String,
    pub faction: Faction,
    pub level: u32,
    pub strength: u32,

    // === Resources ===
    /// Always within [0, max_health]
    pub health: f64,
    pub max_health: f64,
    /// Damage reduction percentage against non-ultimate attacks
    #[serde(default)]
    pub shield: u32,

    // === Ultimate ===
    // Older records may lack these; missing fields fall back to an uncharged
    // ultimate with the legacy threshold.
    #[serde(default)]
    pub ultimate_charge: f64,
    #[serde(default = "default_legacy_threshold")]
    pub ultimate_threshold: f64,
    #[serde(default)]
    pub ultimate_available: bool,
}

impl CharacterSnapshot {
    /// Build a fresh snapshot at full health with an empty ultimate charge
    pub fn from_character(
        character: &Character,
        ultimate_threshold: f64,
        constants: &ArenaConstants,
    ) -> Result<Self, CombatError> {
        if character.name.trim().is_empty() {
            return Err(CombatError::invalid_participant(format!(
                "character {} has no name",
                character.id
            )));
        }
        if character.level == 0 {
            return Err(CombatError::invalid_participant(format!(
                "character {} has level 0",
                character.id
            )));
        }
        if ultimate_threshold.is_nan() || ultimate_threshold <= 0.0 {
            return Err(CombatError::invalid_participant(format!(
                "ultimate threshold for character {} must be positive",
                character.id
            )));
        }

        let max_health = constants.max_health(character.level);
        Ok(CharacterSnapshot {
            id: character.id,
            name: character.name.clone(),
            faction: character.faction,
            level: character.level,
            strength: character.strength,
            health: max_health,
            max_health,
            shield: character.shield.unwrap_or(0),
            ultimate_charge: 0.0,
            ultimate_threshold,
            ultimate_available: false,
        })
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }

    /// Set health, clamped into [0, max_health]
    pub fn set_health(&mut self, health: f64) {
        self.health = health.clamp(0.0, self.max_health);
    }

    /// Public fields exposed in turn responses
    pub fn view(&self) -> ParticipantView {
        ParticipantView {
            id: self.id,
            name: self.name.clone(),
            faction: self.faction,
            health: round2(self.health),
            max_health: self.max_health,
            ultimate_available: self.ultimate_available,
        }
    }
}

/// Health and ultimate state of a participant as shown to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantView {
    pub id: CharacterId,
    pub name: String,
    pub faction: Faction,
    pub health: f64,
    pub max_health: f64,
    pub ultimate_available: bool,
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_health_scales_with_level() {
        let constants = ArenaConstants::default();
        let character = Character::new(1, "Superman", Faction::Hero)
            .with_level(3)
            .with_shield(20);

        let snapshot = CharacterSnapshot::from_character(&character, 50.0, &constants).unwrap();
        assert!((snapshot.health - 110.0).abs() < f64::EPSILON);
        assert!((snapshot.max_health - 110.0).abs() < f64::EPSILON);
        assert_eq!(snapshot.shield, 20);
        assert!((snapshot.ultimate_charge - 0.0).abs() < f64::EPSILON);
        assert!((snapshot.ultimate_threshold - 50.0).abs() < f64::EPSILON);
        assert!(!snapshot.ultimate_available);
    }

    #[test]
    fn test_missing_fields_rejected() {
        let constants = ArenaConstants::default();
        let nameless = Character::new(1, "  ", Faction::Hero);
        assert!(matches!(
            CharacterSnapshot::from_character(&nameless, 50.0, &constants),
            Err(CombatError::InvalidParticipant(_))
        ));

        let levelless = Character::new(2, "Lex", Faction::Villain).with_level(0);
        assert!(matches!(
            CharacterSnapshot::from_character(&levelless, 50.0, &constants),
            Err(CombatError::InvalidParticipant(_))
        ));
    }

    #[test]
    fn test_set_health_clamps() {
        let constants = ArenaConstants::default();
        let character = Character::new(1, "Superman", Faction::Hero);
        let mut snapshot = CharacterSnapshot::from_character(&character, 50.0, &constants).unwrap();

        snapshot.set_health(-12.5);
        assert!((snapshot.health - 0.0).abs() < f64::EPSILON);
        assert!(snapshot.is_defeated());

        snapshot.set_health(500.0);
        assert!((snapshot.health - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_legacy_record_backfills_ultimate_fields() {
        let json = r#"{
            "id": 5, "name": "Joker", "faction": "villain", "level": 1,
            "strength": 50, "health": 80.0, "max_health": 100.0
        }"#;

        let snapshot: CharacterSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.shield, 0);
        assert!((snapshot.ultimate_charge - 0.0).abs() < f64::EPSILON);
        assert!((snapshot.ultimate_threshold - 50.0).abs() < f64::EPSILON);
        assert!(!snapshot.ultimate_available);
    }
}
