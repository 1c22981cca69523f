//! TurnSummary - What happened on one resolved turn

use crate::combat::AttackOutcome;
use crate::snapshot::{round2, CharacterSnapshot};
use crate::types::{AttackKind, CharacterId};
use serde::{Deserialize, Serialize};

/// Summary of a resolved turn, returned to callers and kept per request id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnSummary {
    pub attacker_id: CharacterId,
    pub attacker: String,
    pub defender_id: CharacterId,
    pub defender: String,
    pub attack_kind: AttackKind,
    /// Health actually removed from the defender
    pub damage_dealt: f64,
    /// Damage absorbed by the defender's shield
    pub shield_mitigated: f64,
    pub health_before: f64,
    pub health_after: f64,
    pub description: String,
}

impl TurnSummary {
    pub fn new(
        attacker: &CharacterSnapshot,
        defender: &CharacterSnapshot,
        outcome: &AttackOutcome,
    ) -> Self {
        TurnSummary {
            attacker_id: attacker.id,
            attacker: attacker.name.clone(),
            defender_id: defender.id,
            defender: defender.name.clone(),
            attack_kind: outcome.kind,
            damage_dealt: round2(outcome.damage_dealt()),
            shield_mitigated: round2(outcome.shield_absorbed),
            health_before: round2(outcome.defender_health_before),
            health_after: round2(outcome.defender_health_after),
            description: outcome.describe(),
        }
    }

    /// Line appended to the fight's turn log
    pub fn log_line(&self) -> String {
        format!(
            "{} attacks {}: {} (health: {:.2} -> {:.2})",
            self.attacker, self.defender, self.description, self.health_before, self.health_after
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::resolve_attack;
    use crate::config::ArenaConstants;
    use crate::roster::Character;
    use crate::types::Faction;

    #[test]
    fn test_summary_from_shielded_hit() {
        let c = ArenaConstants::default();
        let mut batman = CharacterSnapshot::from_character(
            &Character::new(3, "Batman", Faction::Hero),
            50.0,
            &c,
        )
        .unwrap();
        let mut joker = CharacterSnapshot::from_character(
            &Character::new(5, "The Joker", Faction::Villain).with_shield(20),
            50.0,
            &c,
        )
        .unwrap();

        let outcome = resolve_attack(&mut batman, &mut joker, AttackKind::Basic, &c).unwrap();
        let summary = TurnSummary::new(&batman, &joker, &outcome);

        assert_eq!(summary.attacker, "Batman");
        assert_eq!(summary.defender_id, CharacterId(5));
        assert!((summary.damage_dealt - 4.0).abs() < 1e-9);
        assert!((summary.shield_mitigated - 1.0).abs() < 1e-9);
        assert_eq!(
            summary.log_line(),
            "Batman attacks The Joker: Basic attack (5 damage) (health: 100.00 -> 96.00)"
        );
    }
}
