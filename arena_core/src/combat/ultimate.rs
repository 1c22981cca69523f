//! Ultimate charge tracking for attackers

use super::result::AttackOutcome;
use crate::snapshot::CharacterSnapshot;
use crate::types::AttackKind;

/// Credit the attacker with the mitigated damage of a resolved attack
///
/// Ultimates were already paid for during resolution, so they add nothing.
/// Returns true when this call made the ultimate available.
pub fn charge_ultimate(attacker: &mut CharacterSnapshot, outcome: &AttackOutcome) -> bool {
    if outcome.kind == AttackKind::Ultimate {
        return false;
    }

    attacker.ultimate_charge += outcome.mitigated_damage;
    if !attacker.ultimate_available && attacker.ultimate_charge >= attacker.ultimate_threshold {
        attacker.ultimate_available = true;
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::resolve_attack;
    use crate::config::ArenaConstants;
    use crate::roster::Character;
    use crate::types::Faction;

    fn snapshot(id: u32, faction: Faction, level: u32) -> CharacterSnapshot {
        let character = Character::new(id, format!("fighter-{}", id), faction).with_level(level);
        CharacterSnapshot::from_character(&character, 50.0, &ArenaConstants::default()).unwrap()
    }

    #[test]
    fn test_special_charges_ultimate_past_threshold() {
        let c = ArenaConstants::default();
        // Level 4 special: 30 + 3 * 10 = 60
        let mut attacker = snapshot(1, Faction::Hero, 4);
        let mut defender = snapshot(2, Faction::Villain, 1);

        let outcome = resolve_attack(&mut attacker, &mut defender, AttackKind::Special, &c).unwrap();
        assert!(charge_ultimate(&mut attacker, &outcome));
        assert!((attacker.ultimate_charge - 60.0).abs() < f64::EPSILON);
        assert!(attacker.ultimate_available);
    }

    #[test]
    fn test_charge_below_threshold() {
        let c = ArenaConstants::default();
        let mut attacker = snapshot(1, Faction::Hero, 1);
        let mut defender = snapshot(2, Faction::Villain, 1);

        let outcome = resolve_attack(&mut attacker, &mut defender, AttackKind::Special, &c).unwrap();
        assert!(!charge_ultimate(&mut attacker, &outcome));
        assert!((attacker.ultimate_charge - 30.0).abs() < f64::EPSILON);
        assert!(!attacker.ultimate_available);
        // Defenders never gain charge from being hit
        assert!((defender.ultimate_charge - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ultimate_adds_no_charge() {
        let c = ArenaConstants::default();
        let mut attacker = snapshot(1, Faction::Hero, 1);
        attacker.ultimate_charge = 55.0;
        attacker.ultimate_available = true;
        let mut defender = snapshot(2, Faction::Villain, 1);

        let outcome = resolve_attack(&mut attacker, &mut defender, AttackKind::Ultimate, &c).unwrap();
        assert!(!charge_ultimate(&mut attacker, &outcome));
        assert!((attacker.ultimate_charge - 0.0).abs() < f64::EPSILON);
        assert!(!attacker.ultimate_available);
    }
}
