//! Attack resolution - Apply one attack from an attacker to a defender

use super::result::AttackOutcome;
use crate::config::ArenaConstants;
use crate::error::CombatError;
use crate::snapshot::CharacterSnapshot;
use crate::types::AttackKind;

/// Raw damage of an attack for an attacker of the given level
///
/// - basic: `basic_base + (L-1) * basic_per_level`
/// - special: `special_base + (L-1) * special_per_level`
/// - critical: `round(basic(L) * critical_multiplier)`
/// - ultimate: `ultimate_base + (L-1) * ultimate_per_level`
pub fn raw_damage(kind: AttackKind, level: u32, constants: &ArenaConstants) -> f64 {
    let steps = level.saturating_sub(1) as f64;
    let attacks = &constants.attacks;
    let basic = attacks.basic_base + steps * attacks.basic_per_level;

    match kind {
        AttackKind::Basic => basic,
        AttackKind::Special => attacks.special_base + steps * attacks.special_per_level,
        AttackKind::Critical => (basic * attacks.critical_multiplier).round(),
        AttackKind::Ultimate => attacks.ultimate_base + steps * attacks.ultimate_per_level,
    }
}

/// Damage left after the defender's shield
///
/// Shields above 100 are treated as 100 so a hit can never heal.
pub fn mitigate(raw: f64, shield: u32, kind: AttackKind) -> f64 {
    if !kind.is_mitigated() || shield == 0 {
        return raw;
    }
    let reduction = shield.min(100) as f64 / 100.0;
    raw * (1.0 - reduction)
}

/// Resolve an attack against a defender
///
/// Effects on success:
/// 1. The defender's health drops by the mitigated damage, floored at 0
/// 2. For an ultimate, the attacker's charge resets to 0 and becomes unavailable
///
/// An ultimate requested without a charged ultimate fails with
/// `UltimateNotReady` and leaves both snapshots untouched.
pub fn resolve_attack(
    attacker: &mut CharacterSnapshot,
    defender: &mut CharacterSnapshot,
    kind: AttackKind,
    constants: &ArenaConstants,
) -> Result<AttackOutcome, CombatError> {
    if kind == AttackKind::Ultimate && !attacker.ultimate_available {
        return Err(CombatError::UltimateNotReady {
            attacker: attacker.name.clone(),
            charge: attacker.ultimate_charge,
            threshold: attacker.ultimate_threshold,
        });
    }

    let raw = raw_damage(kind, attacker.level, constants);
    let mitigated = mitigate(raw, defender.shield, kind);

    let health_before = defender.health;
    defender.set_health(health_before - mitigated);

    if kind == AttackKind::Ultimate {
        attacker.ultimate_charge = 0.0;
        attacker.ultimate_available = false;
    }

    Ok(AttackOutcome {
        kind,
        raw_damage: raw,
        mitigated_damage: mitigated,
        shield_absorbed: raw - mitigated,
        defender_health_before: health_before,
        defender_health_after: defender.health,
    })
}
