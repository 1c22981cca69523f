//! Automatic attack selection for computer-controlled turns

use crate::types::AttackKind;
use rand::Rng;

/// Chance of a critical attack on an automatic turn
pub const CRITICAL_CHANCE: f64 = 0.15;
/// Chance of a special attack on an automatic turn
pub const SPECIAL_CHANCE: f64 = 0.35;

/// Pick an attack kind with a provided RNG (for deterministic testing)
///
/// A charged ultimate is always used. Otherwise 15% critical, 35% special,
/// 50% basic.
pub fn choose_attack_with_rng(rng: &mut impl Rng, ultimate_ready: bool) -> AttackKind {
    if ultimate_ready {
        return AttackKind::Ultimate;
    }
    let roll: f64 = rng.gen();
    if roll < CRITICAL_CHANCE {
        AttackKind::Critical
    } else if roll < CRITICAL_CHANCE + SPECIAL_CHANCE {
        AttackKind::Special
    } else {
        AttackKind::Basic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_ready_ultimate_is_always_chosen() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(choose_attack_with_rng(&mut rng, true), AttackKind::Ultimate);
        }
    }

    #[test]
    fn test_distribution_roughly_matches() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut counts = [0u32; 3];
        for _ in 0..10_000 {
            match choose_attack_with_rng(&mut rng, false) {
                AttackKind::Critical => counts[0] += 1,
                AttackKind::Special => counts[1] += 1,
                AttackKind::Basic => counts[2] += 1,
                AttackKind::Ultimate => panic!("ultimate chosen while not ready"),
            }
        }
        assert!((1_200..1_800).contains(&counts[0]));
        assert!((3_100..3_900).contains(&counts[1]));
        assert!((4_600..5_400).contains(&counts[2]));
    }
}
