//! AttackOutcome - Result of resolving one attack

use crate::types::AttackKind;
use serde::{Deserialize, Serialize};

/// Result of applying one attack to a defender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub kind: AttackKind,
    /// Damage before the shield is applied
    pub raw_damage: f64,
    /// Damage after the shield is applied
    pub mitigated_damage: f64,
    /// Amount absorbed by the defender's shield (0 for ultimates)
    pub shield_absorbed: f64,
    pub defender_health_before: f64,
    pub defender_health_after: f64,
}

impl AttackOutcome {
    /// Health actually removed from the defender (less than mitigated damage
    /// when the blow overkills)
    pub fn damage_dealt(&self) -> f64 {
        self.defender_health_before - self.defender_health_after
    }

    /// Whether this attack brought the defender to zero health
    pub fn is_killing_blow(&self) -> bool {
        self.defender_health_before > 0.0 && self.defender_health_after <= 0.0
    }

    /// Short description of the attack, as recorded in the turn log
    pub fn describe(&self) -> String {
        match self.kind {
            AttackKind::Basic => format!("Basic attack ({:.0} damage)", self.raw_damage),
            AttackKind::Special => format!("Special attack ({:.0} damage)", self.raw_damage),
            AttackKind::Critical => format!("Critical attack ({:.0} damage)", self.raw_damage),
            AttackKind::Ultimate => format!(
                "Ultimate! ({:.0} damage, ignores shield)",
                self.raw_damage
            ),
        }
    }
}
