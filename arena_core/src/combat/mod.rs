//! Combat resolution - Apply attacks between snapshots and track ultimate charge

mod choice;
mod resolution;
mod result;
mod ultimate;

pub use choice::choose_attack_with_rng;
pub use resolution::{mitigate, raw_damage, resolve_attack};
pub use result::AttackOutcome;
pub use ultimate::charge_ultimate;
