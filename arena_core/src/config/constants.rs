//! Arena constants configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunable arena constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaConstants {
    #[serde(default)]
    pub health: HealthConstants,
    #[serde(default)]
    pub attacks: AttackConstants,
    #[serde(default)]
    pub ultimate: UltimateConstants,
    #[serde(default)]
    pub teams: TeamConstants,
}

impl ArenaConstants {
    /// Reject values the resolution rules cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.health.base <= 0.0 || self.health.per_level < 0.0 {
            return Err(ConfigError::ValidationError(
                "health.base must be positive and health.per_level non-negative".to_string(),
            ));
        }
        for (name, value) in [
            ("duel_threshold", self.ultimate.duel_threshold),
            ("team_threshold", self.ultimate.team_threshold),
            ("legacy_threshold", self.ultimate.legacy_threshold),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "ultimate.{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if self.attacks.critical_multiplier < 0.0 {
            return Err(ConfigError::ValidationError(
                "attacks.critical_multiplier must not be negative".to_string(),
            ));
        }
        if self.teams.size == 0 {
            return Err(ConfigError::ValidationError(
                "teams.size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Starting (and maximum) health for a character of the given level
    pub fn max_health(&self, level: u32) -> f64 {
        self.health.base + level.saturating_sub(1) as f64 * self.health.per_level
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConstants {
    /// Health of a level 1 character
    #[serde(default = "default_base_health")]
    pub base: f64,
    /// Extra health per level above 1
    #[serde(default = "default_health_per_level")]
    pub per_level: f64,
}

impl Default for HealthConstants {
    fn default() -> Self {
        HealthConstants {
            base: 100.0,
            per_level: 5.0,
        }
    }
}

fn default_base_health() -> f64 {
    100.0
}
fn default_health_per_level() -> f64 {
    5.0
}

/// Raw damage formulas: `base + (level - 1) * per_level`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackConstants {
    #[serde(default = "default_basic_base")]
    pub basic_base: f64,
    #[serde(default = "default_basic_per_level")]
    pub basic_per_level: f64,
    #[serde(default = "default_special_base")]
    pub special_base: f64,
    #[serde(default = "default_special_per_level")]
    pub special_per_level: f64,
    /// Critical = round(basic * multiplier)
    #[serde(default = "default_critical_multiplier")]
    pub critical_multiplier: f64,
    #[serde(default = "default_ultimate_base")]
    pub ultimate_base: f64,
    #[serde(default = "default_ultimate_per_level")]
    pub ultimate_per_level: f64,
}

impl Default for AttackConstants {
    fn default() -> Self {
        AttackConstants {
            basic_base: 5.0,
            basic_per_level: 1.0,
            special_base: 30.0,
            special_per_level: 10.0,
            critical_multiplier: 1.5,
            ultimate_base: 80.0,
            ultimate_per_level: 10.0,
        }
    }
}

fn default_basic_base() -> f64 {
    5.0
}
fn default_basic_per_level() -> f64 {
    1.0
}
fn default_special_base() -> f64 {
    30.0
}
fn default_special_per_level() -> f64 {
    10.0
}
fn default_critical_multiplier() -> f64 {
    1.5
}
fn default_ultimate_base() -> f64 {
    80.0
}
fn default_ultimate_per_level() -> f64 {
    10.0
}

/// Ultimate charge thresholds, fixed on each snapshot when a fight starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UltimateConstants {
    /// Threshold given to both duelists
    #[serde(default = "default_duel_threshold")]
    pub duel_threshold: f64,
    /// Threshold given to every team battle member
    #[serde(default = "default_team_threshold")]
    pub team_threshold: f64,
    /// Backfilled into stored snapshots that predate the threshold field
    #[serde(default = "default_legacy_threshold")]
    pub legacy_threshold: f64,
}

impl Default for UltimateConstants {
    fn default() -> Self {
        UltimateConstants {
            duel_threshold: 50.0,
            team_threshold: 150.0,
            legacy_threshold: 50.0,
        }
    }
}

fn default_duel_threshold() -> f64 {
    50.0
}
fn default_team_threshold() -> f64 {
    150.0
}
pub(crate) fn default_legacy_threshold() -> f64 {
    50.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamConstants {
    /// Members per side in a team battle
    #[serde(default = "default_team_size")]
    pub size: usize,
}

impl Default for TeamConstants {
    fn default() -> Self {
        TeamConstants { size: 3 }
    }
}

fn default_team_size() -> usize {
    3
}
