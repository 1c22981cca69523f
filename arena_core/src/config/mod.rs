//! Configuration loading from TOML files

mod constants;
mod roster;

pub use constants::{
    ArenaConstants, AttackConstants, HealthConstants, TeamConstants, UltimateConstants,
};
pub(crate) use constants::default_legacy_threshold;
pub use roster::{default_roster, load_roster, parse_roster, RosterConfig};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load and validate arena constants from a TOML file
pub fn load_constants(path: &Path) -> Result<ArenaConstants, ConfigError> {
    let constants: ArenaConstants = load_toml(path)?;
    constants.validate()?;
    Ok(constants)
}

/// Get the bundled arena constants
pub fn default_constants() -> ArenaConstants {
    let toml = include_str!("../../config/arena.toml");
    parse_toml::<ArenaConstants>(toml)
        .ok()
        .filter(|c| c.validate().is_ok())
        .unwrap_or_default()
}
