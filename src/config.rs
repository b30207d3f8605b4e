use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which side moves first when both actives have the same speed stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedTie {
    #[default]
    FoeFirst,
    FriendlyFirst,
}

/// Tunable engine rules. Every field falls back to its default when omitted from the RON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Fraction of the health cap lost to burn at the end of each round.
    pub burn_damage_fraction: f64,
    /// Fraction of the health cap lost to poison at the end of each round.
    pub poison_damage_fraction: f64,
    pub speed_tie: SpeedTie,
    /// How many invalid decisions in a row the runner tolerates before giving up.
    pub max_decision_retries: u32,
    pub max_level: u8,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            burn_damage_fraction: 0.125,
            poison_damage_fraction: 0.125,
            speed_tie: SpeedTie::FoeFirst,
            max_decision_retries: 3,
            max_level: 100,
        }
    }
}

impl BattleConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    pub fn status_damage_fraction(&self, status: schema::StatusType) -> Option<f64> {
        match status {
            schema::StatusType::Burned => Some(self.burn_damage_fraction),
            schema::StatusType::Poisoned => Some(self.poison_damage_fraction),
            _ => None,
        }
    }
}
