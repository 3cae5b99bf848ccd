//! Battle tuning knobs.

use super::constants::{
    BASELINE_XP_PERCENT, ESCAPE_CHANCE, MAGIC_MP_COST, MAX_ENEMY_GROUP_SIZE, MESSAGE_LOG_CAPACITY,
};
use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a battle session.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Chance that a Run command succeeds
    pub escape_chance: f64,

    /// MP spent by the basic Magic command
    pub magic_mp_cost: u32,

    /// Lines kept in the on-screen battle log
    pub log_capacity: usize,

    /// Largest enemy group an encounter can spawn
    pub max_group_size: usize,

    /// Share of victory XP split evenly before the performance bonus
    pub baseline_xp_percent: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            escape_chance: ESCAPE_CHANCE,
            magic_mp_cost: MAGIC_MP_COST,
            log_capacity: MESSAGE_LOG_CAPACITY,
            max_group_size: MAX_ENEMY_GROUP_SIZE,
            baseline_xp_percent: BASELINE_XP_PERCENT,
        }
    }
}

impl BattleConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: BattleConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        tracing::info!(path = %path.display(), "loaded battle config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.escape_chance) {
            return Err(ConfigError::Invalid(format!(
                "escape_chance must be within [0, 1], got {}",
                self.escape_chance
            )));
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::Invalid("log_capacity must be at least 1".into()));
        }
        if self.max_group_size == 0 {
            return Err(ConfigError::Invalid(
                "max_group_size must be at least 1".into(),
            ));
        }
        if self.baseline_xp_percent > 100 {
            return Err(ConfigError::Invalid(format!(
                "baseline_xp_percent must be at most 100, got {}",
                self.baseline_xp_percent
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_constants() {
        let config = BattleConfig::default();
        assert_eq!(config.escape_chance, 0.5);
        assert_eq!(config.magic_mp_cost, 5);
        assert_eq!(config.log_capacity, 6);
        assert_eq!(config.max_group_size, 3);
        assert_eq!(config.baseline_xp_percent, 80);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = BattleConfig::from_json_str(r#"{ "escape_chance": 0.25 }"#).unwrap();
        assert_eq!(config.escape_chance, 0.25);
        assert_eq!(config.log_capacity, 6);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = BattleConfig::from_json_str(r#"{ "escape_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = BattleConfig::from_json_str(r#"{ "log_capacity": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = BattleConfig::from_json_str(r#"{ "baseline_xp_percent": 120 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = BattleConfig::from_json_str("{ escape_chance: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "magic_mp_cost": 7, "max_group_size": 2 }}"#).unwrap();

        let config = BattleConfig::load(file.path()).unwrap();
        assert_eq!(config.magic_mp_cost, 7);
        assert_eq!(config.max_group_size, 2);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = BattleConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
