use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunables for a battle. Every field has a default, so a RON file only
/// needs to name what it changes:
///
/// ```ron
/// (seed: 42, accuracy_checks: true)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// RNG seed; `0` draws one from platform entropy.
    pub seed: u64,
    /// Roll accuracy against the move's accuracy and the accuracy/evasion
    /// stages. Off means every move hits.
    pub accuracy_checks: bool,
    /// Scale damage by type effectiveness and let immunities fail the move.
    pub type_effectiveness: bool,
    /// Percent chance a paralyzed combatant cannot act.
    pub full_paralysis_chance: u8,
    /// Percent chance a frozen combatant thaws when it tries to act.
    pub freeze_thaw_chance: u8,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            accuracy_checks: false,
            type_effectiveness: false,
            full_paralysis_chance: 25,
            freeze_thaw_chance: 20,
        }
    }
}

impl BattleConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: BattleConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.full_paralysis_chance > 100 {
            return Err(ConfigError::Invalid(format!(
                "full_paralysis_chance {} is above 100",
                self.full_paralysis_chance
            )));
        }
        if self.freeze_thaw_chance > 100 {
            return Err(ConfigError::Invalid(format!(
                "freeze_thaw_chance {} is above 100",
                self.freeze_thaw_chance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(BattleConfig::from_ron_str("()"), Ok(BattleConfig::default()));
    }

    #[test]
    fn test_partial_config_overrides_fields() {
        let config = BattleConfig::from_ron_str("(seed: 42, accuracy_checks: true)").unwrap();
        assert_eq!(config.seed, 42);
        assert!(config.accuracy_checks);
        assert!(!config.type_effectiveness);
        assert_eq!(config.full_paralysis_chance, 25);
    }

    #[test]
    fn test_out_of_range_chance_is_rejected() {
        let result = BattleConfig::from_ron_str("(full_paralysis_chance: 101)");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_config_is_a_parse_error() {
        let result = BattleConfig::from_ron_str("(seed: \"many\")");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
