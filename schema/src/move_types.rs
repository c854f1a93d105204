use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveCategory::Physical => write!(f, "Physical"),
            MoveCategory::Special => write!(f, "Special"),
            MoveCategory::Status => write!(f, "Status"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatType {
    Atk,
    Def,
    Spe,
    SpAtk,
    SpDef,
    Acc,
    Eva,
}

impl StatType {
    /// The five stats that move effects may raise or lower.
    pub fn is_modifiable(self) -> bool {
        !matches!(self, StatType::Acc | StatType::Eva)
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatType::Atk => write!(f, "Attack"),
            StatType::Def => write!(f, "Defense"),
            StatType::Spe => write!(f, "Speed"),
            StatType::SpAtk => write!(f, "Special Attack"),
            StatType::SpDef => write!(f, "Special Defense"),
            StatType::Acc => write!(f, "accuracy"),
            StatType::Eva => write!(f, "evasiveness"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    User,
    Target,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::User => write!(f, "User"),
            Target::Target => write!(f, "Target"),
        }
    }
}

/// Where a two-turn move hides its user between the charge and the strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SemiInvulnerable {
    Airborne,
    Underground,
    Underwater,
}

impl fmt::Display for SemiInvulnerable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemiInvulnerable::Airborne => write!(f, "flew up high"),
            SemiInvulnerable::Underground => write!(f, "dug a hole"),
            SemiInvulnerable::Underwater => write!(f, "hid underwater"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    None,
    Sandstorm,
    Rain,
    Sun,
    Hail,
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weather::None => "clear skies",
            Weather::Sandstorm => "sandstorm",
            Weather::Rain => "rain",
            Weather::Sun => "harsh sunlight",
            Weather::Hail => "hail",
        };
        write!(f, "{}", name)
    }
}

/// An exact ratio applied to damage dealt (recoil and drain).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fraction {
    pub numerator: u16,
    pub denominator: u16,
}

impl Fraction {
    pub const ONE_THIRD: Fraction = Fraction::new(1, 3);
    pub const ONE_QUARTER: Fraction = Fraction::new(1, 4);
    pub const ONE_HALF: Fraction = Fraction::new(1, 2);
    pub const THREE_QUARTERS: Fraction = Fraction::new(3, 4);

    pub const fn new(numerator: u16, denominator: u16) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// `floor(amount * numerator / denominator)`; a zero denominator yields 0.
    pub fn of(self, amount: u16) -> u16 {
        if self.denominator == 0 {
            return 0;
        }
        (amount as u32 * self.numerator as u32 / self.denominator as u32) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_floors() {
        assert_eq!(Fraction::ONE_THIRD.of(100), 33);
        assert_eq!(Fraction::ONE_QUARTER.of(3), 0);
        assert_eq!(Fraction::ONE_HALF.of(45), 22);
        assert_eq!(Fraction::THREE_QUARTERS.of(45), 33);
        assert_eq!(Fraction::new(1, 0).of(45), 0);
    }

    #[test]
    fn test_only_battle_stats_are_modifiable() {
        assert!(StatType::Atk.is_modifiable());
        assert!(StatType::SpDef.is_modifiable());
        assert!(!StatType::Acc.is_modifiable());
        assert!(!StatType::Eva.is_modifiable());
    }
}
