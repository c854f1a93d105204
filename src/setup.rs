use crate::battle::state::BattleState;
use crate::config::BattleConfig;
use crate::errors::{BattleResult, BattleStateError, ConfigError};
use crate::pokemon::{BaseStats, Combatant, StatusCondition};
use schema::{Move, PokemonType};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A combatant as written in a setup file. Current HP defaults to max.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantSetup {
    pub species_id: u16,
    pub primary_type: PokemonType,
    #[serde(default)]
    pub secondary_type: Option<PokemonType>,
    pub stats: BaseStats,
    pub max_hp: u16,
    #[serde(default)]
    pub current_hp: Option<u16>,
    #[serde(default)]
    pub status: Option<StatusCondition>,
}

impl CombatantSetup {
    pub fn build(&self) -> Result<Combatant, BattleStateError> {
        let mut combatant = Combatant::new(
            self.species_id,
            self.primary_type,
            self.secondary_type,
            self.stats,
            self.max_hp,
        );
        if let Some(hp) = self.current_hp {
            if hp > self.max_hp {
                return Err(BattleStateError::InconsistentState(format!(
                    "#{:03} starts with {} HP but has only {} max",
                    self.species_id, hp, self.max_hp
                )));
            }
            combatant.set_hp(hp);
        }
        combatant.status = self.status;
        combatant.validate()?;
        Ok(combatant)
    }
}

/// A scripted battle: config, both combatants, and the move each side picks
/// per turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSetup {
    #[serde(default)]
    pub config: BattleConfig,
    pub player1: CombatantSetup,
    pub player2: CombatantSetup,
    pub turns: Vec<(Move, Move)>,
}

impl BattleSetup {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let setup: BattleSetup = ron::from_str(source)?;
        setup.config.validate()?;
        Ok(setup)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|err| ConfigError::Io(format!("{}: {}", path.display(), err)))?;
        Self::from_ron_str(&content)
    }

    /// Build the opening battle state.
    pub fn start(&self) -> BattleResult<BattleState> {
        let player1 = self.player1.build()?;
        let player2 = self.player2.build()?;
        BattleState::new(player1, player2, self.config)
    }

    /// A Pikachu/Charmander exchange used when no setup file is given.
    pub fn demo() -> Self {
        Self {
            config: BattleConfig {
                seed: 25,
                ..BattleConfig::default()
            },
            player1: CombatantSetup {
                species_id: 25,
                primary_type: PokemonType::Electric,
                secondary_type: None,
                stats: BaseStats::new(55, 40, 50, 50, 90),
                max_hp: 95,
                current_hp: None,
                status: None,
            },
            player2: CombatantSetup {
                species_id: 4,
                primary_type: PokemonType::Fire,
                secondary_type: None,
                stats: BaseStats::new(52, 43, 60, 50, 65),
                max_hp: 99,
                current_hp: None,
                status: None,
            },
            turns: vec![
                (Move::ThunderWave, Move::SunnyDay),
                (Move::Protect, Move::Flamethrower),
                (Move::Thunderbolt, Move::Ember),
                (Move::Agility, Move::Growl),
                (Move::QuickAttack, Move::FirePunch),
                (Move::Thunderbolt, Move::Flamethrower),
                (Move::DoubleEdge, Move::Scratch),
                (Move::Thunderbolt, Move::Flamethrower),
            ],
        }
    }
}
