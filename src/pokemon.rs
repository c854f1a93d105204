use crate::errors::BattleStateError;
use schema::{Move, PokemonType, SemiInvulnerable, StatType};
use serde::{Deserialize, Serialize};

pub const MIN_STAGE: i8 = -6;
pub const MAX_STAGE: i8 = 6;

/// Primary status. Being an enum, at most one can be active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCondition {
    /// Sleep counter, decremented on each attempt to act. The combatant
    /// wakes and acts on the attempt that takes it to zero.
    Sleep(u8),
    Poison,
    /// Toxic counter, starting at 1 and growing each end of turn.
    BadlyPoisoned(u8),
    Burn,
    Freeze,
    Paralysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaseStats {
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl BaseStats {
    pub fn new(attack: u16, defense: u16, sp_attack: u16, sp_defense: u16, speed: u16) -> Self {
        Self {
            attack,
            defense,
            sp_attack,
            sp_defense,
            speed,
        }
    }
}

/// Seven independent stage counters, each kept within [-6, +6].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatStages {
    pub attack: i8,
    pub defense: i8,
    pub speed: i8,
    pub sp_attack: i8,
    pub sp_defense: i8,
    pub accuracy: i8,
    pub evasion: i8,
}

impl StatStages {
    pub fn get(&self, stat: StatType) -> i8 {
        match stat {
            StatType::Atk => self.attack,
            StatType::Def => self.defense,
            StatType::Spe => self.speed,
            StatType::SpAtk => self.sp_attack,
            StatType::SpDef => self.sp_defense,
            StatType::Acc => self.accuracy,
            StatType::Eva => self.evasion,
        }
    }

    pub fn set(&mut self, stat: StatType, stage: i8) {
        let stage = stage.clamp(MIN_STAGE, MAX_STAGE);
        match stat {
            StatType::Atk => self.attack = stage,
            StatType::Def => self.defense = stage,
            StatType::Spe => self.speed = stage,
            StatType::SpAtk => self.sp_attack = stage,
            StatType::SpDef => self.sp_defense = stage,
            StatType::Acc => self.accuracy = stage,
            StatType::Eva => self.evasion = stage,
        }
    }

    /// Apply `delta` with clamping and return `(old, new)`.
    pub fn change(&mut self, stat: StatType, delta: i8) -> (i8, i8) {
        let old = self.get(stat);
        let new = old.saturating_add(delta).clamp(MIN_STAGE, MAX_STAGE);
        self.set(stat, new);
        (old, new)
    }

    fn all(&self) -> [i8; 7] {
        [
            self.attack,
            self.defense,
            self.speed,
            self.sp_attack,
            self.sp_defense,
            self.accuracy,
            self.evasion,
        ]
    }

    pub fn in_range(&self) -> bool {
        self.all()
            .iter()
            .all(|s| (MIN_STAGE..=MAX_STAGE).contains(s))
    }
}

/// Flags reset by the turn engine at turn boundaries, or consumed by the
/// two-turn moves that set them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VolatileState {
    pub is_protected: bool,
    pub protect_count: u8,
    pub charging: Option<Move>,
    pub semi_invulnerable: Option<SemiInvulnerable>,
    pub substitute_hp: Option<u16>,
}

impl VolatileState {
    pub fn is_charging(&self) -> bool {
        self.charging.is_some()
    }

    pub fn is_semi_invulnerable(&self) -> bool {
        self.semi_invulnerable.is_some()
    }

    pub fn has_substitute(&self) -> bool {
        self.substitute_hp.is_some()
    }
}

/// Runtime battle state for one creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub species_id: u16,
    pub primary_type: PokemonType,
    pub secondary_type: Option<PokemonType>,
    pub stats: BaseStats,
    max_hp: u16,
    current_hp: u16,
    pub stat_stages: StatStages,
    pub status: Option<StatusCondition>,
    pub volatile: VolatileState,
    is_fainted: bool,
}

impl Combatant {
    /// A fresh combatant: full HP, neutral stages, no status, no volatile flags.
    pub fn new(
        species_id: u16,
        primary_type: PokemonType,
        secondary_type: Option<PokemonType>,
        stats: BaseStats,
        max_hp: u16,
    ) -> Self {
        Self {
            species_id,
            primary_type,
            secondary_type,
            stats,
            max_hp,
            current_hp: max_hp,
            stat_stages: StatStages::default(),
            status: None,
            volatile: VolatileState::default(),
            is_fainted: max_hp == 0,
        }
    }

    pub fn max_hp(&self) -> u16 {
        self.max_hp
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.is_fainted
    }

    /// Both defending types; monotypes repeat their single type.
    pub fn types(&self) -> (PokemonType, PokemonType) {
        (
            self.primary_type,
            self.secondary_type.unwrap_or(self.primary_type),
        )
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.primary_type == pokemon_type || self.secondary_type == Some(pokemon_type)
    }

    /// Deal damage, clamping at 0. Returns true if this blow caused fainting.
    pub fn take_damage(&mut self, damage: u16) -> bool {
        let was_fainted = self.is_fainted;
        self.current_hp = self.current_hp.saturating_sub(damage);
        self.sync_faint();
        !was_fainted && self.is_fainted
    }

    /// Heal, clamping at max HP. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        if self.is_fainted {
            return 0;
        }
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_add(amount).min(self.max_hp);
        self.sync_faint();
        self.current_hp - before
    }

    pub fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.max_hp);
        self.sync_faint();
    }

    /// Set the fainted flag from current HP.
    pub fn sync_faint(&mut self) {
        self.is_fainted = self.current_hp == 0;
    }

    /// Rejects records that break the combatant invariants.
    pub fn validate(&self) -> Result<(), BattleStateError> {
        if self.max_hp == 0 {
            return Err(BattleStateError::InconsistentState(
                "max HP must be greater than zero".to_string(),
            ));
        }
        if self.current_hp > self.max_hp {
            return Err(BattleStateError::InconsistentState(format!(
                "current HP {} exceeds max HP {}",
                self.current_hp, self.max_hp
            )));
        }
        if !self.stat_stages.in_range() {
            return Err(BattleStateError::InconsistentState(
                "stat stage outside [-6, 6]".to_string(),
            ));
        }
        if self.is_fainted != (self.current_hp == 0) {
            return Err(BattleStateError::InconsistentState(
                "fainted flag disagrees with current HP".to_string(),
            ));
        }
        Ok(())
    }

    /// Advance the sleep counter for one attempted action. Returns true while
    /// the combatant stays asleep; waking clears the status.
    pub fn tick_sleep(&mut self) -> bool {
        match self.status {
            Some(StatusCondition::Sleep(turns)) if turns > 1 => {
                self.status = Some(StatusCondition::Sleep(turns - 1));
                true
            }
            Some(StatusCondition::Sleep(_)) => {
                self.status = None;
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Combatant {
        Combatant::new(
            25,
            PokemonType::Electric,
            None,
            BaseStats::new(55, 40, 50, 50, 90),
            35,
        )
    }

    #[test]
    fn test_new_combatant_is_fresh() {
        let pokemon = sample();
        assert_eq!(pokemon.current_hp(), 35);
        assert_eq!(pokemon.stat_stages, StatStages::default());
        assert_eq!(pokemon.status, None);
        assert_eq!(pokemon.volatile, VolatileState::default());
        assert!(!pokemon.is_fainted());
        assert_eq!(pokemon.validate(), Ok(()));
    }

    #[test]
    fn test_take_damage_clamps_and_faints() {
        let mut pokemon = sample();
        assert!(!pokemon.take_damage(10));
        assert_eq!(pokemon.current_hp(), 25);
        assert!(pokemon.take_damage(500));
        assert_eq!(pokemon.current_hp(), 0);
        assert!(pokemon.is_fainted());
        // Already fainted: no second faint report.
        assert!(!pokemon.take_damage(1));
    }

    #[test]
    fn test_heal_never_exceeds_max() {
        let mut pokemon = sample();
        pokemon.set_hp(30);
        assert_eq!(pokemon.heal(100), 5);
        assert_eq!(pokemon.current_hp(), pokemon.max_hp());
    }

    #[test]
    fn test_stage_change_clamps() {
        let mut stages = StatStages::default();
        stages.set(StatType::Atk, 6);
        assert_eq!(stages.change(StatType::Atk, 2), (6, 6));
        stages.set(StatType::Def, -5);
        assert_eq!(stages.change(StatType::Def, -3), (-5, -6));
        assert_eq!(stages.change(StatType::Spe, 1), (0, 1));
        assert_eq!(stages.change(StatType::Spe, i8::MAX), (1, 6));
    }

    #[test]
    fn test_validate_rejects_inconsistent_records() {
        let mut pokemon = sample();
        pokemon.stat_stages.attack = 7;
        assert!(pokemon.validate().is_err());

        let mut pokemon = sample();
        pokemon.current_hp = 99;
        assert!(pokemon.validate().is_err());

        let mut pokemon = sample();
        pokemon.current_hp = 0;
        assert!(pokemon.validate().is_err());
    }

    #[test]
    fn test_sleep_ticks_down_then_wakes() {
        let mut pokemon = sample();
        pokemon.status = Some(StatusCondition::Sleep(2));
        assert!(pokemon.tick_sleep());
        assert_eq!(pokemon.status, Some(StatusCondition::Sleep(1)));
        assert!(!pokemon.tick_sleep());
        assert_eq!(pokemon.status, None);
    }

    #[test]
    fn test_types_repeat_for_monotype() {
        let pokemon = sample();
        assert_eq!(pokemon.types(), (PokemonType::Electric, PokemonType::Electric));
        assert!(pokemon.has_type(PokemonType::Electric));
        assert!(!pokemon.has_type(PokemonType::Water));
    }
}
