use crate::pokemon::{Combatant, StatusCondition, MAX_STAGE, MIN_STAGE};
use schema::{MoveCategory, StatType};

/// Calculate effective attack for a move category, including stat stages
/// and the burn penalty on physical attacks.
pub fn effective_attack(pokemon: &Combatant, category: MoveCategory) -> u16 {
    let (base_attack, attack_stat) = match category {
        MoveCategory::Physical => (pokemon.stats.attack, StatType::Atk),
        MoveCategory::Special => (pokemon.stats.sp_attack, StatType::SpAtk),
        MoveCategory::Status => return 0,
    };

    let stage = pokemon.stat_stages.get(attack_stat);
    let mut attack = apply_stat_stage_multiplier(base_attack, stage);

    if category == MoveCategory::Physical && pokemon.status == Some(StatusCondition::Burn) {
        attack /= 2;
    }

    attack
}

/// Calculate effective defense for a move category, including stat stages.
pub fn effective_defense(pokemon: &Combatant, category: MoveCategory) -> u16 {
    let (base_defense, defense_stat) = match category {
        MoveCategory::Physical => (pokemon.stats.defense, StatType::Def),
        MoveCategory::Special => (pokemon.stats.sp_defense, StatType::SpDef),
        MoveCategory::Status => return 0,
    };

    let stage = pokemon.stat_stages.get(defense_stat);
    apply_stat_stage_multiplier(base_defense, stage)
}

/// Calculate effective speed including stat stages and paralysis (quarter speed)
pub fn effective_speed(pokemon: &Combatant) -> u16 {
    let stage = pokemon.stat_stages.get(StatType::Spe);
    let mut speed = apply_stat_stage_multiplier(pokemon.stats.speed, stage);

    if pokemon.status == Some(StatusCondition::Paralysis) {
        speed /= 4;
    }

    speed
}

/// Percentage a move must roll under to hit: the move's accuracy scaled by
/// the attacker's accuracy stage minus the defender's evasion stage.
pub fn hit_threshold(accuracy: u8, attacker: &Combatant, defender: &Combatant) -> u32 {
    let stage = attacker
        .stat_stages
        .accuracy
        .saturating_sub(defender.stat_stages.evasion)
        .clamp(MIN_STAGE, MAX_STAGE);
    apply_accuracy_stage_multiplier(u32::from(accuracy), stage)
}

/// Stat stage multiplier, floored: `(2 + s) / 2` for raised stages,
/// `2 / (2 - s)` for lowered ones.
pub fn apply_stat_stage_multiplier(base_stat: u16, stage: i8) -> u16 {
    let stage = i32::from(stage.clamp(MIN_STAGE, MAX_STAGE));
    let base = i32::from(base_stat);

    let scaled = if stage >= 0 {
        base * (2 + stage) / 2
    } else {
        base * 2 / (2 - stage)
    };

    u16::try_from(scaled).unwrap_or(u16::MAX)
}

/// Accuracy/evasion stages use thirds instead of halves:
/// `(3 + s) / 3` raised, `3 / (3 - s)` lowered.
fn apply_accuracy_stage_multiplier(accuracy: u32, stage: i8) -> u32 {
    let magnitude = u32::from(stage.unsigned_abs());
    if stage >= 0 {
        accuracy * (3 + magnitude) / 3
    } else {
        accuracy * 3 / (3 + magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::BaseStats;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::PokemonType;

    fn sample(speed: u16) -> Combatant {
        Combatant::new(
            1,
            PokemonType::Normal,
            None,
            BaseStats::new(100, 80, 90, 70, speed),
            100,
        )
    }

    #[rstest]
    #[case(0, 100)]
    #[case(1, 150)]
    #[case(2, 200)]
    #[case(6, 400)]
    #[case(-1, 66)]
    #[case(-2, 50)]
    #[case(-6, 25)]
    fn test_stat_stage_multipliers(#[case] stage: i8, #[case] expected: u16) {
        assert_eq!(apply_stat_stage_multiplier(100, stage), expected);
    }

    #[test]
    fn test_burn_halves_only_physical_attack() {
        let mut pokemon = sample(50);
        pokemon.status = Some(StatusCondition::Burn);
        assert_eq!(effective_attack(&pokemon, MoveCategory::Physical), 50);
        assert_eq!(effective_attack(&pokemon, MoveCategory::Special), 90);
    }

    #[rstest]
    #[case(0, 0, 95)]
    #[case(1, 0, 126)]
    #[case(0, 1, 71)]
    #[case(-6, 6, 31)]
    #[case(6, 0, 285)]
    fn test_hit_threshold_uses_stage_difference(
        #[case] accuracy_stage: i8,
        #[case] evasion_stage: i8,
        #[case] expected: u32,
    ) {
        let mut attacker = sample(50);
        let mut defender = sample(50);
        attacker.stat_stages.accuracy = accuracy_stage;
        defender.stat_stages.evasion = evasion_stage;
        assert_eq!(hit_threshold(95, &attacker, &defender), expected);
    }

    #[test]
    fn test_effective_speed_paralysis() {
        let mut pokemon = sample(100);
        pokemon.stat_stages.speed = 2;
        assert_eq!(effective_speed(&pokemon), 200);
        pokemon.status = Some(StatusCondition::Paralysis);
        assert_eq!(effective_speed(&pokemon), 50);
    }

    #[test]
    fn test_defense_uses_category_stat() {
        let mut pokemon = sample(50);
        pokemon.stat_stages.sp_defense = -1;
        assert_eq!(effective_defense(&pokemon, MoveCategory::Physical), 80);
        assert_eq!(effective_defense(&pokemon, MoveCategory::Special), 46);
        assert_eq!(effective_defense(&pokemon, MoveCategory::Status), 0);
    }
}
