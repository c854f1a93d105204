use crate::move_types::{Fraction, MoveCategory, SemiInvulnerable, StatType, Target, Weather};
use crate::pokemon_types::PokemonType;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString};

/// Every move the engine knows how to dispatch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Move {
    // Plain hits
    Tackle,
    Scratch,
    Pound,
    QuickAttack,
    // Burn / paralysis chance hits
    Ember,
    Flamethrower,
    FirePunch,
    ThunderShock,
    Thunderbolt,
    BodySlam,
    // Pure paralysis
    ThunderWave,
    StunSpore,
    Glare,
    // Stat changes against the target
    Growl,
    TailWhip,
    Leer,
    StringShot,
    Screech,
    // Stat changes on the user
    SwordsDance,
    Harden,
    Barrier,
    Agility,
    Growth,
    Amnesia,
    // Recoil and drain
    DoubleEdge,
    TakeDown,
    Absorb,
    MegaDrain,
    GigaDrain,
    LeechLife,
    // Two-turn moves
    SolarBeam,
    RazorWind,
    Fly,
    Dig,
    Dive,
    // Protection and setup
    Protect,
    Detect,
    Substitute,
    BatonPass,
    // Multi-hit
    FuryAttack,
    DoubleSlap,
    PinMissile,
    FurySwipes,
    // Field
    StealthRock,
    Sandstorm,
    RainDance,
    SunnyDay,
    Hail,
}

/// Per-move parameters read by the effect a move is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectParam {
    None,
    StatChange {
        target: Target,
        stat: StatType,
        stages: i8,
    },
    Recoil(Fraction),
    Drain(Fraction),
    Vanish(SemiInvulnerable),
    Weather { weather: Weather, turns: u8 },
}

/// Read-only definition of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveData {
    pub move_type: PokemonType,
    pub category: MoveCategory,
    pub power: u8,
    /// Percentage; `0` means the move cannot miss and skips the accuracy check.
    pub accuracy: u8,
    pub max_pp: u8,
    /// Percentage chance of the secondary effect (status moves use 100).
    pub effect_chance: u8,
    pub priority: i8,
    pub param: EffectParam,
}

impl MoveData {
    /// A damaging move whose category follows its type.
    const fn hit(move_type: PokemonType, power: u8, accuracy: u8, max_pp: u8) -> Self {
        let category = if move_type.is_physical() {
            MoveCategory::Physical
        } else {
            MoveCategory::Special
        };
        Self {
            move_type,
            category,
            power,
            accuracy,
            max_pp,
            effect_chance: 0,
            priority: 0,
            param: EffectParam::None,
        }
    }

    /// A non-damaging move.
    const fn status(move_type: PokemonType, accuracy: u8, max_pp: u8) -> Self {
        Self {
            move_type,
            category: MoveCategory::Status,
            power: 0,
            accuracy,
            max_pp,
            effect_chance: 100,
            priority: 0,
            param: EffectParam::None,
        }
    }

    const fn chance(mut self, effect_chance: u8) -> Self {
        self.effect_chance = effect_chance;
        self
    }

    const fn priority(mut self, priority: i8) -> Self {
        self.priority = priority;
        self
    }

    const fn param(mut self, param: EffectParam) -> Self {
        self.param = param;
        self
    }

    /// Moves with a `0` accuracy sentinel never roll to hit.
    pub fn cannot_miss(&self) -> bool {
        self.accuracy == 0
    }
}

const fn lower(stat: StatType, stages: i8) -> EffectParam {
    EffectParam::StatChange {
        target: Target::Target,
        stat,
        stages: -stages,
    }
}

const fn raise_self(stat: StatType, stages: i8) -> EffectParam {
    EffectParam::StatChange {
        target: Target::User,
        stat,
        stages,
    }
}

const fn weather(weather: Weather) -> EffectParam {
    EffectParam::Weather { weather, turns: 5 }
}

impl Move {
    /// Static data for this move. Total over every variant.
    pub const fn data(self) -> MoveData {
        use PokemonType::*;
        use StatType::*;
        match self {
            Move::Tackle => MoveData::hit(Normal, 35, 95, 35),
            Move::Scratch => MoveData::hit(Normal, 40, 100, 35),
            Move::Pound => MoveData::hit(Normal, 40, 100, 35),
            Move::QuickAttack => MoveData::hit(Normal, 40, 100, 30).priority(1),

            Move::Ember => MoveData::hit(Fire, 40, 100, 25).chance(10),
            Move::Flamethrower => MoveData::hit(Fire, 95, 100, 15).chance(10),
            Move::FirePunch => MoveData::hit(Fire, 75, 100, 15).chance(10),
            Move::ThunderShock => MoveData::hit(Electric, 40, 100, 30).chance(10),
            Move::Thunderbolt => MoveData::hit(Electric, 95, 100, 15).chance(10),
            Move::BodySlam => MoveData::hit(Normal, 85, 100, 15).chance(30),

            Move::ThunderWave => MoveData::status(Electric, 100, 20),
            Move::StunSpore => MoveData::status(Grass, 75, 30),
            Move::Glare => MoveData::status(Normal, 75, 30),

            Move::Growl => MoveData::status(Normal, 100, 40).param(lower(Atk, 1)),
            Move::TailWhip => MoveData::status(Normal, 100, 30).param(lower(Def, 1)),
            Move::Leer => MoveData::status(Normal, 100, 30).param(lower(Def, 1)),
            Move::StringShot => MoveData::status(Bug, 95, 40).param(lower(Spe, 1)),
            Move::Screech => MoveData::status(Normal, 85, 40).param(lower(Def, 2)),

            Move::SwordsDance => MoveData::status(Normal, 0, 30).param(raise_self(Atk, 2)),
            Move::Harden => MoveData::status(Normal, 0, 30).param(raise_self(Def, 1)),
            Move::Barrier => MoveData::status(Psychic, 0, 30).param(raise_self(Def, 2)),
            Move::Agility => MoveData::status(Psychic, 0, 30).param(raise_self(Spe, 2)),
            Move::Growth => MoveData::status(Normal, 0, 40).param(raise_self(SpAtk, 1)),
            Move::Amnesia => MoveData::status(Psychic, 0, 20).param(raise_self(SpDef, 2)),

            Move::DoubleEdge => {
                MoveData::hit(Normal, 120, 100, 15).param(EffectParam::Recoil(Fraction::ONE_THIRD))
            }
            Move::TakeDown => {
                MoveData::hit(Normal, 90, 85, 20).param(EffectParam::Recoil(Fraction::ONE_QUARTER))
            }
            Move::Absorb => {
                MoveData::hit(Grass, 20, 100, 20).param(EffectParam::Drain(Fraction::ONE_HALF))
            }
            Move::MegaDrain => {
                MoveData::hit(Grass, 40, 100, 10).param(EffectParam::Drain(Fraction::ONE_HALF))
            }
            Move::GigaDrain => {
                MoveData::hit(Grass, 60, 100, 5).param(EffectParam::Drain(Fraction::ONE_HALF))
            }
            Move::LeechLife => {
                MoveData::hit(Bug, 20, 100, 15).param(EffectParam::Drain(Fraction::ONE_HALF))
            }

            Move::SolarBeam => MoveData::hit(Grass, 120, 100, 10),
            Move::RazorWind => MoveData::hit(Normal, 80, 100, 10),
            Move::Fly => MoveData::hit(Flying, 70, 95, 15)
                .param(EffectParam::Vanish(SemiInvulnerable::Airborne)),
            Move::Dig => MoveData::hit(Ground, 60, 100, 10)
                .param(EffectParam::Vanish(SemiInvulnerable::Underground)),
            Move::Dive => MoveData::hit(Water, 60, 100, 10)
                .param(EffectParam::Vanish(SemiInvulnerable::Underwater)),

            Move::Protect => MoveData::status(Normal, 0, 10).priority(3),
            Move::Detect => MoveData::status(Fighting, 0, 5).priority(3),
            Move::Substitute => MoveData::status(Normal, 0, 10),
            Move::BatonPass => MoveData::status(Normal, 0, 40),

            Move::FuryAttack => MoveData::hit(Normal, 15, 85, 20),
            Move::DoubleSlap => MoveData::hit(Normal, 15, 85, 10),
            Move::PinMissile => MoveData::hit(Bug, 14, 85, 20),
            Move::FurySwipes => MoveData::hit(Normal, 18, 80, 15),

            Move::StealthRock => MoveData::status(Rock, 0, 20),
            Move::Sandstorm => MoveData::status(Rock, 0, 10).param(weather(Weather::Sandstorm)),
            Move::RainDance => MoveData::status(Water, 0, 5).param(weather(Weather::Rain)),
            Move::SunnyDay => MoveData::status(Fire, 0, 5).param(weather(Weather::Sun)),
            Move::Hail => MoveData::status(Ice, 0, 10).param(weather(Weather::Hail)),
        }
    }

    /// Every move in declaration order.
    pub fn all() -> impl Iterator<Item = Move> {
        <Move as strum::IntoEnumIterator>::iter()
    }

    /// Human-readable name with spaces and hyphens.
    pub fn display_name(self) -> String {
        match self {
            Move::DoubleEdge => "Double-Edge".to_string(),
            Move::DoubleSlap => "DoubleSlap".to_string(),
            Move::ThunderShock => "ThunderShock".to_string(),
            Move::SolarBeam => "SolarBeam".to_string(),
            _ => {
                // Split CamelCase on upper-case boundaries.
                let debug_string = format!("{:?}", self);
                debug_string
                    .chars()
                    .enumerate()
                    .map(|(i, c)| {
                        if i > 0 && c.is_uppercase() {
                            format!(" {}", c)
                        } else {
                            c.to_string()
                        }
                    })
                    .collect()
            }
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
