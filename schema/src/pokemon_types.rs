use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumCount, EnumIter};

/// The modeled elemental types. The discriminant doubles as the row/column
/// index into [`TYPE_CHART`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, EnumIter, EnumCount,
)]
#[repr(u8)]
pub enum PokemonType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Quarter-unit multipliers: 0 = immune, 2 = half, 4 = neutral, 8 = double.
pub const IMMUNE: u8 = 0;
pub const HALF: u8 = 2;
pub const NEUTRAL: u8 = 4;
pub const DOUBLE: u8 = 8;

const N: usize = PokemonType::COUNT;

// Rows are the attacking type, columns the defending type, both in
// declaration order of `PokemonType`.
#[rustfmt::skip]
pub const TYPE_CHART: [[u8; N]; N] = [
    //  Nor Fig Fly Poi Gro Roc Bug Gho Fir Wat Gra Ele Psy Ice Dra
    [    4,  4,  4,  4,  4,  2,  4,  0,  4,  4,  4,  4,  4,  4,  4 ], // Normal
    [    8,  4,  2,  2,  4,  8,  2,  0,  4,  4,  4,  4,  2,  8,  4 ], // Fighting
    [    4,  8,  4,  4,  4,  2,  8,  4,  4,  4,  8,  2,  4,  4,  4 ], // Flying
    [    4,  4,  4,  2,  2,  2,  4,  2,  4,  4,  8,  4,  4,  4,  4 ], // Poison
    [    4,  4,  0,  8,  4,  8,  2,  4,  8,  4,  2,  8,  4,  4,  4 ], // Ground
    [    4,  2,  8,  4,  2,  4,  8,  4,  8,  4,  4,  4,  4,  8,  4 ], // Rock
    [    4,  2,  2,  2,  4,  4,  4,  2,  2,  4,  8,  4,  8,  4,  4 ], // Bug
    [    0,  4,  4,  4,  4,  4,  4,  8,  4,  4,  4,  4,  8,  4,  4 ], // Ghost
    [    4,  4,  4,  4,  4,  2,  8,  4,  2,  2,  8,  4,  4,  8,  2 ], // Fire
    [    4,  4,  4,  4,  8,  8,  4,  4,  8,  2,  2,  4,  4,  4,  2 ], // Water
    [    4,  4,  2,  2,  8,  8,  2,  4,  2,  8,  2,  4,  4,  4,  2 ], // Grass
    [    4,  4,  8,  4,  0,  4,  4,  4,  4,  8,  2,  2,  4,  4,  2 ], // Electric
    [    4,  8,  4,  8,  4,  4,  4,  4,  4,  4,  4,  4,  2,  4,  4 ], // Psychic
    [    4,  4,  8,  4,  8,  4,  4,  4,  2,  2,  8,  4,  4,  2,  8 ], // Ice
    [    4,  4,  4,  4,  4,  4,  4,  4,  4,  4,  4,  4,  4,  4,  8 ], // Dragon
];

impl PokemonType {
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<PokemonType> {
        use PokemonType::*;
        const ALL: [PokemonType; N] = [
            Normal, Fighting, Flying, Poison, Ground, Rock, Bug, Ghost, Fire, Water, Grass,
            Electric, Psychic, Ice, Dragon,
        ];
        ALL.get(index as usize).copied()
    }

    /// Single-type lookup in quarter units.
    pub fn effectiveness(attacking: PokemonType, defending: PokemonType) -> u8 {
        TYPE_CHART[attacking as usize][defending as usize]
    }

    /// Raw-index lookup. Indices outside the chart yield [`NEUTRAL`].
    pub fn effectiveness_by_index(attacking: u8, defending: u8) -> u8 {
        TYPE_CHART
            .get(attacking as usize)
            .and_then(|row| row.get(defending as usize))
            .copied()
            .unwrap_or(NEUTRAL)
    }

    /// Multiplier against a dual-typed defender on the combined scale:
    /// 0 = immune, 1 = 0.25x, 2 = 0.5x, 4 = 1x, 8 = 2x, 16 = 4x.
    ///
    /// Monotype defenders pass the same type twice.
    pub fn combined_effectiveness(
        attacking: PokemonType,
        type1: PokemonType,
        type2: PokemonType,
    ) -> u8 {
        if type1 == type2 {
            return Self::effectiveness(attacking, type1);
        }
        let product =
            Self::effectiveness(attacking, type1) as u16 * Self::effectiveness(attacking, type2) as u16;
        (product / NEUTRAL as u16) as u8
    }

    /// Gen-III damage class: the move's type decides whether Attack/Defense or
    /// Special Attack/Special Defense are used.
    pub const fn is_physical(self) -> bool {
        use PokemonType::*;
        matches!(
            self,
            Normal | Fighting | Flying | Poison | Ground | Rock | Bug | Ghost
        )
    }
}
