//! Natures and the stats they modify.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The six battle stats, in feed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Hp,
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
}

impl Stat {
    pub const ALL: [Stat; 6] = [Stat::Hp, Stat::Atk, Stat::Def, Stat::Spa, Stat::Spd, Stat::Spe];

    /// Position within a `H/A/D/C/D/S` spread.
    pub fn index(self) -> usize {
        match self {
            Stat::Hp => 0,
            Stat::Atk => 1,
            Stat::Def => 2,
            Stat::Spa => 3,
            Stat::Spd => 4,
            Stat::Spe => 5,
        }
    }

    /// Short label used in EV strings.
    pub fn label(self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Atk => "Atk",
            Stat::Def => "Def",
            Stat::Spa => "SpA",
            Stat::Spd => "SpD",
            Stat::Spe => "Spe",
        }
    }
}

/// All 25 natures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nature {
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

impl Nature {
    pub const ALL: [Nature; 25] = [
        Nature::Hardy,
        Nature::Lonely,
        Nature::Brave,
        Nature::Adamant,
        Nature::Naughty,
        Nature::Bold,
        Nature::Docile,
        Nature::Relaxed,
        Nature::Impish,
        Nature::Lax,
        Nature::Timid,
        Nature::Hasty,
        Nature::Serious,
        Nature::Jolly,
        Nature::Naive,
        Nature::Modest,
        Nature::Mild,
        Nature::Quiet,
        Nature::Bashful,
        Nature::Rash,
        Nature::Calm,
        Nature::Gentle,
        Nature::Sassy,
        Nature::Careful,
        Nature::Quirky,
    ];

    /// (boosted, reduced) stat pair; `None` for the five neutral natures.
    pub fn modifiers(self) -> Option<(Stat, Stat)> {
        use Stat::*;
        match self {
            Nature::Lonely => Some((Atk, Def)),
            Nature::Brave => Some((Atk, Spe)),
            Nature::Adamant => Some((Atk, Spa)),
            Nature::Naughty => Some((Atk, Spd)),
            Nature::Bold => Some((Def, Atk)),
            Nature::Relaxed => Some((Def, Spe)),
            Nature::Impish => Some((Def, Spa)),
            Nature::Lax => Some((Def, Spd)),
            Nature::Timid => Some((Spe, Atk)),
            Nature::Hasty => Some((Spe, Def)),
            Nature::Jolly => Some((Spe, Spa)),
            Nature::Naive => Some((Spe, Spd)),
            Nature::Modest => Some((Spa, Atk)),
            Nature::Mild => Some((Spa, Def)),
            Nature::Quiet => Some((Spa, Spe)),
            Nature::Rash => Some((Spa, Spd)),
            Nature::Calm => Some((Spd, Atk)),
            Nature::Gentle => Some((Spd, Def)),
            Nature::Sassy => Some((Spd, Spe)),
            Nature::Careful => Some((Spd, Spa)),
            Nature::Hardy | Nature::Docile | Nature::Serious | Nature::Bashful | Nature::Quirky => {
                None
            }
        }
    }

    pub fn boosted(self) -> Option<Stat> {
        self.modifiers().map(|(up, _)| up)
    }

    pub fn reduced(self) -> Option<Stat> {
        self.modifiers().map(|(_, down)| down)
    }

    /// `"+"`, `"-"` or `""` depending on how this nature treats `stat`.
    pub fn sign(self, stat: Stat) -> &'static str {
        match self.modifiers() {
            Some((up, _)) if up == stat => "+",
            Some((_, down)) if down == stat => "-",
            _ => "",
        }
    }

    /// Multiplier applied to `stat` (1.1, 0.9 or 1.0).
    pub fn multiplier(self, stat: Stat) -> f64 {
        match self.sign(stat) {
            "+" => 1.1,
            "-" => 0.9,
            _ => 1.0,
        }
    }
}

impl fmt::Display for Nature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Error returned when a nature name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown nature: {0}")]
pub struct UnknownNature(pub String);

impl FromStr for Nature {
    type Err = UnknownNature;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Nature::ALL
            .iter()
            .copied()
            .find(|n| n.to_string().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownNature(s.to_string()))
    }
}
