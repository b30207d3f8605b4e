use crate::PokemonType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl BaseStats {
    /// HP, ATK, DEF, SP.ATK, SP.DEF, SPD
    pub fn as_array(&self) -> [u8; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
        ]
    }

    pub fn total(&self) -> u16 {
        self.as_array().iter().map(|&s| s as u16).sum()
    }
}

/// Experience curves. `exp_for_level` returns the total experience needed to reach a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum GrowthRate {
    Erratic,
    Fast,
    MediumFast,
    MediumSlow,
    Slow,
    Fluctuating,
}

impl GrowthRate {
    pub fn exp_for_level(self, level: u8) -> u32 {
        if level <= 1 {
            return 0;
        }
        let n = level as i64;
        let cube = n * n * n;
        let total = match self {
            GrowthRate::Fast => 4 * cube / 5,
            GrowthRate::MediumFast => cube,
            GrowthRate::MediumSlow => 6 * cube / 5 - 15 * n * n + 100 * n - 140,
            GrowthRate::Slow => 5 * cube / 4,
            GrowthRate::Erratic => match n {
                n if n < 50 => cube * (100 - n) / 50,
                n if n < 68 => cube * (150 - n) / 100,
                n if n < 98 => cube * ((1911 - 10 * n) / 3) / 500,
                n => cube * (160 - n) / 100,
            },
            GrowthRate::Fluctuating => match n {
                n if n < 15 => cube * ((n + 1) / 3 + 24) / 50,
                n if n < 36 => cube * (n + 14) / 50,
                n => cube * (n / 2 + 32) / 50,
            },
        };
        total.max(0) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonSpecies {
    pub pokedex_number: u16,
    pub name: String,
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    pub catch_rate: u8,
    pub base_exp: u16,
    pub growth_rate: GrowthRate,
    /// Effort values granted to the victor, HP..SPD order.
    pub ev_yield: [u8; 6],
    /// (level, move name) pairs in learn order.
    pub learnset: Vec<(u8, String)>,
}

impl PokemonSpecies {
    pub fn moves_learned_at(&self, level: u8) -> impl Iterator<Item = &str> {
        self.learnset
            .iter()
            .filter(move |(lvl, _)| *lvl == level)
            .map(|(_, name)| name.as_str())
    }

    /// The last four learnset moves available at `level`, oldest first.
    pub fn default_moves(&self, level: u8) -> Vec<&str> {
        let known: Vec<&str> = self
            .learnset
            .iter()
            .filter(|(lvl, _)| *lvl <= level)
            .map(|(_, name)| name.as_str())
            .collect();
        let skip = known.len().saturating_sub(4);
        known.into_iter().skip(skip).collect()
    }
}
