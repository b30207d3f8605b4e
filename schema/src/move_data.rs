use crate::PokemonType;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// The seven battle-scoped stat stages, in storage order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumCount, Display,
)]
pub enum StatType {
    Attack,
    Defense,
    #[strum(to_string = "Sp. Atk")]
    SpecialAttack,
    #[strum(to_string = "Sp. Def")]
    SpecialDefense,
    Speed,
    #[strum(to_string = "accuracy")]
    Accuracy,
    #[strum(to_string = "evasiveness")]
    Evasion,
}

impl StatType {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Non-volatile status conditions. A combatant carries at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display)]
pub enum StatusType {
    Burned,
    Frozen,
    Paralysed,
    Poisoned,
    Sleeping,
    Confused,
}

impl StatusType {
    /// Burn and poison are the only conditions that deal damage at the end of a round.
    pub fn deals_damage(self) -> bool {
        matches!(self, StatusType::Burned | StatusType::Poisoned)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum EffectTarget {
    User,
    Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum StatDirection {
    Raise,
    Lower,
}

/// Secondary effect descriptor attached to a move.
///
/// `chance` values are percentages rolled against a uniform 0-99 draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MoveEffect {
    Condition {
        status: StatusType,
        chance: u8,
    },
    StatChange {
        stat: StatType,
        stages: u8,
        target: EffectTarget,
        direction: StatDirection,
        chance: u8,
    },
    MultiHit {
        min: u8,
        max: u8,
    },
    Heal {
        percent: u8,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    pub power: Option<u8>,
    pub accuracy: Option<u8>,
    pub max_pp: u8,
    pub effect: Option<MoveEffect>,
}

impl MoveData {
    pub fn is_damaging(&self) -> bool {
        self.category != MoveCategory::Status
    }

    /// A move is offensive when it needs a standing opponent to do anything.
    pub fn is_offensive(&self) -> bool {
        if self.is_damaging() {
            return true;
        }
        matches!(
            self.effect,
            Some(MoveEffect::Condition { .. })
                | Some(MoveEffect::StatChange {
                    target: EffectTarget::Target,
                    ..
                })
        )
    }
}
