use crate::battle::rng::RandomSource;
use schema::{EffectTarget, MoveEffect, StatDirection, StatType, StatusType};
use serde::{Deserialize, Serialize};

/// A rolled stat-stage change waiting to be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatModification {
    pub stat: StatType,
    pub stages: u8,
    pub target: EffectTarget,
    pub direction: StatDirection,
}

impl StatModification {
    pub fn delta(&self) -> i8 {
        let stages = self.stages.min(i8::MAX as u8) as i8;
        match self.direction {
            StatDirection::Raise => stages,
            StatDirection::Lower => -stages,
        }
    }
}

/// What a move's secondary effect did this time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectOutcome {
    pub status: Option<StatusType>,
    pub stat_change: Option<StatModification>,
    pub hits: u8,
    pub heal_percent: u8,
}

impl Default for EffectOutcome {
    fn default() -> Self {
        Self {
            status: None,
            stat_change: None,
            hits: 1,
            heal_percent: 0,
        }
    }
}

/// Fires when a 0-99 roll lands under `chance - 1`.
fn triggers(chance: u8, rng: &mut dyn RandomSource, reason: &str) -> bool {
    let roll = rng.next_in_range(0, 99, reason) as i32;
    roll < chance as i32 - 1
}

/// Roll a move's secondary effect. Moves without one hit once with no extras.
pub fn resolve_effect(effect: Option<&MoveEffect>, rng: &mut dyn RandomSource) -> EffectOutcome {
    let mut outcome = EffectOutcome::default();
    let Some(effect) = effect else {
        return outcome;
    };

    match *effect {
        MoveEffect::Condition { status, chance } => {
            if triggers(chance, rng, "status effect chance") {
                outcome.status = Some(status);
            }
        }
        MoveEffect::StatChange {
            stat,
            stages,
            target,
            direction,
            chance,
        } => {
            if triggers(chance, rng, "stat change chance") {
                outcome.stat_change = Some(StatModification {
                    stat,
                    stages,
                    target,
                    direction,
                });
            }
        }
        MoveEffect::MultiHit { min, max } => {
            let low = min.max(1) as u32;
            let high = (max as u32).max(low);
            outcome.hits = rng.next_in_range(low, high, "multi-hit count") as u8;
        }
        MoveEffect::Heal { percent } => {
            outcome.heal_percent = percent;
        }
    }
    outcome
}
