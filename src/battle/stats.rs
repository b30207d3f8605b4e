use schema::{BaseStats, StatType};
use serde::{Deserialize, Serialize};
use strum::EnumCount;
use tracing::warn;

pub const MIN_STAGE: i8 = -6;
pub const MAX_STAGE: i8 = 6;

/// Critical hit chance indexed by crit stage. Every combatant starts at stage 0.
const CRIT_CHANCE: [f64; 5] = [1.0 / 16.0, 1.0 / 8.0, 1.0 / 4.0, 1.0 / 3.0, 1.0 / 2.0];

/// Derive one stat from its base value, effort value and level.
///
/// Individual values are carried on each combatant but do not enter this formula.
pub fn derive_stat(base: u8, ev: u16, level: u8, is_health: bool) -> u16 {
    let ev_part = ev as u32 + ev as u32 / 4;
    let scaled = (2 * base as u32 + ev_part) * level as u32 / 100;
    let stat = if is_health {
        scaled + level as u32 + 10
    } else {
        scaled + 5
    };
    stat.min(u16::MAX as u32) as u16
}

/// `(2 + max(stage, 0)) / (2 + max(-stage, 0))`
pub fn stage_multiplier(stage: i8) -> f64 {
    let stage = stage.clamp(MIN_STAGE, MAX_STAGE) as f64;
    (2.0 + stage.max(0.0)) / (2.0 + (-stage).max(0.0))
}

pub fn crit_chance(crit_stage: u8) -> f64 {
    CRIT_CHANCE[(crit_stage as usize).min(CRIT_CHANCE.len() - 1)]
}

/// Derived stats. Recomputed whenever level or effort values change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Stats {
    pub health: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl Stats {
    pub fn derive(base: &BaseStats, evs: &[u16; 6], level: u8) -> Self {
        let b = base.as_array();
        Self {
            health: derive_stat(b[0], evs[0], level, true),
            attack: derive_stat(b[1], evs[1], level, false),
            defense: derive_stat(b[2], evs[2], level, false),
            sp_attack: derive_stat(b[3], evs[3], level, false),
            sp_defense: derive_stat(b[4], evs[4], level, false),
            speed: derive_stat(b[5], evs[5], level, false),
        }
    }
}

/// Result of a single stage modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageChange {
    pub stat: StatType,
    pub old_stage: i8,
    pub new_stage: i8,
    /// The requested change overshot the [-6, 6] range and was clamped.
    pub limited: bool,
}

/// Battle-scoped stage for each of the seven [`StatType`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StatStages([i8; StatType::COUNT]);

impl StatStages {
    pub fn get(&self, stat: StatType) -> i8 {
        self.0[stat.index()]
    }

    /// Apply `delta` to one stage, clamping into range and signalling when it clamps.
    pub fn modify(&mut self, stat: StatType, delta: i8) -> StageChange {
        let old_stage = self.get(stat);
        let requested = old_stage as i16 + delta as i16;
        let new_stage = requested.clamp(MIN_STAGE as i16, MAX_STAGE as i16) as i8;
        self.0[stat.index()] = new_stage;
        StageChange {
            stat,
            old_stage,
            new_stage,
            limited: requested != new_stage as i16,
        }
    }

    pub fn reset(&mut self) {
        self.0 = [0; StatType::COUNT];
    }

    /// Pull any out-of-range stage back into bounds. Returns true if something was fixed.
    pub fn sanitize(&mut self) -> bool {
        let mut fixed = false;
        for stage in self.0.iter_mut() {
            if !(MIN_STAGE..=MAX_STAGE).contains(stage) {
                warn!(stage = *stage, "stat stage out of range, clamping");
                *stage = (*stage).clamp(MIN_STAGE, MAX_STAGE);
                fixed = true;
            }
        }
        fixed
    }
}
