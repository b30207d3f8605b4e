pub mod leveling;
pub mod participation;
pub mod rewards;

pub use leveling::{award_effort_values, distribute_experience, gain_experience, ExperienceAward, LevelUp};
pub use participation::BattleParticipationTracker;
pub use rewards::RewardCalculator;
