use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tracks which friendly roster slots have been sent out during a battle.
/// Experience from a defeated foe is split across this set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleParticipationTracker {
    played: BTreeSet<usize>,
}

impl BattleParticipationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the friendly combatant at `index` has been in battle
    pub fn record_participation(&mut self, index: usize) {
        self.played.insert(index);
    }

    pub fn has_participated(&self, index: usize) -> bool {
        self.played.contains(&index)
    }

    /// Roster indices that have been in battle, in roster order
    pub fn participants(&self) -> Vec<usize> {
        self.played.iter().copied().collect()
    }

    pub fn count(&self) -> usize {
        self.played.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participation_tracking() {
        let mut tracker = BattleParticipationTracker::new();
        tracker.record_participation(2);
        tracker.record_participation(0);
        tracker.record_participation(2);

        assert_eq!(tracker.participants(), vec![0, 2]);
        assert_eq!(tracker.count(), 2);
        assert!(tracker.has_participated(2));
        assert!(!tracker.has_participated(1));
    }
}
