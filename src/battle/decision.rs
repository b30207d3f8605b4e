use crate::battle::rng::RandomSource;
use crate::battle::state::{BattleKind, Side};
use crate::errors::DecisionError;
use crate::pokemon::PokemonInst;
use crate::team::Team;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One side's choice for a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    UseMove { move_index: usize },
    UseItem { item: String },
    Swap { team_index: usize },
    Run,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionKind {
    /// A normal round decision.
    Turn,
    /// The active combatant fainted and a `Swap` is required before play continues.
    Replacement,
}

/// Everything a provider is shown when asked for a decision.
#[derive(Debug, Clone)]
pub struct DecisionContext<'a> {
    pub side: Side,
    pub kind: DecisionKind,
    pub battle_kind: BattleKind,
    pub active: &'a PokemonInst,
    pub opponent: &'a PokemonInst,
    pub team: &'a Team,
    /// Move slots with PP left.
    pub legal_moves: Vec<usize>,
    /// Items owned that would do something right now.
    pub legal_items: Vec<String>,
    /// Roster slots that could be sent out.
    pub legal_swaps: Vec<usize>,
    /// Why the previous answer for this same prompt was rejected.
    pub last_error: Option<DecisionError>,
}

/// Supplies decisions for one side. Hosts back this with UI input, a message queue
/// or an AI policy.
pub trait DecisionProvider {
    fn decide(&mut self, context: &DecisionContext<'_>, rng: &mut dyn RandomSource) -> Decision;
}

/// Replays a fixed list of decisions, then quits.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider {
    decisions: VecDeque<Decision>,
}

impl ScriptedProvider {
    pub fn new(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            decisions: decisions.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.decisions.len()
    }
}

impl DecisionProvider for ScriptedProvider {
    fn decide(&mut self, _context: &DecisionContext<'_>, _rng: &mut dyn RandomSource) -> Decision {
        self.decisions.pop_front().unwrap_or(Decision::Quit)
    }
}
