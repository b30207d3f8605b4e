//! Decision policies for sides that are not driven by a human.

use crate::battle::calculators::type_multiplier;
use crate::battle::decision::{Decision, DecisionContext, DecisionKind, DecisionProvider};
use crate::battle::rng::RandomSource;
use crate::battle::state::{BattleKind, Side};
use crate::data::ReferenceData;
use schema::MoveCategory;
use std::sync::Arc;

fn pick_replacement(context: &DecisionContext<'_>, rng: &mut dyn RandomSource) -> Decision {
    if context.legal_swaps.is_empty() {
        return Decision::Quit;
    }
    let pick = rng.next_in_range(0, context.legal_swaps.len() as u32 - 1, "replacement choice");
    Decision::Swap {
        team_index: context.legal_swaps[pick as usize],
    }
}

/// The default foe policy: a uniform pick among moves with PP left, or among all
/// known moves once every slot is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomFoePolicy;

impl DecisionProvider for RandomFoePolicy {
    fn decide(&mut self, context: &DecisionContext<'_>, rng: &mut dyn RandomSource) -> Decision {
        if context.kind == DecisionKind::Replacement {
            return pick_replacement(context, rng);
        }
        let pool: Vec<usize> = if context.legal_moves.is_empty() {
            (0..context.active.moves.len()).collect()
        } else {
            context.legal_moves.clone()
        };
        if pool.is_empty() {
            return Decision::UseMove { move_index: 0 };
        }
        let pick = rng.next_in_range(0, pool.len() as u32 - 1, "foe move choice");
        Decision::UseMove {
            move_index: pool[pick as usize],
        }
    }
}

/// Picks the move with the best expected damage against the current opponent.
/// Draws no randomness when choosing moves.
pub struct ScoringPolicy {
    data: Arc<dyn ReferenceData>,
}

impl ScoringPolicy {
    pub fn new(data: Arc<dyn ReferenceData>) -> Self {
        Self { data }
    }

    fn score_move(&self, context: &DecisionContext<'_>, move_index: usize) -> f64 {
        let Some(slot) = context.active.moves.get(move_index) else {
            return 0.0;
        };
        let move_data = &slot.data;
        if move_data.category == MoveCategory::Status {
            // Beats nothing but an immune matchup.
            return 1.0;
        }
        let power = move_data.power.unwrap_or(0) as f64;
        let effectiveness = type_multiplier(move_data.move_type, context.opponent, self.data.as_ref());
        let stab = if context.active.has_type(move_data.move_type) {
            1.5
        } else {
            1.0
        };
        power * effectiveness * stab
    }

    fn best_move(
        &self,
        context: &DecisionContext<'_>,
        candidates: impl Iterator<Item = usize>,
    ) -> Option<usize> {
        candidates
            .map(|index| (index, self.score_move(context, index)))
            .fold(None, |best: Option<(usize, f64)>, (index, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((index, score)),
            })
            .map(|(index, _)| index)
    }

    /// The foe side may still use an empty move. The friendly side sends in a
    /// teammate, runs from a wild battle, or gives up.
    fn out_of_pp(&self, context: &DecisionContext<'_>) -> Decision {
        match context.side {
            Side::Foe => Decision::UseMove {
                move_index: self
                    .best_move(context, 0..context.active.moves.len())
                    .unwrap_or(0),
            },
            Side::Friendly => {
                if let Some(&team_index) = context.legal_swaps.first() {
                    Decision::Swap { team_index }
                } else if context.battle_kind == BattleKind::Wild {
                    Decision::Run
                } else {
                    Decision::Quit
                }
            }
        }
    }
}

impl DecisionProvider for ScoringPolicy {
    fn decide(&mut self, context: &DecisionContext<'_>, rng: &mut dyn RandomSource) -> Decision {
        if context.kind == DecisionKind::Replacement {
            return pick_replacement(context, rng);
        }
        if let Some(move_index) = self.best_move(context, context.legal_moves.iter().copied()) {
            return Decision::UseMove { move_index };
        }
        self.out_of_pp(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bag::Bag;
    use crate::battle::engine::decision_context;
    use crate::battle::rng::TurnRng;
    use crate::battle::state::BattleState;
    use crate::battle::tests::common::{create_test_state, test_data, TestPokemonBuilder};
    use rstest::rstest;

    fn state_with(friendly: Vec<&'static str>, foe_species: &'static str, foe: Vec<&'static str>) -> BattleState {
        let piplup = TestPokemonBuilder::new("Piplup", 20).with_moves(friendly).build();
        let turtwig = TestPokemonBuilder::new("Turtwig", 20).with_moves(vec!["Tackle"]).build();
        let opponent = TestPokemonBuilder::new(foe_species, 20).with_moves(foe).build();
        create_test_state(BattleKind::Wild, vec![piplup, turtwig], vec![opponent], Bag::new())
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    fn test_random_policy_picks_among_legal_moves(#[case] draw: u32, #[case] expected: usize) {
        let state = state_with(vec!["Pound"], "Bidoof", vec!["Tackle", "Growl"]);
        let data = test_data();
        let context = decision_context(&state, data.as_ref(), Side::Foe, DecisionKind::Turn, None);
        let mut rng = TurnRng::new_for_test(vec![draw]);

        let decision = RandomFoePolicy.decide(&context, &mut rng);

        assert_eq!(decision, Decision::UseMove { move_index: expected });
    }

    #[test]
    fn test_random_policy_skips_empty_slots() {
        let mut state = state_with(vec!["Pound"], "Bidoof", vec!["Tackle", "Growl"]);
        state.foe.active_mut().moves[0].pp = 0;
        let data = test_data();
        let context = decision_context(&state, data.as_ref(), Side::Foe, DecisionKind::Turn, None);

        let decision = RandomFoePolicy.decide(&context, &mut TurnRng::new_for_test(vec![0]));

        assert_eq!(decision, Decision::UseMove { move_index: 1 });
    }

    #[test]
    fn test_replacement_prompt_picks_a_standing_teammate() {
        let state = state_with(vec!["Pound"], "Bidoof", vec!["Tackle"]);
        let data = test_data();
        let context = decision_context(&state, data.as_ref(), Side::Friendly, DecisionKind::Replacement, None);

        let decision = RandomFoePolicy.decide(&context, &mut TurnRng::new_for_test(vec![0]));
        assert_eq!(decision, Decision::Swap { team_index: 1 });

        let context = decision_context(&state, data.as_ref(), Side::Foe, DecisionKind::Replacement, None);
        assert_eq!(
            RandomFoePolicy.decide(&context, &mut TurnRng::new_for_test(vec![])),
            Decision::Quit
        );
    }

    #[rstest]
    #[case("Bidoof", 0)]
    #[case("Gastly", 1)]
    fn test_scoring_policy_prefers_expected_damage(#[case] opponent: &'static str, #[case] expected: usize) {
        let state = state_with(vec!["Tackle", "Bubble", "Growl"], opponent, vec!["Tackle"]);
        let data = test_data();
        let context = decision_context(&state, data.as_ref(), Side::Friendly, DecisionKind::Turn, None);
        let mut policy = ScoringPolicy::new(data.clone());

        let decision = policy.decide(&context, &mut TurnRng::new_for_test(vec![]));

        assert_eq!(decision, Decision::UseMove { move_index: expected });
    }

    #[rstest]
    #[case::swaps_in_a_teammate(BattleKind::Wild, true, Decision::Swap { team_index: 1 })]
    #[case::runs_from_a_wild_battle(BattleKind::Wild, false, Decision::Run)]
    #[case::quits_a_trainer_battle(BattleKind::Trainer, false, Decision::Quit)]
    fn test_scoring_policy_when_out_of_pp(
        #[case] battle_kind: BattleKind,
        #[case] teammate_standing: bool,
        #[case] expected: Decision,
    ) {
        let mut state = state_with(vec!["Tackle"], "Bidoof", vec!["Tackle"]);
        state.kind = battle_kind;
        state.friendly.active_mut().moves[0].pp = 0;
        if !teammate_standing {
            if let Some(turtwig) = state.friendly.get_mut(1) {
                turtwig.set_hp(0);
            }
        }
        let data = test_data();
        let context = decision_context(&state, data.as_ref(), Side::Friendly, DecisionKind::Turn, None);

        let decision = ScoringPolicy::new(data.clone()).decide(&context, &mut TurnRng::new_for_test(vec![]));

        assert_eq!(decision, expected);
    }

    #[test]
    fn test_scoring_foe_falls_back_to_an_empty_move() {
        let mut state = state_with(vec!["Pound"], "Gastly", vec!["Tackle", "Growl"]);
        for slot in state.foe.active_mut().moves.iter_mut() {
            slot.pp = 0;
        }
        let data = test_data();
        let context = decision_context(&state, data.as_ref(), Side::Foe, DecisionKind::Turn, None);

        let decision = ScoringPolicy::new(data.clone()).decide(&context, &mut TurnRng::new_for_test(vec![]));

        assert_eq!(decision, Decision::UseMove { move_index: 0 });
    }
}
