#[cfg(test)]
mod tests {
    use crate::battle::rng::TurnRng;
    use crate::battle::state::{BattleEvent, GameState, Outcome, Side};
    use crate::battle::stats::Stats;
    use crate::battle::tests::common::{
        assert_ok, create_wild_battle, flat_stats, TestPokemonBuilder,
    };
    use crate::battle::decision::Decision;
    use pretty_assertions::assert_eq;

    fn tackle() -> Decision {
        Decision::UseMove { move_index: 0 }
    }

    #[test]
    fn test_level_fifty_tackle_knocks_out_weakened_wild_foe() {
        let piplup = TestPokemonBuilder::new("Piplup", 50)
            .with_moves(vec!["Tackle"])
            .with_stats(flat_stats(100))
            .build();
        let bidoof = TestPokemonBuilder::new("Bidoof", 5)
            .with_moves(vec!["Tackle"])
            .with_stats(Stats {
                health: 20,
                attack: 10,
                defense: 100,
                sp_attack: 10,
                sp_defense: 100,
                speed: 10,
            })
            .with_hp(1)
            .build();
        let exp_before = piplup.exp;
        let mut battle = create_wild_battle(vec![piplup], vec![bidoof]);

        // foe move choice, then the friendly crit roll and random factor
        let mut rng = TurnRng::new_for_test(vec![0, 99, 100]);
        let bus = assert_ok(battle.resolve_round(tackle(), &mut rng));
        let events = bus.events();

        assert_eq!(battle.outcome(), Some(Outcome::FoeTeamKO));
        assert_eq!(battle.state().game_state, GameState::Terminal);
        assert_eq!(battle.state().foe.active().current_hp(), 0);
        assert!(events.contains(&BattleEvent::DamageDealt {
            side: Side::Foe,
            target: "Bidoof".to_string(),
            damage: 1,
            remaining_hp: 0,
        }));
        assert!(events.contains(&BattleEvent::PokemonFainted {
            side: Side::Foe,
            pokemon: "Bidoof".to_string(),
        }));

        // 50 * 5 / 7 = 35.7, one participant
        assert!(events.contains(&BattleEvent::ExperienceGained {
            pokemon: "Piplup".to_string(),
            amount: 36,
        }));
        let piplup = battle.state().friendly.active();
        assert_eq!(piplup.exp, exp_before + 36);
        assert_eq!(piplup.evs, [1, 0, 0, 0, 0, 0]);
        assert_eq!(
            events.last(),
            Some(&BattleEvent::BattleEnded {
                outcome: Outcome::FoeTeamKO
            })
        );
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_full_exchange_event_order() {
        let piplup = TestPokemonBuilder::new("Piplup", 50)
            .with_moves(vec!["Tackle"])
            .with_stats(flat_stats(100))
            .build();
        let bidoof = TestPokemonBuilder::new("Bidoof", 50)
            .with_moves(vec!["Tackle"])
            .with_stats(flat_stats(100))
            .with_speed(50)
            .build();
        let mut battle = create_wild_battle(vec![piplup], vec![bidoof]);

        let mut rng = TurnRng::new_for_test(vec![0, 99, 100, 99, 100]);
        let bus = assert_ok(battle.resolve_round(tackle(), &mut rng));

        // Bidoof gets STAB on Tackle: 19.6 * 1.5
        let expected = vec![
            BattleEvent::TurnStarted { turn_number: 1 },
            BattleEvent::MoveUsed {
                side: Side::Friendly,
                pokemon: "Piplup".to_string(),
                move_name: "Tackle".to_string(),
            },
            BattleEvent::DamageDealt {
                side: Side::Foe,
                target: "Bidoof".to_string(),
                damage: 19,
                remaining_hp: 81,
            },
            BattleEvent::AttackTypeEffectiveness { multiplier: 1.0 },
            BattleEvent::MoveUsed {
                side: Side::Foe,
                pokemon: "Bidoof".to_string(),
                move_name: "Tackle".to_string(),
            },
            BattleEvent::DamageDealt {
                side: Side::Friendly,
                target: "Piplup".to_string(),
                damage: 29,
                remaining_hp: 71,
            },
            BattleEvent::AttackTypeEffectiveness { multiplier: 1.0 },
            BattleEvent::TurnEnded,
        ];
        assert_eq!(bus.events(), expected.as_slice());
        assert_eq!(battle.state().turn_number, 1);
        assert_eq!(battle.state().game_state, GameState::AwaitingDecisions);
        assert_eq!(battle.state().friendly.active().moves[0].pp, 34);
        assert_eq!(battle.state().foe.active().moves[0].pp, 34);
    }

    #[test]
    fn test_critical_hit_is_reported_after_damage() {
        let piplup = TestPokemonBuilder::new("Piplup", 50)
            .with_moves(vec!["Tackle"])
            .with_stats(flat_stats(100))
            .build();
        let bidoof = TestPokemonBuilder::new("Bidoof", 50)
            .with_moves(vec!["Growl"])
            .with_stats(flat_stats(100))
            .with_speed(50)
            .build();
        let mut battle = create_wild_battle(vec![piplup], vec![bidoof]);

        // crit roll 0 lands under 1/16
        let mut rng = TurnRng::new_for_test(vec![0, 0, 100, 50]);
        let bus = assert_ok(battle.resolve_round(tackle(), &mut rng));
        let events = bus.events();

        assert!(events.contains(&BattleEvent::DamageDealt {
            side: Side::Foe,
            target: "Bidoof".to_string(),
            damage: 39,
            remaining_hp: 61,
        }));
        let damage_at = events
            .iter()
            .position(|e| matches!(e, BattleEvent::DamageDealt { .. }))
            .unwrap();
        let crit_at = events
            .iter()
            .position(|e| matches!(e, BattleEvent::CriticalHit { side: Side::Friendly }))
            .unwrap();
        assert!(crit_at > damage_at);
    }

    #[test]
    fn test_immune_target_takes_nothing() {
        let piplup = TestPokemonBuilder::new("Piplup", 50)
            .with_moves(vec!["Tackle"])
            .with_stats(flat_stats(100))
            .build();
        let gastly = TestPokemonBuilder::new("Gastly", 50)
            .with_moves(vec!["Growl"])
            .with_stats(flat_stats(100))
            .with_speed(50)
            .build();
        let mut battle = create_wild_battle(vec![piplup], vec![gastly]);

        let mut rng = TurnRng::new_for_test(vec![0, 99, 100, 50]);
        let bus = assert_ok(battle.resolve_round(tackle(), &mut rng));

        assert_eq!(battle.state().foe.active().current_hp(), 100);
        assert!(bus
            .events()
            .contains(&BattleEvent::AttackTypeEffectiveness { multiplier: 0.0 }));
        let text = bus.formatted(battle.state());
        assert!(text.contains(&"It had no effect!".to_string()));
    }

    #[test]
    fn test_both_actives_stand_at_every_new_round() {
        let piplup = TestPokemonBuilder::new("Piplup", 50)
            .with_moves(vec!["Tackle"])
            .with_stats(Stats {
                health: 500,
                ..flat_stats(100)
            })
            .build();
        let bidoof = TestPokemonBuilder::new("Bidoof", 50)
            .with_moves(vec!["Tackle"])
            .with_stats(flat_stats(100))
            .with_speed(50)
            .build();
        let mut battle = create_wild_battle(vec![piplup], vec![bidoof]);
        let mut rng = TurnRng::new_for_test(vec![0, 99, 100, 99, 100].repeat(10));

        while !battle.is_over() {
            assert_ok(battle.resolve_round(tackle(), &mut rng));
            if battle.state().game_state == GameState::AwaitingDecisions {
                assert!(!battle.state().friendly.active().is_fainted());
                assert!(!battle.state().foe.active().is_fainted());
            }
        }
        // 19 per round against 100 health: the sixth Tackle lands the knockout
        assert_eq!(battle.outcome(), Some(Outcome::FoeTeamKO));
        assert_eq!(battle.state().turn_number, 6);
        // five full exchanges, then a knockout before Bidoof can move
        assert_eq!(rng.consumed(), 5 * 5 + 3);
    }
}
