#[cfg(test)]
mod tests {
    use crate::battle::decision::Decision;
    use crate::battle::rng::TurnRng;
    use crate::battle::state::{BattleEvent, Outcome, Side};
    use crate::battle::stats::Stats;
    use crate::battle::tests::common::{
        assert_ok, create_wild_battle, flat_stats, has_event, TestPokemonBuilder,
    };
    use crate::pokemon::PokemonInst;
    use pretty_assertions::assert_eq;
    use schema::{StatDirection, StatType};

    fn user(moves: Vec<&'static str>) -> PokemonInst {
        TestPokemonBuilder::new("Piplup", 50)
            .with_moves(moves)
            .with_stats(flat_stats(100))
            .build()
    }

    /// A slower foe whose only move touches nothing but its own health.
    fn passive_foe() -> PokemonInst {
        TestPokemonBuilder::new("Bidoof", 50)
            .with_moves(vec!["Recover"])
            .with_stats(Stats { speed: 50, ..flat_stats(100) })
            .build()
    }

    #[test]
    fn test_growl_lowers_foe_attack() {
        let mut battle = create_wild_battle(vec![user(vec!["Growl"])], vec![passive_foe()]);

        let bus = assert_ok(battle.resolve_round(
            Decision::UseMove { move_index: 0 },
            &mut TurnRng::new_for_test(vec![0, 50]),
        ));

        let change = BattleEvent::StatStageChanged {
            side: Side::Foe,
            target: "Bidoof".to_string(),
            stat: StatType::Attack,
            old_stage: 0,
            new_stage: -1,
        };
        assert!(bus.events().contains(&change));
        assert_eq!(battle.state().foe.active().stages.get(StatType::Attack), -1);
        assert_eq!(
            change.format(battle.state()),
            Some("Wild Bidoof's Attack fell!".to_string())
        );
    }

    #[test]
    fn test_change_at_the_limit_is_blocked() {
        let mut foe = passive_foe();
        foe.stages.modify(StatType::Attack, -6);
        let mut battle = create_wild_battle(vec![user(vec!["Growl"])], vec![foe]);

        let bus = assert_ok(battle.resolve_round(
            Decision::UseMove { move_index: 0 },
            &mut TurnRng::new_for_test(vec![0, 50]),
        ));

        let blocked = BattleEvent::StatChangeBlocked {
            side: Side::Foe,
            target: "Bidoof".to_string(),
            stat: StatType::Attack,
            direction: StatDirection::Lower,
        };
        assert!(bus.events().contains(&blocked));
        assert!(!has_event(bus.events(), |event| matches!(event, BattleEvent::StatStageChanged { .. })));
        assert_eq!(
            blocked.format(battle.state()),
            Some("Wild Bidoof's Attack won't go any lower!".to_string())
        );
    }

    #[test]
    fn test_partial_raise_is_clamped_to_six() {
        let mut piplup = user(vec!["Swords Dance"]);
        piplup.stages.modify(StatType::Attack, 5);
        let mut battle = create_wild_battle(vec![piplup], vec![passive_foe()]);

        let bus = assert_ok(battle.resolve_round(
            Decision::UseMove { move_index: 0 },
            &mut TurnRng::new_for_test(vec![0, 50]),
        ));

        assert!(bus.events().contains(&BattleEvent::StatStageChanged {
            side: Side::Friendly,
            target: "Piplup".to_string(),
            stat: StatType::Attack,
            old_stage: 5,
            new_stage: 6,
        }));
        assert_eq!(battle.state().friendly.active().stages.get(StatType::Attack), 6);
    }

    #[test]
    fn test_raised_attack_feeds_damage_and_resets_when_battle_ends() {
        let mut battle = create_wild_battle(vec![user(vec!["Swords Dance", "Tackle"])], vec![passive_foe()]);

        assert_ok(battle.resolve_round(
            Decision::UseMove { move_index: 0 },
            &mut TurnRng::new_for_test(vec![0, 50]),
        ));
        assert_eq!(battle.state().friendly.active().stages.get(StatType::Attack), 2);

        // attack 200 against defense 100: 22 * 40 * 2 / 50 + 2 = 37.2
        let bus = assert_ok(battle.resolve_round(
            Decision::UseMove { move_index: 1 },
            &mut TurnRng::new_for_test(vec![0, 99, 100]),
        ));
        assert!(bus.events().contains(&BattleEvent::DamageDealt {
            side: Side::Foe,
            target: "Bidoof".to_string(),
            damage: 37,
            remaining_hp: 63,
        }));

        assert_ok(battle.resolve_round(Decision::Run, &mut TurnRng::new_for_test(vec![])));
        assert_eq!(battle.outcome(), Some(Outcome::Run));
        assert_eq!(battle.state().friendly.active().stages.get(StatType::Attack), 0);
    }
}
