#[cfg(test)]
mod tests {
    use crate::battle::engine::resolve_turn;
    use crate::battle::rng::TurnRng;
    use crate::battle::state::{ActionFailureReason, BattleEvent, BattleState, EventBus};
    use crate::battle::tests::common::{
        assert_ok, count_events, create_test_battle, create_test_battle_with_config, no_rng,
        queue_moves, TestCombatantBuilder,
    };
    use crate::config::BattleConfig;
    use crate::player::PlayerTarget;
    use crate::pokemon::StatusCondition;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{Move, PokemonType};

    fn battle_with_player1_status(status: StatusCondition) -> BattleState {
        create_test_battle(
            TestCombatantBuilder::new(PokemonType::Normal)
                .with_speed(60)
                .with_status(status)
                .build(),
            TestCombatantBuilder::new(PokemonType::Normal)
                .with_speed(40)
                .build(),
        )
    }

    fn prevented(bus: &EventBus, player: PlayerTarget) -> Option<ActionFailureReason> {
        bus.events().iter().find_map(|event| match event {
            BattleEvent::ActionPrevented { player: p, reason } if *p == player => Some(*reason),
            _ => None,
        })
    }

    fn used_move(bus: &EventBus, player: PlayerTarget) -> bool {
        bus.contains(|event| matches!(event, BattleEvent::MoveUsed { player: p, .. } if *p == player))
    }

    #[test]
    fn test_sleep_blocks_until_the_counter_runs_out() {
        let mut state = battle_with_player1_status(StatusCondition::Sleep(2));
        let mut rng = no_rng();

        queue_moves(&mut state, Move::Tackle, Move::Growth);
        let bus = assert_ok(resolve_turn(&mut state, &mut rng));
        bus.print_debug_with_message("Turn 1 (asleep):");
        assert_eq!(prevented(&bus, PlayerTarget::Player1), Some(ActionFailureReason::IsAsleep));
        assert!(!used_move(&bus, PlayerTarget::Player1));
        assert_eq!(state.combatants[0].status, Some(StatusCondition::Sleep(1)));

        queue_moves(&mut state, Move::Tackle, Move::Growth);
        let bus = assert_ok(resolve_turn(&mut state, &mut rng));
        bus.print_debug_with_message("Turn 2 (wakes up):");
        assert_eq!(prevented(&bus, PlayerTarget::Player1), None);
        assert!(bus.contains(|e| matches!(
            e,
            BattleEvent::StatusRemoved {
                target: PlayerTarget::Player1,
                status: StatusCondition::Sleep(_),
            }
        )));
        assert!(used_move(&bus, PlayerTarget::Player1));
        assert_eq!(state.combatants[0].status, None);
        assert_eq!(state.combatants[1].current_hp(), 83);
    }

    #[rstest]
    #[case("thaw roll under the chance thaws", 19, false)]
    #[case("thaw roll at the chance stays frozen", 20, true)]
    fn test_freeze_thaw_check(
        #[case] desc: &str,
        #[case] roll: u32,
        #[case] stays_frozen: bool,
    ) {
        let mut state = battle_with_player1_status(StatusCondition::Freeze);
        let mut rng = TurnRng::new_for_test(vec![roll]);

        queue_moves(&mut state, Move::Tackle, Move::Growth);
        let bus = assert_ok(resolve_turn(&mut state, &mut rng));

        let expected = stays_frozen.then_some(ActionFailureReason::IsFrozen);
        assert_eq!(prevented(&bus, PlayerTarget::Player1), expected, "{}", desc);
        assert_eq!(
            state.combatants[0].status == Some(StatusCondition::Freeze),
            stays_frozen,
            "{}",
            desc
        );
        assert_eq!(used_move(&bus, PlayerTarget::Player1), !stays_frozen, "{}", desc);
    }

    #[rstest]
    #[case("roll under 25 is fully paralyzed", 24, true)]
    #[case("roll at 25 acts", 25, false)]
    fn test_full_paralysis_check(
        #[case] desc: &str,
        #[case] roll: u32,
        #[case] expect_prevented: bool,
    ) {
        let mut state = battle_with_player1_status(StatusCondition::Paralysis);
        let mut rng = TurnRng::new_for_test(vec![roll]);

        queue_moves(&mut state, Move::Tackle, Move::Growth);
        let bus = assert_ok(resolve_turn(&mut state, &mut rng));

        let expected = expect_prevented.then_some(ActionFailureReason::IsParalyzed);
        assert_eq!(prevented(&bus, PlayerTarget::Player1), expected, "{}", desc);
        // Paralysis itself never wears off.
        assert_eq!(state.combatants[0].status, Some(StatusCondition::Paralysis));
        assert!(used_move(&bus, PlayerTarget::Player2), "{}", desc);
    }

    #[test]
    fn test_both_paralyzed_roll_independently() {
        let mut state = create_test_battle(
            TestCombatantBuilder::new(PokemonType::Normal)
                .with_speed(60)
                .with_status(StatusCondition::Paralysis)
                .build(),
            TestCombatantBuilder::new(PokemonType::Normal)
                .with_speed(40)
                .with_status(StatusCondition::Paralysis)
                .build(),
        );
        // Player 1 still outspeeds at a quarter speed (15 vs 10).
        let mut rng = TurnRng::new_for_test(vec![0, 99]);

        queue_moves(&mut state, Move::Tackle, Move::Tackle);
        let bus = assert_ok(resolve_turn(&mut state, &mut rng));

        assert_eq!(
            prevented(&bus, PlayerTarget::Player1),
            Some(ActionFailureReason::IsParalyzed)
        );
        assert_eq!(prevented(&bus, PlayerTarget::Player2), None);
        assert_eq!(
            count_events(&bus, |e| matches!(e, BattleEvent::ActionPrevented { .. })),
            1
        );
        assert_eq!(state.combatants[0].current_hp(), 83);
        assert_eq!(state.combatants[1].current_hp(), 100);
    }

    #[test]
    fn test_prevented_turn_drops_a_pending_charge() {
        let mut state = battle_with_player1_status(StatusCondition::Paralysis);
        // Player 1 is slower at quarter speed, so Player 2 moves first each turn
        // and only Player 1's paralysis check draws.
        let mut rng = TurnRng::new_for_test(vec![99, 0, 99]);

        queue_moves(&mut state, Move::SolarBeam, Move::Growth);
        assert_ok(resolve_turn(&mut state, &mut rng));
        assert_eq!(state.combatants[0].volatile.charging, Some(Move::SolarBeam));

        queue_moves(&mut state, Move::SolarBeam, Move::Growth);
        let bus = assert_ok(resolve_turn(&mut state, &mut rng));
        assert_eq!(
            prevented(&bus, PlayerTarget::Player1),
            Some(ActionFailureReason::IsParalyzed)
        );
        assert_eq!(state.combatants[0].volatile.charging, None);

        queue_moves(&mut state, Move::Tackle, Move::Growth);
        let bus = assert_ok(resolve_turn(&mut state, &mut rng));
        assert!(bus.contains(|e| *e
            == BattleEvent::MoveUsed {
                player: PlayerTarget::Player1,
                move_used: Move::Tackle,
            }));
    }

    #[test]
    fn test_prevented_turn_brings_a_hidden_user_back() {
        let mut state = battle_with_player1_status(StatusCondition::Paralysis);
        let mut rng = TurnRng::new_for_test(vec![99, 0]);

        queue_moves(&mut state, Move::Dig, Move::Growth);
        assert_ok(resolve_turn(&mut state, &mut rng));
        assert!(state.combatants[0].volatile.is_semi_invulnerable());

        queue_moves(&mut state, Move::Dig, Move::Growth);
        assert_ok(resolve_turn(&mut state, &mut rng));
        assert!(!state.combatants[0].volatile.is_semi_invulnerable());
        assert!(!state.combatants[0].volatile.is_charging());
    }

    #[test]
    fn test_full_paralysis_chance_is_configurable() {
        let config = BattleConfig {
            full_paralysis_chance: 0,
            ..BattleConfig::default()
        };
        let mut state = create_test_battle_with_config(
            TestCombatantBuilder::new(PokemonType::Normal)
                .with_status(StatusCondition::Paralysis)
                .build(),
            TestCombatantBuilder::new(PokemonType::Normal).with_speed(10).build(),
            config,
        );
        let mut rng = TurnRng::new(5);

        for _ in 0..20 {
            queue_moves(&mut state, Move::Growth, Move::Growth);
            let bus = assert_ok(resolve_turn(&mut state, &mut rng));
            assert_eq!(prevented(&bus, PlayerTarget::Player1), None);
        }
    }
}
