use crate::battle::commands::apply_stealth_rock;
use crate::battle::move_effects::{execute_move, is_protection_move};
use crate::battle::rng::TurnRng;
use crate::battle::state::{ActionFailureReason, BattleEvent, BattleState, EventBus, GameState};
use crate::battle::stats::effective_speed;
use crate::errors::{ActionError, BattleResult, BattleStateError};
use crate::player::{PlayerTarget, TurnAction};
use crate::pokemon::{Combatant, StatusCondition};
use schema::{Move, PokemonType, Weather};
use std::cmp::Ordering;
use tracing::{debug, info, info_span};

/// Queue one player's action for the coming turn.
pub fn submit_action(
    battle_state: &mut BattleState,
    player: PlayerTarget,
    action: TurnAction,
) -> BattleResult<()> {
    if battle_state.game_state.is_over() {
        return Err(BattleStateError::BattleOver.into());
    }
    if action.player != player {
        return Err(ActionError::WrongPlayer {
            expected: player,
            actual: action.player,
        }
        .into());
    }
    let slot = &mut battle_state.action_queue[player.to_index()];
    if slot.is_some() {
        return Err(ActionError::AlreadySubmitted(player).into());
    }
    *slot = Some(action);
    Ok(())
}

/// Check if battle is ready for turn resolution (both players have provided actions)
pub fn ready_for_turn_resolution(battle_state: &BattleState) -> bool {
    battle_state.game_state == GameState::WaitingForActions
        && battle_state.action_queue.iter().all(Option::is_some)
}

/// A combatant locked into a two-turn move keeps using it.
fn check_for_forced_move(combatant: &Combatant) -> Option<Move> {
    combatant.volatile.charging
}

/// Main entry point for turn resolution.
/// Consumes the queued actions, executes one complete turn and returns the
/// events that occurred.
pub fn resolve_turn(battle_state: &mut BattleState, rng: &mut TurnRng) -> BattleResult<EventBus> {
    if battle_state.game_state.is_over() {
        return Err(BattleStateError::BattleOver.into());
    }
    for player in PlayerTarget::both() {
        if battle_state.action_queue[player.to_index()].is_none() {
            return Err(ActionError::MissingAction(player).into());
        }
    }

    let span = info_span!("turn", number = battle_state.turn_number);
    let _guard = span.enter();

    let mut bus = EventBus::new();
    battle_state.game_state = GameState::TurnInProgress;
    bus.push(BattleEvent::TurnStarted {
        turn_number: battle_state.turn_number,
    });

    let chosen = collect_moves(battle_state);
    let order = determine_action_order(battle_state, chosen, rng);
    debug!(?order, "action order");

    let mut protected_this_turn = [false; 2];
    for (player, move_used) in order {
        // A faint ends the battle, so nothing else gets to act.
        if battle_state.is_battle_over() {
            break;
        }

        let prevented = check_action_preventing_conditions(battle_state, player, rng, &mut bus);
        if let Some(reason) = prevented {
            let volatile = &mut battle_state.combatant_mut(player).volatile;
            volatile.charging = None;
            volatile.semi_invulnerable = None;
            bus.push(BattleEvent::ActionPrevented { player, reason });
            continue;
        }

        bus.push(BattleEvent::MoveUsed { player, move_used });
        let outcome = execute_move(battle_state, player, move_used, rng, &mut bus);
        if is_protection_move(move_used) && !outcome.move_failed {
            protected_this_turn[player.to_index()] = true;
        }
    }

    execute_end_turn_phase(battle_state, &mut bus, &protected_this_turn);
    finalize_turn(battle_state, &mut bus);

    Ok(bus)
}

/// The move each player will use: the forced move if one is pending,
/// otherwise the submitted one.
fn collect_moves(battle_state: &BattleState) -> Vec<(PlayerTarget, Move)> {
    PlayerTarget::both()
        .into_iter()
        .filter_map(|player| {
            let submitted = battle_state.action_queue[player.to_index()]?;
            let forced = check_for_forced_move(battle_state.combatant(player));
            Some((player, forced.unwrap_or(submitted.move_used)))
        })
        .collect()
}

/// Order by move priority, then effective speed, then a coin flip.
pub fn determine_action_order(
    battle_state: &BattleState,
    mut actions: Vec<(PlayerTarget, Move)>,
    rng: &mut TurnRng,
) -> Vec<(PlayerTarget, Move)> {
    if actions.len() < 2 {
        return actions;
    }

    let key = |(player, move_used): &(PlayerTarget, Move)| {
        (
            move_used.data().priority,
            effective_speed(battle_state.combatant(*player)),
        )
    };
    let first = key(&actions[0]);
    let second = key(&actions[1]);

    let swap = match second.cmp(&first) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => rng.random(2, "Speed Tie") == 1,
    };
    if swap {
        actions.swap(0, 1);
    }
    actions
}

/// Status checks run after ordering and before the effect. Returns the
/// reason the combatant cannot act, if any.
fn check_action_preventing_conditions(
    battle_state: &mut BattleState,
    player: PlayerTarget,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> Option<ActionFailureReason> {
    let full_paralysis_chance = battle_state.config.full_paralysis_chance;
    let freeze_thaw_chance = battle_state.config.freeze_thaw_chance;
    let combatant = battle_state.combatant_mut(player);

    match combatant.status? {
        StatusCondition::Sleep(turns) => {
            if combatant.tick_sleep() {
                return Some(ActionFailureReason::IsAsleep);
            }
            bus.push(BattleEvent::StatusRemoved {
                target: player,
                status: StatusCondition::Sleep(turns),
            });
            None
        }
        StatusCondition::Freeze => {
            if rng.chance(freeze_thaw_chance, "Thaw Check") {
                combatant.status = None;
                bus.push(BattleEvent::StatusRemoved {
                    target: player,
                    status: StatusCondition::Freeze,
                });
                None
            } else {
                Some(ActionFailureReason::IsFrozen)
            }
        }
        StatusCondition::Paralysis => {
            if rng.chance(full_paralysis_chance, "Full Paralysis Check") {
                Some(ActionFailureReason::IsParalyzed)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Residual damage, weather countdown and volatile-flag housekeeping.
pub fn execute_end_turn_phase(
    battle_state: &mut BattleState,
    bus: &mut EventBus,
    protected_this_turn: &[bool; 2],
) {
    if !battle_state.is_battle_over() {
        apply_weather_damage(battle_state, bus);
        apply_status_damage(battle_state, bus);
        tick_weather(battle_state, bus);
    }

    for player in PlayerTarget::both() {
        let volatile = &mut battle_state.combatant_mut(player).volatile;
        volatile.is_protected = false;
        if !protected_this_turn[player.to_index()] {
            volatile.protect_count = 0;
        }
    }
}

fn weather_spares(weather: Weather, combatant: &Combatant) -> bool {
    match weather {
        Weather::Sandstorm => {
            combatant.has_type(PokemonType::Rock) || combatant.has_type(PokemonType::Ground)
        }
        Weather::Hail => combatant.has_type(PokemonType::Ice),
        Weather::None | Weather::Rain | Weather::Sun => true,
    }
}

fn apply_weather_damage(battle_state: &mut BattleState, bus: &mut EventBus) {
    let weather = battle_state.field.weather;
    for player in PlayerTarget::both() {
        let combatant = battle_state.combatant_mut(player);
        if combatant.is_fainted() || weather_spares(weather, combatant) {
            continue;
        }
        let damage = (combatant.max_hp() / 16).max(1);
        let fainted = combatant.take_damage(damage);
        bus.push(BattleEvent::WeatherDamage {
            target: player,
            weather,
            damage,
            remaining_hp: combatant.current_hp(),
        });
        if fainted {
            bus.push(BattleEvent::PokemonFainted { player });
        }
    }
}

fn apply_status_damage(battle_state: &mut BattleState, bus: &mut EventBus) {
    for player in PlayerTarget::both() {
        let combatant = battle_state.combatant_mut(player);
        if combatant.is_fainted() {
            continue;
        }
        let Some(status) = combatant.status else {
            continue;
        };
        let max_hp = u32::from(combatant.max_hp());
        let damage = match status {
            StatusCondition::Burn | StatusCondition::Poison => max_hp / 8,
            StatusCondition::BadlyPoisoned(counter) => {
                let next = counter.saturating_add(1).min(15);
                combatant.status = Some(StatusCondition::BadlyPoisoned(next));
                max_hp * u32::from(counter) / 16
            }
            _ => continue,
        };
        let damage = u16::try_from(damage.max(1)).unwrap_or(u16::MAX);
        let fainted = combatant.take_damage(damage);
        bus.push(BattleEvent::StatusDamage {
            target: player,
            status,
            damage,
            remaining_hp: combatant.current_hp(),
        });
        if fainted {
            bus.push(BattleEvent::PokemonFainted { player });
        }
    }
}

fn tick_weather(battle_state: &mut BattleState, bus: &mut EventBus) {
    let field = &mut battle_state.field;
    if field.weather == Weather::None {
        return;
    }
    field.turns_remaining = field.turns_remaining.saturating_sub(1);
    if field.turns_remaining == 0 {
        bus.push(BattleEvent::WeatherEnded {
            weather: field.weather,
        });
        field.weather = Weather::None;
    }
}

fn finalize_turn(battle_state: &mut BattleState, bus: &mut EventBus) {
    battle_state.action_queue = [None, None];
    battle_state.turn_number += 1;
    check_win_conditions(battle_state, bus);
    bus.push(BattleEvent::TurnEnded);
}

fn check_win_conditions(battle_state: &mut BattleState, bus: &mut EventBus) {
    let fainted = [
        battle_state.combatant(PlayerTarget::Player1).is_fainted(),
        battle_state.combatant(PlayerTarget::Player2).is_fainted(),
    ];
    let (game_state, winner) = match fainted {
        [false, false] => {
            battle_state.game_state = GameState::WaitingForActions;
            return;
        }
        [false, true] => (GameState::Player1Win, Some(PlayerTarget::Player1)),
        [true, false] => (GameState::Player2Win, Some(PlayerTarget::Player2)),
        [true, true] => (GameState::Draw, None),
    };
    info!(?game_state, "battle over");
    battle_state.game_state = game_state;
    bus.push(BattleEvent::BattleEnded { winner });
}

/// Put a fresh combatant on `player`'s side. Entry hazards on that side hit
/// it immediately.
pub fn switch_in(
    battle_state: &mut BattleState,
    player: PlayerTarget,
    combatant: Combatant,
    bus: &mut EventBus,
) -> BattleResult<()> {
    if battle_state.game_state == GameState::TurnInProgress {
        return Err(BattleStateError::InconsistentState(
            "cannot switch while a turn is resolving".to_string(),
        )
        .into());
    }
    combatant.validate()?;

    let index = player.to_index();
    battle_state.combatants[index] = combatant;
    bus.push(BattleEvent::PokemonSwitchedIn {
        player,
        species_id: combatant.species_id,
    });

    let side = battle_state.sides[index];
    apply_stealth_rock(&mut battle_state.combatants[index], &side, player, bus);

    check_win_conditions(battle_state, bus);
    Ok(())
}
