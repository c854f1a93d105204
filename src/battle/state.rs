use crate::config::BattleConfig;
use crate::errors::{BattleResult, BattleStateError};
use crate::player::{PlayerTarget, TurnAction};
use crate::pokemon::{Combatant, StatusCondition};
use schema::{Move, SemiInvulnerable, StatType, Weather};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum GameState {
    WaitingForActions,
    TurnInProgress,
    Player1Win,
    Player2Win,
    Draw,
}

impl GameState {
    pub fn is_over(self) -> bool {
        matches!(
            self,
            GameState::Player1Win | GameState::Player2Win | GameState::Draw
        )
    }
}

/// Battle-wide conditions shared by both sides.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Field {
    pub weather: Weather,
    pub turns_remaining: u8,
}

/// Per-player persistent conditions. Hazards are never removed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Side {
    pub stealth_rock: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionFailureReason {
    IsAsleep,
    IsFrozen,
    IsParalyzed,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent {
    // Turn Management
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded,

    // Move Resolution
    MoveUsed {
        player: PlayerTarget,
        move_used: Move,
    },
    MoveMissed {
        player: PlayerTarget,
        move_used: Move,
    },
    MoveBlocked {
        target: PlayerTarget,
    },
    MoveFailed {
        player: PlayerTarget,
        move_used: Move,
    },
    /// Quarter units: 4 is neutral.
    AttackTypeEffectiveness {
        multiplier: u8,
    },
    MultiHit {
        hits: u8,
    },
    ChargingStarted {
        player: PlayerTarget,
        move_used: Move,
    },
    WentSemiInvulnerable {
        player: PlayerTarget,
        kind: SemiInvulnerable,
    },
    Protected {
        player: PlayerTarget,
    },
    SubstituteCreated {
        player: PlayerTarget,
        hp: u16,
    },
    StatsPassed {
        from: PlayerTarget,
        to: PlayerTarget,
    },

    // Damage and Healing
    DamageDealt {
        target: PlayerTarget,
        damage: u16,
        remaining_hp: u16,
    },
    RecoilTaken {
        target: PlayerTarget,
        damage: u16,
        remaining_hp: u16,
    },
    PokemonHealed {
        target: PlayerTarget,
        amount: u16,
        new_hp: u16,
    },
    PokemonFainted {
        player: PlayerTarget,
    },

    // Status
    StatusApplied {
        target: PlayerTarget,
        status: StatusCondition,
    },
    StatusRemoved {
        target: PlayerTarget,
        status: StatusCondition,
    },
    StatusDamage {
        target: PlayerTarget,
        status: StatusCondition,
        damage: u16,
        remaining_hp: u16,
    },
    ActionPrevented {
        player: PlayerTarget,
        reason: ActionFailureReason,
    },

    // Stat Changes
    StatStageChanged {
        target: PlayerTarget,
        stat: StatType,
        old_stage: i8,
        new_stage: i8,
    },
    StatChangeBlocked {
        target: PlayerTarget,
        stat: StatType,
    },

    // Field and Sides
    HazardSet {
        side: PlayerTarget,
    },
    HazardDamage {
        target: PlayerTarget,
        damage: u16,
        remaining_hp: u16,
    },
    PokemonSwitchedIn {
        player: PlayerTarget,
        species_id: u16,
    },
    WeatherStarted {
        weather: Weather,
        turns: u8,
    },
    WeatherDamage {
        target: PlayerTarget,
        weather: Weather,
        damage: u16,
        remaining_hp: u16,
    },
    WeatherEnded {
        weather: Weather,
    },

    // Battle End
    BattleEnded {
        winner: Option<PlayerTarget>,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string using battle context.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self, battle_state: &BattleState) -> Option<String> {
        let name = |player: &PlayerTarget| Self::format_combatant(battle_state, *player);
        match self {
            BattleEvent::TurnStarted { turn_number } => {
                Some(format!("=== Turn {} ===", turn_number))
            }
            BattleEvent::TurnEnded => None,

            BattleEvent::MoveUsed { player, move_used } => {
                Some(format!("{} used {}!", name(player), move_used))
            }
            BattleEvent::MoveMissed { player, .. } => {
                Some(format!("{}'s attack missed!", name(player)))
            }
            BattleEvent::MoveBlocked { target } => {
                Some(format!("{} protected itself!", name(target)))
            }
            BattleEvent::MoveFailed { .. } => Some("But it failed!".to_string()),
            BattleEvent::AttackTypeEffectiveness { multiplier } => match *multiplier {
                0 => Some("It had no effect!".to_string()),
                m if m > 4 => Some("It's super effective!".to_string()),
                m if m < 4 => Some("It's not very effective...".to_string()),
                _ => None,
            },
            BattleEvent::MultiHit { hits } => Some(format!("Hit {} time(s)!", hits)),
            BattleEvent::ChargingStarted { player, move_used } => {
                Some(format!("{} is charging up {}!", name(player), move_used))
            }
            BattleEvent::WentSemiInvulnerable { player, kind } => {
                Some(format!("{} {}!", name(player), kind))
            }
            BattleEvent::Protected { player } => {
                Some(format!("{} protected itself!", name(player)))
            }
            BattleEvent::SubstituteCreated { player, .. } => {
                Some(format!("{} made a substitute!", name(player)))
            }
            BattleEvent::StatsPassed { from, to } => Some(format!(
                "{} passed its stat changes to {}!",
                name(from),
                name(to)
            )),

            BattleEvent::DamageDealt { target, damage, .. } => {
                Some(format!("{} took {} damage!", name(target), damage))
            }
            BattleEvent::RecoilTaken { target, .. } => {
                Some(format!("{} is hit with recoil!", name(target)))
            }
            BattleEvent::PokemonHealed { target, amount, .. } => {
                Some(format!("{} recovered {} HP!", name(target), amount))
            }
            BattleEvent::PokemonFainted { player } => Some(format!("{} fainted!", name(player))),

            BattleEvent::StatusApplied { target, status } => Some(format!(
                "{} {}",
                name(target),
                Self::format_status_applied(status)
            )),
            BattleEvent::StatusRemoved { target, status } => Some(format!(
                "{} {}",
                name(target),
                Self::format_status_removed(status)
            )),
            BattleEvent::StatusDamage {
                target,
                status,
                damage,
                ..
            } => Some(format!(
                "{} is hurt by its {}! ({} damage)",
                name(target),
                Self::format_status(status),
                damage
            )),
            BattleEvent::ActionPrevented { player, reason } => Some(format!(
                "{} {}",
                name(player),
                Self::format_action_failure_reason(reason)
            )),

            BattleEvent::StatStageChanged {
                target,
                stat,
                old_stage,
                new_stage,
            } => {
                let verb = if new_stage > old_stage { "rose" } else { "fell" };
                let sharply = if (new_stage - old_stage).abs() > 1 {
                    " sharply"
                } else {
                    ""
                };
                Some(format!("{}'s {}{} {}!", name(target), stat, sharply, verb))
            }
            BattleEvent::StatChangeBlocked { target, stat } => Some(format!(
                "{}'s {} won't go any further!",
                name(target),
                stat
            )),

            BattleEvent::HazardSet { side } => Some(format!(
                "Pointed stones float in the air around {}'s team!",
                side
            )),
            BattleEvent::HazardDamage { target, .. } => {
                Some(format!("Pointed stones dug into {}!", name(target)))
            }
            BattleEvent::PokemonSwitchedIn { player, species_id } => {
                Some(format!("{} sent out #{:03}!", player, species_id))
            }
            BattleEvent::WeatherStarted { weather, .. } => {
                Some(Self::format_weather_started(*weather))
            }
            BattleEvent::WeatherDamage {
                target, weather, ..
            } => Some(format!("{} is buffeted by the {}!", name(target), weather)),
            BattleEvent::WeatherEnded { weather } => Some(format!("The {} subsided.", weather)),

            BattleEvent::BattleEnded { winner } => match winner {
                Some(player) => Some(format!("{} has won the battle!", player)),
                None => Some("The battle ended in a draw!".to_string()),
            },
        }
    }

    // --- Private Helper Functions ---

    fn format_combatant(battle_state: &BattleState, player: PlayerTarget) -> String {
        let species_id = battle_state.combatant(player).species_id;
        format!("{}'s #{:03}", player, species_id)
    }

    fn format_status(status: &StatusCondition) -> &'static str {
        match status {
            StatusCondition::Sleep(_) => "sleep",
            StatusCondition::Poison | StatusCondition::BadlyPoisoned(_) => "poison",
            StatusCondition::Burn => "burn",
            StatusCondition::Freeze => "freeze",
            StatusCondition::Paralysis => "paralysis",
        }
    }

    fn format_status_applied(status: &StatusCondition) -> &'static str {
        match status {
            StatusCondition::Sleep(_) => "fell asleep!",
            StatusCondition::Poison => "was poisoned!",
            StatusCondition::BadlyPoisoned(_) => "was badly poisoned!",
            StatusCondition::Burn => "was burned!",
            StatusCondition::Freeze => "was frozen solid!",
            StatusCondition::Paralysis => "is paralyzed! It may be unable to move!",
        }
    }

    fn format_status_removed(status: &StatusCondition) -> String {
        match status {
            StatusCondition::Sleep(_) => "woke up!".to_string(),
            StatusCondition::Freeze => "thawed out!".to_string(),
            _ => format!("was cured of its {}!", Self::format_status(status)),
        }
    }

    fn format_action_failure_reason(reason: &ActionFailureReason) -> &'static str {
        match reason {
            ActionFailureReason::IsAsleep => "is fast asleep.",
            ActionFailureReason::IsFrozen => "is frozen solid!",
            ActionFailureReason::IsParalyzed => "is fully paralyzed!",
        }
    }

    fn format_weather_started(weather: Weather) -> String {
        match weather {
            Weather::Sandstorm => "A sandstorm brewed!".to_string(),
            Weather::Rain => "It started to rain!".to_string(),
            Weather::Sun => "The sunlight turned harsh!".to_string(),
            Weather::Hail => "It started to hail!".to_string(),
            Weather::None => "The weather cleared.".to_string(),
        }
    }
}

/// Event bus for collecting and managing battle events.
///
/// ## Usage Examples
///
/// ```rust,ignore
/// event_bus.print_debug();                                    // Just print events
/// event_bus.print_debug_with_message("Turn 1 events:");      // With header message
/// event_bus.print_formatted(&battle_state);                  // Human-readable format
///
/// println!("{}", event_bus);                                  // Display: debug lines
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        tracing::debug!(?event, "battle event");
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print all events in debug format with a custom prefix message.
    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        self.print_debug();
    }

    /// Print all events using their formatted text, skipping silent ones.
    pub fn print_formatted(&self, battle_state: &BattleState) {
        for line in self.formatted_lines(battle_state) {
            println!("  {}", line);
        }
    }

    /// Human-readable lines for every non-silent event.
    pub fn formatted_lines(&self, battle_state: &BattleState) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| event.format(battle_state))
            .collect()
    }

    pub fn contains(&self, predicate: impl Fn(&BattleEvent) -> bool) -> bool {
        self.events.iter().any(predicate)
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    /// Format the EventBus for printing. Shows debug format of all events.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattleState {
    pub combatants: [Combatant; 2],
    pub sides: [Side; 2],
    pub field: Field,
    pub config: BattleConfig,
    pub turn_number: u32,
    pub game_state: GameState,
    pub action_queue: [Option<TurnAction>; 2],
}

impl BattleState {
    /// Start a battle from two combatant records. The records are copied in,
    /// so later changes to the caller's values do not reach the battle.
    pub fn new(
        player1: Combatant,
        player2: Combatant,
        config: BattleConfig,
    ) -> BattleResult<Self> {
        player1.validate()?;
        player2.validate()?;
        config.validate()?;
        Ok(Self {
            combatants: [player1, player2],
            sides: [Side::default(); 2],
            field: Field::default(),
            config,
            turn_number: 1,
            game_state: GameState::WaitingForActions,
            action_queue: [None, None],
        })
    }

    pub fn combatant(&self, player: PlayerTarget) -> &Combatant {
        &self.combatants[player.to_index()]
    }

    pub fn combatant_mut(&mut self, player: PlayerTarget) -> &mut Combatant {
        &mut self.combatants[player.to_index()]
    }

    pub fn side(&self, player: PlayerTarget) -> &Side {
        &self.sides[player.to_index()]
    }

    /// True once either combatant has fainted.
    pub fn is_battle_over(&self) -> bool {
        self.combatants.iter().any(Combatant::is_fainted)
    }

    pub fn winner(&self) -> Option<PlayerTarget> {
        match self.game_state {
            GameState::Player1Win => Some(PlayerTarget::Player1),
            GameState::Player2Win => Some(PlayerTarget::Player2),
            _ => None,
        }
    }

    /// Check both combatants against their invariants.
    pub fn validate(&self) -> Result<(), BattleStateError> {
        for combatant in &self.combatants {
            combatant.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod event_formatting_tests {
    use super::*;
    use crate::pokemon::BaseStats;
    use pretty_assertions::assert_eq;
    use schema::PokemonType;

    fn create_test_battle_state() -> BattleState {
        let pikachu = Combatant::new(
            25,
            PokemonType::Electric,
            None,
            BaseStats::new(55, 40, 50, 50, 90),
            35,
        );
        let charmander = Combatant::new(
            4,
            PokemonType::Fire,
            None,
            BaseStats::new(52, 43, 60, 50, 65),
            39,
        );
        BattleState::new(pikachu, charmander, BattleConfig::default()).unwrap()
    }

    #[test]
    fn test_silent_events_return_none() {
        let battle_state = create_test_battle_state();

        let silent_events = vec![
            BattleEvent::TurnEnded,
            BattleEvent::AttackTypeEffectiveness { multiplier: 4 },
        ];

        for event in silent_events {
            assert!(
                event.format(&battle_state).is_none(),
                "Event {:?} should be silent but returned text",
                event
            );
        }
    }

    #[test]
    fn test_event_text_samples() {
        let battle_state = create_test_battle_state();

        let turn_event = BattleEvent::TurnStarted { turn_number: 5 };
        assert_eq!(
            turn_event.format(&battle_state),
            Some("=== Turn 5 ===".to_string())
        );

        let move_event = BattleEvent::MoveUsed {
            player: PlayerTarget::Player1,
            move_used: Move::ThunderShock,
        };
        assert_eq!(
            move_event.format(&battle_state),
            Some("Player 1's #025 used ThunderShock!".to_string())
        );

        let effectiveness = BattleEvent::AttackTypeEffectiveness { multiplier: 2 };
        assert_eq!(
            effectiveness.format(&battle_state),
            Some("It's not very effective...".to_string())
        );
        let no_effect = BattleEvent::AttackTypeEffectiveness { multiplier: 0 };
        assert_eq!(
            no_effect.format(&battle_state),
            Some("It had no effect!".to_string())
        );

        let sharp_drop = BattleEvent::StatStageChanged {
            target: PlayerTarget::Player2,
            stat: StatType::Def,
            old_stage: 0,
            new_stage: -2,
        };
        assert_eq!(
            sharp_drop.format(&battle_state),
            Some("Player 2's #004's Defense sharply fell!".to_string())
        );
    }

    #[test]
    fn test_event_bus_printing_methods() {
        let mut event_bus = EventBus::new();
        let battle_state = create_test_battle_state();

        event_bus.push(BattleEvent::TurnStarted { turn_number: 1 });
        event_bus.push(BattleEvent::TurnEnded);
        event_bus.push(BattleEvent::PokemonFainted {
            player: PlayerTarget::Player2,
        });

        assert!(!event_bus.is_empty());
        assert_eq!(event_bus.len(), 3);
        assert_eq!(event_bus.formatted_lines(&battle_state).len(), 2);

        event_bus.print_debug();
        event_bus.print_debug_with_message("Test message:");
        event_bus.print_formatted(&battle_state);

        let display_output = format!("{}", event_bus);
        assert!(display_output.contains("TurnStarted"));
        assert!(display_output.contains("PokemonFainted"));
    }

    #[test]
    fn test_new_battle_rejects_invalid_combatant() {
        let mut broken = create_test_battle_state().combatants[0];
        broken.stat_stages.speed = 9;
        let other = create_test_battle_state().combatants[1];
        assert!(BattleState::new(broken, other, BattleConfig::default()).is_err());
    }
}
