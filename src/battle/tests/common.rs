use crate::battle::commands::{MoveContext, MoveOutcome};
use crate::battle::move_effects::execute_move;
use crate::battle::rng::TurnRng;
use crate::battle::state::{BattleEvent, BattleState, EventBus};
use crate::config::BattleConfig;
use crate::errors::BattleResult;
use crate::player::{PlayerTarget, TurnAction};
use crate::pokemon::{BaseStats, Combatant, StatusCondition};
use schema::{Move, PokemonType};

/// A builder for creating test combatants with common defaults.
///
/// # Example
/// ```ignore
/// let pokemon = TestCombatantBuilder::new(PokemonType::Electric)
///     .with_stats(55, 40, 50, 50, 90)
///     .with_status(StatusCondition::Paralysis)
///     .build();
/// ```
pub struct TestCombatantBuilder {
    species_id: u16,
    primary_type: PokemonType,
    secondary_type: Option<PokemonType>,
    stats: BaseStats,
    max_hp: u16,
    current_hp: Option<u16>,
    status: Option<StatusCondition>,
}

impl TestCombatantBuilder {
    /// Creates a builder with 50 in every stat and 100 max HP.
    pub fn new(primary_type: PokemonType) -> Self {
        Self {
            species_id: 1,
            primary_type,
            secondary_type: None,
            stats: BaseStats::new(50, 50, 50, 50, 50),
            max_hp: 100,
            current_hp: None,
            status: None,
        }
    }

    pub fn with_species(mut self, species_id: u16) -> Self {
        self.species_id = species_id;
        self
    }

    pub fn with_secondary_type(mut self, secondary_type: PokemonType) -> Self {
        self.secondary_type = Some(secondary_type);
        self
    }

    pub fn with_stats(
        mut self,
        attack: u16,
        defense: u16,
        sp_attack: u16,
        sp_defense: u16,
        speed: u16,
    ) -> Self {
        self.stats = BaseStats::new(attack, defense, sp_attack, sp_defense, speed);
        self
    }

    pub fn with_speed(mut self, speed: u16) -> Self {
        self.stats.speed = speed;
        self
    }

    pub fn with_max_hp(mut self, max_hp: u16) -> Self {
        self.max_hp = max_hp;
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    pub fn build(self) -> Combatant {
        let mut pokemon = Combatant::new(
            self.species_id,
            self.primary_type,
            self.secondary_type,
            self.stats,
            self.max_hp,
        );
        pokemon.status = self.status;
        if let Some(hp) = self.current_hp {
            pokemon.set_hp(hp);
        }
        pokemon
    }
}

/// Creates a standard 1v1 battle state with the default config.
pub fn create_test_battle(p1_pokemon: Combatant, p2_pokemon: Combatant) -> BattleState {
    create_test_battle_with_config(p1_pokemon, p2_pokemon, BattleConfig::default())
}

pub fn create_test_battle_with_config(
    p1_pokemon: Combatant,
    p2_pokemon: Combatant,
    config: BattleConfig,
) -> BattleState {
    assert_ok(BattleState::new(p1_pokemon, p2_pokemon, config))
}

/// Two plain Normal types, Player 1 faster.
pub fn default_battle() -> BattleState {
    create_test_battle(
        TestCombatantBuilder::new(PokemonType::Normal)
            .with_species(1)
            .with_speed(60)
            .build(),
        TestCombatantBuilder::new(PokemonType::Normal)
            .with_species(2)
            .with_speed(40)
            .build(),
    )
}

/// Run one move outside the turn engine.
pub fn use_move(
    state: &mut BattleState,
    user: PlayerTarget,
    move_used: Move,
    rng: &mut TurnRng,
) -> (MoveOutcome, EventBus) {
    let mut bus = EventBus::new();
    let outcome = execute_move(state, user, move_used, rng, &mut bus);
    (outcome, bus)
}

/// Run a closure against a fresh context for `user`.
pub fn with_context<R>(
    state: &mut BattleState,
    user: PlayerTarget,
    move_used: Move,
    rng: &mut TurnRng,
    f: impl FnOnce(&mut MoveContext) -> R,
) -> (R, EventBus) {
    let mut bus = EventBus::new();
    let mut ctx = MoveContext::new(state, user, move_used, rng, &mut bus);
    let result = f(&mut ctx);
    drop(ctx);
    (result, bus)
}

/// Queue a move for each player.
pub fn queue_moves(state: &mut BattleState, p1_move: Move, p2_move: Move) {
    state.action_queue = [
        Some(TurnAction::use_move(PlayerTarget::Player1, p1_move)),
        Some(TurnAction::use_move(PlayerTarget::Player2, p2_move)),
    ];
}

/// A `TurnRng` that fails the test if anything draws from it.
pub fn no_rng() -> TurnRng {
    TurnRng::new_for_test(vec![])
}

pub fn count_events(bus: &EventBus, predicate: impl Fn(&BattleEvent) -> bool) -> usize {
    bus.events().iter().filter(|event| predicate(event)).count()
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
