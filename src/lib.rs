// In: src/lib.rs

//! pokecalc battle engine
//!
//! Resolves one-on-one creature battles turn by turn: moves are built from
//! small commands over a shared context, and every state change is reported
//! as a `BattleEvent`.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod errors;
pub mod player;
pub mod pokemon;
pub mod setup;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    EffectParam, Fraction, Move, MoveCategory, MoveData, PokemonType, SemiInvulnerable, StatType,
    Target, Weather,
};

// --- From this crate's modules (`src/`) ---

// Core battle engine functions and state.
pub use battle::engine::{ready_for_turn_resolution, resolve_turn, submit_action, switch_in};
pub use battle::rng::TurnRng;
pub use battle::state::{BattleEvent, BattleState, EventBus, Field, GameState, Side};

// Core runtime types for a battle.
pub use config::BattleConfig;
pub use player::{PlayerTarget, TurnAction};
pub use pokemon::{BaseStats, Combatant, StatusCondition};
pub use setup::{BattleSetup, CombatantSetup};

// Crate-specific error and result types.
pub use errors::{ActionError, BattleEngineError, BattleResult, BattleStateError, ConfigError};
