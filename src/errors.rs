use crate::player::PlayerTarget;
use thiserror::Error;

/// Main error type for the battle engine's public surface.
///
/// In-battle outcomes (misses, blocked moves, immunities) are never errors;
/// they are recorded on the move context and reported as events. These
/// errors only cover misuse of the API and bad configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleEngineError {
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to battle state validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleStateError {
    /// A combatant record breaks an invariant
    #[error("Inconsistent battle state: {0}")]
    InconsistentState(String),
    /// The battle has already ended
    #[error("The battle is already over")]
    BattleOver,
}

/// Errors related to submitted actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The action names a different player than the slot it was submitted for
    #[error("Action for {expected:?} was submitted by {actual:?}")]
    WrongPlayer {
        expected: PlayerTarget,
        actual: PlayerTarget,
    },
    /// An action is already queued for this player
    #[error("{0:?} already submitted an action this turn")]
    AlreadySubmitted(PlayerTarget),
    /// Turn resolution was requested before both actions were queued
    #[error("No action queued for {0:?}")]
    MissingAction(PlayerTarget),
}

/// Errors related to loading configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Could not read config: {0}")]
    Io(String),
    #[error("Malformed config: {0}")]
    Parse(String),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(err: ron::error::SpannedError) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;
