use schema::Move;
use serde::{Deserialize, Serialize};

/// Identifies one of the two sides of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerTarget {
    Player1,
    Player2,
}

impl PlayerTarget {
    pub fn to_index(self) -> usize {
        match self {
            PlayerTarget::Player1 => 0,
            PlayerTarget::Player2 => 1,
        }
    }

    pub fn opponent(self) -> PlayerTarget {
        match self {
            PlayerTarget::Player1 => PlayerTarget::Player2,
            PlayerTarget::Player2 => PlayerTarget::Player1,
        }
    }

    /// `None` for anything other than 0 or 1.
    pub fn from_index(index: usize) -> Option<PlayerTarget> {
        match index {
            0 => Some(PlayerTarget::Player1),
            1 => Some(PlayerTarget::Player2),
            _ => None,
        }
    }

    pub fn both() -> [PlayerTarget; 2] {
        [PlayerTarget::Player1, PlayerTarget::Player2]
    }
}

impl std::fmt::Display for PlayerTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerTarget::Player1 => write!(f, "Player 1"),
            PlayerTarget::Player2 => write!(f, "Player 2"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    UseMove,
}

/// One player's choice for a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnAction {
    pub kind: ActionKind,
    pub player: PlayerTarget,
    /// Placeholder for a per-combatant move list; `move_used` is authoritative.
    pub move_slot: usize,
    pub move_used: Move,
}

impl TurnAction {
    pub fn use_move(player: PlayerTarget, move_used: Move) -> Self {
        Self {
            kind: ActionKind::UseMove,
            player,
            move_slot: 0,
            move_used,
        }
    }
}
