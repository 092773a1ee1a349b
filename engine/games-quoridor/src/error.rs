//! Error types raised by the Quoridor engine.

use engine_core::Player;
use thiserror::Error;

/// Errors returned when constructing a game or applying an action
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoridorError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("action {action} is out of range (action size {size})")]
    ActionOutOfRange { action: usize, size: usize },

    #[error("player {player} tried to move but it is player {to_move}'s turn")]
    NotPlayersTurn { player: Player, to_move: Player },

    #[error("game is already over")]
    GameOver,

    #[error("pawn move {action} is not legal in this position")]
    IllegalMove { action: usize },

    #[error("wall action {action} rejected: {reason}")]
    InvalidWallPlacement {
        action: usize,
        reason: WallRejection,
    },
}

/// Why a wall placement was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum WallRejection {
    #[error("slot already holds a wall")]
    Occupied,

    #[error("crosses a wall of the other orientation")]
    Crossing,

    #[error("overlaps a neighbouring wall")]
    Overlap,

    #[error("no walls left")]
    NoWallsLeft,

    #[error("would cut player {0} off from their goal row")]
    SealsPath(Player),
}
