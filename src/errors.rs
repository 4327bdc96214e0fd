//! Error types for rules-engine requests.
//!
//! Every variant is a local, non-fatal rejection: the engine state is left
//! unchanged and the caller may retry. Selecting an empty or foreign square
//! is not an error at all (it simply has no legal moves), and off-board
//! probes never surface here.

use thiserror::Error;

use crate::game::status::GameStatus;
use crate::game_state::chess_types::Square;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// Destination is not in the legal set for the piece on `from`.
    #[error("Illegal move: {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    /// Undo/redo target outside the recorded history. `requested` is `None`
    /// when the step count does not even land on a representable index.
    #[error(
        "Invalid history index {} (history holds {len} snapshots)",
        history_index_text(.requested)
    )]
    InvalidHistoryIndex { requested: Option<usize>, len: usize },

    /// The game has reached a terminal status and accepts no more requests.
    #[error("Game is over: {0}")]
    GameOver(GameStatus),

    #[error("Invalid FEN: {0}")]
    InvalidFen(String),

    #[error("Invalid algebraic square: {0:?}")]
    InvalidAlgebraic(String),

    /// Executor asked to move from an empty square.
    #[error("No piece on square {0}")]
    NoPieceOnSquare(Square),
}

pub type RulesResult<T> = Result<T, RulesError>;

fn history_index_text(requested: &Option<usize>) -> String {
    match requested {
        Some(index) => index.to_string(),
        None => "out of range".to_owned(),
    }
}
