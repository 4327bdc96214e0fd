//! Game status state machine values.
//!
//! `Active` is the only non-terminal status. Every other variant is final:
//! once entered, no moves, undo/redo or resignation are accepted until a new
//! game is started.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawReason {
    FiftyMove,
    ThreefoldRepetition,
    InsufficientMaterial,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawReason::FiftyMove => write!(f, "fifty-move"),
            DrawReason::ThreefoldRepetition => write!(f, "threefold-repetition"),
            DrawReason::InsufficientMaterial => write!(f, "insufficient-material"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Active,
    /// `loser` was to move, in check, with no legal move.
    Checkmate { loser: Color },
    Stalemate,
    Draw(DrawReason),
    /// That color's clock reached zero.
    Timeout(Color),
    /// That color resigned.
    Resigned(Color),
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Active
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { loser } => Some(loser.opposite()),
            GameStatus::Timeout(color) | GameStatus::Resigned(color) => Some(color.opposite()),
            GameStatus::Active | GameStatus::Stalemate | GameStatus::Draw(_) => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Active => write!(f, "Game in progress"),
            GameStatus::Checkmate { loser } => {
                write!(f, "{loser} is in checkmate! {} wins!", loser.opposite())
            }
            GameStatus::Stalemate => write!(f, "Stalemate!"),
            GameStatus::Draw(DrawReason::FiftyMove) => write!(f, "Draw by fifty-move rule!"),
            GameStatus::Draw(DrawReason::ThreefoldRepetition) => {
                write!(f, "Draw by threefold repetition!")
            }
            GameStatus::Draw(DrawReason::InsufficientMaterial) => {
                write!(f, "Draw by insufficient material!")
            }
            GameStatus::Timeout(color) => {
                write!(f, "Time's up for {color}! {} wins by timeout!", color.opposite())
            }
            GameStatus::Resigned(color) => {
                write!(f, "{color} resigned! {} wins!", color.opposite())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawReason, GameStatus};
    use crate::game_state::chess_types::Color;

    #[test]
    fn only_active_is_non_terminal() {
        assert!(!GameStatus::Active.is_terminal());
        for status in [
            GameStatus::Checkmate { loser: Color::White },
            GameStatus::Stalemate,
            GameStatus::Draw(DrawReason::FiftyMove),
            GameStatus::Timeout(Color::Black),
            GameStatus::Resigned(Color::White),
        ] {
            assert!(status.is_terminal(), "{status:?}");
        }
    }

    #[test]
    fn winners_and_status_lines() {
        assert_eq!(GameStatus::Checkmate { loser: Color::Black }.winner(), Some(Color::White));
        assert_eq!(GameStatus::Timeout(Color::White).winner(), Some(Color::Black));
        assert_eq!(GameStatus::Draw(DrawReason::ThreefoldRepetition).winner(), None);
        assert_eq!(
            GameStatus::Resigned(Color::White).to_string(),
            "White resigned! Black wins!"
        );
        assert_eq!(DrawReason::InsufficientMaterial.to_string(), "insufficient-material");
    }
}
