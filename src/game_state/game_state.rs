//! Current position aggregate.
//!
//! `GameState` bundles the placement grid with the metadata the rules need:
//! side to move, castling rights, en-passant target, clocks and tracked king
//! squares. It is exclusively owned by whoever drives the game and mutated
//! only through `legal_move_apply::apply_move`.

use serde::{Deserialize, Serialize};

use crate::errors::RulesResult;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{CastleSide, BACK_RANK};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // [color]
    pub king_squares: [Square; 2],
}

impl GameState {
    /// Standard starting position, White to move.
    pub fn new_game() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            let home = color.home_rank();
            let pawns = color.pawn_start_rank();
            for (file, kind) in BACK_RANK.iter().enumerate() {
                let file = file as u8;
                board.set_piece(Square::fixed(home, file), Some(Piece::new(color, *kind)));
                board.set_piece(
                    Square::fixed(pawns, file),
                    Some(Piece::new(color, PieceKind::Pawn)),
                );
            }
        }

        Self {
            board,
            side_to_move: Color::White,
            castling_rights: CASTLE_ALL,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            king_squares: [Square::fixed(0, 4), Square::fixed(7, 4)],
        }
    }

    #[inline]
    pub fn from_fen(fen: &str) -> RulesResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    #[inline]
    pub fn has_castling_right(&self, color: Color, side: CastleSide) -> bool {
        self.castling_rights & side.flag(color) != 0
    }

    #[inline]
    pub fn revoke_castling_right(&mut self, color: Color, side: CastleSide) {
        self.castling_rights &= !side.flag(color);
    }

    /// Whether the side to move is currently in check.
    pub fn is_in_check(&self) -> bool {
        is_king_in_check(&self.board, self.side_to_move)
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn new_game_matches_starting_fen() {
        let game = GameState::new_game();
        assert_eq!(game.to_fen(), STARTING_POSITION_FEN);
        assert_eq!(
            GameState::from_fen(STARTING_POSITION_FEN).expect("start FEN parses"),
            game
        );
    }

    #[test]
    fn tracked_kings_match_the_board() {
        let game = GameState::new_game();
        for color in Color::ALL {
            assert_eq!(game.board.find_king(color), Some(game.king_square(color)));
            assert_eq!(game.board.count(color, PieceKind::King), 1);
            assert_eq!(game.board.count(color, PieceKind::Pawn), 8);
        }
        assert!(!game.is_in_check());
    }
}
