//! Canonical rule constants and castling geometry.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Back-rank piece order from the a-file to the h-file.
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Halfmoves without a pawn move or capture that end the game in a draw.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Occurrences of one placement that end the game in a draw.
pub const REPETITION_LIMIT: usize = 3;

pub const KING_HOME_FILE: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    pub const fn flag(self, color: Color) -> CastlingRights {
        match (color, self) {
            (Color::White, CastleSide::Kingside) => CASTLE_WHITE_KINGSIDE,
            (Color::White, CastleSide::Queenside) => CASTLE_WHITE_QUEENSIDE,
            (Color::Black, CastleSide::Kingside) => CASTLE_BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queenside) => CASTLE_BLACK_QUEENSIDE,
        }
    }

    pub const fn rook_home_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    pub const fn king_destination_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    pub const fn rook_destination_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }

    /// Files strictly between king and rook; all must be empty.
    pub const fn between_files(self) -> &'static [u8] {
        match self {
            CastleSide::Kingside => &[5, 6],
            CastleSide::Queenside => &[1, 2, 3],
        }
    }

    /// Files the king crosses, destination included; none may be attacked.
    pub const fn transit_files(self) -> &'static [u8] {
        match self {
            CastleSide::Kingside => &[5, 6],
            CastleSide::Queenside => &[3, 2],
        }
    }

    /// Side implied by a king landing on `file` from its home square.
    pub const fn from_king_destination(file: u8) -> Option<Self> {
        match file {
            6 => Some(CastleSide::Kingside),
            2 => Some(CastleSide::Queenside),
            _ => None,
        }
    }

    /// Side whose rook starts on `square`, if it is a rook home corner of `color`.
    pub fn from_rook_home(color: Color, square: Square) -> Option<Self> {
        if square.rank() != color.home_rank() {
            return None;
        }
        CastleSide::BOTH
            .into_iter()
            .find(|side| side.rook_home_file() == square.file())
    }
}

#[inline]
pub const fn king_home(color: Color) -> Square {
    Square::fixed(color.home_rank(), KING_HOME_FILE)
}
