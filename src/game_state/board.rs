//! 8x8 placement grid.
//!
//! A pure storage abstraction with no legality awareness. Reads outside the
//! board yield an empty square so ray walks can probe freely.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::*;
use crate::utils::fen_generator::placement_field;

/// Piece placement indexed `[rank][file]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.rank() as usize][square.file() as usize]
    }

    /// Bounds-checked read on raw coordinates; anything off the board reads
    /// as empty. Used by the fixed-offset attack probes.
    #[inline]
    pub fn piece_at_coords(&self, rank: i8, file: i8) -> Option<Piece> {
        Square::from_coords(rank, file).and_then(|square| self.piece_at(square))
    }

    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.rank() as usize][square.file() as usize] = piece;
    }

    #[inline]
    pub fn take_piece(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.rank() as usize][square.file() as usize].take()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Occupied squares in `a1..h8` order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| self.piece_at(square).map(|piece| (square, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }

    pub fn count(&self, color: Color, kind: PieceKind) -> usize {
        self.pieces_of(color)
            .filter(|(_, piece)| piece.kind == kind)
            .count()
    }

    pub fn repetition_key(&self) -> RepetitionKey {
        RepetitionKey(placement_field(self))
    }
}

/// Placement-only position fingerprint: rank-major, empty runs compressed.
/// Turn, castling rights and en-passant target do not participate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepetitionKey(String);

impl RepetitionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
