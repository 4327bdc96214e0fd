//! Core value types shared by every rules component.
//!
//! Pieces are tagged `(kind, color)` pairs and squares are bounds-checked
//! `(rank, file)` coordinates, so no component ever decodes identity from
//! characters or walks off the board.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::RulesError;

/// Player color. White moves first and owns rank index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a single pawn push.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    #[inline]
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lowercase FEN letter.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// An occupant of a square. Empty squares are `Option::<Piece>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { kind, color }
    }

    #[inline]
    pub fn is(self, color: Color, kind: PieceKind) -> bool {
        self.color == color && self.kind == kind
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub fn fen_char(self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else if ch.is_ascii_lowercase() {
            Color::Black
        } else {
            return None;
        };
        let kind = PieceKind::from_letter(ch.to_ascii_lowercase())?;
        Some(Self::new(color, kind))
    }

    pub const fn glyph(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }
}

/// Board coordinate. Both components are always in `0..8`; rank 0 is
/// White's home rank and file 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    #[inline]
    pub const fn new(rank: u8, file: u8) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Self { rank, file })
        } else {
            None
        }
    }

    /// Compile-time constructor for rule tables.
    pub(crate) const fn fixed(rank: u8, file: u8) -> Self {
        assert!(rank < 8 && file < 8);
        Self { rank, file }
    }

    /// Signed-coordinate constructor used by ray projection; anything off the
    /// board is simply `None`.
    #[inline]
    pub const fn from_coords(rank: i8, file: i8) -> Option<Self> {
        if rank >= 0 && rank < 8 && file >= 0 && file < 8 {
            Some(Self {
                rank: rank as u8,
                file: file as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// `a1 == 0`, `h1 == 7`, `h8 == 63`.
    #[inline]
    pub const fn index(self) -> usize {
        (self.rank as usize) * 8 + self.file as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 64 {
            Some(Self {
                rank: (index / 8) as u8,
                file: (index % 8) as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub const fn offset(self, rank_delta: i8, file_delta: i8) -> Option<Self> {
        Self::from_coords(self.rank as i8 + rank_delta, self.file as i8 + file_delta)
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).filter_map(Square::from_index)
    }

    /// Parse a label such as `e4`.
    pub fn from_algebraic(label: &str) -> Result<Self, RulesError> {
        let bytes = label.as_bytes();
        if bytes.len() != 2 {
            return Err(RulesError::InvalidAlgebraic(label.to_owned()));
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(RulesError::InvalidAlgebraic(label.to_owned()));
        }
        Ok(Self {
            rank: rank - b'1',
            file: file - b'a',
        })
    }

    pub fn to_algebraic(self) -> String {
        format!(
            "{}{}",
            char::from(b'a' + self.file),
            char::from(b'1' + self.rank)
        )
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.file),
            char::from(b'1' + self.rank)
        )
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_algebraic()
    }
}

impl TryFrom<String> for Square {
    type Error = RulesError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Square::from_algebraic(&label)
    }
}

/// Castling rights bitmask, one flag per color and side.
pub type CastlingRights = u8;

pub const CASTLE_WHITE_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_WHITE_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_BLACK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_BLACK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights =
    CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE | CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algebraic_labels_map_to_rank_and_file() {
        let e4 = Square::from_algebraic("e4").expect("e4 should parse");
        assert_eq!((e4.rank(), e4.file()), (3, 4));
        assert_eq!(e4.index(), 28);
        assert_eq!(Square::from_index(63).map(Square::to_algebraic).as_deref(), Some("h8"));
        assert_eq!(e4.to_string(), "e4");
    }

    #[test]
    fn malformed_labels_are_rejected() {
        for label in ["", "e", "i1", "a9", "a0", "e44"] {
            assert!(Square::from_algebraic(label).is_err(), "{label} should not parse");
        }
    }

    #[test]
    fn offsets_off_the_board_are_none() {
        let a1 = Square::fixed(0, 0);
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, -1), None);
        assert_eq!(Square::fixed(7, 7).offset(1, 1), None);
        assert_eq!(a1.offset(2, 1), Some(Square::fixed(2, 1)));
    }

    #[test]
    fn fen_letters_carry_color_and_kind() {
        let white_knight = Piece::from_fen_char('N').expect("N is a piece");
        assert!(white_knight.is(Color::White, PieceKind::Knight));
        let black_queen = Piece::from_fen_char('q').expect("q is a piece");
        assert!(black_queen.is(Color::Black, PieceKind::Queen));
        assert_eq!(black_queen.fen_char(), 'q');
        assert_eq!(Piece::from_fen_char('x'), None);
        assert_eq!(Piece::from_fen_char('3'), None);
    }
}
