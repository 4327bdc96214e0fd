//! Direction tables and occupancy-aware walkers shared by the per-piece
//! generators and the attack detector.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// `(rank_delta, file_delta)` pairs.
pub type Offset = (i8, i8);

pub const ORTHOGONAL_DIRECTIONS: [Offset; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const DIAGONAL_DIRECTIONS: [Offset; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ALL_DIRECTIONS: [Offset; 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub const KNIGHT_OFFSETS: [Offset; 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

pub const KING_OFFSETS: [Offset; 8] = ALL_DIRECTIONS;

/// Destination is usable by `color` if empty or holding an opposing piece.
#[inline]
pub fn is_open_for(board: &Board, square: Square, color: Color) -> bool {
    board.piece_at(square).map_or(true, |piece| piece.color != color)
}

/// Fixed-offset targets (knight, king).
pub fn step_targets(board: &Board, from: Square, color: Color, offsets: &[Offset], out: &mut Vec<Square>) {
    for &(rank_delta, file_delta) in offsets {
        if let Some(to) = from.offset(rank_delta, file_delta) {
            if is_open_for(board, to, color) {
                out.push(to);
            }
        }
    }
}

/// Ray targets (bishop, rook, queen). Each ray stops at the first occupied
/// square, which is included only when it holds an opposing piece.
pub fn slide_targets(board: &Board, from: Square, color: Color, directions: &[Offset], out: &mut Vec<Square>) {
    for &(rank_delta, file_delta) in directions {
        let mut cursor = from.offset(rank_delta, file_delta);
        while let Some(to) = cursor {
            match board.piece_at(to) {
                None => out.push(to),
                Some(blocker) => {
                    if blocker.color != color {
                        out.push(to);
                    }
                    break;
                }
            }
            cursor = to.offset(rank_delta, file_delta);
        }
    }
}

/// First occupied square along a ray, if any.
pub fn first_blocker(board: &Board, from: Square, direction: Offset) -> Option<(Square, Piece)> {
    let (rank_delta, file_delta) = direction;
    let mut cursor = from.offset(rank_delta, file_delta);
    while let Some(square) = cursor {
        if let Some(piece) = board.piece_at(square) {
            return Some((square, piece));
        }
        cursor = square.offset(rank_delta, file_delta);
    }
    None
}
