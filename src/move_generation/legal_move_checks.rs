//! Attack detection.
//!
//! Attacks are recomputed from board contents on every query; nothing is
//! cached between calls.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{
    first_blocker, Offset, DIAGONAL_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS,
    ORTHOGONAL_DIRECTIONS,
};

/// Whether any piece of `attacker_color` attacks `square`.
///
/// Enemy king adjacency counts as an attack. Kings never give check, but a
/// king may not step next to the other king, and this is how that is
/// enforced.
pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    let straight = [PieceKind::Rook, PieceKind::Queen];
    let diagonal = [PieceKind::Bishop, PieceKind::Queen];
    if ray_attacker(board, square, attacker_color, &ORTHOGONAL_DIRECTIONS, &straight)
        || ray_attacker(board, square, attacker_color, &DIAGONAL_DIRECTIONS, &diagonal)
    {
        return true;
    }

    if offset_attacker(board, square, attacker_color, &KNIGHT_OFFSETS, PieceKind::Knight) {
        return true;
    }

    // An attacking pawn sits one step behind the target, relative to its own
    // direction of travel, on an adjacent file.
    let behind = -attacker_color.pawn_direction();
    if offset_attacker(board, square, attacker_color, &[(behind, -1), (behind, 1)], PieceKind::Pawn) {
        return true;
    }

    offset_attacker(board, square, attacker_color, &KING_OFFSETS, PieceKind::King)
}

fn ray_attacker(
    board: &Board,
    square: Square,
    attacker_color: Color,
    directions: &[Offset],
    kinds: &[PieceKind],
) -> bool {
    directions.iter().any(|&direction| {
        first_blocker(board, square, direction)
            .is_some_and(|(_, piece)| piece.color == attacker_color && kinds.contains(&piece.kind))
    })
}

fn offset_attacker(
    board: &Board,
    square: Square,
    attacker_color: Color,
    offsets: &[Offset],
    kind: PieceKind,
) -> bool {
    let rank = square.rank() as i8;
    let file = square.file() as i8;
    offsets.iter().any(|&(rank_delta, file_delta)| {
        board
            .piece_at_coords(rank + rank_delta, file + file_delta)
            .is_some_and(|piece| piece.is(attacker_color, kind))
    })
}

/// Locate `color`'s king on `board` and test it against the opponent.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    board
        .find_king(color)
        .is_some_and(|king| is_square_attacked(board, king, color.opposite()))
}
