//! Legal move generation pipeline.
//!
//! Per-piece pseudo-legal generation followed by a single legality oracle:
//! each candidate is simulated on a scratch board, the mover's king is tested
//! for check, and the simulation is undone. Pins, discovered checks and
//! check evasions all fall out of that one test.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{simulate_move, undo_simulated_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;

/// Destinations for the piece on `from` that respect its movement pattern
/// and occupancy, ignoring self-check. Empty for an empty square.
pub fn pseudo_legal_moves(game_state: &GameState, from: Square) -> Vec<Square> {
    let mut out = Vec::with_capacity(28);
    let Some(piece) = game_state.piece_at(from) else {
        return out;
    };

    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(game_state, from, piece.color, &mut out),
        PieceKind::Knight => generate_knight_moves(game_state, from, piece.color, &mut out),
        PieceKind::Bishop => generate_bishop_moves(game_state, from, piece.color, &mut out),
        PieceKind::Rook => generate_rook_moves(game_state, from, piece.color, &mut out),
        PieceKind::Queen => generate_queen_moves(game_state, from, piece.color, &mut out),
        PieceKind::King => generate_king_moves(game_state, from, piece.color, &mut out),
    }

    out
}

/// Fully legal destinations for the piece on `from`.
///
/// Selecting an empty square or a piece of the side not to move yields no
/// moves rather than an error.
pub fn legal_moves(game_state: &GameState, from: Square) -> Vec<Square> {
    let Some(piece) = game_state.piece_at(from) else {
        return Vec::new();
    };
    if piece.color != game_state.side_to_move {
        return Vec::new();
    }

    let mut scratch = game_state.board;
    pseudo_legal_moves(game_state, from)
        .into_iter()
        .filter(|&to| {
            let Some(undo) = simulate_move(&mut scratch, from, to, game_state.en_passant_square) else {
                return false;
            };
            let exposes_king = is_king_in_check(&scratch, piece.color);
            undo_simulated_move(&mut scratch, undo);
            !exposes_king
        })
        .collect()
}

/// Every legal `(from, to)` pair for the side to move.
pub fn all_legal_moves(game_state: &GameState) -> Vec<(Square, Square)> {
    game_state
        .board
        .pieces_of(game_state.side_to_move)
        .flat_map(|(from, _)| legal_moves(game_state, from).into_iter().map(move |to| (from, to)))
        .collect()
}

/// Short-circuiting "any legal move at all" for mate/stalemate detection.
pub fn has_any_legal_move(game_state: &GameState) -> bool {
    game_state
        .board
        .pieces_of(game_state.side_to_move)
        .any(|(from, _)| !legal_moves(game_state, from).is_empty())
}

/// True when the side to move has no legal move, whether mated or stalemated.
#[inline]
pub fn is_checkmate_or_stalemate(game_state: &GameState) -> bool {
    !has_any_legal_move(game_state)
}
