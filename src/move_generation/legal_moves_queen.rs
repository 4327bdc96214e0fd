use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{slide_targets, ALL_DIRECTIONS};

/// Rook and bishop rays combined.
pub fn generate_queen_moves(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Square>) {
    slide_targets(&game_state.board, from, color, &ALL_DIRECTIONS, out);
}
