use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{slide_targets, ORTHOGONAL_DIRECTIONS};

pub fn generate_rook_moves(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Square>) {
    slide_targets(&game_state.board, from, color, &ORTHOGONAL_DIRECTIONS, out);
}
