use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{slide_targets, DIAGONAL_DIRECTIONS};

pub fn generate_bishop_moves(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Square>) {
    slide_targets(&game_state.board, from, color, &DIAGONAL_DIRECTIONS, out);
}
