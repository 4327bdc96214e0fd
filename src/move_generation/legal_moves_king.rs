use crate::game_state::chess_rules::{king_home, CastleSide};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::{step_targets, KING_OFFSETS};

pub fn generate_king_moves(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Square>) {
    step_targets(&game_state.board, from, color, &KING_OFFSETS, out);
    generate_castling_moves(game_state, from, color, out);
}

/// Emits only the king's two-square destination; the rook hop happens when
/// the move is applied.
fn generate_castling_moves(game_state: &GameState, king_from: Square, color: Color, out: &mut Vec<Square>) {
    if king_from != king_home(color) {
        return;
    }

    let board = &game_state.board;
    let enemy = color.opposite();
    let rank = color.home_rank();
    let on_home_rank = |file: u8| Square::fixed(rank, file);

    // Cannot castle out of check.
    if is_square_attacked(board, king_from, enemy) {
        return;
    }

    for side in CastleSide::BOTH {
        if !game_state.has_castling_right(color, side) {
            continue;
        }

        let rook_present = board
            .piece_at(on_home_rank(side.rook_home_file()))
            .is_some_and(|piece| piece.is(color, PieceKind::Rook));
        let path_clear = side
            .between_files()
            .iter()
            .all(|&file| board.is_empty(on_home_rank(file)));
        let transit_safe = side
            .transit_files()
            .iter()
            .all(|&file| !is_square_attacked(board, on_home_rank(file), enemy));

        if rook_present && path_clear && transit_safe {
            out.push(on_home_rank(side.king_destination_file()));
        }
    }
}
