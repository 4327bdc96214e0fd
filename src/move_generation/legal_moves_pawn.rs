use crate::game_state::{chess_types::*, game_state::GameState};

/// Pawn destinations: single push, double push from the start rank, diagonal
/// captures, and en passant onto the tracked target.
pub fn generate_pawn_moves(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Square>) {
    let board = &game_state.board;
    let direction = color.pawn_direction();

    if let Some(one_step) = from.offset(direction, 0) {
        if board.is_empty(one_step) {
            out.push(one_step);

            if from.rank() == color.pawn_start_rank() {
                if let Some(two_step) = one_step.offset(direction, 0) {
                    if board.is_empty(two_step) {
                        out.push(two_step);
                    }
                }
            }
        }
    }

    for file_delta in [-1i8, 1i8] {
        let Some(to) = from.offset(direction, file_delta) else {
            continue;
        };

        match board.piece_at(to) {
            Some(target) if target.color != color => out.push(to),
            Some(_) => {}
            None if is_en_passant_capture(game_state, from, to, color) => out.push(to),
            None => {}
        }
    }
}

/// `to` is the tracked en-passant target, diagonally ahead of `from`, and the
/// square behind it holds an opposing pawn.
fn is_en_passant_capture(game_state: &GameState, from: Square, to: Square, color: Color) -> bool {
    if game_state.en_passant_square != Some(to) {
        return false;
    }
    if i16::from(to.rank()) - i16::from(from.rank()) != i16::from(color.pawn_direction()) {
        return false;
    }
    to.offset(-color.pawn_direction(), 0)
        .and_then(|behind| game_state.piece_at(behind))
        .is_some_and(|piece| piece.is(color.opposite(), PieceKind::Pawn))
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::{chess_types::*, game_state::GameState};

    fn sq(label: &str) -> Square {
        Square::from_algebraic(label).expect("test square should parse")
    }

    fn targets(fen: &str, from: &str) -> Vec<Square> {
        let game = GameState::from_fen(fen).expect("fixture FEN should parse");
        let from = sq(from);
        let color = game.piece_at(from).expect("fixture has a pawn").color;
        let mut out = Vec::new();
        generate_pawn_moves(&game, from, color, &mut out);
        out.sort();
        out
    }

    #[test]
    fn start_rank_pawn_pushes_one_or_two() {
        let mut expected = vec![sq("e3"), sq("e4")];
        expected.sort();
        assert_eq!(targets(crate::game_state::chess_rules::STARTING_POSITION_FEN, "e2"), expected);
    }

    #[test]
    fn double_push_needs_both_squares_empty() {
        assert!(targets("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", "e2").is_empty());
        assert_eq!(targets("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1", "e2"), vec![sq("e3")]);
    }

    #[test]
    fn captures_only_onto_opposing_pieces() {
        let mut expected = vec![sq("d6"), sq("e6")];
        expected.sort();
        assert_eq!(targets("4k3/8/3n1N2/4P3/8/8/8/4K3 w - - 0 1", "e5"), expected);
    }

    #[test]
    fn black_pawns_move_down_the_board() {
        let mut expected = vec![sq("d6"), sq("d5")];
        expected.sort();
        assert_eq!(targets("4k3/3p4/8/8/8/8/8/4K3 b - - 0 1", "d7"), expected);
    }

    #[test]
    fn en_passant_requires_an_enemy_pawn_behind_the_target() {
        let fen = "4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1";
        let mut expected = vec![sq("d3"), sq("e3")];
        expected.sort();
        assert_eq!(targets(fen, "d4"), expected);

        // Same target, but the pawn that "double-pushed" is gone.
        assert_eq!(targets("4k3/8/8/8/3p4/8/8/4K3 b - e3 0 1", "d4"), vec![sq("d3")]);
    }
}
