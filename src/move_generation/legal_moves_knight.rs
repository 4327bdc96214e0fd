use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{step_targets, KNIGHT_OFFSETS};

pub fn generate_knight_moves(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Square>) {
    step_targets(&game_state.board, from, color, &KNIGHT_OFFSETS, out);
}

#[cfg(test)]
mod tests {
    use super::generate_knight_moves;
    use crate::game_state::{chess_types::*, game_state::GameState};

    #[test]
    fn knight_skips_own_pieces_and_captures_enemies() {
        let game = GameState::from_fen("4k3/8/8/2p5/8/3N4/1P6/4K3 w - - 0 1").expect("fixture FEN");
        let d3 = Square::from_algebraic("d3").expect("d3");
        let mut out = Vec::new();
        generate_knight_moves(&game, d3, Color::White, &mut out);

        assert_eq!(out.len(), 6);
        assert!(out.contains(&Square::from_algebraic("c5").expect("c5")));
        assert!(!out.contains(&Square::from_algebraic("b2").expect("b2")));
    }
}
