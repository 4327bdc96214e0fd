//! Leaf-node counting over the full apply-move path.
//!
//! Used to cross-check move generation against published node counts.
//! Promotion always yields a queen here, so only positions without
//! promotions inside the searched depth match the standard tables.

use crate::errors::RulesResult;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::all_legal_moves;

pub fn perft(game_state: &GameState, depth: u8) -> RulesResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = all_legal_moves(game_state);
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for (from, to) in moves {
        let mut next = game_state.clone();
        apply_move(&mut next, from, to)?;
        nodes += perft(&next, depth - 1)?;
    }
    Ok(nodes)
}

/// Per-root-move node counts, sorted by move text.
pub fn perft_divide(game_state: &GameState, depth: u8) -> RulesResult<Vec<(String, u64)>> {
    let mut out = Vec::new();
    for (from, to) in all_legal_moves(game_state) {
        let mut next = game_state.clone();
        apply_move(&mut next, from, to)?;
        out.push((format!("{from}{to}"), perft(&next, depth.saturating_sub(1))?));
    }
    out.sort();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{perft, perft_divide};
    use crate::game_state::game_state::GameState;

    #[test]
    fn start_position_node_counts() {
        let game = GameState::new_game();
        assert_eq!(perft(&game, 1).expect("perft 1"), 20);
        assert_eq!(perft(&game, 2).expect("perft 2"), 400);
        assert_eq!(perft(&game, 3).expect("perft 3"), 8902);
    }

    #[test]
    fn rook_and_pawn_endgame_node_counts() {
        let game = GameState::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").expect("fixture FEN");
        assert_eq!(perft(&game, 1).expect("perft 1"), 14);
        assert_eq!(perft(&game, 2).expect("perft 2"), 191);
        assert_eq!(perft(&game, 3).expect("perft 3"), 2812);
    }

    #[test]
    fn castling_heavy_position_depth_one_and_two() {
        let game = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("fixture FEN");
        assert_eq!(perft(&game, 1).expect("perft 1"), 48);
        assert_eq!(perft(&game, 2).expect("perft 2"), 2039);
    }

    #[test]
    fn divide_sums_to_perft() {
        let game = GameState::new_game();
        let divided = perft_divide(&game, 2).expect("divide");
        assert_eq!(divided.len(), 20);
        assert_eq!(divided.iter().map(|(_, n)| n).sum::<u64>(), 400);
    }
}
