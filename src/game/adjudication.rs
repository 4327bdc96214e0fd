//! End-of-game detection after a move.
//!
//! Checks run in a fixed order: no legal move (mate or stalemate), the
//! fifty-move rule, threefold repetition, then insufficient material. Clock
//! expiry is reported separately by the clock coordinator.

use crate::game::status::{DrawReason, GameStatus};
use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVES, REPETITION_LIMIT};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::has_any_legal_move;

/// Status of `game_state`, given how many times its placement has occurred so
/// far including this occurrence.
pub fn evaluate_position(game_state: &GameState, occurrences: usize) -> GameStatus {
    if !has_any_legal_move(game_state) {
        return if game_state.is_in_check() {
            GameStatus::Checkmate {
                loser: game_state.side_to_move,
            }
        } else {
            GameStatus::Stalemate
        };
    }
    if is_fifty_move_draw(game_state) {
        return GameStatus::Draw(DrawReason::FiftyMove);
    }
    if occurrences >= REPETITION_LIMIT {
        return GameStatus::Draw(DrawReason::ThreefoldRepetition);
    }
    if is_insufficient_material(game_state) {
        return GameStatus::Draw(DrawReason::InsufficientMaterial);
    }
    GameStatus::Active
}

#[inline]
pub fn is_fifty_move_draw(game_state: &GameState) -> bool {
    game_state.halfmove_clock >= FIFTY_MOVE_HALFMOVES
}

/// Lone kings, or king and a single minor piece against a lone king.
/// Same-colored bishop endings and other composite draws are not recognised.
pub fn is_insufficient_material(game_state: &GameState) -> bool {
    let mut extras = game_state
        .board
        .pieces()
        .filter(|(_, piece)| piece.kind != PieceKind::King);

    match (extras.next(), extras.next()) {
        (None, _) => true,
        (Some((_, piece)), None) => matches!(piece.kind, PieceKind::Bishop | PieceKind::Knight),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("valid FEN")
    }

    #[test]
    fn recognised_insufficient_sets() {
        assert!(is_insufficient_material(&state("8/8/8/4k3/8/8/8/4K3 w - - 0 1")));
        assert!(is_insufficient_material(&state("8/8/8/4k3/8/8/8/2B1K3 w - - 0 1")));
        assert!(is_insufficient_material(&state("8/8/2n5/4k3/8/8/8/4K3 w - - 0 1")));

        // Two minors, a pawn, or a minor each are all "sufficient" here.
        assert!(!is_insufficient_material(&state("8/8/8/4k3/8/8/8/1NB1K3 w - - 0 1")));
        assert!(!is_insufficient_material(&state("8/8/8/4k3/8/8/4P3/4K3 w - - 0 1")));
        assert!(!is_insufficient_material(&state("8/8/2b5/4k3/8/8/8/2B1K3 w - - 0 1")));
    }

    #[test]
    fn mate_outranks_every_draw_rule() {
        // Back-rank mate with the halfmove clock already past the limit.
        let mated = state("R5k1/5ppp/8/8/8/8/8/6K1 b - - 120 80");
        assert_eq!(
            evaluate_position(&mated, 3),
            GameStatus::Checkmate { loser: Color::Black }
        );
    }

    #[test]
    fn stalemate_is_detected_before_material() {
        let stalemate = state("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(evaluate_position(&stalemate, 1), GameStatus::Stalemate);
    }

    #[test]
    fn fifty_move_rule_ignores_material_and_mobility() {
        let position = state("4k3/8/8/8/8/8/8/R3K2R b KQ - 100 90");
        assert_eq!(
            evaluate_position(&position, 1),
            GameStatus::Draw(DrawReason::FiftyMove)
        );
        let almost = state("4k3/8/8/8/8/8/8/R3K2R b KQ - 99 90");
        assert_eq!(evaluate_position(&almost, 1), GameStatus::Active);
    }

    #[test]
    fn repetition_triggers_on_the_third_occurrence() {
        let start = GameState::new_game();
        assert_eq!(evaluate_position(&start, 2), GameStatus::Active);
        assert_eq!(
            evaluate_position(&start, 3),
            GameStatus::Draw(DrawReason::ThreefoldRepetition)
        );
    }
}
