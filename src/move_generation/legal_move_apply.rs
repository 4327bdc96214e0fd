//! Move execution.
//!
//! `apply_move` is the only writer of a live `GameState`. It assumes the
//! destination was already validated by the legal move generator. The
//! `simulate_move`/`undo_simulated_move` pair works on a bare board and is
//! used for legality probing.

use tracing::debug;

use crate::errors::{RulesError, RulesResult};
use crate::game::move_log::MoveLogEntry;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::CastleSide;
use crate::game_state::{chess_types::*, game_state::GameState, undo_state::UndoState};

pub fn apply_move(game_state: &mut GameState, from: Square, to: Square) -> RulesResult<MoveLogEntry> {
    let moved_piece = game_state
        .piece_at(from)
        .ok_or(RulesError::NoPieceOnSquare(from))?;
    let moving_color = moved_piece.color;
    let is_pawn = moved_piece.kind == PieceKind::Pawn;
    let mut captured_piece = game_state.piece_at(to);

    let is_en_passant =
        is_pawn && captured_piece.is_none() && game_state.en_passant_square == Some(to);

    // Clocks.
    if is_pawn || captured_piece.is_some() || is_en_passant {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }

    // Castling rook hop.
    if moved_piece.kind == PieceKind::King
        && from.rank() == moving_color.home_rank()
        && (i16::from(to.file()) - i16::from(from.file())).abs() == 2
    {
        if let Some(side) = CastleSide::from_king_destination(to.file()) {
            let rank = moving_color.home_rank();
            let rook_from = Square::fixed(rank, side.rook_home_file());
            let rook_to = Square::fixed(rank, side.rook_destination_file());
            let rook = game_state.board.take_piece(rook_from);
            game_state.board.set_piece(rook_to, rook);
        }
    }

    // En-passant victim sits behind the target square.
    if is_en_passant {
        if let Some(victim_square) = to.offset(-moving_color.pawn_direction(), 0) {
            captured_piece = game_state.board.take_piece(victim_square);
        }
    }

    game_state.board.set_piece(from, None);
    game_state.board.set_piece(to, Some(moved_piece));

    if moved_piece.kind == PieceKind::King {
        game_state.king_squares[moving_color.index()] = to;
    }

    update_castling_rights(game_state, moved_piece, from, to);

    game_state.en_passant_square = if is_pawn && (i16::from(to.rank()) - i16::from(from.rank())).abs() == 2 {
        from.offset(moving_color.pawn_direction(), 0)
    } else {
        None
    };

    // Always a queen; there is no under-promotion.
    if is_pawn && to.rank() == moving_color.promotion_rank() {
        game_state
            .board
            .set_piece(to, Some(Piece::new(moving_color, PieceKind::Queen)));
    }

    game_state.side_to_move = moving_color.opposite();
    if game_state.side_to_move == Color::White {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    let entry = MoveLogEntry {
        color: moving_color,
        from,
        to,
        piece: moved_piece,
        captured: captured_piece,
    };
    debug!(move_text = %entry.notation(), fen = %game_state.to_fen(), "applied move");
    Ok(entry)
}

fn update_castling_rights(game_state: &mut GameState, moved_piece: Piece, from: Square, to: Square) {
    if moved_piece.kind == PieceKind::King {
        for side in CastleSide::BOTH {
            game_state.revoke_castling_right(moved_piece.color, side);
        }
    }

    if moved_piece.kind == PieceKind::Rook {
        if let Some(side) = CastleSide::from_rook_home(moved_piece.color, from) {
            game_state.revoke_castling_right(moved_piece.color, side);
        }
    }

    // Landing on a rook corner captures whatever stood there.
    let victim_color = moved_piece.color.opposite();
    if let Some(side) = CastleSide::from_rook_home(victim_color, to) {
        game_state.revoke_castling_right(victim_color, side);
    }
}

/// Relocate a piece on a scratch board for legality probing. Only placement
/// changes: no rook hop, no promotion, no metadata. En passant removes the
/// captured pawn so that discovered checks along the rank are seen.
pub fn simulate_move(
    board: &mut Board,
    from: Square,
    to: Square,
    en_passant_square: Option<Square>,
) -> Option<UndoState> {
    let moved_piece = board.take_piece(from)?;
    let captured_piece = board.take_piece(to);

    let en_passant_capture = if moved_piece.kind == PieceKind::Pawn
        && captured_piece.is_none()
        && en_passant_square == Some(to)
    {
        to.offset(-moved_piece.color.pawn_direction(), 0)
            .and_then(|victim_square| board.take_piece(victim_square).map(|victim| (victim_square, victim)))
    } else {
        None
    };

    board.set_piece(to, Some(moved_piece));

    Some(UndoState {
        from,
        to,
        moved_piece,
        captured_piece,
        en_passant_capture,
    })
}

/// Exact inverse of `simulate_move`.
pub fn undo_simulated_move(board: &mut Board, undo: UndoState) {
    board.set_piece(undo.from, Some(undo.moved_piece));
    board.set_piece(undo.to, undo.captured_piece);
    if let Some((victim_square, victim)) = undo.en_passant_capture {
        board.set_piece(victim_square, Some(victim));
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_move, simulate_move, undo_simulated_move};
    use crate::game_state::{chess_types::*, game_state::GameState};

    fn sq(label: &str) -> Square {
        Square::from_algebraic(label).expect("test square should parse")
    }

    fn play(fen: &str, from: &str, to: &str) -> GameState {
        let mut game = GameState::from_fen(fen).expect("fixture FEN should parse");
        apply_move(&mut game, sq(from), sq(to)).expect("fixture move should apply");
        game
    }

    #[test]
    fn double_push_sets_en_passant_target_and_resets_clock() {
        let mut game = GameState::new_game();
        game.halfmove_clock = 7;
        let entry = apply_move(&mut game, sq("e2"), sq("e4")).expect("e2e4 applies");

        assert_eq!(game.en_passant_square, Some(sq("e3")));
        assert_eq!(game.halfmove_clock, 0);
        assert_eq!(game.side_to_move, Color::Black);
        assert_eq!(game.fullmove_number, 1);
        assert_eq!(entry.captured, None);
        assert!(entry.piece.is(Color::White, PieceKind::Pawn));

        apply_move(&mut game, sq("g8"), sq("f6")).expect("Nf6 applies");
        assert_eq!(game.en_passant_square, None);
        assert_eq!(game.halfmove_clock, 1);
        assert_eq!(game.fullmove_number, 2);
        assert_eq!(game.side_to_move, Color::White);
    }

    #[test]
    fn en_passant_removes_the_pawn_behind_the_target() {
        let game = play("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1", "d4", "e3");
        assert!(game.piece_at(sq("e4")).is_none());
        assert!(game.piece_at(sq("e3")).is_some_and(|p| p.is(Color::Black, PieceKind::Pawn)));
        assert!(game.piece_at(sq("d4")).is_none());
        assert_eq!(game.halfmove_clock, 0);
    }

    #[test]
    fn en_passant_entry_reports_the_captured_pawn() {
        let mut game = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 5 1").expect("fixture");
        let entry = apply_move(&mut game, sq("e5"), sq("d6")).expect("exd6 applies");
        assert_eq!(entry.captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert!(game.piece_at(sq("d5")).is_none());
    }

    #[test]
    fn castling_moves_the_rook_and_revokes_rights() {
        let game = play("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1", "g1");
        assert!(game.piece_at(sq("f1")).is_some_and(|p| p.is(Color::White, PieceKind::Rook)));
        assert!(game.piece_at(sq("h1")).is_none());
        assert_eq!(game.king_square(Color::White), sq("g1"));
        assert_eq!(game.castling_rights, CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);

        let game = play("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", "e8", "c8");
        assert!(game.piece_at(sq("d8")).is_some_and(|p| p.is(Color::Black, PieceKind::Rook)));
        assert!(game.piece_at(sq("a8")).is_none());
        assert_eq!(game.castling_rights, CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE);
    }

    #[test]
    fn rook_moves_and_rook_captures_revoke_one_side() {
        let game = play("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "a1", "a5");
        assert_eq!(game.castling_rights, CASTLE_ALL & !CASTLE_WHITE_QUEENSIDE);

        let game = play("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "h1", "h8");
        assert_eq!(
            game.castling_rights,
            CASTLE_WHITE_QUEENSIDE | CASTLE_BLACK_QUEENSIDE
        );
    }

    #[test]
    fn pawns_always_promote_to_a_queen() {
        let game = play("8/4P2k/8/8/8/8/8/4K3 w - - 0 1", "e7", "e8");
        assert_eq!(game.piece_at(sq("e8")), Some(Piece::new(Color::White, PieceKind::Queen)));

        let game = play("4k3/8/8/8/8/8/1p6/R3K3 b - - 0 1", "b2", "a1");
        assert_eq!(game.piece_at(sq("a1")), Some(Piece::new(Color::Black, PieceKind::Queen)));
    }

    #[test]
    fn moving_from_an_empty_square_is_an_error() {
        let mut game = GameState::new_game();
        assert!(apply_move(&mut game, sq("e4"), sq("e5")).is_err());
        assert_eq!(game, GameState::new_game());
    }

    #[test]
    fn simulation_undo_restores_the_board_exactly() {
        let game = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("fixture");
        let mut scratch = game.board;
        let undo = simulate_move(&mut scratch, sq("e5"), sq("d6"), game.en_passant_square)
            .expect("piece on e5");
        assert!(scratch.piece_at(sq("d5")).is_none());
        undo_simulated_move(&mut scratch, undo);
        assert_eq!(scratch, game.board);
    }
}
