//! FEN-to-GameState parser.
//!
//! Builds a fully-populated position from a Forsyth-Edwards Notation string,
//! including tracked king squares. A position without exactly one king per
//! color is rejected here, so that invariant holds from construction on.

use crate::errors::{RulesError, RulesResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

pub fn parse_fen(fen: &str) -> RulesResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| invalid("missing halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| invalid("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let board = parse_board(board_part)?;
    let king_squares = locate_kings(&board)?;

    Ok(GameState {
        board,
        side_to_move: parse_side_to_move(side_part)?,
        castling_rights: parse_castling_rights(castling_part)?,
        en_passant_square: parse_en_passant_square(en_passant_part)?,
        halfmove_clock: halfmove_part
            .parse::<u16>()
            .map_err(|_| invalid(&format!("bad halfmove clock {halfmove_part}")))?,
        fullmove_number: fullmove_part
            .parse::<u16>()
            .map_err(|_| invalid(&format!("bad fullmove number {fullmove_part}")))?,
        king_squares,
    })
}

fn invalid(reason: &str) -> RulesError {
    RulesError::InvalidFen(reason.to_owned())
}

fn parse_board(board_part: &str) -> RulesResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    let mut board = Board::empty();
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("bad empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(invalid("rank has too many files"));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| invalid(&format!("bad piece character '{ch}'")))?;
            let square = Square::new(rank, file).ok_or_else(|| invalid("rank has too many files"))?;
            board.set_piece(square, Some(piece));
            file += 1;
        }

        if file != 8 {
            return Err(invalid("rank does not sum to 8 files"));
        }
    }

    Ok(board)
}

fn locate_kings(board: &Board) -> RulesResult<[Square; 2]> {
    let mut kings = [None; 2];
    for color in Color::ALL {
        if board.count(color, PieceKind::King) != 1 {
            return Err(invalid(&format!("{color} must have exactly one king")));
        }
        kings[color.index()] = board.find_king(color);
    }
    match kings {
        [Some(white), Some(black)] => Ok([white, black]),
        _ => Err(invalid("missing king")),
    }
}

fn parse_side_to_move(side_part: &str) -> RulesResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(&format!("bad side to move {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> RulesResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        rights |= match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            _ => return Err(invalid(&format!("bad castling character {ch}"))),
        };
    }
    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> RulesResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    Square::from_algebraic(en_passant_part)
        .map(Some)
        .map_err(|_| invalid(&format!("bad en-passant square {en_passant_part}")))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::errors::RulesError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::utils::render_game_state::render_game_state;

    #[test]
    fn parse_starting_fen_and_render_board() {
        let game_state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        println!("\n{}", render_game_state(&game_state));

        assert_eq!(game_state.side_to_move, Color::White);
        assert_eq!(game_state.fullmove_number, 1);
        assert_eq!(game_state.halfmove_clock, 0);
        assert_eq!(game_state.castling_rights, CASTLE_ALL);
    }

    #[test]
    fn positions_without_exactly_one_king_per_side_are_rejected() {
        for fen in [
            "8/8/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/3KK3 w - - 0 1",
        ] {
            assert!(matches!(parse_fen(fen), Err(RulesError::InvalidFen(_))), "{fen}");
        }
    }

    #[test]
    fn malformed_fields_are_rejected() {
        for fen in [
            "",
            "4k3/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K4 w - - 0 1",
            "4k3/8/8/8/8/8/8/4X3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w Z - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - z9 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - - x 1",
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra",
        ] {
            assert!(parse_fen(fen).is_err(), "{fen:?} should not parse");
        }
    }
}
