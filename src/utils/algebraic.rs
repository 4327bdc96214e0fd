//! Coordinate-pair move text.
//!
//! Converts human-entered move text (`e2e4`, `e2-e4` or `e2 e4`) into a
//! source/destination pair for the front-end.

use crate::errors::{RulesError, RulesResult};
use crate::game_state::chess_types::Square;

/// Parse a coordinate move such as `e2e4`, `e2-e4` or `e2 e4`.
pub fn parse_coordinate_move(text: &str) -> RulesResult<(Square, Square)> {
    let compact: String = text
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '-')
        .collect();
    if compact.len() != 4 || !compact.is_ascii() {
        return Err(RulesError::InvalidAlgebraic(text.to_owned()));
    }

    let from = Square::from_algebraic(&compact[0..2])?;
    let to = Square::from_algebraic(&compact[2..4])?;
    Ok((from, to))
}

/// Render a source/destination pair as `e2-e4`.
pub fn coordinate_move_text(from: Square, to: Square) -> String {
    format!("{from}-{to}")
}
