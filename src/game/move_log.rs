//! Move list entries for display. Nothing in the rules reads them back.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::*;
use crate::utils::algebraic::coordinate_move_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLogEntry {
    pub color: Color,
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
}

impl MoveLogEntry {
    /// `e2-e4`, or `e4-d5 (x♟)` for a capture.
    pub fn notation(&self) -> String {
        let text = coordinate_move_text(self.from, self.to);
        match self.captured {
            Some(victim) => format!("{text} (x{})", victim.glyph()),
            None => text,
        }
    }
}

/// Numbered move list, one full move per line: `1. e2-e4 e7-e5`.
///
/// A list that starts with Black's move gets a blank White slot.
pub fn format_move_list(entries: &[MoveLogEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Option<String> = None;
    let mut number = 1usize;

    for entry in entries {
        match entry.color {
            Color::White => {
                if let Some(line) = current.take() {
                    lines.push(line);
                }
                current = Some(format!("{number}. {}", entry.notation()));
                number += 1;
            }
            Color::Black => {
                let line = match current.take() {
                    Some(line) => format!("{line} {}", entry.notation()),
                    None => {
                        number += 1;
                        format!("{}. ... {}", number - 1, entry.notation())
                    }
                };
                lines.push(line);
            }
        }
    }
    if let Some(line) = current {
        lines.push(line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::{format_move_list, MoveLogEntry};
    use crate::game_state::chess_types::*;

    fn entry(color: Color, from: &str, to: &str, captured: Option<Piece>) -> MoveLogEntry {
        MoveLogEntry {
            color,
            from: Square::from_algebraic(from).expect("from"),
            to: Square::from_algebraic(to).expect("to"),
            piece: Piece::new(color, PieceKind::Pawn),
            captured,
        }
    }

    #[test]
    fn captures_show_the_victim_glyph() {
        let quiet = entry(Color::White, "e2", "e4", None);
        assert_eq!(quiet.notation(), "e2-e4");
        let capture = entry(
            Color::White,
            "e4",
            "d5",
            Some(Piece::new(Color::Black, PieceKind::Pawn)),
        );
        assert_eq!(capture.notation(), "e4-d5 (x♟)");
    }

    #[test]
    fn moves_pair_up_by_number() {
        let lines = format_move_list(&[
            entry(Color::White, "e2", "e4", None),
            entry(Color::Black, "e7", "e5", None),
            entry(Color::White, "d2", "d4", None),
        ]);
        assert_eq!(lines, vec!["1. e2-e4 e7-e5", "2. d2-d4"]);
    }

    #[test]
    fn list_starting_with_black_leaves_white_blank() {
        let lines = format_move_list(&[
            entry(Color::Black, "e7", "e5", None),
            entry(Color::White, "d2", "d4", None),
        ]);
        assert_eq!(lines, vec!["1. ... e7-e5", "2. d2-d4"]);
    }
}
