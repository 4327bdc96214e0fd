use crate::game_state::chess_types::*;

/// Single undo record for a simulated move on a scratch board.
///
/// Restoring from it is the exact inverse of the simulation, so legality
/// probing never copies the board per candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub from: Square,
    pub to: Square,
    pub moved_piece: Piece,
    pub captured_piece: Option<Piece>,
    /// Pawn removed from beside the destination by an en-passant capture.
    pub en_passant_capture: Option<(Square, Piece)>,
}
