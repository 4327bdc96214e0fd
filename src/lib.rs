//! Crate root module declarations for the chess referee.
//!
//! Exposes the rules engine (position model, move generation and execution),
//! the game session layer (history, adjudication, clocks) and the console
//! front-end so the binary, benches and tests share stable module paths.

pub mod errors;
pub mod config;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod perft;
}

pub mod game {
    pub mod adjudication;
    pub mod chess_game;
    pub mod history;
    pub mod move_log;
    pub mod status;
}

pub mod clock {
    pub mod chess_clock;
    pub mod tick_scheduler;
}

pub mod console {
    pub mod commands;
    pub mod session;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod render_game_state;
}
