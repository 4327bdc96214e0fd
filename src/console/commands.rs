//! Console command parsing.

use thiserror::Error;

use crate::errors::RulesError;
use crate::game_state::chess_types::Square;
use crate::utils::algebraic::parse_coordinate_move;

pub const HELP_TEXT: &str = "\
commands:
  select <sq>        list legal destinations for the piece on <sq>
  move <from> <to>   play a move (also: move e2e4)
  undo [n]           step back n plies (default 1)
  redo [n]           step forward n plies (default 1)
  resign             the side to move resigns
  new                start a new game
  board              show the board
  moves              show the move list
  fen                print the current position as FEN
  clock              show both clocks
  random             play a random legal move
  help               show this text
  quit               leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Select(Square),
    Move { from: Square, to: Square },
    Undo(usize),
    Redo(usize),
    Resign,
    NewGame,
    Board,
    Moves,
    Fen,
    Clock,
    Random,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid step count '{0}'")]
    InvalidCount(String),

    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, CommandError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let (cmd, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (trimmed, ""),
    };

    let command = match cmd.to_ascii_lowercase().as_str() {
        "select" | "s" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("select <square>"));
            }
            ConsoleCommand::Select(Square::from_algebraic(rest)?)
        }
        "move" | "m" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("move <from> <to>"));
            }
            let (from, to) = parse_coordinate_move(rest)?;
            ConsoleCommand::Move { from, to }
        }
        "undo" => ConsoleCommand::Undo(parse_count(rest)?),
        "redo" => ConsoleCommand::Redo(parse_count(rest)?),
        "resign" => ConsoleCommand::Resign,
        "new" => ConsoleCommand::NewGame,
        "board" | "b" => ConsoleCommand::Board,
        "moves" => ConsoleCommand::Moves,
        "fen" => ConsoleCommand::Fen,
        "clock" => ConsoleCommand::Clock,
        "random" => ConsoleCommand::Random,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" | "q" => ConsoleCommand::Quit,
        _ => return Err(CommandError::Unknown(cmd.to_owned())),
    };

    Ok(Some(command))
}

fn parse_count(text: &str) -> Result<usize, CommandError> {
    if text.is_empty() {
        return Ok(1);
    }
    text.parse::<usize>()
        .map_err(|_| CommandError::InvalidCount(text.to_owned()))
}
