//! Line-oriented console front-end over a `ChessGame`.
//!
//! The session is the single serial consumer of user lines and clock ticks;
//! `run_console` owns the event channel both are posted to.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use thiserror::Error;
use tracing::debug;

use crate::clock::tick_scheduler::{IntervalTicker, NullScheduler, TickEvent, TickScheduler};
use crate::config::GameConfig;
use crate::console::commands::{parse_command, CommandError, ConsoleCommand, HELP_TEXT};
use crate::errors::{RulesError, RulesResult};
use crate::game::chess_game::ChessGame;
use crate::game::move_log::format_move_list;
use crate::game::status::GameStatus;
use crate::game_state::chess_types::Color;
use crate::move_generation::legal_move_generator::all_legal_moves;
use crate::utils::render_game_state::render_game_state;

/// Everything the console loop reacts to, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    Line(String),
    Tick(TickEvent),
    Eof,
}

impl From<TickEvent> for ConsoleEvent {
    fn from(event: TickEvent) -> Self {
        ConsoleEvent::Tick(event)
    }
}

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Rules(#[from] RulesError),
}

pub struct ConsoleSession {
    game: ChessGame,
    rng: StdRng,
}

impl ConsoleSession {
    pub fn new(game: ChessGame, rng: StdRng) -> Self {
        Self { game, rng }
    }

    pub fn game(&self) -> &ChessGame {
        &self.game
    }

    /// Drain events until `quit`, end of input, or every sender is gone.
    pub fn run(&mut self, events: &Receiver<ConsoleEvent>, out: &mut impl Write) -> io::Result<()> {
        while let Ok(event) = events.recv() {
            match event {
                ConsoleEvent::Line(line) => {
                    if self.handle_command(&line, out)? {
                        break;
                    }
                }
                ConsoleEvent::Tick(tick) => self.handle_tick(tick, out)?,
                ConsoleEvent::Eof => break,
            }
            out.flush()?;
        }
        Ok(())
    }

    /// Handle one input line. Returns `true` when the user asked to quit.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(false),
            Err(err) => {
                writeln!(out, "error: {err}")?;
                return Ok(false);
            }
        };

        if command == ConsoleCommand::Quit {
            return Ok(true);
        }
        if let Err(err) = self.execute(command, out)? {
            writeln!(out, "error: {err}")?;
        }
        Ok(false)
    }

    /// Deliver a clock tick; prints the result if it ended the game.
    pub fn handle_tick(&mut self, event: TickEvent, out: &mut impl Write) -> io::Result<()> {
        let before = self.game.status();
        let after = self.game.handle_tick(event);
        if after != before {
            writeln!(out, "{after}")?;
        }
        Ok(())
    }

    fn execute(
        &mut self,
        command: ConsoleCommand,
        out: &mut impl Write,
    ) -> io::Result<Result<(), CommandError>> {
        match command {
            ConsoleCommand::Select(square) => {
                let mut targets = self.game.select_square(square);
                targets.sort_by_key(|target| target.index());
                if targets.is_empty() {
                    writeln!(out, "{square}: no legal moves")?;
                } else {
                    let labels: Vec<String> = targets.iter().map(|t| t.to_algebraic()).collect();
                    writeln!(out, "{square}: {}", labels.join(" "))?;
                }
            }
            ConsoleCommand::Move { from, to } => {
                let outcome = match self.game.commit_move(from, to) {
                    Ok(outcome) => outcome,
                    Err(err) => return Ok(Err(err.into())),
                };
                writeln!(out, "{} {}", outcome.entry.color, outcome.entry.notation())?;
                self.report_position(out)?;
            }
            ConsoleCommand::Undo(steps) => {
                if let Err(err) = self.game.undo(steps) {
                    return Ok(Err(err.into()));
                }
                self.report_position(out)?;
            }
            ConsoleCommand::Redo(steps) => {
                if let Err(err) = self.game.redo(steps) {
                    return Ok(Err(err.into()));
                }
                self.report_position(out)?;
            }
            ConsoleCommand::Resign => match self.game.resign() {
                Ok(status) => writeln!(out, "{status}")?,
                Err(err) => return Ok(Err(err.into())),
            },
            ConsoleCommand::NewGame => {
                self.game.new_game();
                self.report_position(out)?;
            }
            ConsoleCommand::Board => writeln!(out, "{}", render_game_state(self.game.state()))?,
            ConsoleCommand::Moves => {
                let lines = format_move_list(&self.game.move_log());
                if lines.is_empty() {
                    writeln!(out, "(no moves)")?;
                }
                for line in lines {
                    writeln!(out, "{line}")?;
                }
            }
            ConsoleCommand::Fen => writeln!(out, "{}", self.game.state().to_fen())?,
            ConsoleCommand::Clock => self.write_clocks(out)?,
            ConsoleCommand::Random => {
                if let Err(err) = self.play_random(out)? {
                    return Ok(Err(err.into()));
                }
            }
            ConsoleCommand::Help => writeln!(out, "{HELP_TEXT}")?,
            ConsoleCommand::Quit => {}
        }
        Ok(Ok(()))
    }

    fn play_random(&mut self, out: &mut impl Write) -> io::Result<RulesResult<()>> {
        if self.game.status().is_terminal() {
            writeln!(out, "{}", self.game.status())?;
            return Ok(Ok(()));
        }
        let candidates = all_legal_moves(self.game.state());
        let Some(&(from, to)) = candidates.choose(&mut self.rng) else {
            return Ok(Ok(()));
        };
        let outcome = match self.game.commit_move(from, to) {
            Ok(outcome) => outcome,
            Err(err) => return Ok(Err(err)),
        };
        writeln!(out, "{} {}", outcome.entry.color, outcome.entry.notation())?;
        self.report_position(out)?;
        Ok(Ok(()))
    }

    pub fn report_position(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", render_game_state(self.game.state()))?;
        let status = self.game.status();
        if status == GameStatus::Active {
            let check = if self.game.state().is_in_check() { " (check)" } else { "" };
            writeln!(out, "{} to move{check}", self.game.state().side_to_move)?;
        } else {
            writeln!(out, "{status}")?;
        }
        if self.game.config().is_timed() {
            self.write_clocks(out)?;
        }
        Ok(())
    }

    fn write_clocks(&self, out: &mut impl Write) -> io::Result<()> {
        let values = self.game.clock_values();
        let active = self.game.active_clock();
        for color in Color::ALL {
            let marker = if active == Some(color) { " *" } else { "" };
            writeln!(out, "{color}: {}{marker}", values.display(color))?;
        }
        Ok(())
    }
}

/// Run the interactive loop on stdin/stdout until `quit` or end of input.
pub fn run_console(config: GameConfig, fen: Option<&str>, rng: StdRng) -> Result<(), ConsoleError> {
    let (sender, receiver) = channel::<ConsoleEvent>();
    let scheduler: Box<dyn TickScheduler> = if config.is_timed() {
        Box::new(IntervalTicker::new(config.tick_interval, sender.clone()))
    } else {
        Box::new(NullScheduler)
    };
    let game = match fen {
        Some(fen) => ChessGame::from_fen(config, scheduler, fen)?,
        None => ChessGame::new(config, scheduler),
    };

    spawn_stdin_reader(sender);

    let mut session = ConsoleSession::new(game, rng);
    let mut stdout = io::stdout();
    session.report_position(&mut stdout)?;
    stdout.flush()?;
    session.run(&receiver, &mut stdout)?;
    Ok(())
}

fn spawn_stdin_reader(sender: Sender<ConsoleEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if sender.send(ConsoleEvent::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    debug!(%err, "stdin read failed");
                    break;
                }
            }
        }
        let _ = sender.send(ConsoleEvent::Eof);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::tick_scheduler::ManualTicker;
    use rand::SeedableRng;

    fn session() -> ConsoleSession {
        let game = ChessGame::new(GameConfig::untimed(), Box::new(NullScheduler));
        ConsoleSession::new(game, StdRng::seed_from_u64(7))
    }

    fn run_lines(session: &mut ConsoleSession, lines: &[&str]) -> String {
        let mut out = Vec::new();
        for line in lines {
            if session.handle_command(line, &mut out).expect("write to vec") {
                break;
            }
        }
        String::from_utf8(out).expect("utf8 output")
    }

    #[test]
    fn select_and_move_report_back() {
        let mut session = session();
        let text = run_lines(&mut session, &["select g1", "move g1 f3"]);
        assert!(text.contains("g1: f3 h3"), "{text}");
        assert!(text.contains("White g1-f3"), "{text}");
        assert!(text.contains("Black to move"), "{text}");
    }

    #[test]
    fn errors_are_reported_and_the_session_continues() {
        let mut session = session();
        let text = run_lines(&mut session, &["move e2 e5", "undo", "dance", "fen"]);
        assert!(text.contains("error: Illegal move: e2 to e5"), "{text}");
        assert!(text.contains("error: Invalid history index"), "{text}");
        assert!(text.contains("error: unknown command 'dance'"), "{text}");
        assert!(text.contains("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"), "{text}");
    }

    #[test]
    fn random_moves_are_legal_and_listed() {
        let mut session = session();
        run_lines(&mut session, &["random", "random", "random"]);
        assert_eq!(session.game().move_log().len(), 3);
        let text = run_lines(&mut session, &["moves"]);
        assert!(text.starts_with("1. "), "{text}");
        assert_eq!(text.lines().count(), 2, "{text}");
    }

    #[test]
    fn quit_stops_the_loop_and_ticks_reach_the_clock() {
        let (ticker, handle) = ManualTicker::new();
        let game = ChessGame::new(GameConfig::timed(1), Box::new(ticker));
        let mut session = ConsoleSession::new(game, StdRng::seed_from_u64(1));

        let (sender, receiver) = channel();
        let tick = handle.fire().expect("white clock running");
        sender.send(ConsoleEvent::Tick(tick)).expect("send");
        sender.send(ConsoleEvent::Line("clock".to_owned())).expect("send");
        sender.send(ConsoleEvent::Line("quit".to_owned())).expect("send");
        sender.send(ConsoleEvent::Line("new".to_owned())).expect("send");

        let mut out = Vec::new();
        session.run(&receiver, &mut out).expect("run");
        let text = String::from_utf8(out).expect("utf8");

        assert!(text.contains("Time's up for White! Black wins by timeout!"), "{text}");
        assert!(text.contains("White: 00:00"), "{text}");
        assert_eq!(session.game().status(), GameStatus::Timeout(Color::White));
    }
}
