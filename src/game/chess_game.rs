//! The game session: position, status, history and clocks behind one owner.
//!
//! All requests are processed serially. Once the status is terminal every
//! mutating request is refused with `RulesError::GameOver` until `new_game`.

use tracing::{info, warn};

use crate::clock::chess_clock::{ClockCoordinator, ClockValues, TickOutcome};
use crate::clock::tick_scheduler::{TickEvent, TickScheduler};
use crate::config::GameConfig;
use crate::errors::{RulesError, RulesResult};
use crate::game::adjudication::evaluate_position;
use crate::game::history::{GameHistory, Snapshot};
use crate::game::move_log::MoveLogEntry;
use crate::game::status::GameStatus;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::legal_moves;

/// Result of a committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub entry: MoveLogEntry,
    pub status: GameStatus,
}

pub struct ChessGame {
    config: GameConfig,
    starting_position: GameState,
    state: GameState,
    status: GameStatus,
    history: GameHistory,
    clock: ClockCoordinator,
}

impl ChessGame {
    /// Standard starting position.
    pub fn new(config: GameConfig, scheduler: Box<dyn TickScheduler>) -> Self {
        Self::from_state(config, scheduler, GameState::new_game())
    }

    pub fn from_fen(
        config: GameConfig,
        scheduler: Box<dyn TickScheduler>,
        fen: &str,
    ) -> RulesResult<Self> {
        Ok(Self::from_state(config, scheduler, GameState::from_fen(fen)?))
    }

    fn from_state(
        config: GameConfig,
        scheduler: Box<dyn TickScheduler>,
        starting_position: GameState,
    ) -> Self {
        let clock = ClockCoordinator::new(&config, scheduler);
        let status = evaluate_position(&starting_position, 1);
        let history = GameHistory::new(Snapshot::new(
            starting_position.clone(),
            None,
            clock.values(),
            status,
            config.mode,
        ));

        let mut game = Self {
            config,
            state: starting_position.clone(),
            starting_position,
            status,
            history,
            clock,
        };
        game.resume_clock();
        game
    }

    // --- Read-only views ---

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    pub fn move_log(&self) -> Vec<MoveLogEntry> {
        self.history.move_log()
    }

    #[inline]
    pub fn clock_values(&self) -> ClockValues {
        self.clock.values()
    }

    /// Which clock is counting down; `None` when untimed, stopped or over.
    #[inline]
    pub fn active_clock(&self) -> Option<Color> {
        self.clock.active_clock()
    }

    // --- Requests ---

    /// Legal destinations for the piece on `square`. Empty squares, the
    /// opponent's pieces and finished games all yield nothing.
    pub fn select_square(&self, square: Square) -> Vec<Square> {
        if self.status.is_terminal() {
            return Vec::new();
        }
        legal_moves(&self.state, square)
    }

    pub fn commit_move(&mut self, from: Square, to: Square) -> RulesResult<MoveOutcome> {
        self.ensure_active()?;
        if !legal_moves(&self.state, from).contains(&to) {
            warn!(%from, %to, "rejected illegal move");
            return Err(RulesError::IllegalMove { from, to });
        }

        self.clock.stop();
        let entry = apply_move(&mut self.state, from, to)?;

        let key = self.state.board.repetition_key();
        let occurrences = self.history.repetition_count(&key) + 1;
        self.status = evaluate_position(&self.state, occurrences);

        self.history.record(Snapshot::new(
            self.state.clone(),
            Some(entry),
            self.clock.values(),
            self.status,
            self.config.mode,
        ));
        self.resume_clock();

        if self.status.is_terminal() {
            info!(status = %self.status, "game over");
        }
        Ok(MoveOutcome {
            entry,
            status: self.status,
        })
    }

    /// Step back `steps` snapshots.
    pub fn undo(&mut self, steps: usize) -> RulesResult<()> {
        self.ensure_active()?;
        let snapshot = self.history.step_back(steps).cloned();
        self.load(snapshot)
    }

    /// Step forward `steps` snapshots along the recorded line.
    pub fn redo(&mut self, steps: usize) -> RulesResult<()> {
        self.ensure_active()?;
        let snapshot = self.history.step_forward(steps).cloned();
        self.load(snapshot)
    }

    /// Jump to an absolute history index.
    pub fn load_snapshot(&mut self, index: usize) -> RulesResult<()> {
        self.ensure_active()?;
        let snapshot = self.history.seek_to(index).cloned();
        self.load(snapshot)
    }

    /// The side to move resigns.
    pub fn resign(&mut self) -> RulesResult<GameStatus> {
        self.ensure_active()?;
        self.clock.stop();
        self.status = GameStatus::Resigned(self.state.side_to_move);
        info!(status = %self.status, "game over");
        Ok(self.status)
    }

    /// Feed one clock tick through the state machine. Ticks that arrive after
    /// the game ended, or from a superseded clock hand-off, change nothing.
    pub fn handle_tick(&mut self, event: TickEvent) -> GameStatus {
        if self.status.is_terminal() {
            return self.status;
        }
        if let TickOutcome::Flagged(color) = self.clock.on_tick(event) {
            self.status = GameStatus::Timeout(color);
            info!(status = %self.status, "game over");
        }
        self.status
    }

    /// Back to the configured starting position with fresh clocks and an
    /// empty history. Any pending tick becomes stale.
    pub fn new_game(&mut self) {
        self.clock
            .restore(ClockValues::uniform(self.config.initial_time_secs));
        self.state = self.starting_position.clone();
        self.status = evaluate_position(&self.state, 1);
        self.history = GameHistory::new(Snapshot::new(
            self.state.clone(),
            None,
            self.clock.values(),
            self.status,
            self.config.mode,
        ));
        self.resume_clock();
        info!(fen = %self.state.to_fen(), "new game");
    }

    fn ensure_active(&self) -> RulesResult<()> {
        if self.status.is_terminal() {
            warn!(status = %self.status, "rejected request after game end");
            return Err(RulesError::GameOver(self.status));
        }
        Ok(())
    }

    /// Replace the live state with a snapshot the history already moved to.
    fn load(&mut self, snapshot: RulesResult<Snapshot>) -> RulesResult<()> {
        let snapshot = snapshot.inspect_err(|err| warn!(%err, "rejected history request"))?;

        self.state = snapshot.state;
        self.status = snapshot.status;
        self.clock.restore(snapshot.clocks);
        self.resume_clock();
        info!(
            index = self.history.current_index(),
            len = self.history.len(),
            "loaded snapshot"
        );
        Ok(())
    }

    fn resume_clock(&mut self) {
        if self.status.is_terminal() {
            self.clock.stop();
        } else {
            self.clock.start(self.state.side_to_move);
        }
    }
}
