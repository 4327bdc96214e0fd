//! Linear snapshot history backing undo/redo.
//!
//! Snapshot 0 is the starting position. Every committed move appends exactly
//! one snapshot; committing after an undo first drops everything past the
//! current index. Seeking only moves the index and never edits snapshots.

use serde::{Deserialize, Serialize};

use crate::clock::chess_clock::ClockValues;
use crate::config::GameMode;
use crate::errors::{RulesError, RulesResult};
use crate::game::move_log::MoveLogEntry;
use crate::game::status::GameStatus;
use crate::game_state::board::RepetitionKey;
use crate::game_state::game_state::GameState;

/// Immutable record of everything needed to restore a point in the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: GameState,
    /// Move that produced this position; `None` for the starting snapshot.
    pub last_move: Option<MoveLogEntry>,
    pub clocks: ClockValues,
    pub status: GameStatus,
    pub mode: GameMode,
    pub repetition_key: RepetitionKey,
}

impl Snapshot {
    pub fn new(
        state: GameState,
        last_move: Option<MoveLogEntry>,
        clocks: ClockValues,
        status: GameStatus,
        mode: GameMode,
    ) -> Self {
        let repetition_key = state.board.repetition_key();
        Self {
            state,
            last_move,
            clocks,
            status,
            mode,
            repetition_key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameHistory {
    snapshots: Vec<Snapshot>,
    current: usize,
}

impl GameHistory {
    pub fn new(initial: Snapshot) -> Self {
        Self {
            snapshots: vec![initial],
            current: 0,
        }
    }

    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.current]
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Never true: the starting snapshot is always present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drop any redo branch, then append `snapshot` as the new current one.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.snapshots.truncate(self.current + 1);
        self.snapshots.push(snapshot);
        self.current = self.snapshots.len() - 1;
    }

    /// Step back `steps` snapshots.
    pub fn step_back(&mut self, steps: usize) -> RulesResult<&Snapshot> {
        let target = self.current.checked_sub(steps);
        self.seek_target(target)
    }

    /// Step forward `steps` snapshots along the recorded line.
    pub fn step_forward(&mut self, steps: usize) -> RulesResult<&Snapshot> {
        let target = self.current.checked_add(steps);
        self.seek_target(target)
    }

    /// Make `index` the current snapshot.
    pub fn seek_to(&mut self, index: usize) -> RulesResult<&Snapshot> {
        self.seek_target(Some(index))
    }

    fn seek_target(&mut self, target: Option<usize>) -> RulesResult<&Snapshot> {
        let len = self.snapshots.len();
        match target.filter(|&index| index < len) {
            Some(index) => {
                self.current = index;
                Ok(&self.snapshots[index])
            }
            None => Err(RulesError::InvalidHistoryIndex {
                requested: target,
                len,
            }),
        }
    }

    /// Moves that led to the current snapshot, oldest first.
    pub fn move_log(&self) -> Vec<MoveLogEntry> {
        self.snapshots[..=self.current]
            .iter()
            .filter_map(|snapshot| snapshot.last_move)
            .collect()
    }

    /// Occurrences of `key` from the start up to and including the current
    /// snapshot.
    pub fn repetition_count(&self, key: &RepetitionKey) -> usize {
        self.snapshots[..=self.current]
            .iter()
            .filter(|snapshot| &snapshot.repetition_key == key)
            .count()
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.snapshots.len()
    }
}
