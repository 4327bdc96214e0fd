//! Per-player countdown clocks.
//!
//! At most one clock runs at a time. Starting, stopping and handing off the
//! running clock bump a generation counter, and a tick only counts if it
//! carries the current generation. Reaching zero is reported to the caller;
//! the coordinator never decides the game outcome itself.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::tick_scheduler::{TickEvent, TickScheduler};
use crate::config::{GameConfig, GameMode};
use crate::game_state::chess_types::Color;

/// Remaining time per side, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClockValues {
    pub white_secs: u64,
    pub black_secs: u64,
}

impl ClockValues {
    pub const fn uniform(secs: u64) -> Self {
        Self {
            white_secs: secs,
            black_secs: secs,
        }
    }

    #[inline]
    pub const fn get(&self, color: Color) -> u64 {
        match color {
            Color::White => self.white_secs,
            Color::Black => self.black_secs,
        }
    }

    fn get_mut(&mut self, color: Color) -> &mut u64 {
        match color {
            Color::White => &mut self.white_secs,
            Color::Black => &mut self.black_secs,
        }
    }

    /// `MM:SS` for one side.
    pub fn display(&self, color: Color) -> String {
        let secs = self.get(color);
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

/// What a delivered tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stale generation, clock stopped, or untimed play.
    Ignored,
    /// One unit came off this color's clock.
    Elapsed(Color),
    /// This color's clock just reached zero; the clock is now stopped.
    Flagged(Color),
}

pub struct ClockCoordinator {
    mode: GameMode,
    values: ClockValues,
    running: Option<Color>,
    generation: u64,
    scheduler: Box<dyn TickScheduler>,
}

impl ClockCoordinator {
    pub fn new(config: &GameConfig, scheduler: Box<dyn TickScheduler>) -> Self {
        Self {
            mode: config.mode,
            values: ClockValues::uniform(config.initial_time_secs),
            running: None,
            generation: 0,
            scheduler,
        }
    }

    #[inline]
    pub fn values(&self) -> ClockValues {
        self.values
    }

    /// The clock currently counting down, if any.
    #[inline]
    pub fn active_clock(&self) -> Option<Color> {
        self.running
    }

    /// Run `color`'s clock, stopping whichever was running. Inert in untimed
    /// play and for a clock already at zero.
    pub fn start(&mut self, color: Color) {
        self.stop();
        if self.mode != GameMode::Timed || self.values.get(color) == 0 {
            return;
        }

        self.generation += 1;
        self.running = Some(color);
        self.scheduler.schedule(self.generation);
        debug!(clock = %color, generation = self.generation, "clock started");
    }

    pub fn stop(&mut self) {
        if self.running.take().is_some() {
            self.scheduler.cancel();
            self.generation += 1;
        }
    }

    /// Stop and overwrite the remaining times (new game, snapshot load).
    pub fn restore(&mut self, values: ClockValues) {
        self.stop();
        self.values = values;
    }

    pub fn on_tick(&mut self, event: TickEvent) -> TickOutcome {
        let Some(color) = self.running else {
            return TickOutcome::Ignored;
        };
        if event.generation != self.generation {
            return TickOutcome::Ignored;
        }

        let remaining = self.values.get_mut(color);
        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            self.stop();
            return TickOutcome::Flagged(color);
        }
        TickOutcome::Elapsed(color)
    }
}

impl Drop for ClockCoordinator {
    fn drop(&mut self) {
        self.scheduler.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::tick_scheduler::ManualTicker;

    fn timed_clock(secs: u64) -> (ClockCoordinator, crate::clock::tick_scheduler::ManualTickerHandle) {
        let (ticker, handle) = ManualTicker::new();
        (
            ClockCoordinator::new(&GameConfig::timed(secs), Box::new(ticker)),
            handle,
        )
    }

    #[test]
    fn only_the_running_clock_counts_down() {
        let (mut clock, handle) = timed_clock(10);
        clock.start(Color::White);
        for _ in 0..3 {
            let tick = handle.fire().expect("clock is running");
            assert_eq!(clock.on_tick(tick), TickOutcome::Elapsed(Color::White));
        }
        assert_eq!(clock.values(), ClockValues { white_secs: 7, black_secs: 10 });
        assert_eq!(clock.active_clock(), Some(Color::White));
    }

    #[test]
    fn ticks_from_before_a_hand_off_are_ignored() {
        let (mut clock, handle) = timed_clock(10);
        clock.start(Color::White);
        let in_flight = handle.fire().expect("clock is running");

        clock.start(Color::Black);
        assert_eq!(clock.on_tick(in_flight), TickOutcome::Ignored);
        assert_eq!(clock.values(), ClockValues::uniform(10));

        let fresh = handle.fire().expect("black clock is running");
        assert_eq!(clock.on_tick(fresh), TickOutcome::Elapsed(Color::Black));
        assert_eq!(clock.values().black_secs, 9);
    }

    #[test]
    fn reaching_zero_flags_and_stops() {
        let (mut clock, handle) = timed_clock(2);
        clock.start(Color::Black);
        let tick = handle.fire().expect("running");
        assert_eq!(clock.on_tick(tick), TickOutcome::Elapsed(Color::Black));
        let tick = handle.fire().expect("running");
        assert_eq!(clock.on_tick(tick), TickOutcome::Flagged(Color::Black));
        assert_eq!(clock.active_clock(), None);
        assert!(!handle.is_running());
        assert_eq!(clock.on_tick(handle.fire_stale()), TickOutcome::Ignored);
    }

    #[test]
    fn untimed_clocks_never_run() {
        let (ticker, handle) = ManualTicker::new();
        let mut clock = ClockCoordinator::new(&GameConfig::untimed(), Box::new(ticker));
        clock.start(Color::White);
        assert_eq!(clock.active_clock(), None);
        assert_eq!(handle.schedule_calls(), 0);
        assert_eq!(clock.on_tick(TickEvent { generation: 0 }), TickOutcome::Ignored);
    }

    #[test]
    fn display_is_minutes_and_seconds() {
        let values = ClockValues { white_secs: 300, black_secs: 59 };
        assert_eq!(values.display(Color::White), "05:00");
        assert_eq!(values.display(Color::Black), "00:59");
    }
}
