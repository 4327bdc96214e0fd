//! Game configuration: timed or untimed play and clock settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Five minutes per side.
pub const DEFAULT_INITIAL_TIME_SECS: u64 = 5 * 60;
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Per-side countdowns run and can flag.
    Timed,
    /// Clocks are inert display values.
    Untimed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: GameMode,
    /// Starting time for each side, counted in ticks.
    pub initial_time_secs: u64,
    /// Real time represented by one tick.
    pub tick_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Timed,
            initial_time_secs: DEFAULT_INITIAL_TIME_SECS,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl GameConfig {
    pub fn untimed() -> Self {
        Self {
            mode: GameMode::Untimed,
            ..Self::default()
        }
    }

    pub fn timed(initial_time_secs: u64) -> Self {
        Self {
            mode: GameMode::Timed,
            initial_time_secs,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_timed(&self) -> bool {
        self.mode == GameMode::Timed
    }
}
