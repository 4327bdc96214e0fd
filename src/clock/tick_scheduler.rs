//! Tick scheduling primitives for the game clock.
//!
//! A scheduler turns "the clock for generation N is running" into a stream
//! of `TickEvent`s delivered back into the caller's serial event loop. Each
//! hand-off between players bumps the generation, so ticks still in flight
//! from the previous hand-off are recognisably stale and get dropped.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::trace;

/// One elapsed time unit, tagged with the clock generation that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    pub generation: u64,
}

pub trait TickScheduler: Send {
    /// Start delivering ticks for `generation`, replacing any previous stream.
    fn schedule(&mut self, generation: u64);

    /// Stop delivering ticks. Pending ticks may still arrive and must be
    /// discarded by generation.
    fn cancel(&mut self);
}

/// Scheduler for untimed play: never ticks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullScheduler;

impl TickScheduler for NullScheduler {
    fn schedule(&mut self, _generation: u64) {}

    fn cancel(&mut self) {}
}

#[derive(Debug, Default)]
struct ManualTickerState {
    running: AtomicBool,
    generation: AtomicU64,
    schedule_calls: AtomicU64,
}

/// Test double. The engine owns the `ManualTicker`; the test keeps a
/// `ManualTickerHandle` and fires ticks on demand.
#[derive(Debug, Default)]
pub struct ManualTicker {
    state: Arc<ManualTickerState>,
}

#[derive(Debug, Clone)]
pub struct ManualTickerHandle {
    state: Arc<ManualTickerState>,
}

impl ManualTicker {
    pub fn new() -> (Self, ManualTickerHandle) {
        let state = Arc::new(ManualTickerState::default());
        (
            Self {
                state: Arc::clone(&state),
            },
            ManualTickerHandle { state },
        )
    }
}

impl TickScheduler for ManualTicker {
    fn schedule(&mut self, generation: u64) {
        self.state.generation.store(generation, Ordering::SeqCst);
        self.state.running.store(true, Ordering::SeqCst);
        self.state.schedule_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn cancel(&mut self) {
        self.state.running.store(false, Ordering::SeqCst);
    }
}

impl ManualTickerHandle {
    /// The tick a real timer would deliver now, if one is scheduled.
    pub fn fire(&self) -> Option<TickEvent> {
        self.is_running().then(|| TickEvent {
            generation: self.state.generation.load(Ordering::SeqCst),
        })
    }

    /// A tick for whatever generation was last scheduled, running or not;
    /// simulates a tick that was already in flight when the clock stopped.
    pub fn fire_stale(&self) -> TickEvent {
        TickEvent {
            generation: self.state.generation.load(Ordering::SeqCst),
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.running.load(Ordering::SeqCst)
    }

    pub fn schedule_calls(&self) -> u64 {
        self.state.schedule_calls.load(Ordering::SeqCst)
    }
}

/// Real-time scheduler: a background thread sleeps `period` and posts a
/// tick into `sender` until cancelled or the receiver goes away.
pub struct IntervalTicker<T> {
    period: Duration,
    sender: Sender<T>,
    stop_flag: Option<Arc<AtomicBool>>,
}

impl<T> IntervalTicker<T>
where
    T: From<TickEvent> + Send + 'static,
{
    pub fn new(period: Duration, sender: Sender<T>) -> Self {
        Self {
            period,
            sender,
            stop_flag: None,
        }
    }
}

impl<T> TickScheduler for IntervalTicker<T>
where
    T: From<TickEvent> + Send + 'static,
{
    fn schedule(&mut self, generation: u64) {
        self.cancel();

        let stop_flag = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop_flag);
        let sender = self.sender.clone();
        let period = self.period;

        thread::spawn(move || loop {
            thread::sleep(period);
            if thread_stop.load(Ordering::SeqCst) {
                break;
            }
            trace!(generation = generation, "clock tick");
            if sender.send(T::from(TickEvent { generation })).is_err() {
                break;
            }
        });

        self.stop_flag = Some(stop_flag);
    }

    fn cancel(&mut self) {
        if let Some(flag) = self.stop_flag.take() {
            flag.store(true, Ordering::SeqCst);
        }
    }
}

impl<T> Drop for IntervalTicker<T> {
    fn drop(&mut self) {
        if let Some(flag) = self.stop_flag.take() {
            flag.store(true, Ordering::SeqCst);
        }
    }
}
