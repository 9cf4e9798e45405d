// src/metrics/timer.rs
//! Shared mining activity stopwatch
//!
//! Any number of worker threads bracket their work with `start()`/`stop()`.
//! The timer runs while at least one of them is active, so overlapping work is
//! accounted once: elapsed time is the union of active intervals, not the sum
//! of per-thread intervals.

use crate::metrics::clock::{Clock, SystemClock};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Mutable timer state, always updated as one unit
#[derive(Debug, Default)]
struct TimerState {
    /// Workers currently inside a start/stop bracket
    threads: u64,
    /// Start of the current active interval; `Some` iff `threads > 0`
    started_at: Option<Instant>,
    /// Sum of completed active intervals
    total: Duration,
}

/// Reference-counted stopwatch shared by mining workers
#[derive(Debug)]
pub struct ActivityTimer<C: Clock = SystemClock> {
    clock: C,
    state: Mutex<TimerState>,
}

impl ActivityTimer<SystemClock> {
    /// Creates a stopped timer on the system clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for ActivityTimer<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ActivityTimer<C> {
    /// Creates a stopped timer on the given clock
    pub fn with_clock(clock: C) -> Self {
        ActivityTimer {
            clock,
            state: Mutex::new(TimerState::default()),
        }
    }

    // A panicking worker must not take the timer down with it; the state is
    // always left consistent between statements, so recover the guard.
    fn lock(&self) -> MutexGuard<'_, TimerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Registers one more active worker
    ///
    /// The first worker opens a new active interval.
    pub fn start(&self) {
        let mut state = self.lock();
        if state.threads == 0 {
            state.started_at = Some(self.clock.now());
        }
        state.threads += 1;
    }

    /// Registers one fewer active worker
    ///
    /// The last worker closes the interval and folds it into the total. A stop
    /// without a matching start leaves the state untouched.
    pub fn stop(&self) {
        let mut state = self.lock();
        match state.threads {
            0 => {
                log::warn!("Mining timer stopped without a matching start; ignoring");
            }
            1 => {
                state.threads = 0;
                if let Some(started_at) = state.started_at.take() {
                    let now = self.clock.now();
                    state.total += now.saturating_duration_since(started_at);
                }
            }
            _ => state.threads -= 1,
        }
    }

    /// Starts the timer and returns a guard that stops it when dropped
    pub fn guard(&self) -> TimerGuard<'_, C> {
        self.start();
        TimerGuard { timer: self }
    }

    /// Whether any worker is currently active
    pub fn running(&self) -> bool {
        self.lock().threads > 0
    }

    /// Number of workers currently active
    pub fn thread_count(&self) -> u64 {
        self.lock().threads
    }

    /// Total active time, including the interval in progress
    pub fn elapsed(&self) -> Duration {
        let state = self.lock();
        self.elapsed_locked(&state)
    }

    fn elapsed_locked(&self, state: &TimerState) -> Duration {
        match state.started_at {
            Some(started_at) => {
                state.total + self.clock.now().saturating_duration_since(started_at)
            }
            None => state.total,
        }
    }

    /// `count` per second of active time; `0.0` before any time has elapsed
    pub fn rate(&self, count: i64) -> f64 {
        self.elapsed_and_rate(count).1
    }

    /// Active time and `count` per second of it, read at a single instant
    pub fn elapsed_and_rate(&self, count: i64) -> (Duration, f64) {
        let state = self.lock();
        let elapsed = self.elapsed_locked(&state);
        let seconds = elapsed.as_secs_f64();
        let rate = if seconds == 0.0 {
            0.0
        } else {
            count as f64 / seconds
        };
        (elapsed, rate)
    }
}

/// Keeps a worker registered on an [`ActivityTimer`] until dropped
#[must_use = "the timer stops as soon as the guard is dropped"]
#[derive(Debug)]
pub struct TimerGuard<'a, C: Clock = SystemClock> {
    timer: &'a ActivityTimer<C>,
}

impl<C: Clock> Drop for TimerGuard<'_, C> {
    fn drop(&mut self) {
        self.timer.stop();
    }
}
