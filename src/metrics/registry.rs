// src/metrics/registry.rs
//! Process-wide metrics context
//!
//! One [`MetricsRegistry`] is built at startup and handed (behind an `Arc`) to
//! every mining worker and to the display consumer. It adds no locking of its
//! own; each owned primitive synchronizes itself.

use crate::config::DisplayConfig;
use crate::metrics::clock::{Clock, SystemClock};
use crate::metrics::counter::Counter;
use crate::metrics::recent::RecentList;
use crate::metrics::refresh::{RefreshSignal, Wake};
use crate::metrics::snapshot::MetricsSnapshot;
use crate::metrics::timer::ActivityTimer;
use crate::types::BlockHash;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Default number of mined block hashes kept for display
pub const DEFAULT_RECENT_BLOCKS: usize = 10;

/// Default number of notices kept for display
pub const DEFAULT_MESSAGES: usize = 5;

/// Named counters, the shared mining timer and recent events
#[derive(Debug)]
pub struct MetricsRegistry<C: Clock + Clone = SystemClock> {
    /// Transactions validated while assembling block templates
    pub transactions_validated: Counter,
    /// Proof-of-work solver invocations
    pub solver_runs: Counter,
    /// Candidate solutions compared against the block target
    pub solution_target_checks: Counter,
    /// Blocks mined by this process
    pub mined_blocks: Counter,
    /// Union of all intervals during which some worker was mining
    pub mining_timer: ActivityTimer<C>,
    clock: C,
    started_at: OnceLock<Instant>,
    recent_blocks: RecentList<BlockHash>,
    messages: RecentList<String>,
    refresh: RefreshSignal,
    shutdown: AtomicBool,
}

impl MetricsRegistry<SystemClock> {
    /// Creates a registry on the system clock
    ///
    /// # Arguments
    /// * `recent_blocks` - How many mined block hashes to retain
    /// * `messages` - How many notices to retain
    pub fn new(recent_blocks: usize, messages: usize) -> Self {
        Self::with_clock(recent_blocks, messages, SystemClock)
    }

    /// Creates a registry sized from the display configuration
    pub fn from_config(display: &DisplayConfig) -> Self {
        Self::new(display.recent_blocks, display.messages)
    }
}

impl Default for MetricsRegistry<SystemClock> {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_BLOCKS, DEFAULT_MESSAGES)
    }
}

impl<C: Clock + Clone> MetricsRegistry<C> {
    /// Creates a registry whose timer and uptime read from `clock`
    pub fn with_clock(recent_blocks: usize, messages: usize, clock: C) -> Self {
        MetricsRegistry {
            transactions_validated: Counter::new(),
            solver_runs: Counter::new(),
            solution_target_checks: Counter::new(),
            mined_blocks: Counter::new(),
            mining_timer: ActivityTimer::with_clock(clock.clone()),
            clock,
            started_at: OnceLock::new(),
            recent_blocks: RecentList::new(recent_blocks),
            messages: RecentList::new(messages),
            refresh: RefreshSignal::new(),
            shutdown: AtomicBool::new(false),
        }
    }

    /// Records when mining began; later calls keep the first instant
    pub fn mark_start_time(&self) {
        let now = self.clock.now();
        if self.started_at.set(now).is_ok() {
            log::debug!("Mining start time marked");
        }
    }

    /// Time since [`mark_start_time`](Self::mark_start_time), zero if never marked
    pub fn uptime(&self) -> Duration {
        self.started_at
            .get()
            .map(|start| self.clock.now().saturating_duration_since(*start))
            .unwrap_or_default()
    }

    /// Solution checks per second of active mining time
    pub fn get_local_sol_ps(&self) -> f64 {
        self.mining_timer.rate(self.solution_target_checks.get())
    }

    /// Records a newly mined block and requests a redraw
    ///
    /// Duplicates are kept; callers report each block once.
    pub fn track_mined_block(&self, hash: BlockHash) {
        self.mined_blocks.increment();
        self.recent_blocks.push(hash);
        log::info!("Mined block {}", hash);
        self.trigger_refresh();
    }

    /// Most recently mined blocks, oldest first
    pub fn recent_blocks(&self) -> Vec<BlockHash> {
        self.recent_blocks.to_vec()
    }

    /// Stores a notice for the display and requests a redraw
    pub fn push_message(&self, message: impl Into<String>) {
        self.messages.push(message.into());
        self.trigger_refresh();
    }

    /// Most recent notices, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.messages.to_vec()
    }

    /// Asks the display consumer to redraw before its next poll
    pub fn trigger_refresh(&self) {
        self.refresh.trigger();
    }

    /// Blocks the display consumer until a refresh request or `timeout`
    pub fn wait_for_refresh(&self, timeout: Duration) -> Wake {
        self.refresh.wait(timeout)
    }

    /// Tells the display consumer to exit and wakes it
    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        self.trigger_refresh();
    }

    /// Whether shutdown was requested
    pub fn shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Reads every metric into a [`MetricsSnapshot`]
    ///
    /// The rate and the active time come from one timer read, so
    /// `solution_target_checks / mining_secs` always equals `local_sol_ps`.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let solution_target_checks = self.solution_target_checks.get();
        let (mining_time, local_sol_ps) =
            self.mining_timer.elapsed_and_rate(solution_target_checks);
        MetricsSnapshot {
            uptime_secs: self.uptime().as_secs(),
            transactions_validated: self.transactions_validated.get(),
            solver_runs: self.solver_runs.get(),
            solution_target_checks,
            mined_blocks: self.mined_blocks.get(),
            local_sol_ps,
            mining_threads: self.mining_timer.thread_count(),
            mining_secs: mining_time.as_secs_f64(),
            recent_blocks: self.recent_blocks(),
            messages: self.messages(),
        }
    }
}
