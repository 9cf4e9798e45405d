// src/metrics/snapshot.rs
use crate::types::BlockHash;
use serde::Serialize;

/// Point-in-time copy of the registry, as read by the display consumer
///
/// Fields are read one after another without a global lock, so counters may
/// be from slightly different instants.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// Seconds since mining start was marked
    pub uptime_secs: u64,
    /// Transactions validated for block templates
    pub transactions_validated: i64,
    /// Solver invocations
    pub solver_runs: i64,
    /// Solutions compared against the target
    pub solution_target_checks: i64,
    /// Blocks mined since startup
    pub mined_blocks: i64,
    /// Solutions per second of active mining time
    pub local_sol_ps: f64,
    /// Workers currently inside a mining bracket
    pub mining_threads: u64,
    /// Total active mining time in seconds
    pub mining_secs: f64,
    /// Most recently mined blocks, oldest first
    pub recent_blocks: Vec<BlockHash>,
    /// Most recent notices, oldest first
    pub messages: Vec<String>,
}
