//! Miner metrics - concurrent metrics core for a proof-of-work miner
//!
//! This crate tracks what many mining threads do and turns it into display data:
//! - Lock-free counters for validated transactions, solver runs and target checks
//! - A shared activity timer measuring the union of active mining intervals
//! - Solution rate and network height estimation
//! - A registry of mined blocks with a coalescing refresh signal for the display
//!
//! A synthetic SHA-256d workload and a log-based reporter exercise the core end to end.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Metrics core: counters, activity timer, height estimation and registry
pub mod metrics;

/// Synthetic mining workload feeding the registry
pub mod miner;

/// Display consumer that reports registry snapshots
pub mod stats;

/// Utility functions and error handling
pub mod utils;

/// Command-line interface definitions
pub mod cli;

/// Configuration management
pub mod config;

/// Shared type definitions
pub mod types;

// Core exports
pub use cli::Commands;
pub use config::{Config, ConsensusParams};
pub use metrics::{
    ActivityTimer, Counter, MetricsRegistry, MetricsSnapshot, estimate_net_height,
    estimate_net_height_inner,
};
pub use miner::{Algorithm, BlockAssembler, MiningJob, Scheduler, Share};
pub use stats::{MetricsReport, MetricsReporter};
pub use types::{BlockHash, ChainTip, ChainView};
pub use utils::{MetricsError, init_logging};
