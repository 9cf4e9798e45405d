// src/miner/mod.rs
//! Synthetic mining workload
//!
//! Drives the metrics core the way a real miner would:
//! - Lanes hash nonce batches inside mining timer brackets
//! - Winning shares flow to the block assembler over a channel
//! - The assembler records mined blocks and publishes new templates

/// Hash functions and target checks
pub mod algorithm;

/// Share consumer and template builder
pub mod assembler;

/// Lane scheduling and job distribution
pub mod scheduler;

// Re-export main components for cleaner imports
pub use self::algorithm::{Algorithm, Sha256d};
pub use self::assembler::BlockAssembler;
pub use self::scheduler::{MiningJob, Scheduler, Share};
