// src/config/mod.rs
//! Configuration management
//!
//! TOML configuration covering:
//! - Display refresh interval and retention sizes
//! - Synthetic workload parameters
//! - Consensus parameters and checkpoints for height estimation

/// Core configuration implementation
pub mod config;

// Re-export key items for easy access
pub use config::{Checkpoint, Config, ConsensusParams, DisplayConfig, MiningConfig};

use crate::utils::error::MetricsError;
use std::path::PathBuf;

/// Loads and validates configuration from a TOML file
pub fn load(path: impl Into<PathBuf>) -> Result<Config, MetricsError> {
    Config::load(path)
}

/// Loads configuration, falling back to defaults when the file is absent
pub fn load_or_default(path: impl Into<PathBuf>) -> Result<Config, MetricsError> {
    Config::load_or_default(path)
}

/// Generates a commented configuration template
///
/// # Arguments
/// * `checkpoint` - Whether to include an example checkpoint
pub fn generate_template(checkpoint: bool) -> String {
    Config::generate_template(checkpoint)
}
