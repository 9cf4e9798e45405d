// src/utils/error.rs
use crate::miner::scheduler;
use std::io;
use thiserror::Error;

/// Main error type for the metrics subsystem
///
/// Only configuration, input and plumbing failures surface here. Timer and
/// counter contract violations are clamped in place and never produce an error.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Configuration file or parameter errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid user input or parameter errors
    #[error("Invalid input: {0}")]
    InputError(String),

    /// Standard I/O operation errors
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Thread communication channel errors
    #[error("Thread communication error: {0}")]
    ChannelError(String),

    /// Background thread spawn or join errors
    #[error("Thread error: {0}")]
    ThreadError(String),
}

/// Converts crossbeam channel send errors for Shares into MetricsError
///
/// Raised when a lane cannot hand a winning share to the block assembler.
impl From<crossbeam_channel::SendError<scheduler::Share>> for MetricsError {
    fn from(e: crossbeam_channel::SendError<scheduler::Share>) -> Self {
        MetricsError::ChannelError(format!("Share send failed: {}", e))
    }
}

/// Converts hex decoding errors into MetricsError
///
/// Used when parsing block hashes from text.
impl From<hex::FromHexError> for MetricsError {
    fn from(e: hex::FromHexError) -> Self {
        MetricsError::InputError(format!("Hex conversion failed: {}", e))
    }
}

/// Converts TOML parse errors into MetricsError
impl From<toml::de::Error> for MetricsError {
    fn from(e: toml::de::Error) -> Self {
        MetricsError::ConfigError(format!("Invalid config format: {}", e))
    }
}
