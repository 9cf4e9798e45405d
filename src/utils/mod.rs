// src/utils/mod.rs
//! Utilities module for common functionality
//!
//! Error handling and logging infrastructure shared by the library and binary.

/// Error types and handling utilities
///
/// Contains the [`MetricsError`] enum along with its conversion implementations.
pub mod error;

/// Logging configuration and utilities
pub mod logging;

// Re-export for easier access
pub use error::MetricsError;
pub use logging::{init_logging, init_verbose_logging};
