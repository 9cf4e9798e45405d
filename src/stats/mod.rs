//! Display consumer for the metrics registry
//!
//! [`MetricsReporter`] wakes on refresh requests or a polling interval, reads a
//! registry snapshot, adds chain-derived values (network height estimate,
//! orphaned blocks) and writes the result to the log as text or JSON.
//! Terminal rendering is left to whoever consumes [`MetricsReport`].

/// Submodule containing the reporter thread and report type
pub mod reporter;

// Re-export main components
pub use reporter::{MetricsReport, MetricsReporter};
