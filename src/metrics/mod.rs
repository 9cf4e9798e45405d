// src/metrics/mod.rs
//! Mining metrics core
//!
//! In-memory, process-lifetime accounting shared between mining workers and
//! the display consumer:
//! - [`Counter`]: lock-free event counts
//! - [`ActivityTimer`]: union-of-intervals mining time across workers
//! - [`estimate_net_height_inner`]: network height extrapolation
//! - [`MetricsRegistry`]: the context object tying them together

/// Time sources for the activity timer
pub mod clock;

/// Lock-free counters
pub mod counter;

/// Network height estimation from checkpoints
pub mod height;

/// Bounded recent-event lists
pub mod recent;

/// Coalescing redraw signal
pub mod refresh;

/// Shared metrics context
pub mod registry;

/// Serializable registry snapshots
pub mod snapshot;

/// Shared mining activity stopwatch
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use counter::Counter;
pub use height::{estimate_net_height, estimate_net_height_inner};
pub use recent::RecentList;
pub use refresh::{RefreshSignal, Wake};
pub use registry::MetricsRegistry;
pub use snapshot::MetricsSnapshot;
pub use timer::{ActivityTimer, TimerGuard};
