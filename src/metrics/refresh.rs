// src/metrics/refresh.rs
//! Out-of-band redraw requests
//!
//! A single-slot channel: producers drop their request when one is already
//! pending, so any burst of triggers before the consumer wakes coalesces into
//! one redraw.

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

/// Why [`RefreshSignal::wait`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// A producer requested a refresh
    Signaled,
    /// The polling interval elapsed with no request
    Timeout,
}

/// Wake mechanism between metric producers and the display consumer
#[derive(Debug, Clone)]
pub struct RefreshSignal {
    sender: Sender<()>,
    receiver: Receiver<()>,
}

impl RefreshSignal {
    /// Creates a signal with no pending request
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::bounded(1);
        RefreshSignal { sender, receiver }
    }

    /// Requests a refresh; never blocks
    pub fn trigger(&self) {
        // Full means a request is already pending.
        let _ = self.sender.try_send(());
    }

    /// Whether a refresh request is pending
    pub fn pending(&self) -> bool {
        !self.receiver.is_empty()
    }

    /// Blocks until a refresh is requested or `timeout` elapses
    ///
    /// Consumes the pending request, if any.
    pub fn wait(&self, timeout: Duration) -> Wake {
        match self.receiver.recv_timeout(timeout) {
            Ok(()) => Wake::Signaled,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => Wake::Timeout,
        }
    }
}

impl Default for RefreshSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn times_out_without_trigger() {
        let signal = RefreshSignal::new();
        let started = Instant::now();
        assert_eq!(signal.wait(Duration::from_millis(20)), Wake::Timeout);
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn triggers_coalesce() {
        let signal = RefreshSignal::new();
        signal.trigger();
        signal.trigger();
        signal.trigger();
        assert!(signal.pending());

        assert_eq!(signal.wait(Duration::from_millis(10)), Wake::Signaled);
        assert!(!signal.pending());
        assert_eq!(signal.wait(Duration::from_millis(10)), Wake::Timeout);
    }

    #[test]
    fn wakes_waiting_thread() {
        let signal = RefreshSignal::new();
        let producer = signal.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            producer.trigger();
        });

        assert_eq!(signal.wait(Duration::from_secs(10)), Wake::Signaled);
        handle.join().unwrap();
    }
}
