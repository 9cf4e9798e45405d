// src/metrics/counter.rs
use std::sync::atomic::{AtomicI64, Ordering};

/// Lock-free signed counter shared by worker threads
///
/// No bounds are enforced; decrementing below zero is allowed.
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicI64,
}

impl Counter {
    /// Creates a counter starting at zero
    pub const fn new() -> Self {
        Counter {
            value: AtomicI64::new(0),
        }
    }

    /// Adds one
    pub fn increment(&self) {
        self.value.fetch_add(1, Ordering::SeqCst);
    }

    /// Subtracts one
    pub fn decrement(&self) {
        self.value.fetch_sub(1, Ordering::SeqCst);
    }

    /// Current value
    pub fn get(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn starts_at_zero_and_goes_negative() {
        let counter = Counter::new();
        assert_eq!(counter.get(), 0);
        counter.decrement();
        assert_eq!(counter.get(), -1);
        counter.increment();
        counter.increment();
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn concurrent_updates_converge() {
        let counter = Arc::new(Counter::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let counter = counter.clone();
                std::thread::spawn(move || {
                    for _ in 0..10_000 {
                        counter.increment();
                    }
                    // Half the threads also take some back
                    if i % 2 == 0 {
                        for _ in 0..2_500 {
                            counter.decrement();
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.get(), 8 * 10_000 - 4 * 2_500);
    }
}
