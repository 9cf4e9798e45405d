// src/metrics/recent.rs
use std::collections::VecDeque;
use std::sync::Mutex;

/// Append-only list keeping the newest `capacity` entries
///
/// Entries come back in arrival order; the oldest is evicted first.
#[derive(Debug)]
pub struct RecentList<T> {
    capacity: usize,
    entries: Mutex<VecDeque<T>>,
}

impl<T: Clone> RecentList<T> {
    /// Creates an empty list
    pub fn new(capacity: usize) -> Self {
        RecentList {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Maximum number of retained entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends an entry, evicting the oldest ones beyond capacity
    pub fn push(&self, entry: T) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.push_back(entry);
        while entries.len() > self.capacity {
            entries.pop_front();
        }
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether nothing is retained
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the retained entries, oldest first
    pub fn to_vec(&self) -> Vec<T> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_first() {
        let list = RecentList::new(3);
        for i in 0..7 {
            list.push(i);
        }
        assert_eq!(list.to_vec(), vec![4, 5, 6]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let list = RecentList::new(0);
        list.push("ignored");
        assert!(list.is_empty());
    }
}
