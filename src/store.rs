//! Append-only in-memory resource store
//!
//! Every portal resource (events, reports, notifications, chat history,
//! announcements, messages) is backed by one `Store`. Records are only
//! ever appended; insertion order is the only ordering.

use std::sync::{PoisonError, RwLock};

/// Ordered, append-only sequence of records, alive for the process lifetime.
///
/// Synchronization lives at the store boundary: appends are atomic and
/// `list` returns a consistent snapshot. The lock is never held across an
/// await point.
#[derive(Debug, Default)]
pub struct Store<T> {
    records: RwLock<Vec<T>>,
}

impl<T: Clone> Store<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Create a store pre-populated with seed records
    pub fn seeded(initial: Vec<T>) -> Self {
        Self {
            records: RwLock::new(initial),
        }
    }

    /// Append a record at the end of the sequence and return the stored value.
    ///
    /// Records are plain data, so a poisoned lock cannot hold a torn entry;
    /// the guard is recovered instead of propagating the panic.
    pub fn append(&self, record: T) -> T {
        let mut records = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        records.push(record.clone());
        record
    }

    /// Snapshot of the full sequence, oldest first
    pub fn list(&self) -> Vec<T> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store: Store<String> = Store::new();
        assert!(store.is_empty());
        assert_eq!(store.list(), Vec::<String>::new());
    }

    #[test]
    fn test_append_returns_stored_value() {
        let store = Store::new();
        let stored = store.append("first".to_string());
        assert_eq!(stored, "first");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = Store::new();
        for i in 0..5 {
            store.append(i);
        }
        assert_eq!(store.list(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_seeded_store_keeps_seeds_before_appends() {
        let store = Store::seeded(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(store.len(), 2);
        store.append("c".to_string());
        assert_eq!(store.list(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_appends_from_multiple_threads_all_land() {
        let store = std::sync::Arc::new(Store::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || store.append(i))
            })
            .collect();
        for handle in handles {
            handle.join().expect("appender thread panicked");
        }
        assert_eq!(store.len(), 8);
    }
}
