use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use shelf_types::BookRecord;

use crate::error::{StoreError, StoreResult};
use crate::traits::Persistence;

/// In-memory, `Vec`-based persistence.
///
/// Intended for tests and embedding. Records are cloned on load/save. Saves
/// can be made to fail on demand to exercise rollback paths.
pub struct InMemoryPersistence {
    records: RwLock<Vec<BookRecord>>,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl InMemoryPersistence {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Create a backend pre-populated with `records`.
    pub fn with_records(records: Vec<BookRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            fail_saves: AtomicBool::new(false),
            saves: AtomicUsize::new(0),
        }
    }

    /// Copy of the currently persisted records.
    pub fn snapshot(&self) -> Vec<BookRecord> {
        self.records.read().expect("lock poisoned").clone()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make every subsequent `save` fail with an I/O error (or stop doing so).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl Default for InMemoryPersistence {
    fn default() -> Self {
        Self::new()
    }
}

impl Persistence for InMemoryPersistence {
    fn load(&self) -> StoreResult<Vec<BookRecord>> {
        Ok(self.snapshot())
    }

    fn save(&self, records: &[BookRecord]) -> StoreResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Io(io::Error::other("injected save failure")));
        }
        *self.records.write().expect("lock poisoned") = records.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

impl std::fmt::Debug for InMemoryPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.records.read().map(|r| r.len()).unwrap_or_default();
        f.debug_struct("InMemoryPersistence")
            .field("record_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, title: &str) -> BookRecord {
        BookRecord {
            id,
            title: title.into(),
            author: "Author".into(),
            year: 2000,
            status: "available".into(),
        }
    }

    #[test]
    fn empty_backend_loads_nothing() {
        let backend = InMemoryPersistence::new();
        assert!(backend.load().unwrap().is_empty());
    }

    #[test]
    fn save_replaces_everything() {
        let backend = InMemoryPersistence::with_records(vec![record(1, "a"), record(2, "b")]);
        backend.save(&[record(3, "c")]).unwrap();
        assert_eq!(backend.load().unwrap(), vec![record(3, "c")]);
        assert_eq!(backend.save_count(), 1);
    }

    #[test]
    fn injected_failure_keeps_previous_records() {
        let backend = InMemoryPersistence::with_records(vec![record(1, "a")]);
        backend.set_fail_saves(true);
        let err = backend.save(&[]).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert_eq!(backend.snapshot(), vec![record(1, "a")]);
        assert_eq!(backend.save_count(), 0);

        backend.set_fail_saves(false);
        backend.save(&[]).unwrap();
        assert!(backend.snapshot().is_empty());
    }
}
