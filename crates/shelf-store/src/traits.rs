use shelf_types::BookRecord;

use crate::error::StoreResult;

/// Load/save port to the catalog's backing storage.
///
/// All implementations must satisfy these invariants:
/// - `save` replaces the whole persisted collection; it is never an append.
/// - `load` returns records in persisted order.
/// - No file handle is held between calls.
/// - All I/O errors are propagated, never silently ignored.
pub trait Persistence: Send + Sync {
    /// Read every persisted record.
    fn load(&self) -> StoreResult<Vec<BookRecord>>;

    /// Overwrite the persisted collection with `records`.
    fn save(&self, records: &[BookRecord]) -> StoreResult<()>;

    /// Human-readable location, used in diagnostics.
    fn describe(&self) -> String;
}
