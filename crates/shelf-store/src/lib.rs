//! File-backed record store for the shelf catalog.
//!
//! The [`Catalog`] owns the authoritative `id -> Book` mapping and keeps it in
//! sync with a backing file through the [`Persistence`] port. Every mutation
//! is validated, written out in full, and only then applied in memory.
//!
//! # Storage Backends
//!
//! All backends implement the [`Persistence`] trait:
//!
//! - [`JsonFile`] -- pretty-printed JSON array of records
//! - [`CsvFile`] -- header row plus one row per record
//! - [`InMemoryPersistence`] -- `Vec`-backed store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Ids come from a monotonic counter and are never reused.
//! 2. At most one book per content-equal group (title/author/year).
//! 3. Stage, save, then commit: a failed save leaves memory untouched.
//! 4. Loaded records are validated like user input; corruption is fatal.
//! 5. The store never prints; backends only emit `tracing` diagnostics.

mod atomic;
pub mod catalog;
pub mod config;
pub mod csv_file;
pub mod error;
pub mod json_file;
pub mod memory;
pub mod search;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use catalog::Catalog;
pub use config::{CatalogConfig, StorageFormat};
pub use csv_file::CsvFile;
pub use error::{StoreError, StoreResult};
pub use json_file::JsonFile;
pub use memory::InMemoryPersistence;
pub use search::SearchField;
pub use traits::Persistence;
