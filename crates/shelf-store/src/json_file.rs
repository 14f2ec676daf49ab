//! JSON encoding of the catalog: one array of record objects.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use shelf_types::BookRecord;
use tracing::debug;

use crate::atomic::replace_file;
use crate::error::{StoreError, StoreResult};
use crate::traits::Persistence;

/// Catalog stored as a pretty-printed JSON array.
///
/// A missing, empty, or whitespace-only file loads as an empty catalog.
/// Output is UTF-8 with non-ASCII characters written literally and
/// four-space indentation.
#[derive(Clone, Debug)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn encode(records: &[BookRecord]) -> StoreResult<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records
            .serialize(&mut ser)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }
}

impl Persistence for JsonFile {
    fn load(&self) -> StoreResult<Vec<BookRecord>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "catalog file absent; starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<BookRecord> = serde_json::from_str(&text)
            .map_err(|e| StoreError::corrupt(self.describe(), e))?;
        debug!(path = %self.path.display(), records = records.len(), "loaded JSON catalog");
        Ok(records)
    }

    fn save(&self, records: &[BookRecord]) -> StoreResult<()> {
        let bytes = Self::encode(records)?;
        replace_file(&self.path, &bytes)?;
        debug!(path = %self.path.display(), records = records.len(), "saved JSON catalog");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
