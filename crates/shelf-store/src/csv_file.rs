//! CSV encoding of the catalog: a header row then one row per record.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use shelf_types::BookRecord;
use tracing::debug;

use crate::atomic::replace_file;
use crate::error::{StoreError, StoreResult};
use crate::traits::Persistence;

/// Column names, in persisted order.
pub const HEADER: [&str; 5] = ["id", "title", "author", "year", "status"];

/// Catalog stored as delimited text with an `id,title,author,year,status`
/// header.
///
/// Unlike [`JsonFile`](crate::JsonFile), a missing file is an error. Saving
/// always writes the header, so an empty catalog is a header-only file.
#[derive(Clone, Debug)]
pub struct CsvFile {
    path: PathBuf,
    delimiter: u8,
}

impl CsvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
        }
    }

    /// Use a field delimiter other than `,`.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn encode(&self, records: &[BookRecord]) -> StoreResult<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());

        if records.is_empty() {
            writer.write_record(HEADER).map_err(serialization)?;
        }
        for record in records {
            writer.serialize(record).map_err(serialization)?;
        }
        writer
            .into_inner()
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

fn serialization(e: csv::Error) -> StoreError {
    StoreError::Serialization(e.to_string())
}

impl Persistence for CsvFile {
    fn load(&self) -> StoreResult<Vec<BookRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::MissingFile(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut records = Vec::new();
        for row in reader.deserialize::<BookRecord>() {
            let record = row.map_err(|e| StoreError::corrupt(self.describe(), e))?;
            records.push(record);
        }
        debug!(path = %self.path.display(), records = records.len(), "loaded CSV catalog");
        Ok(records)
    }

    fn save(&self, records: &[BookRecord]) -> StoreResult<()> {
        let bytes = self.encode(records)?;
        replace_file(&self.path, &bytes)?;
        debug!(path = %self.path.display(), records = records.len(), "saved CSV catalog");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
