use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::csv_file::CsvFile;
use crate::error::StoreResult;
use crate::json_file::JsonFile;
use crate::traits::Persistence;

/// On-disk encoding of the catalog file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    #[default]
    Json,
    Csv,
}

impl StorageFormat {
    /// Guess the format from a file extension: `.csv` is CSV, anything else JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

impl FromStr for StorageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown storage format: {other}")),
        }
    }
}

impl fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Csv => "csv",
        })
    }
}

/// Where and how the catalog is stored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path of the catalog file.
    pub path: PathBuf,
    /// File encoding.
    pub format: StorageFormat,
    /// Field delimiter for CSV files.
    pub csv_delimiter: u8,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::for_path("library.json")
    }
}

impl CatalogConfig {
    /// Configuration for `path`, with the format inferred from its extension.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            format: StorageFormat::from_path(&path),
            path,
            csv_delimiter: b',',
        }
    }

    /// Build the persistence backend this configuration describes.
    pub fn open_backend(&self) -> Arc<dyn Persistence> {
        match self.format {
            StorageFormat::Json => Arc::new(JsonFile::new(&self.path)),
            StorageFormat::Csv => {
                Arc::new(CsvFile::new(&self.path).with_delimiter(self.csv_delimiter))
            }
        }
    }

    /// Open the catalog stored at this location.
    pub fn open_catalog(&self) -> StoreResult<Catalog> {
        Catalog::open(self.open_backend())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = CatalogConfig::default();
        assert_eq!(c.path, PathBuf::from("library.json"));
        assert_eq!(c.format, StorageFormat::Json);
        assert_eq!(c.csv_delimiter, b',');
    }

    #[test]
    fn format_inferred_from_extension() {
        assert_eq!(CatalogConfig::for_path("books.CSV").format, StorageFormat::Csv);
        assert_eq!(CatalogConfig::for_path("books.json").format, StorageFormat::Json);
        assert_eq!(CatalogConfig::for_path("books").format, StorageFormat::Json);
    }

    #[test]
    fn parse_format() {
        assert_eq!("CSV".parse::<StorageFormat>().unwrap(), StorageFormat::Csv);
        assert!("xml".parse::<StorageFormat>().is_err());
    }

    #[test]
    fn open_catalog_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::for_path(dir.path().join("library.json"));
        let mut catalog = config.open_catalog().unwrap();
        catalog.add("1984", "Джордж Оруэлл", 1949).unwrap();
        assert_eq!(config.open_catalog().unwrap().len(), 1);
    }

    #[test]
    fn csv_catalog_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::for_path(dir.path().join("library.csv"));
        assert!(matches!(
            config.open_catalog(),
            Err(crate::StoreError::MissingFile(_))
        ));
    }

    #[test]
    fn csv_catalog_with_custom_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.csv");
        std::fs::write(&path, "id;title;author;year;status\n").unwrap();

        let config = CatalogConfig {
            csv_delimiter: b';',
            ..CatalogConfig::for_path(&path)
        };
        let mut catalog = config.open_catalog().unwrap();
        let book = catalog.add("Dune", "Frank Herbert", 1965).unwrap();
        catalog.delete(book.id()).unwrap();
        assert!(config.open_catalog().unwrap().is_empty());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "id;title;author;year;status\n"
        );
    }
}
