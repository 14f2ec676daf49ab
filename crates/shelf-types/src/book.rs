use std::fmt;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::BookId;
use crate::status::BookStatus;

/// The current calendar year according to the local clock.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Persisted shape of a book: a flat mapping with keys
/// `id, title, author, year, status`.
///
/// Fields are deliberately loose (signed id, free-text status) so that a
/// malformed file reaches [`Book::from_record`] and fails validation the
/// same way malformed user input would.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i32,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    BookStatus::default().as_str().to_string()
}

/// A validated catalog entry.
///
/// All fields except `status` are fixed at construction. Two books describe
/// the same work when [`Book::same_content`] holds; `PartialEq` compares
/// every field including id and status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
    year: i32,
    status: BookStatus,
}

impl Book {
    /// Build a new book with the default status.
    ///
    /// `title` and `author` are trimmed; both must be non-blank. `year` must
    /// not be later than the current year.
    pub fn new(
        id: BookId,
        title: &str,
        author: &str,
        year: i32,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            title: non_empty("title", title)?,
            author: non_empty("author", author)?,
            year: not_in_future(year)?,
            status: BookStatus::default(),
        })
    }

    /// Replace the status at construction time.
    pub fn with_status(mut self, status: BookStatus) -> Self {
        self.status = status;
        self
    }

    /// Rebuild a book from its persisted form, re-running full validation.
    pub fn from_record(record: &BookRecord) -> Result<Self, ValidationError> {
        let id = BookId::new(record.id)?;
        let status = record.status.parse::<BookStatus>()?;
        Ok(Self::new(id, &record.title, &record.author, record.year)?.with_status(status))
    }

    /// Persisted form of this book.
    pub fn to_record(&self) -> BookRecord {
        BookRecord {
            id: self.id.into(),
            title: self.title.clone(),
            author: self.author.clone(),
            year: self.year,
            status: self.status.as_str().to_string(),
        }
    }

    /// Content equality: case-insensitive title and author, exact year.
    /// Id and status are ignored.
    pub fn same_content(&self, other: &Book) -> bool {
        self.year == other.year
            && self.title.to_lowercase() == other.title.to_lowercase()
            && self.author.to_lowercase() == other.author.to_lowercase()
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn status(&self) -> BookStatus {
        self.status
    }

    /// The only mutation a book supports after construction.
    pub fn set_status(&mut self, status: BookStatus) {
        self.status = status;
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "id: {}", self.id)?;
        writeln!(f, "title: {}", self.title)?;
        writeln!(f, "author: {}", self.author)?;
        writeln!(f, "year: {}", self.year)?;
        write!(f, "status: {}", self.status)
    }
}

fn non_empty(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

fn not_in_future(year: i32) -> Result<i32, ValidationError> {
    let current = current_year();
    if year > current {
        return Err(ValidationError::FutureYear { year, current });
    }
    Ok(year)
}
