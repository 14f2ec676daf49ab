//! The catalog: authoritative in-memory index of books kept in sync with
//! its backing file.
//!
//! The [`Catalog`] holds a `HashMap<BookId, Book>` plus the iteration order
//! of ids. Every mutation is staged as the full post-mutation record list,
//! handed to the [`Persistence`] port, and applied in memory only after the
//! save succeeds.

use std::collections::HashMap;
use std::sync::Arc;

use shelf_types::{Book, BookId, BookRecord, BookStatus};

use crate::error::{StoreError, StoreResult};
use crate::search::SearchField;
use crate::traits::Persistence;

/// Book catalog backed by a [`Persistence`] implementation.
pub struct Catalog {
    /// All books, keyed by id.
    books: HashMap<BookId, Book>,
    /// Ids in insertion/persisted order.
    order: Vec<BookId>,
    /// Id the next successful `add` will assign; `None` once ids run out.
    next_id: Option<BookId>,
    backend: Arc<dyn Persistence>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("books", &self.books.len())
            .field("next_id", &self.next_id)
            .field("backend", &self.backend.describe())
            .finish()
    }
}

impl Catalog {
    /// Load every persisted book and build the catalog.
    ///
    /// Each record is validated like user input. A record that fails
    /// validation, repeats an id, or repeats another book's content makes
    /// the whole load fail with [`StoreError::CorruptData`]; no partially
    /// loaded catalog is ever returned.
    pub fn open(backend: Arc<dyn Persistence>) -> StoreResult<Self> {
        let records = backend.load()?;
        let mut books: HashMap<BookId, Book> = HashMap::with_capacity(records.len());
        let mut order = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let location = || format!("{} (record #{})", backend.describe(), index + 1);
            let book = Book::from_record(record).map_err(|e| StoreError::corrupt(location(), e))?;

            if books.contains_key(&book.id()) {
                return Err(StoreError::corrupt(
                    location(),
                    format!("duplicate id {}", book.id()),
                ));
            }
            if let Some(existing) = order
                .iter()
                .filter_map(|id| books.get(id))
                .find(|other| other.same_content(&book))
            {
                return Err(StoreError::corrupt(
                    location(),
                    format!("same book as id {}", existing.id()),
                ));
            }

            order.push(book.id());
            books.insert(book.id(), book);
        }

        let next_id = order.iter().max().map_or(Some(BookId::FIRST), |id| id.next());
        Ok(Self {
            books,
            order,
            next_id,
            backend,
        })
    }

    /// Number of books in the catalog.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the catalog has no books.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Id the next successful [`add`](Self::add) will assign, or `None`
    /// when the id range is used up.
    pub fn next_id(&self) -> Option<BookId> {
        self.next_id
    }

    /// Iterate over books in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.order.iter().filter_map(|id| self.books.get(id))
    }

    // ---------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------

    /// Look up a book by id.
    pub fn get(&self, id: BookId) -> StoreResult<&Book> {
        self.books.get(&id).ok_or(StoreError::NotFound(id))
    }

    /// Snapshot of every book in catalog order.
    pub fn list(&self) -> Vec<Book> {
        self.iter().cloned().collect()
    }

    /// Search by a field given by name (`title`, `author` or `year`).
    pub fn search(&self, field: &str, query: &str) -> StoreResult<Vec<Book>> {
        let field: SearchField = field.parse()?;
        self.search_by(field, query)
    }

    /// Search by a typed field. Results keep catalog order.
    pub fn search_by(&self, field: SearchField, query: &str) -> StoreResult<Vec<Book>> {
        let matcher = field.matcher(query)?;
        Ok(self.iter().filter(|book| matcher.matches(book)).cloned().collect())
    }

    // ---------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------

    /// Add a new book with the next id and the default status.
    ///
    /// Fails with [`StoreError::Duplicate`] if a content-equal book exists.
    /// Fails with [`StoreError::IdsExhausted`] once `i64::MAX` is taken.
    /// The id counter only advances when the book is saved.
    pub fn add(&mut self, title: &str, author: &str, year: i32) -> StoreResult<Book> {
        let id = self.next_id.ok_or(StoreError::IdsExhausted)?;
        let candidate = Book::new(id, title, author, year)?;
        if let Some(existing) = self.iter().find(|book| book.same_content(&candidate)) {
            return Err(StoreError::Duplicate {
                title: existing.title().to_string(),
                existing: existing.id(),
            });
        }

        let mut staged = self.records();
        staged.push(candidate.to_record());
        self.backend.save(&staged)?;

        self.order.push(candidate.id());
        self.books.insert(candidate.id(), candidate.clone());
        self.next_id = id.next();
        Ok(candidate)
    }

    /// Remove a book and return it.
    pub fn delete(&mut self, id: BookId) -> StoreResult<Book> {
        self.get(id)?;

        let staged: Vec<BookRecord> = self
            .iter()
            .filter(|book| book.id() != id)
            .map(Book::to_record)
            .collect();
        self.backend.save(&staged)?;

        self.order.retain(|other| *other != id);
        self.books.remove(&id).ok_or(StoreError::NotFound(id))
    }

    /// Change a book's status given as text.
    ///
    /// An unknown id is reported before an unknown status.
    pub fn update_status(&mut self, id: BookId, status: &str) -> StoreResult<Book> {
        self.get(id)?;
        let status: BookStatus = status.parse()?;
        self.set_status(id, status)
    }

    /// Change a book's status.
    pub fn set_status(&mut self, id: BookId, status: BookStatus) -> StoreResult<Book> {
        self.get(id)?;

        let staged: Vec<BookRecord> = self
            .iter()
            .map(|book| {
                let mut record = book.to_record();
                if book.id() == id {
                    record.status = status.as_str().to_string();
                }
                record
            })
            .collect();
        self.backend.save(&staged)?;

        let book = self.books.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        book.set_status(status);
        Ok(book.clone())
    }

    fn records(&self) -> Vec<BookRecord> {
        self.iter().map(Book::to_record).collect()
    }
}
