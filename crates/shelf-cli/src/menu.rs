//! Interactive text menu over a [`Catalog`].
//!
//! Reads answers line by line from any `BufRead` and writes to any `Write`,
//! so the whole dialogue can be driven from tests. Store errors are shown
//! and the loop continues; end of input leaves the menu.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use colored::Colorize;
use shelf_store::{Catalog, SearchField, StoreError};
use shelf_types::{BookId, BookStatus};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::render;

const OPTIONS: [&str; 7] = [
    "List all books",
    "Show a book by id",
    "Add a book",
    "Delete a book",
    "Change a book's status",
    "Search books",
    "Exit",
];

pub struct Menu<'a, R, W> {
    catalog: &'a mut Catalog,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(catalog: &'a mut Catalog, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
        }
    }

    /// Run until the user picks Exit or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_options()?;
            let Some(choice) = self.ask("Choose an action: ")? else {
                break;
            };
            debug!(choice = choice.as_str(), "menu choice");
            match choice.as_str() {
                "1" => self.list()?,
                "2" => self.show()?,
                "3" => self.add()?,
                "4" => self.delete()?,
                "5" => self.change_status()?,
                "6" => self.search()?,
                "7" => break,
                _ => self.error("invalid choice")?,
            }
        }
        writeln!(self.output, "Goodbye.")
    }

    fn print_options(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{}", "Book catalog".bold())?;
        for (n, option) in OPTIONS.iter().enumerate() {
            writeln!(self.output, "{}. {}", n + 1, option)?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Actions
    // ---------------------------------------------------------------

    fn list(&mut self) -> io::Result<()> {
        let books = self.catalog.list();
        render::books(&mut self.output, &books, "The catalog is empty.", OutputFormat::Text)
    }

    fn show(&mut self) -> io::Result<()> {
        let Some(id) = self.ask_id()? else {
            return Ok(());
        };
        match self.catalog.get(id) {
            Ok(book) => {
                let book = book.clone();
                render::book(&mut self.output, "Found book:", &book, OutputFormat::Text)
            }
            Err(e) => self.store_error(&e),
        }
    }

    fn add(&mut self) -> io::Result<()> {
        let Some(title) = self.ask("Title: ")? else {
            return Ok(());
        };
        let Some(author) = self.ask("Author: ")? else {
            return Ok(());
        };
        let Some(year) = self.ask_number::<i32>("Year: ")? else {
            return Ok(());
        };
        match self.catalog.add(&title, &author, year) {
            Ok(book) => render::book(&mut self.output, "Book added:", &book, OutputFormat::Text),
            Err(e) => self.store_error(&e),
        }
    }

    fn delete(&mut self) -> io::Result<()> {
        let Some(id) = self.ask_id()? else {
            return Ok(());
        };
        match self.catalog.delete(id) {
            Ok(book) => render::book(&mut self.output, "Book deleted:", &book, OutputFormat::Text),
            Err(e) => self.store_error(&e),
        }
    }

    fn change_status(&mut self) -> io::Result<()> {
        let Some(id) = self.ask_id()? else {
            return Ok(());
        };
        let labels: Vec<&str> = BookStatus::ALL.iter().map(|s| s.as_str()).collect();
        let Some(status) = self.pick("New status: ", &BookStatus::ALL, &labels)? else {
            return Ok(());
        };
        match self.catalog.set_status(id, status) {
            Ok(book) => render::book(&mut self.output, "Status updated:", &book, OutputFormat::Text),
            Err(e) => self.store_error(&e),
        }
    }

    fn search(&mut self) -> io::Result<()> {
        let labels: Vec<&str> = SearchField::ALL.iter().map(|f| f.as_str()).collect();
        let Some(field) = self.pick("Search by: ", &SearchField::ALL, &labels)? else {
            return Ok(());
        };
        let Some(query) = self.ask("Query: ")? else {
            return Ok(());
        };
        match self.catalog.search_by(field, &query) {
            Ok(found) => render::books(&mut self.output, &found, "No books found.", OutputFormat::Text),
            Err(e) => self.store_error(&e),
        }
    }

    // ---------------------------------------------------------------
    // Prompting
    // ---------------------------------------------------------------

    /// Prompt and read one trimmed line. `None` at end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt for a number. Non-numeric input is reported and yields `None`.
    fn ask_number<T: FromStr>(&mut self, prompt: &str) -> io::Result<Option<T>> {
        let Some(answer) = self.ask(prompt)? else {
            return Ok(None);
        };
        match answer.parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                self.error("input must be a number")?;
                Ok(None)
            }
        }
    }

    fn ask_id(&mut self) -> io::Result<Option<BookId>> {
        let Some(raw) = self.ask_number::<i64>("Book id: ")? else {
            return Ok(None);
        };
        match BookId::new(raw) {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                self.store_error(&e.into())?;
                Ok(None)
            }
        }
    }

    /// Numbered pick from `choices`. Out-of-range answers yield `None`.
    fn pick<T: Copy>(&mut self, prompt: &str, choices: &[T], labels: &[&str]) -> io::Result<Option<T>> {
        for (n, label) in labels.iter().enumerate() {
            writeln!(self.output, "{}. {}", n + 1, label)?;
        }
        let Some(n) = self.ask_number::<usize>(prompt)? else {
            return Ok(None);
        };
        match n.checked_sub(1).and_then(|i| choices.get(i)) {
            Some(choice) => Ok(Some(*choice)),
            None => {
                self.error("invalid choice")?;
                Ok(None)
            }
        }
    }

    fn store_error(&mut self, err: &StoreError) -> io::Result<()> {
        self.error(&err.to_string())
    }

    fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "\n{} {}\n", "Error:".red().bold(), message)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use shelf_store::InMemoryPersistence;

    fn catalog() -> (Arc<InMemoryPersistence>, Catalog) {
        let backend = Arc::new(InMemoryPersistence::new());
        let mut catalog = Catalog::open(backend.clone()).unwrap();
        catalog
            .add("Преступление и наказание", "Федор Достоевский", 1866)
            .unwrap();
        (backend, catalog)
    }

    fn run(catalog: &mut Catalog, script: &str) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        Menu::new(catalog, script.as_bytes(), &mut out).run().unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn exit_leaves_the_loop() {
        let (_, mut catalog) = catalog();
        let out = run(&mut catalog, "7\n1\n");
        assert!(out.contains("1. List all books"));
        assert!(out.ends_with("Goodbye.\n"));
        assert!(!out.contains("Преступление"));
    }

    #[test]
    fn end_of_input_leaves_the_loop() {
        let (_, mut catalog) = catalog();
        let out = run(&mut catalog, "");
        assert!(out.ends_with("Goodbye.\n"));
    }

    #[test]
    fn list_shows_books() {
        let (_, mut catalog) = catalog();
        let out = run(&mut catalog, "1\n7\n");
        assert!(out.contains("title: Преступление и наказание"));
    }

    #[test]
    fn list_empty_catalog() {
        let mut catalog = Catalog::open(Arc::new(InMemoryPersistence::new())).unwrap();
        let out = run(&mut catalog, "1\n7\n");
        assert!(out.contains("The catalog is empty."));
    }

    #[test]
    fn show_by_id() {
        let (_, mut catalog) = catalog();
        let out = run(&mut catalog, "2\n1\n7\n");
        assert!(out.contains("Found book:"));
        assert!(out.contains("author: Федор Достоевский"));
    }

    #[test]
    fn show_with_non_numeric_id() {
        let (_, mut catalog) = catalog();
        let out = run(&mut catalog, "2\nnot number\n7\n");
        assert!(out.contains("Error: input must be a number"));
        assert!(!out.contains("Found book:"));
    }

    #[test]
    fn show_missing_book_reports_and_continues() {
        let (_, mut catalog) = catalog();
        let out = run(&mut catalog, "2\n100\n1\n7\n");
        assert!(out.contains("Error: book with id 100 not found"));
        assert!(out.contains("title: Преступление и наказание"));
    }

    #[test]
    fn add_book() {
        let (backend, mut catalog) = catalog();
        let out = run(&mut catalog, "3\n1984\nДжордж Оруэлл\n1949\n7\n");
        assert!(out.contains("Book added:"));
        assert_eq!(catalog.len(), 2);
        assert_eq!(backend.snapshot()[1].title, "1984");
    }

    #[test]
    fn add_existing_book_is_reported() {
        let (_, mut catalog) = catalog();
        let out = run(
            &mut catalog,
            "3\nпреступление и наказание\nФедор Достоевский\n1866\n7\n",
        );
        assert!(out.contains("Error: book \"Преступление и наказание\" already exists"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn add_with_non_numeric_year() {
        let (_, mut catalog) = catalog();
        let out = run(&mut catalog, "3\nTitle\nAuthor\nnot number\n7\n");
        assert!(out.contains("Error: input must be a number"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn delete_book() {
        let (_, mut catalog) = catalog();
        let out = run(&mut catalog, "4\n1\n7\n");
        assert!(out.contains("Book deleted:"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn delete_missing_book() {
        let (_, mut catalog) = catalog();
        let out = run(&mut catalog, "4\n100\n7\n");
        assert!(out.contains("Error: book with id 100 not found"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn change_status() {
        let (_, mut catalog) = catalog();
        let out = run(&mut catalog, "5\n1\n2\n7\n");
        assert!(out.contains("1. available\n2. borrowed"));
        assert!(out.contains("Status updated:"));
        let id = BookId::new(1).unwrap();
        assert_eq!(catalog.get(id).unwrap().status(), BookStatus::Borrowed);
    }

    #[test]
    fn change_status_with_invalid_pick() {
        let (_, mut catalog) = catalog();
        let out = run(&mut catalog, "5\n1\n3\n7\n");
        assert!(out.contains("Error: invalid choice"));
        let id = BookId::new(1).unwrap();
        assert_eq!(catalog.get(id).unwrap().status(), BookStatus::Available);
    }

    #[test]
    fn search_by_title() {
        let (_, mut catalog) = catalog();
        let out = run(&mut catalog, "6\n1\nнаказание\n7\n");
        assert!(out.contains("title: Преступление и наказание"));
    }

    #[test]
    fn search_without_matches() {
        let (_, mut catalog) = catalog();
        let out = run(&mut catalog, "6\n3\n2020\n7\n");
        assert!(out.contains("No books found."));
    }

    #[test]
    fn search_with_invalid_field_pick() {
        let (_, mut catalog) = catalog();
        let out = run(&mut catalog, "6\n4\n7\n");
        assert!(out.contains("Error: invalid choice"));
    }

    #[test]
    fn search_year_with_non_numeric_query() {
        let (_, mut catalog) = catalog();
        let out = run(&mut catalog, "6\n3\nlast year\n7\n");
        assert!(out.contains("invalid year query"));
    }

    #[test]
    fn unknown_menu_choice() {
        let (_, mut catalog) = catalog();
        let out = run(&mut catalog, "9\n7\n");
        assert!(out.contains("Error: invalid choice"));
    }
}
