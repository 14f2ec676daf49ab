use std::io::{self, Write};

use colored::Colorize;
use shelf_types::{Book, BookRecord, BookStatus};

use crate::cli::OutputFormat;

/// Multi-line, colored description of a book.
pub fn book_text(book: &Book) -> String {
    let status = match book.status() {
        BookStatus::Available => book.status().as_str().green(),
        BookStatus::Borrowed => book.status().as_str().yellow(),
    };
    format!(
        "{} {}\n{} {}\n{} {}\n{} {}\n{} {}",
        "id:".dimmed(),
        book.id().to_string().cyan(),
        "title:".dimmed(),
        book.title().bold(),
        "author:".dimmed(),
        book.author(),
        "year:".dimmed(),
        book.year(),
        "status:".dimmed(),
        status,
    )
}

/// Print a list of books, or a notice when there are none.
pub fn books(
    out: &mut impl Write,
    books: &[Book],
    empty_notice: &str,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => json(out, books),
        OutputFormat::Text if books.is_empty() => writeln!(out, "{empty_notice}"),
        OutputFormat::Text => {
            let blocks: Vec<String> = books.iter().map(book_text).collect();
            writeln!(out, "{}", blocks.join("\n\n"))
        }
    }
}

/// Print a single book under a heading.
pub fn book(out: &mut impl Write, heading: &str, book: &Book, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &book.to_record())?;
            writeln!(out)
        }
        OutputFormat::Text => writeln!(out, "{}\n{}", heading.green().bold(), book_text(book)),
    }
}

fn json(out: &mut impl Write, books: &[Book]) -> io::Result<()> {
    let records: Vec<BookRecord> = books.iter().map(Book::to_record).collect();
    serde_json::to_writer_pretty(&mut *out, &records)?;
    writeln!(out)
}
