//! Field search over catalog books.
//!
//! Searchable fields form a closed set. Each field dispatches to a typed
//! accessor; nothing outside this set can be reached by name.

use std::fmt;
use std::str::FromStr;

use shelf_types::{Book, ValidationError};

/// A field books can be searched by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchField {
    Title,
    Author,
    Year,
}

impl SearchField {
    /// Every searchable field, in menu order.
    pub const ALL: [SearchField; 3] = [SearchField::Title, SearchField::Author, SearchField::Year];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Year => "year",
        }
    }

    /// Compile `query` into a predicate for this field.
    ///
    /// Text fields match a case-insensitive substring of the trimmed query.
    /// `year` requires an integer query and matches it exactly.
    pub(crate) fn matcher(self, query: &str) -> Result<Matcher, ValidationError> {
        let query = query.trim();
        Ok(match self {
            Self::Title => Matcher::Text {
                field: Book::title,
                needle: query.to_lowercase(),
            },
            Self::Author => Matcher::Text {
                field: Book::author,
                needle: query.to_lowercase(),
            },
            Self::Year => Matcher::Year(
                query
                    .parse()
                    .map_err(|_| ValidationError::InvalidYearQuery(query.to_string()))?,
            ),
        })
    }
}

impl FromStr for SearchField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| ValidationError::UnsupportedSearchField(s.to_string()))
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiled search predicate.
pub(crate) enum Matcher {
    Text { field: fn(&Book) -> &str, needle: String },
    Year(i32),
}

impl Matcher {
    pub(crate) fn matches(&self, book: &Book) -> bool {
        match self {
            Self::Text { field, needle } => field(book).to_lowercase().contains(needle.as_str()),
            Self::Year(year) => book.year() == *year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_types::BookId;

    fn war_and_peace() -> Book {
        Book::new(BookId::FIRST, "Война и мир", "Лев Толстой", 1869).unwrap()
    }

    #[test]
    fn parse_known_fields() {
        assert_eq!("title".parse::<SearchField>().unwrap(), SearchField::Title);
        assert_eq!(" Author ".parse::<SearchField>().unwrap(), SearchField::Author);
        assert_eq!("YEAR".parse::<SearchField>().unwrap(), SearchField::Year);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = "status".parse::<SearchField>().unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedSearchField("status".into()));
        assert!("id".parse::<SearchField>().is_err());
    }

    #[test]
    fn text_match_is_case_insensitive_substring() {
        let book = war_and_peace();
        assert!(SearchField::Author.matcher("толстой").unwrap().matches(&book));
        assert!(SearchField::Title.matcher(" МИР ").unwrap().matches(&book));
        assert!(!SearchField::Title.matcher("мирный").unwrap().matches(&book));
    }

    #[test]
    fn year_match_is_exact() {
        let book = war_and_peace();
        assert!(SearchField::Year.matcher("1869").unwrap().matches(&book));
        assert!(!SearchField::Year.matcher("186").unwrap().matches(&book));
    }

    #[test]
    fn non_integer_year_query_is_rejected() {
        let err = SearchField::Year.matcher("eighteen").err().unwrap();
        assert_eq!(err, ValidationError::InvalidYearQuery("eighteen".into()));
    }
}
