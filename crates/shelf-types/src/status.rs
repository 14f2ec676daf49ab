use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Lending state of a book.
///
/// This is a closed set: validation is a membership check performed by
/// [`FromStr`], never a free-text comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    /// On the shelf. Default for newly added books.
    #[default]
    Available,
    /// Lent out.
    Borrowed,
}

impl BookStatus {
    /// Every status, in menu order.
    pub const ALL: [BookStatus; 2] = [BookStatus::Available, BookStatus::Borrowed];

    /// Serialized token.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Borrowed => "borrowed",
        }
    }

    /// Label used by catalog files written before the English tokens.
    fn legacy_label(self) -> &'static str {
        match self {
            Self::Available => "в наличии",
            Self::Borrowed => "выдана",
        }
    }
}

impl FromStr for BookStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| needle == status.as_str() || needle == status.legacy_label())
            .ok_or_else(|| ValidationError::UnknownStatus(s.to_string()))
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
