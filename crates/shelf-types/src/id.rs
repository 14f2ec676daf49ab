use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Catalog-assigned identifier of a [`Book`](crate::Book).
///
/// A `BookId` is always strictly positive. Ids are handed out by the catalog
/// from a monotonic counter and never chosen by the user. The range is
/// `1..=i64::MAX` so every id round-trips through a persisted `i64`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    /// The id given to the first book of an empty catalog.
    pub const FIRST: BookId = BookId(1);

    /// Validate a raw integer as a book id.
    pub fn new(raw: i64) -> Result<Self, ValidationError> {
        if raw < 1 {
            return Err(ValidationError::InvalidId(raw));
        }
        Ok(Self(raw))
    }

    /// The raw numeric value.
    pub fn get(self) -> u64 {
        self.0.unsigned_abs()
    }

    /// The id immediately after this one, or `None` past `i64::MAX`.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl TryFrom<i64> for BookId {
    type Error = ValidationError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<BookId> for i64 {
    fn from(id: BookId) -> Self {
        id.0
    }
}

impl FromStr for BookId {
    type Err = ValidationError;

    /// Parse a decimal id. Anything that is not a positive integer is
    /// reported as [`ValidationError::InvalidId`] (non-numbers as `0`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i64 = s.trim().parse().map_err(|_| ValidationError::InvalidId(0))?;
        Self::new(raw)
    }
}

impl fmt::Debug for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BookId({})", self.0)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
