use thiserror::Error;

/// Errors produced when a field value fails validation.
///
/// Every variant names the offending field (see [`ValidationError::field`])
/// and carries the rejected value so callers can render a precise message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid id {0}: must be a positive integer")]
    InvalidId(i64),

    #[error("{field} must be a non-empty string")]
    EmptyField { field: &'static str },

    #[error("year {year} is in the future (current year is {current})")]
    FutureYear { year: i32, current: i32 },

    #[error("unknown status {0:?}: expected one of available, borrowed")]
    UnknownStatus(String),

    #[error("unsupported search field {0:?}: expected one of title, author, year")]
    UnsupportedSearchField(String),

    #[error("invalid year query {0:?}: must be an integer")]
    InvalidYearQuery(String),
}

impl ValidationError {
    /// Name of the field the error refers to.
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidId(_) => "id",
            Self::EmptyField { field } => *field,
            Self::FutureYear { .. } | Self::InvalidYearQuery(_) => "year",
            Self::UnknownStatus(_) => "status",
            Self::UnsupportedSearchField(_) => "field",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names() {
        assert_eq!(ValidationError::InvalidId(0).field(), "id");
        assert_eq!(ValidationError::EmptyField { field: "author" }.field(), "author");
        assert_eq!(
            ValidationError::FutureYear { year: 3000, current: 2024 }.field(),
            "year"
        );
        assert_eq!(ValidationError::UnknownStatus("lost".into()).field(), "status");
        assert_eq!(ValidationError::UnsupportedSearchField("isbn".into()).field(), "field");
    }

    #[test]
    fn messages_carry_the_value() {
        let err = ValidationError::UnsupportedSearchField("bogus".into());
        assert!(err.to_string().contains("\"bogus\""));
        let err = ValidationError::InvalidId(-3);
        assert!(err.to_string().contains("-3"));
    }
}
