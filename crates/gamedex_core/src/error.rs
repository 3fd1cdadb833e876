//! Error types for GameDex core.

use crate::types::ExternalId;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in catalog model operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Rating value is not on the doubled five-star scale.
    #[error("invalid rating {value}: expected one of 0, 2, 4, 6, 8, 10")]
    InvalidRating {
        /// The rejected value.
        value: u8,
    },

    /// Star count is above the maximum.
    #[error("invalid star count {stars}: expected 0 to 5")]
    InvalidStars {
        /// The rejected star count.
        stars: u8,
    },

    /// An entry with this external ID is already in the catalog.
    #[error("duplicate entry: {0}")]
    DuplicateEntry(ExternalId),

    /// No entry with this external ID is in the catalog.
    #[error("entry not found: {0}")]
    NotFound(ExternalId),
}

impl CoreError {
    /// Returns true if the error should be treated as a silent no-op.
    ///
    /// Duplicate adds and edits against missing entries are ignored by the
    /// presentation layer rather than reported.
    pub fn is_silent(&self) -> bool {
        matches!(self, CoreError::DuplicateEntry(_) | CoreError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_errors() {
        assert!(CoreError::DuplicateEntry(ExternalId::new(1)).is_silent());
        assert!(CoreError::NotFound(ExternalId::new(1)).is_silent());
        assert!(!CoreError::InvalidRating { value: 3 }.is_silent());
    }

    #[test]
    fn error_display() {
        let err = CoreError::InvalidRating { value: 7 };
        assert!(err.to_string().contains('7'));

        let err = CoreError::NotFound(ExternalId::new(42));
        assert_eq!(err.to_string(), "entry not found: rawg:42");
    }
}
