//! # Persistence Errors
//!
//! Error types for the persistence layer, wrapping sqlx and row-decoding
//! failures.

use thiserror::Error;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid UUID in column {column}: {value}")]
    InvalidUuid { column: String, value: String },

    #[error("Invalid enum value: {column} = {value}")]
    InvalidEnumValue { column: String, value: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for StoreError
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub fn invalid_uuid(column: &str, value: &str) -> Self {
        Self::InvalidUuid {
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    pub fn invalid_enum(column: &str, value: &str) -> Self {
        Self::InvalidEnumValue {
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    /// True when the underlying failure is a UNIQUE constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StoreError::Database(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::invalid_uuid("owner_id", "not-a-uuid");
        assert_eq!(err.to_string(), "Invalid UUID in column owner_id: not-a-uuid");

        let err = StoreError::invalid_enum("account_type", "CHECKING");
        assert_eq!(err.to_string(), "Invalid enum value: account_type = CHECKING");
    }
}
