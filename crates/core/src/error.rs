//! # Error Module
//!
//! Core domain errors, independent of any persistence concern.

use thiserror::Error;

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid account type: {0}")]
    InvalidAccountType(String),

    #[error("Balance overflow: {balance} + {amount}")]
    BalanceOverflow { balance: i64, amount: i64 },
}

/// Result type alias with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn is_invalid_type(&self) -> bool {
        matches!(self, CoreError::InvalidAccountType(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::InvalidAccountType("CHECKING".to_string());
        assert_eq!(err.to_string(), "Invalid account type: CHECKING");
        assert!(err.is_invalid_type());
    }
}
