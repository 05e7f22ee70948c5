//! Error types for Earmark
//!
//! All failures are explicit and returned synchronously to the caller;
//! nothing is swallowed and nothing retries on its own. Retry policy, if
//! any, belongs to the caller.

use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Earmark error types
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// Caller lacks the required role
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    /// Unknown program id
    #[error("Program {program_id} not found")]
    ProgramNotFound { program_id: u64 },

    /// Empty text, zero amount or target, or a null identity
    #[error("Invalid argument: {field} - {reason}")]
    InvalidArgument { field: String, reason: String },

    /// Operation attempted against the wrong program status
    #[error("Program {program_id} is {status}, expected {expected}")]
    InvalidState {
        program_id: u64,
        status: String,
        expected: String,
    },

    /// Pool or program cannot cover the requested amount
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: u64, available: u64 },

    /// Custody backend declined a transfer
    #[error("Custody backend declined {direction} transfer of {amount}")]
    TransferFailed { direction: String, amount: u64 },

    /// Amount overflow during arithmetic
    #[error("Amount overflow during arithmetic operation")]
    AmountOverflow,

    /// Amount underflow during arithmetic
    #[error("Amount underflow during arithmetic operation")]
    AmountUnderflow,
}

impl LedgerError {
    /// Create an unauthorized error
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Get an error code for API and CLI surfaces
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::ProgramNotFound { .. } => "PROGRAM_NOT_FOUND",
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::InvalidState { .. } => "INVALID_STATE",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::TransferFailed { .. } => "TRANSFER_FAILED",
            Self::AmountOverflow => "AMOUNT_OVERFLOW",
            Self::AmountUnderflow => "AMOUNT_UNDERFLOW",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = LedgerError::InsufficientFunds {
            requested: 1000,
            available: 600,
        };
        assert_eq!(err.error_code(), "INSUFFICIENT_FUNDS");
    }

    #[test]
    fn test_error_messages() {
        let err = LedgerError::invalid_argument("name", "must not be empty");
        assert_eq!(err.to_string(), "Invalid argument: name - must not be empty");

        let err = LedgerError::ProgramNotFound { program_id: 7 };
        assert_eq!(err.to_string(), "Program 7 not found");
    }
}
