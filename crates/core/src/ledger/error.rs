//! Ledger error types.
//!
//! The legacy system silently dropped rows whose dates failed to parse; these
//! errors make those failures observable so callers can fail loudly or
//! skip-and-report.

use rust_decimal::Decimal;
use thiserror::Error;
use trestle_shared::AppError;

/// Errors that can occur while building a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A row's date could not be parsed as `YYYY-MM-DD`.
    #[error("Malformed date: {value:?}")]
    MalformedDate {
        /// The stored date text that failed to parse.
        value: String,
    },

    /// Defensive check failed: the final running balance does not equal
    /// `charged - collected`. Indicates a merge bug, not bad input.
    #[error("Inconsistent aggregate: running balance {running} != charged - collected {expected}")]
    InconsistentAggregate {
        /// Final running balance.
        running: Decimal,
        /// Expected balance (`charged - collected`).
        expected: Decimal,
    },
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedDate { .. } => "MALFORMED_DATE",
            Self::InconsistentAggregate { .. } => "INCONSISTENT_AGGREGATE",
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::MalformedDate { .. } => Self::Validation(err.to_string()),
            LedgerError::InconsistentAggregate { .. } => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_app_error_conversion() {
        let err = AppError::from(LedgerError::MalformedDate {
            value: "garbage".to_string(),
        });
        assert_eq!(err.error_code(), "VALIDATION_ERROR");

        let err = AppError::from(LedgerError::InconsistentAggregate {
            running: dec!(1),
            expected: dec!(2),
        });
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_error_codes() {
        let err = LedgerError::MalformedDate {
            value: "01/15/2024".to_string(),
        };
        assert_eq!(err.error_code(), "MALFORMED_DATE");

        let err = LedgerError::InconsistentAggregate {
            running: dec!(600),
            expected: dec!(500),
        };
        assert_eq!(err.error_code(), "INCONSISTENT_AGGREGATE");
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::MalformedDate {
            value: "not-a-date".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed date: \"not-a-date\"");
    }
}
