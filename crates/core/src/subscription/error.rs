//! Subscription error types.
//!
//! Trial-day computation fails closed: a missing or unparseable signup
//! timestamp never grants access. The legacy code swallowed these failures
//! and left tenants stuck in whatever state the bad row implied.

use rust_decimal::Decimal;
use thiserror::Error;
use trestle_shared::AppError;

/// Errors that can occur during subscription computations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptionError {
    /// Tenant has no signup date on record; trial math cannot proceed.
    #[error("Tenant has no signup date on record")]
    MissingSignupDate,

    /// The stored signup date could not be parsed as `YYYY-MM-DD`.
    #[error("Malformed signup date: {value:?}")]
    MalformedSignupDate {
        /// The stored date text that failed to parse.
        value: String,
    },

    /// Free lifetime access was claimed below the 100% discount threshold.
    #[error("Referral discount is {discount_percent}%, below the free access threshold")]
    ThresholdNotReached {
        /// The tenant's current discount percent.
        discount_percent: Decimal,
    },
}

impl SubscriptionError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingSignupDate => "MISSING_SIGNUP_DATE",
            Self::MalformedSignupDate { .. } => "MALFORMED_SIGNUP_DATE",
            Self::ThresholdNotReached { .. } => "THRESHOLD_NOT_REACHED",
        }
    }
}

impl From<SubscriptionError> for AppError {
    fn from(err: SubscriptionError) -> Self {
        match err {
            SubscriptionError::MissingSignupDate | SubscriptionError::MalformedSignupDate { .. } => {
                Self::Validation(err.to_string())
            }
            SubscriptionError::ThresholdNotReached { .. } => Self::BusinessRule(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_app_error_conversion() {
        let err = AppError::from(SubscriptionError::MissingSignupDate);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");

        let err = AppError::from(SubscriptionError::ThresholdNotReached {
            discount_percent: dec!(50),
        });
        assert_eq!(err.error_code(), "BUSINESS_RULE_VIOLATION");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SubscriptionError::MissingSignupDate.error_code(),
            "MISSING_SIGNUP_DATE"
        );
        assert_eq!(
            SubscriptionError::MalformedSignupDate {
                value: "yesterday".to_string()
            }
            .error_code(),
            "MALFORMED_SIGNUP_DATE"
        );
        assert_eq!(
            SubscriptionError::ThresholdNotReached {
                discount_percent: dec!(90)
            }
            .error_code(),
            "THRESHOLD_NOT_REACHED"
        );
    }

    #[test]
    fn test_error_display() {
        let err = SubscriptionError::ThresholdNotReached {
            discount_percent: dec!(40),
        };
        assert_eq!(
            err.to_string(),
            "Referral discount is 40%, below the free access threshold"
        );
    }
}
