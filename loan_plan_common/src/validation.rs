//! Preconditions of a loan plan
//!
//! The engine checks these itself; front ends call them to reject early.

use crate::errors::{
    PlanError, DURATION_NOT_POSITIVE_MSG, DURATION_TOO_LONG_MSG, LOAN_AMOUNT_NOT_POSITIVE_MSG,
};
use crate::requests::LoanRequest;
use rust_decimal::Decimal;

/// Longest schedule we compute, in months (100 years).
pub const MAX_DURATION_MONTHS: i64 = 1200;

/// **Basic input validation for a loan amount**
///
/// Checks for:
/// - Zero or a negative amount.
pub fn validate_loan_amount(loan_amount: Decimal) -> Result<(), PlanError> {
    if loan_amount <= Decimal::ZERO {
        return Err(PlanError::InvalidInput(format!(
            "{}; got {}",
            LOAN_AMOUNT_NOT_POSITIVE_MSG, loan_amount
        )));
    }

    Ok(())
}

/// **Basic input validation for a duration**
///
/// Checks for:
/// - Zero or a negative number of months;
/// - More than [`MAX_DURATION_MONTHS`].
pub fn validate_duration(duration: i64) -> Result<(), PlanError> {
    if duration <= 0 {
        return Err(PlanError::InvalidInput(format!(
            "{}; got {}",
            DURATION_NOT_POSITIVE_MSG, duration
        )));
    }

    if duration > MAX_DURATION_MONTHS {
        return Err(PlanError::InvalidInput(format!(
            "{} ({}); got {}",
            DURATION_TOO_LONG_MSG, MAX_DURATION_MONTHS, duration
        )));
    }

    Ok(())
}

/// **Validates a whole request**
pub fn validate_request(request: &LoanRequest) -> Result<(), PlanError> {
    validate_loan_amount(request.loan_amount)?;
    validate_duration(request.duration)
}
