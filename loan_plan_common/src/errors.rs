use thiserror::Error;

/// **An application-specific error type**
///
/// Neither variant is transient: the computation is deterministic,
/// so a failed request fails the same way every time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlanError {
    /// The request was decoded, but its values can't produce a plan.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The request couldn't be decoded into a loan request at all.
    #[error("malformed request: {0}")]
    MalformedRequest(String),
}

pub const LOAN_AMOUNT_NOT_POSITIVE_MSG: &str = "Loan amount must be greater than zero";
pub const DURATION_NOT_POSITIVE_MSG: &str = "Duration must be at least one month";
pub const DURATION_TOO_LONG_MSG: &str = "Duration exceeds the maximum number of months";
pub const PAYMENT_NOT_FINITE_MSG: &str = "Monthly payment is not a finite amount";
