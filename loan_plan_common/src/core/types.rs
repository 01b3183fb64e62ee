use crate::format::{money, timestamp};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// **One month of an amortization schedule**
///
/// All amounts are already rounded to cents.
///
/// Field order is the order of keys in the JSON response.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRecord {
    /// Interest and principal together
    #[serde(with = "money")]
    pub borrower_payment_amount: Decimal,

    #[serde(with = "timestamp")]
    pub date: DateTime<Utc>,

    /// Balance at the start of the period
    #[serde(with = "money")]
    pub initial_outstanding_principal: Decimal,

    #[serde(with = "money")]
    pub interest: Decimal,

    #[serde(with = "money")]
    pub principal: Decimal,

    /// Balance at the end of the period
    #[serde(with = "money")]
    pub remaining_outstanding_principal: Decimal,
}
