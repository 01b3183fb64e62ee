use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::timestamp;

/// **Body of a `POST /generate_plan` request**
///
/// Decimals travel as strings, e.g. `"5000"`, and the start date
/// as `YYYY-MM-DDTHH:MM:SSZ`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    pub loan_amount: Decimal,
    pub nominal_rate: Decimal,
    pub duration: i64,
    #[serde(with = "timestamp")]
    pub start_date: DateTime<Utc>,
}
