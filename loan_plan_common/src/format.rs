//! Wire formats shared by the web service and its clients
//!
//! Monetary amounts are written as decimal strings without trailing zeros,
//! and timestamps as `YYYY-MM-DDTHH:MM:SSZ`.

/// Output layout of every timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// **Monetary amounts as normalized decimal strings**
///
/// `5000.00` is written as `"5000"`, `17.50` as `"17.5"`, and zero as `"0"`.
///
/// Reading accepts both strings and JSON numbers.
pub mod money {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&amount.normalize().to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        <Decimal as Deserialize>::deserialize(deserializer)
    }
}

/// **UTC timestamps**
///
/// Any RFC 3339 timestamp is accepted and converted to UTC;
/// output always uses [`TIMESTAMP_FORMAT`](super::TIMESTAMP_FORMAT).
pub mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(super::TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }

    /// **Parses an RFC 3339 timestamp into UTC**
    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        Ok(DateTime::parse_from_rfc3339(raw.trim())?.with_timezone(&Utc))
    }
}
