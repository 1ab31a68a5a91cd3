//! Wire format for timestamps: `YYYY-MM-DD HH:MM:SS`, always UTC.
//!
//! The module doubles as a `serde(with = ...)` adapter for
//! `DateTime<Utc>` fields; [`option`] covers nullable fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use thiserror::Error;

/// `strftime` pattern used for every serialised timestamp.
pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Error returned when a timestamp string does not match [`FORMAT`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid timestamp '{0}', expected YYYY-MM-DD HH:MM:SS")]
pub struct ParseTimestampError(pub String);

/// Parses a `YYYY-MM-DD HH:MM:SS` string as a UTC timestamp.
///
/// # Errors
///
/// Returns [`ParseTimestampError`] when the value does not match [`FORMAT`].
pub fn parse(value: &str) -> Result<DateTime<Utc>, ParseTimestampError> {
    NaiveDateTime::parse_from_str(value.trim(), FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| ParseTimestampError(value.to_owned()))
}

/// Parses the lower bound of a date range.
///
/// Accepts a full timestamp or a bare `YYYY-MM-DD` date, which resolves to
/// the start of that day.
///
/// # Errors
///
/// Returns [`ParseTimestampError`] when neither form matches.
pub fn parse_range_start(value: &str) -> Result<DateTime<Utc>, ParseTimestampError> {
    parse_with_default_time(value, NaiveTime::MIN)
}

/// Parses the inclusive upper bound of a date range.
///
/// A bare `YYYY-MM-DD` date resolves to `23:59:59` on that day.
///
/// # Errors
///
/// Returns [`ParseTimestampError`] when neither form matches.
pub fn parse_range_end(value: &str) -> Result<DateTime<Utc>, ParseTimestampError> {
    let end_of_day =
        NaiveTime::from_hms_opt(23, 59, 59).ok_or_else(|| ParseTimestampError(value.to_owned()))?;
    parse_with_default_time(value, end_of_day)
}

fn parse_with_default_time(
    value: &str,
    default_time: NaiveTime,
) -> Result<DateTime<Utc>, ParseTimestampError> {
    parse(value).or_else(|_| {
        NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
            .map(|date| date.and_time(default_time).and_utc())
            .map_err(|_| ParseTimestampError(value.to_owned()))
    })
}

/// Formats a timestamp using [`FORMAT`].
#[must_use]
pub fn format(value: &DateTime<Utc>) -> String {
    value.format(FORMAT).to_string()
}

/// Serialises a timestamp using [`FORMAT`].
///
/// # Errors
///
/// Propagates serializer failures.
pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(FORMAT))
}

/// Deserialises a timestamp written with [`FORMAT`].
///
/// # Errors
///
/// Returns a deserializer error when the string does not match [`FORMAT`].
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

/// `serde(with = ...)` adapter for optional timestamps.
pub mod option {
    use super::{FORMAT, parse};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialises an optional timestamp, writing `null` when absent.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let Some(timestamp) = value else {
            return serializer.serialize_none();
        };
        serializer.collect_str(&timestamp.format(FORMAT))
    }

    /// Deserialises an optional timestamp.
    ///
    /// # Errors
    ///
    /// Returns a deserializer error when a present value is malformed.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}
