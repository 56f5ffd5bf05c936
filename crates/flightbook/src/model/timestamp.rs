//! Minute-precision timestamps.
//!
//! Flights store departure and arrival as `YYYY-MM-DD HH:MM` strings, both on
//! disk and at the operator prompt. Search takes a bare `YYYY-MM-DD` date.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};

/// Format used for stored and entered timestamps.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format used for date filters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD HH:MM` timestamp.
///
/// # Errors
///
/// Returns [`Error::Format`] if the text does not match the format.
pub fn parse_datetime(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
        .map_err(|e| Error::format(format!("expected YYYY-MM-DD HH:MM, got '{text}' ({e})")))
}

/// Parse a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns [`Error::Format`] if the text does not match the format.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|e| Error::format(format!("expected YYYY-MM-DD, got '{text}' ({e})")))
}

/// Render a timestamp the way it is stored.
#[must_use]
pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Serde adapter for `#[serde(with = "...")]` on `NaiveDateTime` fields.
pub mod minutes {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::DATETIME_FORMAT;

    /// Serialize as `YYYY-MM-DD HH:MM`.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(DATETIME_FORMAT))
    }

    /// Deserialize from `YYYY-MM-DD HH:MM`.
    ///
    /// # Errors
    ///
    /// Fails if the value is not a string in that format.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text, DATETIME_FORMAT).map_err(de::Error::custom)
    }
}
