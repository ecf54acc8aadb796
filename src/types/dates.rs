use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::types::errors::DateError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a ledger date. Datetime values keep only their calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, DateError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(DateError::Empty("Value is an empty string".to_string()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Ok(date);
    }

    DATE_TIME_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|date_time| date_time.date())
        .ok_or_else(|| DateError::Unrecognised(value.to_string()))
}

/// Serde adapter for nullable date columns.
///
/// An unparseable value is treated the same as a missing one so a single bad
/// cell never drops the whole row.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if value.trim().is_empty() {
        return Ok(None);
    }

    match parse_date(&value) {
        Ok(date) => Ok(Some(date)),
        Err(error) => {
            warn!("{error}, treating as missing");
            Ok(None)
        }
    }
}
