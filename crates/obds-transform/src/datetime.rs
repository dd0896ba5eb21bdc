//! Registry date normalization.
//!
//! oBDS exports dates as `DD.MM.YYYY` and encode unknown components as
//! `00`. Two partial forms are repaired before parsing:
//!
//! | input        | resolved     |
//! |--------------|--------------|
//! | `00.00.YYYY` | `01.07.YYYY` |
//! | `00.MM.YYYY` | `15.MM.YYYY` |
//!
//! Every other value must be a real calendar date in strict `DD.MM.YYYY`
//! form. The result is UTC midnight of that day, carrying day precision so
//! consumers never read meaning into the time of day.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize, Serializer};

use crate::error::DateError;

const ADT_DATE_FORMAT: &str = "%d.%m.%Y";

/// Precision of a normalized timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePrecision {
    Day,
}

/// A timestamp at UTC midnight whose time of day carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayPrecisionDateTime {
    instant: DateTime<Utc>,
}

impl DayPrecisionDateTime {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            instant: date.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.instant.date_naive()
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub const fn precision(&self) -> DatePrecision {
        DatePrecision::Day
    }

    /// FHIR `dateTime` rendering at day precision (`YYYY-MM-DD`).
    pub fn to_fhir_string(&self) -> String {
        self.date().format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for DayPrecisionDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fhir_string())
    }
}

impl Serialize for DayPrecisionDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_fhir_string())
    }
}

fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// `MM.YYYY`
fn is_month_year(value: &str) -> bool {
    value.len() == 7 && value.as_bytes()[2] == b'.' && all_digits(&value[..2]) && all_digits(&value[3..])
}

fn is_strict_adt_shape(value: &str) -> bool {
    value.len() == 10
        && value.as_bytes()[2] == b'.'
        && value.as_bytes()[5] == b'.'
        && all_digits(&value[..2])
        && all_digits(&value[3..5])
        && all_digits(&value[6..])
}

/// Substitutes defaults for unknown day and month components.
fn repair_unknown_components(value: &str) -> Cow<'_, str> {
    let Some(rest) = value.strip_prefix("00.") else {
        return Cow::Borrowed(value);
    };
    if let Some(year) = rest.strip_prefix("00.")
        && year.len() == 4
        && all_digits(year)
    {
        return Cow::Owned(format!("01.07.{year}"));
    }
    if is_month_year(rest) {
        return Cow::Owned(format!("15.{rest}"));
    }
    Cow::Borrowed(value)
}

/// Normalizes a registry date.
///
/// Returns `Ok(None)` for absent, empty or single-space input.
///
/// # Errors
///
/// Returns [`DateError`] when the value is neither blank nor a valid
/// `DD.MM.YYYY` date after repairing unknown components.
pub fn normalize_adt_date(value: Option<&str>) -> Result<Option<DayPrecisionDateTime>, DateError> {
    let Some(value) = value else {
        return Ok(None);
    };
    if value.is_empty() || value == " " {
        return Ok(None);
    }

    let repaired = repair_unknown_components(value);
    if !is_strict_adt_shape(&repaired) {
        return Err(DateError::Pattern {
            value: value.to_string(),
        });
    }
    let date = NaiveDate::parse_from_str(&repaired, ADT_DATE_FORMAT).map_err(|source| {
        DateError::Calendar {
            value: value.to_string(),
            source,
        }
    })?;
    Ok(Some(DayPrecisionDateTime::from_date(date)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repair_leaves_complete_dates_alone() {
        assert_eq!(repair_unknown_components("12.03.2020"), "12.03.2020");
        assert_eq!(repair_unknown_components("00.00.2022"), "01.07.2022");
        assert_eq!(repair_unknown_components("00.04.2022"), "15.04.2022");
        assert_eq!(repair_unknown_components("00.4.2022"), "00.4.2022");
    }

    #[test]
    fn strict_shape_rejects_short_components() {
        assert!(is_strict_adt_shape("01.02.2003"));
        assert!(!is_strict_adt_shape("1.02.2003"));
        assert!(!is_strict_adt_shape("01-02-2003"));
        assert!(!is_strict_adt_shape("01.02.03"));
        assert!(!is_strict_adt_shape("01.02.+203"));
    }

    #[test]
    fn value_is_midnight_utc() {
        let value = normalize_adt_date(Some("05.11.2019")).unwrap().unwrap();
        assert_eq!(value.instant().to_rfc3339(), "2019-11-05T00:00:00+00:00");
        assert_eq!(value.precision(), DatePrecision::Day);
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            "\"2019-11-05\""
        );
    }
}
