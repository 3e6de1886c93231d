//! Canonical wire forms for calendar values.
//!
//! Dates cross the boundary as `YYYY-MM-DD` and clock times as 24-hour
//! `HH:mm`. Input times may also carry seconds (`HH:mm:ss`); output is
//! always `HH:mm`.

use chrono::{Local, NaiveDate, NaiveTime, Weekday};

use crate::error::ParseError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";
const TIME_FORMAT_SECONDS: &str = "%H:%M:%S";

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ParseError::InvalidDate(value.to_string()))
}

/// Parse an `HH:mm` (or `HH:mm:ss`) clock time.
pub fn parse_time(value: &str) -> Result<NaiveTime, ParseError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, TIME_FORMAT_SECONDS))
        .map_err(|_| ParseError::InvalidTime(value.to_string()))
}

/// Parse a weekday name. Accepts `MON`, `Mon`, `MONDAY`, `monday`.
pub fn parse_weekday(value: &str) -> Result<Weekday, ParseError> {
    value
        .trim()
        .parse::<Weekday>()
        .map_err(|_| ParseError::InvalidWeekday(value.to_string()))
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// The caller's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Serde adapter for a required `HH:mm` field.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for an optional `HH:mm` field.
pub mod hhmm_opt {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => serializer.serialize_str(&super::format_time(*t)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => super::parse_time(s).map(Some).map_err(serde::de::Error::custom),
        }
    }
}

/// Serde adapter for weekday lists, tolerant of `MON` / `MONDAY` / `Mon`.
pub mod weekdays {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(days: &[Weekday], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(days.iter().map(|d| d.to_string().to_uppercase()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Weekday>, D::Error> {
        let raw = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();
        raw.iter()
            .map(|s| super::parse_weekday(s).map_err(serde::de::Error::custom))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_forms() {
        assert_eq!(
            parse_date("2025-01-10").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
        );
        assert_eq!(parse_time("09:30").unwrap(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(parse_time("09:30:00").unwrap(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    }

    #[test]
    fn rejects_ambiguous_forms() {
        assert_eq!(
            parse_date("10/01/2025"),
            Err(ParseError::InvalidDate("10/01/2025".to_string()))
        );
        assert!(parse_time("9.30am").is_err());
        assert!(parse_time("25:00").is_err());
    }

    #[test]
    fn weekday_names_accept_short_and_long_forms() {
        assert_eq!(parse_weekday("MON").unwrap(), Weekday::Mon);
        assert_eq!(parse_weekday("Wednesday").unwrap(), Weekday::Wed);
        assert_eq!(parse_weekday("FRIDAY").unwrap(), Weekday::Fri);
        assert!(parse_weekday("Funday").is_err());
    }

    #[test]
    fn formats_without_seconds() {
        assert_eq!(format_time(NaiveTime::from_hms_opt(7, 5, 0).unwrap()), "07:05");
    }
}
