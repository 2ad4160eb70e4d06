use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::db::models::Mood;

/// Fixed-width RFC 3339 so that `ORDER BY timestamp` on the TEXT column is chronological.
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_mood(value: &str) -> Result<Mood> {
    value
        .parse::<Mood>()
        .with_context(|| "failed to parse mood column")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formatted_datetimes_sort_chronologically() {
        let whole = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let later = whole + chrono::Duration::milliseconds(250);
        let a = format_datetime(whole);
        let b = format_datetime(later);
        assert_eq!(a.len(), b.len());
        assert!(a < b);
        assert_eq!(parse_datetime(&b, "timestamp").unwrap(), later);
    }

    #[test]
    fn unknown_mood_column_is_an_error() {
        assert!(parse_mood("Sad").is_err());
        assert_eq!(parse_mood("Happy").unwrap(), Mood::Positive);
    }
}
